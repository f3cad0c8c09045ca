//! Rothermel Surface Fire Spread Model (1972)
//!
//! Multi-class form of the Rothermel model as laid out by Andrews (2018). Dead fuel
//! (1-h, 10-h, 100-h) and live fuel (herbaceous, woody) are weighted by surface area
//! and combined into a single reaction intensity, heat sink and wind/slope response.
//! All intermediate quantities are imperial (ft, lb, Btu, min); inputs and outputs
//! are converted at the boundary.
//!
//! # References
//! - Rothermel, R.C. (1972). "A mathematical model for predicting fire spread in wildland fuels."
//!   USDA Forest Service Research Paper INT-115.
//! - Albini, F.A. (1976). "Estimating wildfire behavior and effects."
//!   USDA Forest Service General Technical Report INT-30.
//! - Andrews, P.L. (2018). "The Rothermel surface fire spread model and associated developments."
//!   USDA Forest Service General Technical Report RMRS-GTR-371.

use crate::core_types::fuel::FuelModel;
use crate::core_types::units::{MetersPerMinute, MetersPerSecond, Radians};
use crate::core_types::weather::{MoistureState, WindState};
use crate::error::{Error, Result};

/// Surface-area weighting of one fuel category (dead or live)
#[derive(Debug, Clone, Copy)]
struct Category<const N: usize> {
    /// Size-class weighting factors f_ij
    weights: [f64; N],
    /// Total surface area a_i
    surface_area: f64,
    /// Characteristic SAV ratio σ_i
    sav_ratio: f64,
}

impl<const N: usize> Category<N> {
    fn new(sav: [f64; N], load: [f64; N], particle_density: f64) -> Self {
        let areas = std::array::from_fn::<f64, N, _>(|j| sav[j] * load[j] / particle_density);
        let surface_area: f64 = areas.iter().sum();
        let weights = std::array::from_fn(|j| {
            if surface_area > 0.0 {
                areas[j] / surface_area
            } else {
                0.0
            }
        });
        let sav_ratio = (0..N).map(|j| weights[j] * sav[j]).sum();
        Category {
            weights,
            surface_area,
            sav_ratio,
        }
    }

    fn weighted(&self, values: [f64; N]) -> f64 {
        (0..N).map(|j| self.weights[j] * values[j]).sum()
    }

    fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Σ_j f_ij · exp(-138/σ_ij) · Q_ij, skipping classes without surface area
    fn heat_sink_term(&self, sav: [f64; N], moisture: [f64; N]) -> f64 {
        (0..N)
            .filter(|&j| sav[j] > 0.0)
            .map(|j| self.weights[j] * (-138.0 / sav[j]).exp() * heat_of_preignition(moisture[j]))
            .sum()
    }
}

/// Heat of pre-ignition Q_ig (Btu/lb)
///
/// # Formula
/// ```text
/// Q_ig = 250 + 1116 × M
/// ```
#[inline]
fn heat_of_preignition(moisture: f64) -> f64 {
    250.0 + 1116.0 * moisture
}

/// Moisture damping coefficient η_M for a moisture to extinction ratio
///
/// # Formula
/// ```text
/// r = min(1, M / M_x)
/// η_M = 1 − 2.59 r + 5.11 r² − 3.52 r³
/// ```
fn moisture_damping(moisture: f64, extinction: f64) -> f64 {
    let ratio = if extinction > 0.0 {
        (moisture / extinction).min(1.0)
    } else {
        1.0
    };
    // the cubic is zero at r = 1 and can round just below it
    (1.0 - 2.59 * ratio + 5.11 * ratio.powi(2) - 3.52 * ratio.powi(3)).max(0.0)
}

/// Live fuel moisture of extinction
///
/// # Formula
/// ```text
/// W       = Σ w_dead · exp(−138/σ) / Σ w_live · exp(−500/σ)
/// Mf_dead = Σ M · w_dead · exp(−138/σ) / Σ w_dead · exp(−138/σ)
/// Mx_live = max(2.9 W (1 − Mf_dead / Mx_dead) − 0.226, Mx_dead)
/// ```
fn live_moisture_of_extinction(fuel: &FuelModel, moisture: &MoistureState) -> f64 {
    let dead_sav = fuel.sav_ratio.dead();
    let dead_load = fuel.fuel_load.dead();
    let live_sav = fuel.sav_ratio.live();
    let live_load = fuel.fuel_load.live();

    let mut fine_dead = 0.0;
    let mut fine_dead_moisture = 0.0;
    for j in 0..3 {
        if dead_sav[j] > 0.0 {
            let weighted = dead_load[j] * (-138.0 / dead_sav[j]).exp();
            fine_dead += weighted;
            fine_dead_moisture += moisture.dead[j] * weighted;
        }
    }
    let fine_live: f64 = (0..2)
        .filter(|&j| live_sav[j] > 0.0)
        .map(|j| live_load[j] * (-500.0 / live_sav[j]).exp())
        .sum();

    let dead_to_live = if fine_live > 0.0 {
        fine_dead / fine_live
    } else {
        0.0
    };
    let mf_dead = if fine_dead > 0.0 {
        fine_dead_moisture / fine_dead
    } else {
        0.0
    };

    let dead_extinction = fuel.moisture_of_extinction;
    (2.9 * dead_to_live * (1.0 - mf_dead / dead_extinction) - 0.226).max(dead_extinction)
}

/// Wind- and slope-independent terms of the spread equation for a fuel bed
///
/// Everything in here depends only on the fuel model and its moisture, so it is
/// shared between the scalar and vector wind forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelBedTerms {
    /// Characteristic SAV ratio σ (ft²/ft³)
    pub sav_ratio: f64,
    /// Packing ratio β
    pub packing_ratio: f64,
    /// Optimum packing ratio β_op
    pub optimum_packing_ratio: f64,
    /// Propagating flux ratio ξ
    pub propagating_flux_ratio: f64,
    /// Reaction intensity I_R (Btu/ft²/min)
    pub reaction_intensity: f64,
    /// Heat sink ρ_b ε Q_ig (Btu/ft³)
    pub heat_sink: f64,
    /// Wind factor coefficient C
    pub wind_c: f64,
    /// Wind factor exponent B
    pub wind_b: f64,
    /// Wind factor exponent E
    pub wind_e: f64,
}

impl FuelBedTerms {
    /// No-wind, no-slope rate of spread R₀ (ft/min)
    ///
    /// # Formula
    /// ```text
    /// R₀ = I_R × ξ / (ρ_b ε Q_ig)
    /// ```
    pub fn base_rate(&self) -> f64 {
        self.reaction_intensity * self.propagating_flux_ratio / self.heat_sink
    }

    /// Slope factor φ_s
    ///
    /// # Formula
    /// ```text
    /// φ_s = 5.275 β^−0.3 tan²(slope)
    /// ```
    pub fn slope_factor(&self, slope: Radians) -> f64 {
        5.275 * self.packing_ratio.powf(-0.3) * slope.tan().powi(2)
    }

    /// Wind factor φ_w for a midflame wind, capped at the maximum reliable wind
    ///
    /// # Formula
    /// ```text
    /// U   = min(U, 96.8 I_R^(1/3))      (ft/min)
    /// φ_w = C U^B (β/β_op)^−E
    /// ```
    pub fn wind_factor(&self, wind: MetersPerSecond) -> f64 {
        let wind_fpm = wind.to_feet_per_minute().max(0.0);
        let limited = wind_fpm.min(self.wind_limit());
        self.wind_c
            * limited.powf(self.wind_b)
            * (self.packing_ratio / self.optimum_packing_ratio).powf(-self.wind_e)
    }

    /// Maximum reliable wind speed (ft/min)
    pub fn wind_limit(&self) -> f64 {
        96.8 * self.reaction_intensity.powf(1.0 / 3.0)
    }

    /// Wind speed that alone would produce the given wind factor
    ///
    /// # Formula
    /// ```text
    /// U_e = (φ_e (β/β_op)^E / C)^(1/B)
    /// ```
    pub fn effective_wind_speed(&self, effective_wind_factor: f64) -> MetersPerSecond {
        if effective_wind_factor <= 0.0 {
            return MetersPerSecond::ZERO;
        }
        let ratio = (self.packing_ratio / self.optimum_packing_ratio).powf(self.wind_e);
        let fpm = (effective_wind_factor * ratio / self.wind_c).powf(1.0 / self.wind_b);
        MetersPerSecond::from_feet_per_minute(fpm)
    }
}

/// Evaluate steps 1 to 19 of the multi-class model for a burnable fuel model
///
/// Rejects fuel beds that would make the spread equation meaningless: no surface
/// area, no depth, or a heat sink that is not strictly positive and finite.
pub fn fuel_bed_terms(fuel: &FuelModel, moisture: &MoistureState) -> Result<FuelBedTerms> {
    if fuel.particle_density <= 0.0 || !fuel.particle_density.is_finite() {
        return Err(Error::invalid_fuel(&fuel.code, "particle density must be positive"));
    }
    if fuel.fuel_bed_depth <= 0.0 || !fuel.fuel_bed_depth.is_finite() {
        return Err(Error::invalid_fuel(&fuel.code, "fuel bed depth must be positive"));
    }
    if fuel.moisture_of_extinction <= 0.0 {
        return Err(Error::invalid_fuel(
            &fuel.code,
            "dead fuel moisture of extinction must be positive",
        ));
    }

    let dead_sav = fuel.sav_ratio.dead();
    let live_sav = fuel.sav_ratio.live();
    let dead_load = fuel.fuel_load.dead();
    let live_load = fuel.fuel_load.live();

    // 1-4. Surface-area weighting
    let dead = Category::new(dead_sav, dead_load, fuel.particle_density);
    let live = Category::new(live_sav, live_load, fuel.particle_density);
    let total_area = dead.surface_area + live.surface_area;
    if total_area <= 0.0 || !total_area.is_finite() {
        return Err(Error::invalid_fuel(&fuel.code, "fuel bed has no surface area"));
    }
    let f_dead = dead.surface_area / total_area;
    let f_live = live.surface_area / total_area;
    let sigma = f_dead * dead.sav_ratio + f_live * live.sav_ratio;

    // 5. Bulk density and packing ratio
    let bulk_density = fuel.fuel_load.total() / fuel.fuel_bed_depth;
    let beta = bulk_density / fuel.particle_density;

    // 6. Propagating flux ratio
    let xi = ((0.792 + 0.681 * sigma.sqrt()) * (0.1 + beta)).exp() / (192.0 + 0.2595 * sigma);

    // 7-8. Optimum packing ratio and reaction velocity
    let beta_op = 3.348 * sigma.powf(-0.8189);
    let a_exp = 133.0 * sigma.powf(-0.7913);
    let sigma_15 = sigma.powf(1.5);
    let gamma_max = sigma_15 / (495.0 + 0.0594 * sigma_15);
    let relative_packing = beta / beta_op;
    let gamma = gamma_max * relative_packing.powf(a_exp) * (a_exp * (1.0 - relative_packing)).exp();

    // 9. Net fuel loads
    let net = 1.0 - fuel.total_mineral_content;
    let net_load_dead = dead.weighted(dead_load) * net;
    let net_load_live = live_load.iter().sum::<f64>() * net;

    // 10-11. Heat content and moisture per category
    let heat_dead = fuel.heat_content * dead.weight_sum();
    let heat_live = fuel.heat_content * live.weight_sum();
    let moisture_dead = dead.weighted(moisture.dead);
    let moisture_live = live.weighted(moisture.live);

    // 12-14. Damping coefficients
    let live_extinction = live_moisture_of_extinction(fuel, moisture);
    let eta_m_dead = moisture_damping(moisture_dead, fuel.moisture_of_extinction);
    let eta_m_live = moisture_damping(moisture_live, live_extinction);
    let eta_s = (0.174 * fuel.effective_mineral_content.powf(-0.19)).min(1.0);

    // 15. Reaction intensity
    let reaction_intensity = gamma
        * (net_load_dead * heat_dead * eta_m_dead * eta_s
            + net_load_live * heat_live * eta_m_live * eta_s);

    // 16-17. Heat sink
    let heat_sink = bulk_density
        * (f_dead * dead.heat_sink_term(dead_sav, moisture.dead)
            + f_live * live.heat_sink_term(live_sav, moisture.live));
    if heat_sink <= 0.0 || !heat_sink.is_finite() {
        return Err(Error::invalid_fuel(
            &fuel.code,
            format!("heat sink must be positive and finite, got {heat_sink}"),
        ));
    }

    // 18. Wind factor coefficients
    let wind_c = 7.47 * (-0.133 * sigma.powf(0.55)).exp();
    let wind_b = 0.02526 * sigma.powf(0.54);
    let wind_e = 0.715 * (-3.59e-4 * sigma).exp();

    Ok(FuelBedTerms {
        sav_ratio: sigma,
        packing_ratio: beta,
        optimum_packing_ratio: beta_op,
        propagating_flux_ratio: xi,
        reaction_intensity,
        heat_sink,
        wind_c,
        wind_b,
        wind_e,
    })
}

/// Head-fire spread when wind and slope are combined as vectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalSpread {
    /// Maximum (head) rate of spread
    pub rate: MetersPerMinute,
    /// Angle of the head direction relative to upslope
    pub direction: Radians,
    /// Wind speed equivalent to the combined wind and slope effect
    pub effective_wind: MetersPerSecond,
}

impl DirectionalSpread {
    pub const ZERO: DirectionalSpread = DirectionalSpread {
        rate: MetersPerMinute::ZERO,
        direction: Radians::ZERO,
        effective_wind: MetersPerSecond::ZERO,
    };
}

/// Result of [`compute`], shaped by the kind of wind supplied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpreadOutput {
    /// Wind blowing upslope: only the rate is meaningful
    Aligned(MetersPerMinute),
    /// Wind at an angle to the slope
    Directional(DirectionalSpread),
}

impl SpreadOutput {
    pub fn rate(&self) -> MetersPerMinute {
        match self {
            SpreadOutput::Aligned(rate) => *rate,
            SpreadOutput::Directional(spread) => spread.rate,
        }
    }
}

/// Rate of spread with the wind blowing straight upslope (m/min)
///
/// # Formula
/// ```text
/// R = I_R × ξ × (1 + φ_w + φ_s) / (ρ_b ε Q_ig)
/// ```
///
/// The non-burnable sentinel yields zero without evaluating the fuel bed.
pub fn rate_of_spread_aligned(
    fuel: &FuelModel,
    moisture: &MoistureState,
    wind_speed: MetersPerSecond,
    slope: Radians,
) -> Result<MetersPerMinute> {
    if fuel.is_non_burnable() {
        return Ok(MetersPerMinute::ZERO);
    }
    let terms = fuel_bed_terms(fuel, moisture)?;
    let rate = terms.base_rate() * (1.0 + terms.wind_factor(wind_speed) + terms.slope_factor(slope));
    Ok(MetersPerMinute::from_feet_per_minute(rate.max(0.0)))
}

/// Head rate, heading and effective wind for wind at an angle to upslope
///
/// `wind_angle` is measured from the upslope direction. Wind and slope are added as
/// vectors (Andrews 2018, pp. 85-88):
///
/// # Formula
/// ```text
/// d_s = R₀ φ_s,  d_w = R₀ φ_w
/// d_h = √((d_s + d_w cos θ)² + (d_w sin θ)²)
/// R_max = R₀ + d_h
/// α = atan2(d_w sin θ, d_s + d_w cos θ)
/// φ_e = R_max / R₀ − 1
/// ```
///
/// A fuel bed too wet to burn (R₀ = 0) gives a zero rate, zero heading and zero
/// effective wind.
pub fn rate_of_spread(
    fuel: &FuelModel,
    moisture: &MoistureState,
    wind_speed: MetersPerSecond,
    wind_angle: Radians,
    slope: Radians,
) -> Result<DirectionalSpread> {
    if fuel.is_non_burnable() {
        return Ok(DirectionalSpread::ZERO);
    }
    let terms = fuel_bed_terms(fuel, moisture)?;
    let base = terms.base_rate();
    if base <= 0.0 || !base.is_finite() {
        return Ok(DirectionalSpread::ZERO);
    }

    let d_s = base * terms.slope_factor(slope);
    let d_w = base * terms.wind_factor(wind_speed);
    let (sin_t, cos_t) = wind_angle.sin_cos();
    let along = d_s + d_w * cos_t;
    let across = d_w * sin_t;
    let d_h = along.hypot(across);

    let max_rate = base + d_h;
    let direction = if d_h > 0.0 { across.atan2(along) } else { 0.0 };
    let effective_wind_factor = max_rate / base - 1.0;

    Ok(DirectionalSpread {
        rate: MetersPerMinute::from_feet_per_minute(max_rate),
        direction: Radians::new(direction),
        effective_wind: terms.effective_wind_speed(effective_wind_factor),
    })
}

/// Rothermel spread for either wind form
///
/// `wind` must already be expressed relative to the upslope direction
/// (see [`WindState::relative_to`]).
pub fn compute(
    fuel: &FuelModel,
    moisture: &MoistureState,
    wind: WindState,
    slope: Radians,
) -> Result<SpreadOutput> {
    match wind {
        WindState::Aligned(speed) => {
            rate_of_spread_aligned(fuel, moisture, speed, slope).map(SpreadOutput::Aligned)
        }
        WindState::Vector { speed, direction } => {
            rate_of_spread(fuel, moisture, speed, direction, slope).map(SpreadOutput::Directional)
        }
    }
}

/// Check that a burnable fuel model produces a usable fuel bed
///
/// Evaluated at the default moisture state. The non-burnable sentinel always passes.
pub fn validate_fuel_model(fuel: &FuelModel) -> Result<()> {
    if fuel.is_non_burnable() {
        return Ok(());
    }
    if fuel.code.trim().is_empty() {
        return Err(Error::invalid_fuel(&fuel.code, "fuel code must not be empty"));
    }
    let values = [
        fuel.heat_content,
        fuel.effective_mineral_content,
        fuel.total_mineral_content,
    ];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(Error::invalid_fuel(
            &fuel.code,
            "heat and mineral contents must be finite and non-negative",
        ));
    }
    let mut classes = fuel
        .fuel_load
        .dead()
        .into_iter()
        .chain(fuel.fuel_load.live())
        .chain(fuel.sav_ratio.dead())
        .chain(fuel.sav_ratio.live());
    if classes.any(|v| !v.is_finite() || v < 0.0) {
        return Err(Error::invalid_fuel(
            &fuel.code,
            "fuel loads and SAV ratios must be finite and non-negative",
        ));
    }
    fuel_bed_terms(fuel, &MoistureState::default()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_wind() -> (MetersPerSecond, Radians) {
        (MetersPerSecond::new(2.0), Radians::ZERO)
    }

    #[test]
    fn test_rothermel_short_grass_golden() {
        let (speed, angle) = default_wind();
        let spread = rate_of_spread(
            &FuelModel::short_grass(),
            &MoistureState::default(),
            speed,
            angle,
            Radians::ZERO,
        )
        .unwrap();
        assert_relative_eq!(*spread.rate, 32.174_547_373_304_95, max_relative = 1e-6);
        assert_relative_eq!(*spread.direction, 0.0);
        assert_relative_eq!(*spread.effective_wind, 2.0, max_relative = 1e-6);
    }

    #[test]
    fn test_rothermel_timber_grass_golden() {
        let (speed, angle) = default_wind();
        let spread = rate_of_spread(
            &FuelModel::timber_grass_understory(),
            &MoistureState::default(),
            speed,
            angle,
            Radians::ZERO,
        )
        .unwrap();
        assert_relative_eq!(*spread.rate, 14.863_235_609_078_33, max_relative = 1e-6);
        assert_relative_eq!(*spread.effective_wind, 2.0, max_relative = 1e-6);
    }

    #[test]
    fn test_rothermel_fuel_bed_terms() {
        let terms = fuel_bed_terms(&FuelModel::short_grass(), &MoistureState::default()).unwrap();
        assert_relative_eq!(terms.sav_ratio, 3500.0, max_relative = 1e-12);
        assert_relative_eq!(terms.reaction_intensity, 939.127_289_109_504_3, max_relative = 1e-6);
        assert_relative_eq!(terms.heat_sink, 9.259_182_781_490_196, max_relative = 1e-6);
        assert_relative_eq!(terms.propagating_flux_ratio, 0.057_750_400_838_731_716, max_relative = 1e-6);
    }

    #[test]
    fn test_rothermel_scalar_matches_vector_at_zero_angle() {
        for fuel in FuelModel::standard_13() {
            let moisture = MoistureState::default();
            let aligned = rate_of_spread_aligned(
                &fuel,
                &moisture,
                MetersPerSecond::new(2.0),
                Radians::new(0.1),
            )
            .unwrap();
            let vector = rate_of_spread(
                &fuel,
                &moisture,
                MetersPerSecond::new(2.0),
                Radians::ZERO,
                Radians::new(0.1),
            )
            .unwrap();
            assert_relative_eq!(*aligned, *vector.rate, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_rothermel_no_wind_no_slope_is_base_rate() {
        for fuel in FuelModel::standard_13() {
            let rate = rate_of_spread_aligned(
                &fuel,
                &MoistureState::default(),
                MetersPerSecond::ZERO,
                Radians::ZERO,
            )
            .unwrap();
            assert!(rate.is_finite(), "fuel {} gave {rate}", fuel.code);
            assert!(*rate >= 0.0, "fuel {} gave {rate}", fuel.code);
        }
        let grass = rate_of_spread_aligned(
            &FuelModel::short_grass(),
            &MoistureState::default(),
            MetersPerSecond::ZERO,
            Radians::ZERO,
        )
        .unwrap();
        assert_relative_eq!(*grass, 1.785_343_425_760_247_4, max_relative = 1e-6);
    }

    #[test]
    fn test_rothermel_cross_slope_wind() {
        let spread = rate_of_spread(
            &FuelModel::short_grass(),
            &MoistureState::default(),
            MetersPerSecond::new(2.0),
            Radians::new(0.5),
            Radians::new(0.2),
        )
        .unwrap();
        assert_relative_eq!(*spread.rate, 34.855_810_758_130_8, max_relative = 1e-6);
        assert_relative_eq!(*spread.direction, 0.456_216_833_412_365_4, max_relative = 1e-6);
        assert_relative_eq!(*spread.effective_wind, 2.083_334_503_789_629, max_relative = 1e-6);
    }

    #[test]
    fn test_rothermel_wind_cap() {
        let terms = fuel_bed_terms(&FuelModel::short_grass(), &MoistureState::default()).unwrap();
        let capped = terms.wind_factor(MetersPerSecond::new(500.0));
        let at_limit = terms.wind_factor(MetersPerSecond::from_feet_per_minute(terms.wind_limit()));
        assert_relative_eq!(capped, at_limit, max_relative = 1e-12);
    }

    #[test]
    fn test_rothermel_wet_fuel_does_not_spread() {
        let moisture = MoistureState::new([0.2, 0.2, 0.2], [1.0, 1.0]);
        let spread = rate_of_spread(
            &FuelModel::short_grass(),
            &moisture,
            MetersPerSecond::new(2.0),
            Radians::ZERO,
            Radians::ZERO,
        )
        .unwrap();
        assert!(*spread.rate < 1e-9);
        assert!(spread.rate.is_finite());
        assert!(spread.effective_wind.is_finite());
    }

    #[test]
    fn test_rothermel_non_burnable_never_spreads() {
        let output = compute(
            &FuelModel::non_burnable(),
            &MoistureState::default(),
            WindState::default(),
            Radians::new(0.3),
        )
        .unwrap();
        assert_eq!(output.rate(), MetersPerMinute::ZERO);
    }

    #[test]
    fn test_moisture_damping_bounds() {
        assert_relative_eq!(moisture_damping(0.0, 0.12), 1.0);
        assert!(moisture_damping(0.06, 0.12) > 0.0);
        assert!(moisture_damping(0.12, 0.12) >= 0.0);
        assert!(moisture_damping(0.12, 0.12) < 1e-12);
        assert!(moisture_damping(0.5, 0.12) >= 0.0);
        assert_eq!(moisture_damping(0.1, 0.0), moisture_damping(1.0, 1.0));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut fuel = FuelModel::short_grass();
        fuel.fuel_bed_depth = 0.0;
        assert!(matches!(
            validate_fuel_model(&fuel),
            Err(Error::InvalidFuelModel { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_bed() {
        let mut fuel = FuelModel::short_grass();
        fuel.fuel_load.one_hour = 0.0;
        assert!(validate_fuel_model(&fuel).is_err());
    }

    #[test]
    fn test_validate_standard_models() {
        for fuel in FuelModel::standard_13() {
            validate_fuel_model(&fuel).unwrap();
        }
        validate_fuel_model(&FuelModel::non_burnable()).unwrap();
    }
}
