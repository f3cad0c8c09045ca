use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Code of the mandatory non-burnable sentinel fuel model
pub const NON_BURNABLE_CODE: &str = "NB";

/// Whether a fuel model transfers load between live and dead classes with curing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelModelType {
    #[default]
    Static,
    Dynamic,
}

/// Per size class values for the five standard fuel classes
///
/// Used for both fuel loads (lb/ft²) and surface-area-to-volume ratios (ft²/ft³).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelClasses {
    pub one_hour: f64,
    pub ten_hour: f64,
    pub hundred_hour: f64,
    pub live_herb: f64,
    pub live_wood: f64,
}

impl FuelClasses {
    pub const ZERO: FuelClasses = FuelClasses {
        one_hour: 0.0,
        ten_hour: 0.0,
        hundred_hour: 0.0,
        live_herb: 0.0,
        live_wood: 0.0,
    };

    /// Build from `[1-h, 10-h, 100-h, live herb, live wood]`
    pub const fn from_array(values: [f64; 5]) -> Self {
        FuelClasses {
            one_hour: values[0],
            ten_hour: values[1],
            hundred_hour: values[2],
            live_herb: values[3],
            live_wood: values[4],
        }
    }

    /// Dead classes `[1-h, 10-h, 100-h]`
    pub fn dead(&self) -> [f64; 3] {
        [self.one_hour, self.ten_hour, self.hundred_hour]
    }

    /// Live classes `[herbaceous, woody]`
    pub fn live(&self) -> [f64; 2] {
        [self.live_herb, self.live_wood]
    }

    pub fn total(&self) -> f64 {
        self.dead().iter().sum::<f64>() + self.live().iter().sum::<f64>()
    }

    fn scaled(self, factor: f64) -> Self {
        FuelClasses {
            one_hour: self.one_hour * factor,
            ten_hour: self.ten_hour * factor,
            hundred_hour: self.hundred_hour * factor,
            live_herb: self.live_herb * factor,
            live_wood: self.live_wood * factor,
        }
    }
}

/// Standard fire-behaviour fuel model
///
/// Values follow the imperial conventions of the Rothermel (1972) model:
/// loads in lb/ft², surface-area-to-volume ratios in ft²/ft³, bed depth in ft,
/// heat content in Btu/lb and moistures as fractions.
///
/// Two fuel models are the same fuel when their codes match, whatever the other
/// fields say. Lookups and the non-burnable check rely on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelModel {
    // Identification
    pub code: String,
    pub name: String,

    // Particle properties
    #[serde(default = "FuelModel::default_particle_density")]
    pub particle_density: f64, // lb/ft³
    #[serde(default = "FuelModel::default_heat_content")]
    pub heat_content: f64, // Btu/lb
    #[serde(default = "FuelModel::default_effective_mineral_content")]
    pub effective_mineral_content: f64, // fraction
    #[serde(default = "FuelModel::default_total_mineral_content")]
    pub total_mineral_content: f64, // fraction

    // Fuel bed
    pub fuel_load: FuelClasses, // lb/ft²
    pub sav_ratio: FuelClasses, // ft²/ft³
    pub fuel_bed_depth: f64,    // ft
    pub moisture_of_extinction: f64, // dead fuel, fraction

    // Optional published aggregates (informational, not used by the spread equations)
    #[serde(default)]
    pub characteristic_sav: Option<f64>,
    #[serde(default)]
    pub bulk_density: Option<f64>,
    #[serde(default)]
    pub relative_packing_ratio: Option<f64>,

    #[serde(default)]
    pub model_type: FuelModelType,
}

impl PartialEq for FuelModel {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for FuelModel {}

impl Hash for FuelModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl FuelModel {
    /// Tons per acre to pounds per square foot
    pub const TONS_PER_ACRE_TO_LB_PER_FT2: f64 = 2000.0 / 43560.0;

    /// Default particle density (lb/ft³)
    pub const PARTICLE_DENSITY: f64 = 32.0;
    /// Default low heat content (Btu/lb)
    pub const HEAT_CONTENT: f64 = 8000.0;
    /// Default effective (silica-free) mineral content
    pub const EFFECTIVE_MINERAL_CONTENT: f64 = 0.01;
    /// Default total mineral content
    pub const TOTAL_MINERAL_CONTENT: f64 = 0.055;

    fn default_particle_density() -> f64 {
        Self::PARTICLE_DENSITY
    }

    fn default_heat_content() -> f64 {
        Self::HEAT_CONTENT
    }

    fn default_effective_mineral_content() -> f64 {
        Self::EFFECTIVE_MINERAL_CONTENT
    }

    fn default_total_mineral_content() -> f64 {
        Self::TOTAL_MINERAL_CONTENT
    }

    /// Create a static fuel model from catalog data published in tons/acre
    ///
    /// # Arguments
    /// * `loads_tons_per_acre` - `[1-h, 10-h, 100-h, live herb, live wood]` loads
    /// * `sav_ratio` - matching surface-area-to-volume ratios (ft²/ft³)
    /// * `fuel_bed_depth` - ft
    /// * `moisture_of_extinction` - dead fuel moisture of extinction (fraction)
    pub fn from_tons_per_acre(
        code: &str,
        name: &str,
        loads_tons_per_acre: [f64; 5],
        sav_ratio: [f64; 5],
        fuel_bed_depth: f64,
        moisture_of_extinction: f64,
    ) -> Self {
        FuelModel {
            code: code.to_string(),
            name: name.to_string(),
            particle_density: Self::PARTICLE_DENSITY,
            heat_content: Self::HEAT_CONTENT,
            effective_mineral_content: Self::EFFECTIVE_MINERAL_CONTENT,
            total_mineral_content: Self::TOTAL_MINERAL_CONTENT,
            fuel_load: FuelClasses::from_array(loads_tons_per_acre)
                .scaled(Self::TONS_PER_ACRE_TO_LB_PER_FT2),
            sav_ratio: FuelClasses::from_array(sav_ratio),
            fuel_bed_depth,
            moisture_of_extinction,
            characteristic_sav: None,
            bulk_density: None,
            relative_packing_ratio: None,
            model_type: FuelModelType::Static,
        }
    }

    /// Attach the published characteristic SAV, bulk density and relative packing ratio
    pub fn with_aggregates(
        mut self,
        characteristic_sav: f64,
        bulk_density: f64,
        relative_packing_ratio: f64,
    ) -> Self {
        self.characteristic_sav = Some(characteristic_sav);
        self.bulk_density = Some(bulk_density);
        self.relative_packing_ratio = Some(relative_packing_ratio);
        self
    }

    /// Non-burnable sentinel (water, rock, urban...)
    pub fn non_burnable() -> Self {
        FuelModel {
            code: NON_BURNABLE_CODE.to_string(),
            name: "Non-burnable".to_string(),
            particle_density: Self::PARTICLE_DENSITY,
            heat_content: Self::HEAT_CONTENT,
            effective_mineral_content: Self::EFFECTIVE_MINERAL_CONTENT,
            total_mineral_content: Self::TOTAL_MINERAL_CONTENT,
            fuel_load: FuelClasses::ZERO,
            sav_ratio: FuelClasses::ZERO,
            fuel_bed_depth: 0.0,
            moisture_of_extinction: 0.0,
            characteristic_sav: None,
            bulk_density: None,
            relative_packing_ratio: None,
            model_type: FuelModelType::Static,
        }
    }

    /// Whether this is the non-burnable sentinel (compared by code)
    pub fn is_non_burnable(&self) -> bool {
        self.code == NON_BURNABLE_CODE
    }

    /// Fuel model 1 - short grass (1 ft)
    pub fn short_grass() -> Self {
        Self::from_tons_per_acre(
            "1",
            "Short grass",
            [0.74, 0.0, 0.0, 0.0, 0.0],
            [3500.0, 109.0, 30.0, 0.0, 0.0],
            1.0,
            0.12,
        )
        .with_aggregates(3500.0, 0.03, 0.25)
    }

    /// Fuel model 2 - timber (grass and understory)
    pub fn timber_grass_understory() -> Self {
        Self::from_tons_per_acre(
            "2",
            "Timber (grass and understory)",
            [2.0, 1.0, 0.5, 0.5, 0.0],
            [3000.0, 109.0, 30.0, 1500.0, 0.0],
            1.0,
            0.15,
        )
        .with_aggregates(2784.0, 0.18, 1.14)
    }

    /// The 13 standard fire behaviour fuel models (Anderson 1982, Albini 1976)
    pub fn standard_13() -> Vec<Self> {
        vec![
            Self::short_grass(),
            Self::timber_grass_understory(),
            Self::from_tons_per_acre(
                "3",
                "Tall grass",
                [3.01, 0.0, 0.0, 0.0, 0.0],
                [1500.0, 109.0, 30.0, 0.0, 0.0],
                2.5,
                0.25,
            )
            .with_aggregates(1500.0, 0.06, 0.52),
            Self::from_tons_per_acre(
                "4",
                "Chaparral",
                [5.01, 4.01, 2.0, 0.0, 5.01],
                [2000.0, 109.0, 30.0, 0.0, 1500.0],
                6.0,
                0.20,
            )
            .with_aggregates(1739.0, 0.12, 0.84),
            Self::from_tons_per_acre(
                "5",
                "Brush",
                [1.0, 0.5, 0.0, 0.0, 2.0],
                [2000.0, 109.0, 30.0, 0.0, 1500.0],
                2.0,
                0.20,
            )
            .with_aggregates(1683.0, 0.08, 0.53),
            Self::from_tons_per_acre(
                "6",
                "Dormant brush, hardwood slash",
                [1.5, 2.5, 2.0, 0.0, 0.0],
                [1750.0, 109.0, 30.0, 0.0, 0.0],
                2.5,
                0.25,
            )
            .with_aggregates(1564.0, 0.11, 0.71),
            Self::from_tons_per_acre(
                "7",
                "Southern rough",
                [1.13, 1.87, 1.5, 0.0, 0.37],
                [1750.0, 109.0, 30.0, 0.0, 1550.0],
                2.5,
                0.40,
            )
            .with_aggregates(1552.0, 0.09, 0.55),
            Self::from_tons_per_acre(
                "8",
                "Closed timber litter",
                [1.5, 1.0, 2.5, 0.0, 0.0],
                [2000.0, 109.0, 30.0, 0.0, 0.0],
                0.2,
                0.30,
            )
            .with_aggregates(1889.0, 1.15, 5.17),
            Self::from_tons_per_acre(
                "9",
                "Hardwood litter",
                [2.92, 0.41, 0.15, 0.0, 0.0],
                [2500.0, 109.0, 30.0, 0.0, 0.0],
                0.2,
                0.25,
            )
            .with_aggregates(2484.0, 0.80, 4.50),
            Self::from_tons_per_acre(
                "10",
                "Timber (litter and understory)",
                [3.01, 2.0, 5.01, 0.0, 2.0],
                [2000.0, 109.0, 30.0, 0.0, 1500.0],
                1.0,
                0.25,
            )
            .with_aggregates(1764.0, 0.55, 3.23),
            Self::from_tons_per_acre(
                "11",
                "Light logging slash",
                [1.5, 4.51, 5.51, 0.0, 0.0],
                [1500.0, 109.0, 30.0, 0.0, 0.0],
                1.0,
                0.15,
            )
            .with_aggregates(1182.0, 0.53, 2.42),
            Self::from_tons_per_acre(
                "12",
                "Medium logging slash",
                [4.01, 14.03, 16.53, 0.0, 0.0],
                [1500.0, 109.0, 30.0, 0.0, 0.0],
                2.3,
                0.20,
            )
            .with_aggregates(1145.0, 0.69, 3.19),
            Self::from_tons_per_acre(
                "13",
                "Heavy logging slash",
                [7.01, 23.04, 28.05, 0.0, 0.0],
                [1500.0, 109.0, 30.0, 0.0, 0.0],
                3.0,
                0.25,
            )
            .with_aggregates(1159.0, 0.89, 4.16),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_code_only() {
        let mut other = FuelModel::short_grass();
        other.name = "Renamed".to_string();
        other.fuel_bed_depth = 9.0;
        assert_eq!(FuelModel::short_grass(), other);
        assert_ne!(FuelModel::short_grass(), FuelModel::timber_grass_understory());
    }

    #[test]
    fn test_tons_per_acre_conversion() {
        let grass = FuelModel::short_grass();
        let expected = 0.74 * 2000.0 / 43560.0;
        assert!((grass.fuel_load.one_hour - expected).abs() < 1e-15);
        assert_eq!(grass.fuel_load.ten_hour, 0.0);
        assert_eq!(grass.particle_density, 32.0);
        assert_eq!(grass.heat_content, 8000.0);
    }

    #[test]
    fn test_non_burnable_sentinel() {
        let nb = FuelModel::non_burnable();
        assert!(nb.is_non_burnable());
        assert!(!FuelModel::short_grass().is_non_burnable());
        assert_eq!(nb.fuel_load.total(), 0.0);
    }

    #[test]
    fn test_standard_catalog_codes_unique() {
        let models = FuelModel::standard_13();
        assert_eq!(models.len(), 13);
        for (i, model) in models.iter().enumerate() {
            assert_eq!(model.code, (i + 1).to_string());
        }
    }

    #[test]
    fn test_class_views() {
        let timber = FuelModel::timber_grass_understory();
        assert_eq!(timber.sav_ratio.dead(), [3000.0, 109.0, 30.0]);
        assert_eq!(timber.sav_ratio.live(), [1500.0, 0.0]);
    }
}
