use crate::core_types::fuel::FuelModel;
use crate::core_types::units::Radians;
use crate::core_types::weather::{EnvironmentSample, WindState};
use crate::error::Result;
use crate::physics::ellipse::EllipseModel;
use crate::physics::rothermel;
use crate::solver::propagator::VertexSpread;

/// Fire ellipse and heading for a fuel under the given conditions
///
/// Returns `None` for the non-burnable sentinel. The wind is rotated into the
/// upslope frame before the spread model runs, and the resulting head angle is
/// rotated back so the heading is a map direction.
pub fn vertex_spread(
    fuel: &FuelModel,
    environment: &EnvironmentSample,
    ellipse_model: &dyn EllipseModel,
) -> Result<Option<VertexSpread>> {
    if fuel.is_non_burnable() {
        return Ok(None);
    }
    let upslope = environment.terrain.upslope_direction;
    let (speed, relative_angle) = match environment.wind.relative_to(upslope) {
        WindState::Aligned(speed) => (speed, Radians::ZERO),
        WindState::Vector { speed, direction } => (speed, direction),
    };
    let spread = rothermel::rate_of_spread(
        fuel,
        &environment.moisture,
        speed,
        relative_angle,
        environment.terrain.slope,
    )?;
    let ellipse = ellipse_model.ellipse(spread.rate.to_meters_per_second(), spread.effective_wind);
    Ok(Some(VertexSpread {
        ellipse,
        heading: upslope + spread.direction,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::MetersPerSecond;
    use crate::core_types::weather::TerrainSample;
    use crate::physics::ellipse::{Alexander, Catchpole};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_conditions_short_grass() {
        let spread = vertex_spread(
            &FuelModel::short_grass(),
            &EnvironmentSample::default(),
            &Alexander,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(spread.ellipse.a, 0.203_921_902_155_518_53, max_relative = 1e-6);
        assert_relative_eq!(spread.ellipse.b, 0.306_894_866_505_452_6, max_relative = 1e-6);
        assert_relative_eq!(spread.ellipse.c, 0.229_347_589_716_296_6, max_relative = 1e-6);
        assert_relative_eq!(*spread.heading, 0.0);
    }

    #[test]
    fn test_timber_catchpole() {
        let spread = vertex_spread(
            &FuelModel::timber_grass_understory(),
            &EnvironmentSample::default(),
            &Catchpole,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(spread.ellipse.a, 0.094_620_846_997_836_27, max_relative = 1e-6);
        assert_relative_eq!(spread.ellipse.b, 0.141_931_270_496_754_4, max_relative = 1e-6);
        assert_relative_eq!(spread.ellipse.c, 0.105_789_322_987_884_43, max_relative = 1e-6);
    }

    #[test]
    fn test_heading_follows_wind_on_flat_ground() {
        let environment = EnvironmentSample {
            wind: WindState::Vector {
                speed: MetersPerSecond::new(2.0),
                direction: Radians::new(1.2),
            },
            terrain: TerrainSample {
                slope: Radians::ZERO,
                upslope_direction: Radians::new(0.4),
            },
            ..EnvironmentSample::default()
        };
        let spread = vertex_spread(&FuelModel::short_grass(), &environment, &Alexander)
            .unwrap()
            .unwrap();
        assert_relative_eq!(*spread.heading, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_non_burnable_has_no_spread() {
        let spread = vertex_spread(
            &FuelModel::non_burnable(),
            &EnvironmentSample::default(),
            &Alexander,
        )
        .unwrap();
        assert!(spread.is_none());
    }
}
