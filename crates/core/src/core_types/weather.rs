//! Environmental inputs sampled at each perimeter vertex
//!
//! Moisture, wind and terrain are the three environmental drivers of the surface
//! spread model. They are plain values here; where they come from is decided by an
//! [`EnvironmentSampler`](crate::simulation::EnvironmentSampler).

use crate::core_types::units::{MetersPerSecond, Radians};
use serde::{Deserialize, Serialize};

/// Fractional fuel moisture contents per size class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureState {
    /// 1-h, 10-h and 100-h dead fuel moisture
    pub dead: [f64; 3],
    /// Live herbaceous and live woody moisture
    pub live: [f64; 2],
}

impl MoistureState {
    pub const fn new(dead: [f64; 3], live: [f64; 2]) -> Self {
        MoistureState { dead, live }
    }
}

impl Default for MoistureState {
    /// Dry summer conditions: 3% dead, 45% herbaceous, 82% woody
    fn default() -> Self {
        MoistureState {
            dead: [0.03, 0.03, 0.03],
            live: [0.45, 0.82],
        }
    }
}

/// Midflame wind
///
/// Serialises as a bare number for [`WindState::Aligned`] and as
/// `{ "speed": .., "direction": .. }` for [`WindState::Vector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindState {
    /// Wind blowing straight upslope
    Aligned(MetersPerSecond),
    /// Wind speed and the map direction it blows toward (CCW from +y)
    Vector {
        speed: MetersPerSecond,
        direction: Radians,
    },
}

impl WindState {
    pub fn speed(&self) -> MetersPerSecond {
        match *self {
            WindState::Aligned(speed) | WindState::Vector { speed, .. } => speed,
        }
    }

    /// Same wind seen relative to the upslope direction
    ///
    /// The spread model works in a frame where slope pushes along angle zero.
    #[must_use]
    pub fn relative_to(&self, upslope_direction: Radians) -> WindState {
        match *self {
            WindState::Aligned(speed) => WindState::Aligned(speed),
            WindState::Vector { speed, direction } => WindState::Vector {
                speed,
                direction: direction - upslope_direction,
            },
        }
    }
}

impl Default for WindState {
    fn default() -> Self {
        WindState::Vector {
            speed: MetersPerSecond::new(2.0),
            direction: Radians::ZERO,
        }
    }
}

/// Terrain at a vertex
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainSample {
    /// Slope steepness
    pub slope: Radians,
    /// Map direction facing uphill (CCW from +y)
    pub upslope_direction: Radians,
}

impl TerrainSample {
    pub const FLAT: TerrainSample = TerrainSample {
        slope: Radians::ZERO,
        upslope_direction: Radians::ZERO,
    };
}

/// Everything the spread model needs besides the fuel itself
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentSample {
    pub moisture: MoistureState,
    pub wind: WindState,
    pub terrain: TerrainSample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_moisture() {
        let moisture = MoistureState::default();
        assert_eq!(moisture.dead, [0.03, 0.03, 0.03]);
        assert_eq!(moisture.live, [0.45, 0.82]);
    }

    #[test]
    fn test_wind_relative_to_upslope() {
        let wind = WindState::Vector {
            speed: MetersPerSecond::new(3.0),
            direction: Radians::new(1.0),
        };
        match wind.relative_to(Radians::new(0.25)) {
            WindState::Vector { speed, direction } => {
                assert_eq!(*speed, 3.0);
                assert!((*direction - 0.75).abs() < 1e-12);
            }
            WindState::Aligned(_) => panic!("vector wind must stay a vector"),
        }
    }

    #[test]
    fn test_wind_json_shapes() {
        let aligned: WindState = serde_json::from_str("4.5").unwrap();
        assert_eq!(aligned, WindState::Aligned(MetersPerSecond::new(4.5)));

        let vector: WindState =
            serde_json::from_str(r#"{ "speed": 2.0, "direction": 0.0 }"#).unwrap();
        assert_eq!(vector, WindState::default());
    }
}
