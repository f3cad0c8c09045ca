//! Sampling interfaces for per-vertex inputs
//!
//! The engine never reads rasters itself. Fuel, moisture, wind and terrain at a
//! perimeter vertex are all requested through these traits so the host can back
//! them with whatever data it has.

use crate::core_types::fuel::FuelModel;
use crate::core_types::weather::{EnvironmentSample, MoistureState, TerrainSample, WindState};
use crate::error::Result;
use crate::physics::rothermel::validate_fuel_model;
use crate::simulation::config::SimulationConfig;
use chrono::{DateTime, Utc};
use nalgebra::Point2;
use std::sync::Arc;

/// Fuel model at a map location
pub trait LandCoverSampler: Send + Sync {
    fn fuel_at(&self, position: Point2<f64>) -> Arc<FuelModel>;
}

impl<F> LandCoverSampler for F
where
    F: Fn(Point2<f64>) -> Arc<FuelModel> + Send + Sync,
{
    fn fuel_at(&self, position: Point2<f64>) -> Arc<FuelModel> {
        self(position)
    }
}

/// Moisture, wind and terrain at a map location and instant
pub trait EnvironmentSampler: Send + Sync {
    fn moisture_at(&self, position: Point2<f64>, time: DateTime<Utc>) -> MoistureState;

    fn wind_at(&self, position: Point2<f64>, time: DateTime<Utc>) -> WindState;

    fn terrain_at(&self, position: Point2<f64>) -> TerrainSample;

    fn sample(&self, position: Point2<f64>, time: DateTime<Utc>) -> EnvironmentSample {
        EnvironmentSample {
            moisture: self.moisture_at(position, time),
            wind: self.wind_at(position, time),
            terrain: self.terrain_at(position),
        }
    }
}

/// The same fuel everywhere
#[derive(Debug, Clone)]
pub struct UniformLandCover {
    fuel: Arc<FuelModel>,
}

impl UniformLandCover {
    /// Fails with [`Error::InvalidFuelModel`](crate::Error::InvalidFuelModel) when the
    /// fuel cannot form a burnable fuel bed
    pub fn new(fuel: Arc<FuelModel>) -> Result<Self> {
        validate_fuel_model(&fuel)?;
        Ok(UniformLandCover { fuel })
    }
}

impl LandCoverSampler for UniformLandCover {
    fn fuel_at(&self, _position: Point2<f64>) -> Arc<FuelModel> {
        Arc::clone(&self.fuel)
    }
}

/// The same conditions everywhere and at all times
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformEnvironment {
    pub moisture: MoistureState,
    pub wind: WindState,
    pub terrain: TerrainSample,
}

impl UniformEnvironment {
    /// Conditions taken from the configured defaults
    ///
    /// The configured slope faces +y.
    pub fn from_config(config: &SimulationConfig) -> Self {
        UniformEnvironment {
            moisture: config.default_moisture,
            wind: config.default_wind,
            terrain: TerrainSample {
                slope: config.default_slope,
                ..TerrainSample::FLAT
            },
        }
    }
}

impl EnvironmentSampler for UniformEnvironment {
    fn moisture_at(&self, _position: Point2<f64>, _time: DateTime<Utc>) -> MoistureState {
        self.moisture
    }

    fn wind_at(&self, _position: Point2<f64>, _time: DateTime<Utc>) -> WindState {
        self.wind
    }

    fn terrain_at(&self, _position: Point2<f64>) -> TerrainSample {
        self.terrain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_land_cover() {
        let grass = Arc::new(FuelModel::short_grass());
        let water = Arc::new(FuelModel::non_burnable());
        let lake = move |p: Point2<f64>| {
            if p.x < 0.0 {
                Arc::clone(&water)
            } else {
                Arc::clone(&grass)
            }
        };
        assert!(lake.fuel_at(Point2::new(-1.0, 0.0)).is_non_burnable());
        assert_eq!(lake.fuel_at(Point2::new(1.0, 0.0)).code, "1");
    }

    #[test]
    fn test_uniform_land_cover_validates_fuel() {
        let mut empty = FuelModel::short_grass();
        empty.fuel_load.one_hour = 0.0;
        assert!(UniformLandCover::new(Arc::new(empty)).is_err());

        let water = UniformLandCover::new(Arc::new(FuelModel::non_burnable())).unwrap();
        assert!(water.fuel_at(Point2::origin()).is_non_burnable());
    }

    #[test]
    fn test_uniform_environment_from_config() {
        let config = SimulationConfig::default();
        let environment = UniformEnvironment::from_config(&config);
        let sample = environment.sample(Point2::new(3.0, 4.0), config.start_time);
        assert_eq!(sample.moisture, MoistureState::default());
        assert_eq!(sample.wind, WindState::default());
        assert_eq!(sample.terrain, TerrainSample::FLAT);
    }
}
