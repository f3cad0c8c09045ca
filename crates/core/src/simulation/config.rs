//! Simulation control parameters

use crate::core_types::units::Radians;
use crate::core_types::weather::{MoistureState, WindState};
use crate::error::{Error, Result};
use crate::physics::ellipse::EllipseModelKind;
use crate::solver::DegenerateTangentPolicy;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Step length used when none is configured (seconds)
pub const DEFAULT_TIME_STEP_SECONDS: u32 = 30;
/// Longest accepted step (seconds)
pub const MAX_TIME_STEP_SECONDS: u32 = 300;
/// Vertices on a freshly ignited perimeter
pub const DEFAULT_INITIAL_SAMPLING: usize = 100;
/// Fewest vertices that still make a ring
pub const MIN_INITIAL_SAMPLING: usize = 3;

/// Everything that controls a run apart from the fuel catalog and samplers
///
/// Every field has a default, so a JSON document only needs to name what it changes:
///
/// ```
/// use fire_spread_core::simulation::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(r#"{ "time_step_seconds": 60 }"#).unwrap();
/// assert_eq!(config.time_step_seconds, 60);
/// assert_eq!(config.initial_sampling, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step_seconds: u32,
    pub initial_sampling: usize,
    pub start_time: DateTime<Utc>,
    pub ellipse_model: EllipseModelKind,
    pub default_moisture: MoistureState,
    pub default_wind: WindState,
    pub default_slope: Radians,
    pub degenerate_tangent_policy: DegenerateTangentPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_step_seconds: DEFAULT_TIME_STEP_SECONDS,
            initial_sampling: DEFAULT_INITIAL_SAMPLING,
            start_time: DateTime::<Utc>::default(),
            ellipse_model: EllipseModelKind::default(),
            default_moisture: MoistureState::default(),
            default_wind: WindState::default(),
            default_slope: Radians::ZERO,
            degenerate_tangent_policy: DegenerateTangentPolicy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TIME_STEP_SECONDS).contains(&self.time_step_seconds) {
            return Err(Error::invalid_config(
                "time_step_seconds",
                format!(
                    "must be between 1 and {MAX_TIME_STEP_SECONDS}, got {}",
                    self.time_step_seconds
                ),
            ));
        }
        if self.initial_sampling < MIN_INITIAL_SAMPLING {
            return Err(Error::invalid_config(
                "initial_sampling",
                format!(
                    "must be at least {MIN_INITIAL_SAMPLING}, got {}",
                    self.initial_sampling
                ),
            ));
        }
        let mut moisture = self
            .default_moisture
            .dead
            .iter()
            .chain(self.default_moisture.live.iter());
        if moisture.any(|m| !m.is_finite() || *m < 0.0) {
            return Err(Error::invalid_config(
                "default_moisture",
                "moisture fractions must be finite and non-negative",
            ));
        }
        let speed = *self.default_wind.speed();
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::invalid_config(
                "default_wind",
                format!("speed must be finite and non-negative, got {speed}"),
            ));
        }
        if let WindState::Vector { direction, .. } = self.default_wind {
            if !direction.is_finite() {
                return Err(Error::invalid_config("default_wind", "direction must be finite"));
            }
        }
        let slope = *self.default_slope;
        if !slope.is_finite() || !(0.0..std::f64::consts::FRAC_PI_2).contains(&slope) {
            return Err(Error::invalid_config(
                "default_slope",
                format!("must lie in [0, pi/2) radians, got {slope}"),
            ));
        }
        Ok(())
    }

    /// Step length as seconds
    pub fn dt(&self) -> f64 {
        f64::from(self.time_step_seconds)
    }

    pub fn time_step(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.time_step_seconds))
    }
}
