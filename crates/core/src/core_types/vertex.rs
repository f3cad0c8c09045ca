use crate::core_types::fuel::FuelModel;
use chrono::{DateTime, Utc};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A perimeter point together with the fuel found under it
///
/// Built fresh for every step from the land-cover sampler; the fuel reference is
/// not kept once the step has been computed.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point2<f64>,
    pub fuel: Arc<FuelModel>,
}

impl Vertex {
    pub fn new(position: Point2<f64>, fuel: Arc<FuelModel>) -> Self {
        Vertex { position, fuel }
    }

    pub fn is_burnable(&self) -> bool {
        !self.fuel.is_non_burnable()
    }
}

/// A point that starts burning at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionPoint {
    pub position: Point2<f64>,
    pub ignition_time: DateTime<Utc>,
}

impl IgnitionPoint {
    pub fn new(x: f64, y: f64, ignition_time: DateTime<Utc>) -> Self {
        IgnitionPoint {
            position: Point2::new(x, y),
            ignition_time,
        }
    }

    /// Whether the ignition falls inside the half-open window `[start, end)`
    pub fn is_due(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.ignition_time >= start && self.ignition_time < end
    }
}

/// Sort ignitions ascending by ignition time, keeping insertion order for ties
pub fn sort_ignitions(ignitions: &mut [IgnitionPoint]) {
    ignitions.sort_by_key(|ignition| ignition.ignition_time);
}
