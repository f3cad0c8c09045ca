//! Step driver
//!
//! `SpreadSimulation` owns the clock, the queue of pending ignitions, the active
//! perimeters and the snapshot history. Each call to [`SpreadSimulation::step`]:
//!
//! 1. expands ignitions due in `[t, t + dt)` into elliptical perimeters
//! 2. advances every active perimeter with the Huygens propagator
//! 3. consolidates all rings through the [`GeometryEngine`]
//! 4. commits the result as the perimeters at `t + dt`
//!
//! Steps 1-3 only read the current state. Nothing is committed unless all of them
//! succeed, so after an error the previous perimeters remain authoritative.

pub mod config;
pub mod sampling;

pub use config::SimulationConfig;
pub use sampling::{EnvironmentSampler, LandCoverSampler, UniformEnvironment, UniformLandCover};

use crate::core_types::fuel::FuelModel;
use crate::core_types::vertex::{sort_ignitions, IgnitionPoint, Vertex};
use crate::error::{Error, Result};
use crate::geometry::{flatten_all, GeoEngine, GeometryEngine, PerimeterPolygon, PerimeterTree, Ring};
use crate::solver::{ignition_ring, propagate_tree, vertex_spread, HeldVertex, VertexSpread};
use chrono::{DateTime, Utc};
use nalgebra::Point2;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Timestamp layout used for exported snapshots
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Perimeters as they stood at the end of a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerimeterSnapshot {
    pub timestamp: DateTime<Utc>,
    pub polygons: Vec<PerimeterPolygon>,
}

impl PerimeterSnapshot {
    /// ISO-8601 UTC timestamp without fractional seconds
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.format(SNAPSHOT_TIME_FORMAT).to_string()
    }

    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(PerimeterPolygon::area).sum()
    }
}

/// What happened during one committed step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Ignitions expanded into a perimeter
    pub ignitions_started: usize,
    /// Due ignitions that landed on non-burnable fuel
    pub ignitions_skipped: usize,
    /// Polygons after consolidation
    pub perimeters: usize,
    /// Vertices held in place by the degenerate-tangent policy
    pub held_vertices: Vec<HeldVertex>,
    pub collapsed_holes: usize,
}

/// Outcome of a step before it is committed
struct StepOutcome {
    trees: Vec<PerimeterTree>,
    polygons: Vec<PerimeterPolygon>,
    consumed: usize,
    report: StepReport,
}

/// Perimeter spread simulation
pub struct SpreadSimulation {
    config: SimulationConfig,
    land_cover: Box<dyn LandCoverSampler>,
    environment: Box<dyn EnvironmentSampler>,
    geometry: Box<dyn GeometryEngine>,

    current_time: DateTime<Utc>,
    /// Sorted ascending by ignition time
    pending: Vec<IgnitionPoint>,
    perimeters: Vec<PerimeterTree>,
    history: Vec<PerimeterSnapshot>,
}

impl SpreadSimulation {
    /// Create a simulation starting at `config.start_time` with no fire
    pub fn new(
        config: SimulationConfig,
        land_cover: impl LandCoverSampler + 'static,
        environment: impl EnvironmentSampler + 'static,
    ) -> Result<Self> {
        config.validate()?;
        info!(
            "Creating spread simulation: start={}, dt={}s, sampling={}, ellipse={:?}",
            config.start_time.format(SNAPSHOT_TIME_FORMAT),
            config.time_step_seconds,
            config.initial_sampling,
            config.ellipse_model
        );
        Ok(SpreadSimulation {
            current_time: config.start_time,
            config,
            land_cover: Box::new(land_cover),
            environment: Box::new(environment),
            geometry: Box::new(GeoEngine),
            pending: Vec::new(),
            perimeters: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Uniform fuel and the configured default conditions everywhere
    ///
    /// The fuel is validated here so an unusable fuel bed is rejected before any step.
    pub fn uniform(config: SimulationConfig, fuel: Arc<FuelModel>) -> Result<Self> {
        let land_cover = UniformLandCover::new(fuel)?;
        let environment = UniformEnvironment::from_config(&config);
        Self::new(config, land_cover, environment)
    }

    /// Replace the polygon operations used for consolidation
    #[must_use]
    pub fn with_geometry_engine(mut self, engine: impl GeometryEngine + 'static) -> Self {
        self.geometry = Box::new(engine);
        self
    }

    /// Queue an ignition
    ///
    /// Ignitions earlier than the current simulation time are rejected with
    /// [`Error::StaleIgnition`].
    pub fn add_ignition(&mut self, ignition: IgnitionPoint) -> Result<()> {
        self.check_not_stale(&ignition)?;
        let index = self
            .pending
            .partition_point(|queued| queued.ignition_time <= ignition.ignition_time);
        self.pending.insert(index, ignition);
        debug!(x = ignition.position.x, y = ignition.position.y, "queued ignition");
        Ok(())
    }

    /// Queue several ignitions, dropping late ones; returns how many were queued
    pub fn add_ignitions(&mut self, ignitions: impl IntoIterator<Item = IgnitionPoint>) -> usize {
        let before = self.pending.len();
        for ignition in ignitions {
            if self.check_not_stale(&ignition).is_ok() {
                self.pending.push(ignition);
            }
        }
        sort_ignitions(&mut self.pending);
        let queued = self.pending.len() - before;
        debug!(queued, "queued ignitions");
        queued
    }

    /// Advance the simulation by one time step
    pub fn step(&mut self) -> Result<StepReport> {
        let outcome = self.compute_step()?;

        self.pending.drain(..outcome.consumed);
        self.current_time = outcome.report.window_end;
        self.perimeters = outcome.trees;
        self.history.push(PerimeterSnapshot {
            timestamp: self.current_time,
            polygons: outcome.polygons,
        });

        info!(
            "Step committed: t={}, perimeters={}, ignitions={}, held_vertices={}",
            self.current_time.format(SNAPSHOT_TIME_FORMAT),
            outcome.report.perimeters,
            outcome.report.ignitions_started,
            outcome.report.held_vertices.len()
        );
        Ok(outcome.report)
    }

    /// Step until the clock reaches `end`
    pub fn run_until(&mut self, end: DateTime<Utc>) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        while self.current_time < end {
            reports.push(self.step()?);
        }
        Ok(reports)
    }

    /// Forget all fire and rewind the clock to the start time
    ///
    /// Pending ignitions at or after the start time are kept.
    pub fn reset(&mut self) {
        let start = self.config.start_time;
        self.current_time = start;
        self.perimeters.clear();
        self.history.clear();
        self.pending.retain(|ignition| ignition.ignition_time >= start);
        info!("Simulation reset, {} ignitions pending", self.pending.len());
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    /// Active perimeters as simple polygons
    pub fn active_perimeters(&self) -> Vec<PerimeterPolygon> {
        flatten_all(&self.perimeters)
    }

    /// Active perimeters with their nesting
    pub fn perimeter_trees(&self) -> &[PerimeterTree] {
        &self.perimeters
    }

    pub fn history(&self) -> &[PerimeterSnapshot] {
        &self.history
    }

    pub fn pending_ignitions(&self) -> &[IgnitionPoint] {
        &self.pending
    }

    /// No fire burning and nothing waiting to ignite
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.perimeters.is_empty()
    }

    fn check_not_stale(&self, ignition: &IgnitionPoint) -> Result<()> {
        if ignition.ignition_time < self.current_time {
            warn!(
                ignition_time = %ignition.ignition_time,
                current_time = %self.current_time,
                "dropping late ignition"
            );
            return Err(Error::StaleIgnition {
                ignition_time: ignition.ignition_time,
                current_time: self.current_time,
            });
        }
        Ok(())
    }

    fn compute_step(&self) -> Result<StepOutcome> {
        let window_start = self.current_time;
        let window_end = window_start + self.config.time_step();
        let dt = self.config.dt();
        let mut report = StepReport {
            window_start,
            window_end,
            ..StepReport::default()
        };

        // 1. Due ignitions
        let consumed = self
            .pending
            .iter()
            .take_while(|ignition| ignition.ignition_time < window_end)
            .count();
        let mut rings: Vec<PerimeterPolygon> = Vec::new();
        for ignition in &self.pending[..consumed] {
            if !ignition.is_due(window_start, window_end) {
                continue;
            }
            match self.spread_at(ignition.position, ignition.ignition_time)? {
                Some(spread) => {
                    let ring =
                        ignition_ring(ignition.position, &spread, dt, self.config.initial_sampling);
                    debug!(
                        x = ignition.position.x,
                        y = ignition.position.y,
                        vertices = ring.len(),
                        "ignition expanded"
                    );
                    rings.push(PerimeterPolygon::from_exterior(ring));
                    report.ignitions_started += 1;
                }
                None => {
                    debug!(
                        x = ignition.position.x,
                        y = ignition.position.y,
                        "ignition on non-burnable fuel skipped"
                    );
                    report.ignitions_skipped += 1;
                }
            }
        }

        // 2. Propagate active perimeters
        let spreads_for = |ring: &Ring| self.ring_spreads(ring, window_start);
        let mut polygons = Vec::new();
        for tree in &self.perimeters {
            let propagated =
                propagate_tree(tree, dt, self.config.degenerate_tangent_policy, &spreads_for)?;
            debug!(
                rings = propagated.tree.ring_count(),
                collapsed = propagated.collapsed_holes,
                "perimeter propagated"
            );
            polygons.extend(propagated.tree.flatten());
            polygons.extend(propagated.released_islands.iter().flat_map(PerimeterTree::flatten));
            report.held_vertices.extend(propagated.held_vertices);
            report.collapsed_holes += propagated.collapsed_holes;
        }
        polygons.extend(rings);

        // 3. Consolidate
        let consolidated = if polygons.is_empty() {
            Vec::new()
        } else {
            self.geometry.consolidate(polygons)?
        };
        report.perimeters = consolidated.len();
        let trees = PerimeterTree::from_polygons(consolidated.clone());

        Ok(StepOutcome {
            trees,
            polygons: consolidated,
            consumed,
            report,
        })
    }

    fn spread_at(&self, position: Point2<f64>, time: DateTime<Utc>) -> Result<Option<VertexSpread>> {
        let vertex = Vertex::new(position, self.land_cover.fuel_at(position));
        if !vertex.is_burnable() {
            return Ok(None);
        }
        let environment = self.environment.sample(vertex.position, time);
        vertex_spread(&vertex.fuel, &environment, &self.config.ellipse_model)
    }

    fn ring_spreads(&self, ring: &Ring, time: DateTime<Utc>) -> Result<Vec<Option<VertexSpread>>> {
        ring.points
            .par_iter()
            .map(|&position| self.spread_at(position, time))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn grass_simulation() -> SpreadSimulation {
        SpreadSimulation::uniform(SimulationConfig::default(), Arc::new(FuelModel::short_grass()))
            .unwrap()
    }

    #[test]
    fn test_new_simulation_is_idle() {
        let sim = grass_simulation();
        assert!(sim.is_idle());
        assert_eq!(sim.current_time(), DateTime::<Utc>::default());
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            time_step_seconds: 1000,
            ..SimulationConfig::default()
        };
        assert!(SpreadSimulation::uniform(config, Arc::new(FuelModel::short_grass())).is_err());
    }

    #[test]
    fn test_unusable_fuel_rejected() {
        let mut bare = FuelModel::short_grass();
        bare.code = "bare".to_string();
        bare.fuel_load = crate::core_types::fuel::FuelClasses::ZERO;
        let result = SpreadSimulation::uniform(SimulationConfig::default(), Arc::new(bare));
        assert!(matches!(result, Err(Error::InvalidFuelModel { .. })));
    }

    #[test]
    fn test_pending_ignitions_sorted() {
        let mut sim = grass_simulation();
        let t0 = sim.current_time();
        sim.add_ignition(IgnitionPoint::new(0.0, 0.0, t0 + TimeDelta::seconds(50)))
            .unwrap();
        sim.add_ignition(IgnitionPoint::new(1.0, 0.0, t0 + TimeDelta::seconds(5)))
            .unwrap();
        let times: Vec<_> = sim
            .pending_ignitions()
            .iter()
            .map(|i| i.ignition_time)
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_late_ignition_rejected() {
        let mut sim = grass_simulation();
        sim.step().unwrap();
        let late = IgnitionPoint::new(0.0, 0.0, DateTime::<Utc>::default());
        assert!(matches!(
            sim.add_ignition(late),
            Err(Error::StaleIgnition { .. })
        ));
        assert_eq!(sim.add_ignitions([late]), 0);
        assert!(sim.pending_ignitions().is_empty());
    }

    #[test]
    fn test_step_advances_clock_and_history() {
        let mut sim = grass_simulation();
        sim.add_ignition(IgnitionPoint::new(0.0, 0.0, sim.current_time()))
            .unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.ignitions_started, 1);
        assert_eq!(report.perimeters, 1);
        assert_eq!(sim.current_time().timestamp(), 30);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.history()[0].timestamp_iso(), "1970-01-01T00:00:30Z");
        assert!(!sim.is_idle());
    }

    #[test]
    fn test_reset_keeps_future_ignitions() {
        let mut sim = grass_simulation();
        let t0 = sim.current_time();
        sim.add_ignition(IgnitionPoint::new(0.0, 0.0, t0)).unwrap();
        sim.add_ignition(IgnitionPoint::new(0.0, 0.0, t0 + TimeDelta::seconds(120)))
            .unwrap();
        sim.step().unwrap();
        sim.reset();
        assert_eq!(sim.current_time(), t0);
        assert!(sim.active_perimeters().is_empty());
        assert!(sim.history().is_empty());
        assert_eq!(sim.pending_ignitions().len(), 1);
    }
}
