//! Fire Spread Core Library
//!
//! Wildfire perimeter growth from point ignitions. Local fire behaviour comes from
//! the Rothermel (1972) surface fire model; the fire shape is an ellipse (Alexander
//! or Catchpole) and perimeters are advanced with Huygens' principle, each vertex
//! emitting an elliptical wavelet whose envelope becomes the new front.
//!
//! ## Layout
//!
//! - [`core_types`]: fuel models, catalog, weather inputs and unit types
//! - [`physics`]: Rothermel rate of spread and ellipse models
//! - [`geometry`]: rings, polygons, topology and consolidation
//! - [`solver`]: ignition rings and the predictor/corrector propagator
//! - [`simulation`]: configuration, samplers and the step driver

// Core types and utilities
pub mod core_types;
pub mod error;

// Fire behaviour and perimeter propagation
pub mod geometry;
pub mod physics;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use core_types::{
    EnvironmentSample, FuelCatalog, FuelModel, IgnitionPoint, MoistureState, TerrainSample,
    WindState,
};
pub use error::{Error, Result};

// Re-export simulation types
pub use geometry::{GeoEngine, GeometryEngine, PerimeterPolygon, PerimeterTree, Ring};
pub use physics::{Ellipse, EllipseModel, EllipseModelKind};
pub use simulation::{
    PerimeterSnapshot, SimulationConfig, SpreadSimulation, StepReport, UniformEnvironment,
    UniformLandCover,
};
pub use solver::DegenerateTangentPolicy;
