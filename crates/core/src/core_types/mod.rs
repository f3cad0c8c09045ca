//! Core types and utilities

pub mod catalog;
pub mod fuel;
pub mod units;
pub mod vertex;
pub mod weather;

pub use catalog::FuelCatalog;
pub use fuel::{FuelClasses, FuelModel, FuelModelType, NON_BURNABLE_CODE};
pub use units::*;
pub use vertex::{sort_ignitions, IgnitionPoint, Vertex};
pub use weather::{EnvironmentSample, MoistureState, TerrainSample, WindState};
