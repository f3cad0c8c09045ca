//! Physics models for surface fire spread

pub mod ellipse;
pub mod rothermel;

pub use ellipse::{Alexander, Catchpole, Ellipse, EllipseModel, EllipseModelKind};
pub use rothermel::{DirectionalSpread, FuelBedTerms, SpreadOutput};
