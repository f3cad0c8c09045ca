//! Perimeter spread solver
//!
//! Turns local fire behaviour into perimeter motion:
//!
//! - [`vertex_spread`] evaluates Rothermel and the ellipse model for one location
//! - [`ignition_ring`] grows a point ignition into its first perimeter
//! - [`propagate_ring`] / [`propagate_tree`] advance existing perimeters one step
//!
//! # Example
//!
//! ```
//! use fire_spread_core::core_types::{EnvironmentSample, FuelModel};
//! use fire_spread_core::physics::Alexander;
//! use fire_spread_core::solver::{ignition_ring, vertex_spread};
//! use nalgebra::Point2;
//!
//! let spread = vertex_spread(&FuelModel::short_grass(), &EnvironmentSample::default(), &Alexander)
//!     .unwrap()
//!     .unwrap();
//! let ring = ignition_ring(Point2::origin(), &spread, 30.0, 100);
//! assert_eq!(ring.len(), 100);
//! ```

pub mod ignition;
pub mod propagator;
pub mod spread;

pub use ignition::ignition_ring;
pub use propagator::{
    propagate_ring, propagate_tree, spread_velocity, DegenerateTangentPolicy, HeldVertex,
    RingPropagation, TreePropagation, VertexSpread,
};
pub use spread::vertex_spread;
