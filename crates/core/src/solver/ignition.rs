use crate::geometry::Ring;
use crate::solver::propagator::VertexSpread;
use nalgebra::{Point2, Rotation2, Vector2};
use std::f64::consts::TAU;

/// Perimeter grown from a point ignition after `dt` seconds
///
/// The ellipse is sampled at `samples` evenly spaced parameter angles,
/// `θ_k = 2πk / N`, in the head-up frame, rotated counter-clockwise by the
/// heading and moved onto the ignition point. The ring is counter-clockwise.
///
/// # Formula
/// ```text
/// local_k = (dt · a · cos θ_k,  dt · b · sin θ_k + dt · c)
/// p_k     = ignition + R(heading) · local_k
/// ```
pub fn ignition_ring(
    ignition: Point2<f64>,
    spread: &VertexSpread,
    dt: f64,
    samples: usize,
) -> Ring {
    let rotation = Rotation2::new(*spread.heading);
    let ellipse = spread.ellipse;
    let points = (0..samples)
        .map(|k| {
            let theta = TAU * k as f64 / samples as f64;
            let local = Vector2::new(
                dt * ellipse.a * theta.cos(),
                dt * ellipse.b * theta.sin() + dt * ellipse.c,
            );
            ignition + rotation * local
        })
        .collect();
    Ring::new(points)
}
