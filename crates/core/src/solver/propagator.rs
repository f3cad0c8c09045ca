//! Huygens perimeter propagation
//!
//! Every perimeter vertex emits an elliptical wavelet shaped by the local fuel,
//! weather and terrain; the new perimeter is the envelope of those wavelets. The
//! envelope point of a vertex follows in closed form from the ellipse and the local
//! tangent of the perimeter (Richards 1990), and the ODE is integrated with a
//! second-order predictor/corrector step.
//!
//! # References
//! - Richards, G.D. (1990). "An elliptical growth model of forest fire fronts and its
//!   numerical solution." Int. J. Numer. Meth. Eng. 30, 1163-1179.
//! - Finney, M.A. (1998). "FARSITE: Fire Area Simulator - model development and
//!   evaluation." USDA Forest Service Research Paper RMRS-RP-4.

use crate::core_types::units::Radians;
use crate::error::{Error, Result};
use crate::geometry::{HoleNode, PerimeterTree, Ring};
use crate::physics::ellipse::Ellipse;
use nalgebra::{Point2, Vector2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Fire shape and orientation at one vertex
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexSpread {
    /// Ellipse speeds (m/s)
    pub ellipse: Ellipse,
    /// Map direction of the head fire (CCW from +y)
    pub heading: Radians,
}

/// What to do with a vertex whose two neighbours coincide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateTangentPolicy {
    /// Leave the vertex where it is for this step and report it
    #[default]
    HoldVertex,
    /// Abort the step with [`Error::DegenerateTangent`]
    FailStep,
}

/// Envelope velocity of the wavelet for a perimeter tangent `(xs, ys)`
///
/// `theta` is the negated heading. Returns `None` when the tangent has zero length.
///
/// # Formula
/// ```text
/// u = xs cos θ − ys sin θ
/// w = xs sin θ + ys cos θ
/// D = √(b² u² + a² w²)
/// ẋ = (a² cos θ · w − b² sin θ · u) / D + c sin θ
/// ẏ = (−a² sin θ · w − b² cos θ · u) / D + c cos θ
/// ```
pub fn spread_velocity(xs: f64, ys: f64, ellipse: &Ellipse, theta: f64) -> Option<Vector2<f64>> {
    let Ellipse { a, b, c } = *ellipse;
    let (sin_t, cos_t) = theta.sin_cos();
    let u = xs * cos_t - ys * sin_t;
    let w = xs * sin_t + ys * cos_t;
    let a2 = a * a;
    let b2 = b * b;
    let denominator = (b2 * u * u + a2 * w * w).sqrt();
    if denominator == 0.0 {
        if xs == 0.0 && ys == 0.0 {
            return None;
        }
        // zero-sized ellipse: the wavelet never leaves its vertex
        return Some(Vector2::new(c * sin_t, c * cos_t));
    }
    let x = (a2 * cos_t * w - b2 * sin_t * u) / denominator + c * sin_t;
    let y = (-a2 * sin_t * w - b2 * cos_t * u) / denominator + c * cos_t;
    Some(Vector2::new(x, y))
}

/// Central-difference tangent at vertex `i` of a closed ring
fn tangent(points: &[Point2<f64>], i: usize, dtheta: f64) -> Vector2<f64> {
    let n = points.len();
    let next = points[(i + 1) % n];
    let prev = points[(i + n - 1) % n];
    (next - prev) / (2.0 * dtheta)
}

/// Propagated ring together with the vertices that were held in place
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RingPropagation {
    pub points: Vec<Point2<f64>>,
    pub held_vertices: Vec<usize>,
    /// Vertices whose corrector velocity opposes their predictor velocity
    pub inverted_vertices: usize,
}

/// Velocity of every vertex for one pass, flagged when the vertex is held
fn pass_velocities(
    points: &[Point2<f64>],
    spreads: &[Option<VertexSpread>],
    policy: DegenerateTangentPolicy,
) -> Result<Vec<(Vector2<f64>, bool)>> {
    let dtheta = TAU / points.len() as f64;
    (0..points.len())
        .into_par_iter()
        .map(|i| {
            let Some(spread) = spreads[i] else {
                return Ok((Vector2::zeros(), false));
            };
            let s = tangent(points, i, dtheta);
            match spread_velocity(s.x, s.y, &spread.ellipse, -*spread.heading) {
                Some(velocity) => Ok((velocity, false)),
                None => match policy {
                    DegenerateTangentPolicy::HoldVertex => Ok((Vector2::zeros(), true)),
                    DegenerateTangentPolicy::FailStep => Err(Error::DegenerateTangent {
                        vertex: i,
                        x: points[i].x,
                        y: points[i].y,
                    }),
                },
            }
        })
        .collect()
}

struct Prediction {
    velocities: Vec<(Vector2<f64>, bool)>,
    points: Vec<Point2<f64>>,
}

fn predict(
    points: &[Point2<f64>],
    spreads: &[Option<VertexSpread>],
    dt: f64,
    policy: DegenerateTangentPolicy,
) -> Result<Prediction> {
    let velocities = pass_velocities(points, spreads, policy)?;
    let predicted = points
        .iter()
        .zip(&velocities)
        .map(|(p, (v, _))| p + v * dt)
        .collect();
    Ok(Prediction {
        velocities,
        points: predicted,
    })
}

fn correct(
    points: &[Point2<f64>],
    spreads: &[Option<VertexSpread>],
    prediction: &Prediction,
    dt: f64,
    policy: DegenerateTangentPolicy,
) -> Result<RingPropagation> {
    let second = pass_velocities(&prediction.points, spreads, policy)?;
    let mut held_vertices = Vec::new();
    let mut inverted_vertices = 0;
    let corrected = points
        .iter()
        .zip(prediction.velocities.iter().zip(&second))
        .enumerate()
        .map(|(i, (p, ((v1, held1), (v2, held2))))| {
            if *held1 || *held2 {
                held_vertices.push(i);
                return *p;
            }
            if v1.dot(v2) < 0.0 {
                inverted_vertices += 1;
            }
            p + (v1 * dt + v2 * dt) * 0.5
        })
        .collect();

    if !held_vertices.is_empty() {
        warn!(
            held = held_vertices.len(),
            vertices = points.len(),
            "degenerate tangents, vertices held in place"
        );
    }
    Ok(RingPropagation {
        points: corrected,
        held_vertices,
        inverted_vertices,
    })
}

/// Advance one closed ring by `dt` seconds
///
/// `spreads[i]` is `None` for vertices that cannot burn (non-burnable fuel); they
/// stay put. The predictor pass finishes for the whole ring before the corrector
/// pass starts, since corrector tangents come from predicted neighbours.
///
/// # Formula
/// ```text
/// Δx  = dt · v(x)
/// x*  = x + Δx
/// x'  = x + ½ (Δx + dt · v(x*))
/// ```
pub fn propagate_ring(
    points: &[Point2<f64>],
    spreads: &[Option<VertexSpread>],
    dt: f64,
    policy: DegenerateTangentPolicy,
) -> Result<RingPropagation> {
    debug_assert_eq!(points.len(), spreads.len());
    if points.len() < 3 || points.len() != spreads.len() {
        return Ok(RingPropagation {
            points: points.to_vec(),
            ..RingPropagation::default()
        });
    }
    let prediction = predict(points, spreads, dt, policy)?;
    correct(points, spreads, &prediction, dt, policy)
}

/// Advance a hole ring, or `None` once the fire has closed it
///
/// A hole has burned out when the predicted ring loses its area or orientation,
/// or when most of its vertices overshoot (their corrector velocity turns back).
fn propagate_hole(
    ring: &Ring,
    spreads: &[Option<VertexSpread>],
    dt: f64,
    policy: DegenerateTangentPolicy,
) -> Result<Option<RingPropagation>> {
    if ring.len() < 3 || ring.len() != spreads.len() {
        return Ok(None);
    }
    let before = ring.signed_area();
    let prediction = predict(&ring.points, spreads, dt, policy)?;
    let predicted = Ring::new(prediction.points.clone());
    let after = predicted.signed_area();
    if after.abs() <= before.abs() * 1e-9 || after.signum() != before.signum() {
        return Ok(None);
    }
    let moved = correct(&ring.points, spreads, &prediction, dt, policy)?;
    let result = Ring::new(moved.points.clone());
    if 2 * moved.inverted_vertices > ring.len()
        || result.is_degenerate()
        || result.is_counter_clockwise()
    {
        return Ok(None);
    }
    Ok(Some(moved))
}

/// A vertex left in place because its tangent was degenerate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldVertex {
    /// Index of the vertex in its ring
    pub vertex: usize,
    pub position: Point2<f64>,
}

/// Result of propagating a whole perimeter tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreePropagation {
    pub tree: PerimeterTree,
    /// Trees that were islands of holes which burned out
    pub released_islands: Vec<PerimeterTree>,
    pub held_vertices: Vec<HeldVertex>,
    pub collapsed_holes: usize,
}

fn held_in<'a>(
    ring: &'a Ring,
    propagation: &'a RingPropagation,
) -> impl Iterator<Item = HeldVertex> + 'a {
    propagation
        .held_vertices
        .iter()
        .map(move |&vertex| HeldVertex {
            vertex,
            position: ring.points[vertex],
        })
}

/// Advance every ring of a tree
///
/// `spreads_for` returns the per-vertex spread of a ring. Holes that the fire has
/// closed are dropped; any islands they contained are handed back in
/// [`TreePropagation::released_islands`].
pub fn propagate_tree<F>(
    tree: &PerimeterTree,
    dt: f64,
    policy: DegenerateTangentPolicy,
    spreads_for: &F,
) -> Result<TreePropagation>
where
    F: Fn(&Ring) -> Result<Vec<Option<VertexSpread>>> + Sync,
{
    let spreads = spreads_for(&tree.exterior)?;
    let exterior = propagate_ring(&tree.exterior.points, &spreads, dt, policy)?;
    let mut held_vertices: Vec<HeldVertex> = held_in(&tree.exterior, &exterior).collect();
    let mut collapsed_holes = 0;
    let mut released_islands = Vec::new();
    let mut holes = Vec::with_capacity(tree.holes.len());

    for hole in &tree.holes {
        let spreads = spreads_for(&hole.ring)?;
        let moved = propagate_hole(&hole.ring, &spreads, dt, policy)?;

        let mut islands = Vec::with_capacity(hole.islands.len());
        for island in &hole.islands {
            let propagated = propagate_tree(island, dt, policy, spreads_for)?;
            held_vertices.extend(propagated.held_vertices);
            collapsed_holes += propagated.collapsed_holes;
            released_islands.extend(propagated.released_islands);
            islands.push(propagated.tree);
        }

        match moved {
            Some(moved) => {
                held_vertices.extend(held_in(&hole.ring, &moved));
                holes.push(HoleNode {
                    ring: Ring::new(moved.points),
                    islands,
                });
            }
            None => {
                debug!(vertices = hole.ring.len(), "hole burned out");
                collapsed_holes += 1;
                released_islands.extend(islands);
            }
        }
    }

    Ok(TreePropagation {
        tree: PerimeterTree {
            exterior: Ring::new(exterior.points),
            holes,
        },
        released_islands,
        held_vertices,
        collapsed_holes,
    })
}
