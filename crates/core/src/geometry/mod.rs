//! Perimeter geometry
//!
//! Rings are stored open (the last vertex connects back to the first). Exterior
//! rings run counter-clockwise and hole rings clockwise, so the burned area is
//! always on the left when walking a ring.

mod engine;
mod topology;

pub use engine::{GeoEngine, GeometryEngine};
pub use topology::{flatten_all, HoleNode, PerimeterTree};

use geo::{Coord, LineString, Polygon};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closed ring of perimeter vertices with implicit wraparound
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring {
    pub points: Vec<Point2<f64>>,
}

impl Ring {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Ring { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise rings
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let p = self.points[i];
                let q = self.points[(i + 1) % n];
                p.x * q.y - q.x * p.y
            })
            .sum();
        twice / 2.0
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Fewer than three vertices or no enclosed area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.signed_area().abs() <= f64::EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    #[must_use]
    pub fn reversed(&self) -> Ring {
        let mut points = self.points.clone();
        points.reverse();
        Ring { points }
    }

    /// Vertex average
    pub fn centroid(&self) -> Point2<f64> {
        if self.points.is_empty() {
            return Point2::origin();
        }
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / self.points.len() as f64)
    }

    pub(crate) fn to_line_string(&self) -> LineString<f64> {
        // geo closes the ring when it is used in a polygon
        LineString::new(
            self.points
                .iter()
                .map(|p| Coord { x: p.x, y: p.y })
                .collect(),
        )
    }

    pub(crate) fn from_line_string(line: &LineString<f64>) -> Ring {
        let mut points: Vec<Point2<f64>> = line.coords().map(|c| Point2::new(c.x, c.y)).collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Ring { points }
    }
}

/// Simple polygon: one exterior ring and any number of holes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerimeterPolygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl PerimeterPolygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        PerimeterPolygon { exterior, holes }
    }

    pub fn from_exterior(exterior: Ring) -> Self {
        PerimeterPolygon {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Burned area, exterior minus holes
    pub fn area(&self) -> f64 {
        self.exterior.signed_area().abs()
            - self
                .holes
                .iter()
                .map(|hole| hole.signed_area().abs())
                .sum::<f64>()
    }

    pub fn vertex_count(&self) -> usize {
        self.exterior.len() + self.holes.iter().map(Ring::len).sum::<usize>()
    }

    pub fn is_finite(&self) -> bool {
        self.exterior.is_finite() && self.holes.iter().all(Ring::is_finite)
    }

    pub(crate) fn to_geo(&self) -> Polygon<f64> {
        Polygon::new(
            self.exterior.to_line_string(),
            self.holes.iter().map(Ring::to_line_string).collect(),
        )
    }

    pub(crate) fn from_geo(polygon: &Polygon<f64>) -> Self {
        PerimeterPolygon {
            exterior: Ring::from_line_string(polygon.exterior()),
            holes: polygon
                .interiors()
                .iter()
                .map(Ring::from_line_string)
                .collect(),
        }
    }
}

/// A feature made of several disjoint polygons
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPerimeter {
    pub parts: Vec<PerimeterPolygon>,
}

impl MultiPerimeter {
    pub fn new(parts: Vec<PerimeterPolygon>) -> Self {
        MultiPerimeter { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn test_signed_area_orientation() {
        assert!((square().signed_area() - 4.0).abs() < 1e-12);
        assert!((square().reversed().signed_area() + 4.0).abs() < 1e-12);
        assert!(square().is_counter_clockwise());
    }

    #[test]
    fn test_centroid() {
        let c = square().centroid();
        assert!((c.x - 1.0).abs() < 1e-12 && (c.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_geo_conversion_drops_closing_vertex() {
        let polygon = PerimeterPolygon::from_exterior(square());
        let back = PerimeterPolygon::from_geo(&polygon.to_geo());
        assert_eq!(back.exterior.len(), 4);
    }

    #[test]
    fn test_polygon_area_subtracts_holes() {
        let hole = Ring::new(vec![
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 1.5),
            Point2::new(1.5, 1.5),
            Point2::new(1.5, 0.5),
        ]);
        let polygon = PerimeterPolygon::new(square(), vec![hole]);
        assert!((polygon.area() - 3.0).abs() < 1e-12);
        assert_eq!(polygon.vertex_count(), 8);
    }

    #[test]
    fn test_degenerate_ring() {
        let line = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]);
        assert!(line.is_degenerate());
        assert!(!square().is_degenerate());
    }
}
