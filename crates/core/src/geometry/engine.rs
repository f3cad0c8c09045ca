//! Perimeter consolidation
//!
//! After every step the propagated rings may self-intersect (swallowtails where the
//! front folds over itself) and separate fires may overlap. Consolidation turns that
//! soup back into a set of valid simple polygons in four ordered stages:
//!
//! 1. fix invalid geometries
//! 2. dissolve (union) everything into one multipart feature
//! 3. explode the multipart feature into single polygons
//! 4. normalise ring winding
//!
//! The stages are exposed on [`GeometryEngine`] so alternative backends (or test
//! doubles) can override any of them.

use super::{MultiPerimeter, PerimeterPolygon, Ring};
use crate::error::{Error, Result};
use geo::orient::{Direction, Orient};
use geo::{BooleanOps, MultiPolygon};
use tracing::{debug, warn};

/// Polygon operations used by the step driver
pub trait GeometryEngine: Send + Sync {
    /// Repair each polygon, possibly splitting it into several parts
    fn fix_invalid(&self, polygons: Vec<PerimeterPolygon>) -> Result<Vec<MultiPerimeter>>;

    /// Union all features into a single multipart feature
    fn dissolve(&self, features: Vec<MultiPerimeter>) -> Result<MultiPerimeter>;

    /// Split a multipart feature into its parts
    fn explode(&self, feature: MultiPerimeter) -> Vec<PerimeterPolygon> {
        feature.parts
    }

    /// Exterior rings counter-clockwise, holes clockwise
    fn normalize_winding(&self, polygons: Vec<PerimeterPolygon>) -> Vec<PerimeterPolygon>;

    /// Run the full pipeline
    fn consolidate(&self, polygons: Vec<PerimeterPolygon>) -> Result<Vec<PerimeterPolygon>> {
        if let Some(index) = polygons.iter().position(|p| !p.is_finite()) {
            return Err(Error::ConsolidationFailed {
                reason: format!("polygon {index} has non-finite coordinates"),
            });
        }
        let input = polygons.len();
        let fixed = self.fix_invalid(polygons)?;
        let dissolved = self.dissolve(fixed)?;
        let exploded = self.explode(dissolved);
        let normalized = self.normalize_winding(exploded);

        let mut output = Vec::with_capacity(normalized.len());
        for polygon in normalized {
            if !polygon.is_finite() {
                return Err(Error::ConsolidationFailed {
                    reason: "consolidated polygon has non-finite coordinates".to_string(),
                });
            }
            if polygon.exterior.is_degenerate() {
                warn!(
                    vertices = polygon.exterior.len(),
                    "dropping degenerate consolidated polygon"
                );
                continue;
            }
            output.push(polygon);
        }
        if input > 0 && output.is_empty() {
            return Err(Error::ConsolidationFailed {
                reason: format!("consolidation of {input} polygons produced no output"),
            });
        }
        debug!(input, output = output.len(), "consolidated perimeters");
        Ok(output)
    }
}

/// [`GeometryEngine`] backed by the `geo` crate's boolean operations
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeoEngine {
    fn to_multi(feature: &MultiPerimeter) -> MultiPolygon<f64> {
        MultiPolygon::new(feature.parts.iter().map(PerimeterPolygon::to_geo).collect())
    }

    fn from_multi(multi: &MultiPolygon<f64>) -> MultiPerimeter {
        MultiPerimeter::new(multi.0.iter().map(PerimeterPolygon::from_geo).collect())
    }
}

impl GeometryEngine for GeoEngine {
    fn fix_invalid(&self, polygons: Vec<PerimeterPolygon>) -> Result<Vec<MultiPerimeter>> {
        let empty = MultiPolygon::<f64>::new(Vec::new());
        let mut features = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            if polygon.exterior.is_degenerate() {
                continue;
            }
            let holes: Vec<Ring> = polygon
                .holes
                .into_iter()
                .filter(|hole| !hole.is_degenerate())
                .collect();
            let cleaned = PerimeterPolygon::new(polygon.exterior, holes);
            // a union with nothing resolves self-intersections
            let repaired = cleaned.to_geo().union(&empty);
            features.push(Self::from_multi(&repaired));
        }
        Ok(features)
    }

    fn dissolve(&self, features: Vec<MultiPerimeter>) -> Result<MultiPerimeter> {
        let merged = features
            .iter()
            .filter(|feature| !feature.is_empty())
            .fold(MultiPolygon::<f64>::new(Vec::new()), |acc, feature| {
                acc.union(&Self::to_multi(feature))
            });
        Ok(Self::from_multi(&merged))
    }

    fn normalize_winding(&self, polygons: Vec<PerimeterPolygon>) -> Vec<PerimeterPolygon> {
        polygons
            .iter()
            .map(|polygon| PerimeterPolygon::from_geo(&polygon.to_geo().orient(Direction::Default)))
            .collect()
    }
}
