//! Nesting of burned areas
//!
//! A consolidated perimeter set is a forest: each fire has an exterior ring, its
//! holes are unburned pockets, and a hole can itself contain burning islands which
//! have holes of their own. The tree keeps those relations explicit while the
//! rings are propagated and is flattened back to simple polygons for consolidation.

use super::{PerimeterPolygon, Ring};
use geo::{Contains, Coord, Polygon};
use rustc_hash::FxHashMap;

/// An unburned pocket and the fires burning inside it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoleNode {
    pub ring: Ring,
    pub islands: Vec<PerimeterTree>,
}

/// One burned area with its holes and nested islands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerimeterTree {
    pub exterior: Ring,
    pub holes: Vec<HoleNode>,
}

impl PerimeterTree {
    /// Tree with no holes
    pub fn leaf(exterior: Ring) -> Self {
        PerimeterTree {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Arrange simple polygons into trees
    ///
    /// A polygon becomes an island of the smallest hole (of any other polygon)
    /// that contains its first exterior vertex. Polygons inside no hole are roots.
    pub fn from_polygons(polygons: Vec<PerimeterPolygon>) -> Vec<PerimeterTree> {
        let hole_shapes: Vec<Vec<(Polygon<f64>, f64)>> = polygons
            .iter()
            .map(|polygon| {
                polygon
                    .holes
                    .iter()
                    .map(|hole| {
                        let shape = Polygon::new(hole.to_line_string(), Vec::new());
                        (shape, hole.signed_area().abs())
                    })
                    .collect()
            })
            .collect();

        let mut children: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();
        let mut roots = Vec::new();
        for (index, polygon) in polygons.iter().enumerate() {
            let Some(anchor) = polygon.exterior.points.first() else {
                continue;
            };
            let anchor = Coord {
                x: anchor.x,
                y: anchor.y,
            };
            let parent = hole_shapes
                .iter()
                .enumerate()
                .filter(|(owner, _)| *owner != index)
                .flat_map(|(owner, holes)| {
                    holes
                        .iter()
                        .enumerate()
                        .map(move |(hole, (shape, area))| (owner, hole, shape, *area))
                })
                .filter(|(_, _, shape, _)| shape.contains(&anchor))
                .min_by(|a, b| a.3.total_cmp(&b.3))
                .map(|(owner, hole, _, _)| (owner, hole));
            match parent {
                Some(key) => children.entry(key).or_default().push(index),
                None => roots.push(index),
            }
        }

        let mut slots: Vec<Option<PerimeterPolygon>> = polygons.into_iter().map(Some).collect();
        roots
            .into_iter()
            .filter_map(|root| Self::build(root, &mut slots, &children))
            .collect()
    }

    fn build(
        index: usize,
        slots: &mut [Option<PerimeterPolygon>],
        children: &FxHashMap<(usize, usize), Vec<usize>>,
    ) -> Option<PerimeterTree> {
        let polygon = slots.get_mut(index)?.take()?;
        let holes = polygon
            .holes
            .into_iter()
            .enumerate()
            .map(|(hole, ring)| HoleNode {
                ring,
                islands: children
                    .get(&(index, hole))
                    .map(|kids| {
                        kids.iter()
                            .filter_map(|&kid| Self::build(kid, slots, children))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();
        Some(PerimeterTree {
            exterior: polygon.exterior,
            holes,
        })
    }

    /// Simple polygons for this tree and everything nested in it
    pub fn flatten(&self) -> Vec<PerimeterPolygon> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<PerimeterPolygon>) {
        out.push(PerimeterPolygon::new(
            self.exterior.clone(),
            self.holes.iter().map(|hole| hole.ring.clone()).collect(),
        ));
        for hole in &self.holes {
            for island in &hole.islands {
                island.flatten_into(out);
            }
        }
    }

    /// Number of rings in the tree
    pub fn ring_count(&self) -> usize {
        1 + self
            .holes
            .iter()
            .map(|hole| 1 + hole.islands.iter().map(PerimeterTree::ring_count).sum::<usize>())
            .sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .holes
            .iter()
            .flat_map(|hole| hole.islands.iter().map(PerimeterTree::depth))
            .max()
            .unwrap_or(0)
    }
}

/// Flatten a forest of trees
pub fn flatten_all(trees: &[PerimeterTree]) -> Vec<PerimeterPolygon> {
    trees.iter().flat_map(PerimeterTree::flatten).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn square(x0: f64, y0: f64, size: f64) -> Ring {
        Ring::new(vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
    }

    #[test]
    fn test_island_nested_in_hole() {
        let outer = PerimeterPolygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 6.0).reversed()]);
        let island = PerimeterPolygon::from_exterior(square(4.0, 4.0, 2.0));
        let separate = PerimeterPolygon::from_exterior(square(20.0, 0.0, 1.0));

        let trees = PerimeterTree::from_polygons(vec![island, outer, separate]);
        assert_eq!(trees.len(), 2);
        let nested = trees.iter().find(|tree| tree.holes.len() == 1).unwrap();
        assert_eq!(nested.holes[0].islands.len(), 1);
        assert_eq!(nested.depth(), 2);
        assert_eq!(nested.ring_count(), 3);
    }

    #[test]
    fn test_flatten_restores_polygons() {
        let outer = PerimeterPolygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 6.0).reversed()]);
        let island = PerimeterPolygon::from_exterior(square(4.0, 4.0, 2.0));
        let trees = PerimeterTree::from_polygons(vec![outer.clone(), island.clone()]);
        let flat = flatten_all(&trees);
        assert_eq!(flat, vec![outer, island]);
    }

    #[test]
    fn test_smallest_hole_wins() {
        let big = PerimeterPolygon::new(square(0.0, 0.0, 30.0), vec![square(1.0, 1.0, 28.0).reversed()]);
        let middle = PerimeterPolygon::new(square(5.0, 5.0, 20.0), vec![square(7.0, 7.0, 16.0).reversed()]);
        let inner = PerimeterPolygon::from_exterior(square(14.0, 14.0, 2.0));
        let trees = PerimeterTree::from_polygons(vec![big, middle, inner]);
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].depth(), 3);
    }
}
