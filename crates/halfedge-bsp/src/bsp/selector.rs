//! Splitting plane selection.
//!
//! The choice of splitting polygon decides how balanced the tree is and how
//! many polygons get split while building it.

use crate::{HalfEdgeMesh, PolygonId};

/// Strategy for picking the polygon whose plane splits a node.
pub trait PlaneSelector {
    /// Picks one of `polygons`, or `None` when the slice is empty.
    ///
    /// The returned handle must be an element of `polygons`.
    fn select(&self, mesh: &HalfEdgeMesh, polygons: &[PolygonId]) -> Option<PolygonId>;
}

/// Picks the first polygon in the list.
///
/// Fast, but the tree shape depends entirely on input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select(&self, _mesh: &HalfEdgeMesh, polygons: &[PolygonId]) -> Option<PolygonId> {
        polygons.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_polygon_empty_list() {
        let mesh = HalfEdgeMesh::new();
        assert_eq!(FirstPolygon.select(&mesh, &[]), None);
    }

    #[test]
    fn first_polygon_takes_head() {
        let mesh = HalfEdgeMesh::new();
        let polygons = [PolygonId::new(4), PolygonId::new(2)];
        assert_eq!(FirstPolygon.select(&mesh, &polygons), Some(PolygonId::new(4)));
    }
}
