//! Callbacks for ordered tree traversal.

use crate::PolygonId;

/// Receives polygon groups during traversal.
///
/// Every call carries the live polygons of one node, all lying on that
/// node's plane. Closures taking `&[PolygonId]` are visitors too.
pub trait BspVisitor {
    fn visit(&mut self, polygons: &[PolygonId]);
}

impl<F> BspVisitor for F
where
    F: FnMut(&[PolygonId]),
{
    fn visit(&mut self, polygons: &[PolygonId]) {
        self(polygons)
    }
}

/// Collects visited polygons in visiting order.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<PolygonId>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> &[PolygonId] {
        &self.collected
    }

    pub fn into_polygons(self) -> Vec<PolygonId> {
        self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, polygons: &[PolygonId]) {
        self.collected.extend_from_slice(polygons);
    }
}
