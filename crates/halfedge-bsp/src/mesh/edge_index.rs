//! Directed-edge lookup used to discover twins while building topology.

use std::collections::HashMap;

use crate::{HalfEdgeId, VertexId};

/// Maps an ordered `(origin, destination)` vertex pair to the half-edge that
/// claimed it most recently.
///
/// This is scratch state. The store may drop it at any time and rebuild it
/// from the live polygons when the next construction or split needs it.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeIndex {
    map: HashMap<(VertexId, VertexId), HalfEdgeId>,
}

impl EdgeIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Records `from -> to`, returning the half-edge it displaced, if any.
    #[inline]
    pub(crate) fn insert(
        &mut self,
        from: VertexId,
        to: VertexId,
        edge: HalfEdgeId,
    ) -> Option<HalfEdgeId> {
        self.map.insert((from, to), edge)
    }

    #[inline]
    pub(crate) fn get(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.map.get(&(from, to)).copied()
    }

    /// Forgets `from -> to` only if it still points at `edge`.
    pub(crate) fn remove_if(&mut self, from: VertexId, to: VertexId, edge: HalfEdgeId) {
        if self.get(from, to) == Some(edge) {
            self.map.remove(&(from, to));
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
