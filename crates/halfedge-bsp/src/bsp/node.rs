//! BSP tree node.

use crate::{HalfEdgeMesh, Plane3D, PolygonId, Result};

/// A node of a [`BspTree`](super::BspTree).
///
/// Polygons lying on the node's plane are kept at the node, separated by
/// whether their normal agrees with the plane normal. Children are indices
/// into the tree's node arena.
///
/// The stored handles are the ones that were live when the node was built.
/// A later split may tombstone them; the tree resolves them through the
/// mesh whenever it hands polygons out.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    plane: Plane3D,
    /// Coplanar polygons facing the same way as `plane`.
    coplanar_front: Vec<PolygonId>,
    /// Coplanar polygons facing against `plane`.
    coplanar_back: Vec<PolygonId>,
    front: Option<usize>,
    back: Option<usize>,
}

impl BspNode {
    pub(crate) fn with_coplanar(
        plane: Plane3D,
        coplanar_front: Vec<PolygonId>,
        coplanar_back: Vec<PolygonId>,
    ) -> Self {
        Self {
            plane,
            coplanar_front,
            coplanar_back,
            front: None,
            back: None,
        }
    }

    pub(crate) fn set_children(&mut self, front: Option<usize>, back: Option<usize>) {
        self.front = front;
        self.back = back;
    }

    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    #[inline]
    pub fn coplanar_front(&self) -> &[PolygonId] {
        &self.coplanar_front
    }

    #[inline]
    pub fn coplanar_back(&self) -> &[PolygonId] {
        &self.coplanar_back
    }

    /// Both coplanar lists, front-facing first.
    pub fn all_coplanar(&self) -> impl Iterator<Item = PolygonId> + '_ {
        self.coplanar_front
            .iter()
            .chain(&self.coplanar_back)
            .copied()
    }

    pub fn coplanar_count(&self) -> usize {
        self.coplanar_front.len() + self.coplanar_back.len()
    }

    /// Index of the subtree in front of the plane.
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.front
    }

    /// Index of the subtree behind the plane.
    #[inline]
    pub fn back(&self) -> Option<usize> {
        self.back
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }
}

/// `true` when the polygon's normal points to the front side of `plane`.
///
/// Fails with [`MeshError::DegenerateGeometry`](crate::MeshError) for a
/// zero-area polygon.
pub fn faces_same_direction(mesh: &HalfEdgeMesh, id: PolygonId, plane: &Plane3D) -> Result<bool> {
    let own = mesh.polygon_plane(id)?;
    Ok(own.normal().dot(&plane.normal()) > 0.0)
}
