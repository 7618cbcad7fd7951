//! BSP tree container and construction.

use nalgebra::Point3;

use crate::{HalfEdgeMesh, MeshError, PlaneSide, PolygonId, Result};

use super::node::{BspNode, faces_same_direction};
use super::selector::PlaneSelector;
use super::visitor::BspVisitor;

/// A binary space partitioning of mesh polygons.
///
/// Nodes live in an arena and refer to each other by index; the root is
/// always the first node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree over `polygons`, splitting the mesh as it goes.
    ///
    /// Tombstoned handles are resolved first. Every split performed here is
    /// a regular [`HalfEdgeMesh::split`], so neighbours of split polygons
    /// that are not part of `polygons` get split too.
    ///
    /// A zero-area polygon fails with
    /// [`MeshError::DegenerateGeometry`](crate::MeshError) once it is
    /// reached. Splits performed before that point stay in the mesh.
    pub fn build<S: PlaneSelector>(
        mesh: &mut HalfEdgeMesh,
        polygons: &[PolygonId],
        selector: &S,
    ) -> Result<Self> {
        let mut tree = Self::new();
        let polygons = mesh.resolve_all(polygons)?;
        build_node(mesh, polygons, selector, &mut tree.nodes)?;
        log::debug!(
            "built BSP tree with {} nodes, depth {}",
            tree.nodes.len(),
            tree.depth()
        );
        Ok(tree)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.nodes.first()
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&BspNode> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    /// Number of polygon handles stored in the nodes, as they were when the
    /// tree was built.
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(BspNode::coplanar_count).sum()
    }

    /// Longest root-to-leaf path, counted in nodes (0 for an empty tree).
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut deepest = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((index, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.front().map(|child| (child, depth + 1)));
            stack.extend(node.back().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// All live polygons of the tree, node by node in pre-order.
    pub fn collect_polygons(&self, mesh: &HalfEdgeMesh) -> Result<Vec<PolygonId>> {
        let stored: Vec<PolygonId> = self.nodes.iter().flat_map(BspNode::all_coplanar).collect();
        mesh.resolve_all(&stored)
    }

    /// Visits polygon groups nearest to `eye` first.
    pub fn traverse_front_to_back<V: BspVisitor>(
        &self,
        mesh: &HalfEdgeMesh,
        eye: Point3<f32>,
        visitor: &mut V,
    ) -> Result<()> {
        self.traverse(mesh, eye, true, visitor)
    }

    /// Visits polygon groups farthest from `eye` first, the painter's
    /// algorithm order.
    pub fn traverse_back_to_front<V: BspVisitor>(
        &self,
        mesh: &HalfEdgeMesh,
        eye: Point3<f32>,
        visitor: &mut V,
    ) -> Result<()> {
        self.traverse(mesh, eye, false, visitor)
    }

    fn traverse<V: BspVisitor>(
        &self,
        mesh: &HalfEdgeMesh,
        eye: Point3<f32>,
        near_first: bool,
        visitor: &mut V,
    ) -> Result<()> {
        if !self.is_empty() {
            self.traverse_node(0, mesh, eye, near_first, visitor)?;
        }
        Ok(())
    }

    fn traverse_node<V: BspVisitor>(
        &self,
        index: usize,
        mesh: &HalfEdgeMesh,
        eye: Point3<f32>,
        near_first: bool,
        visitor: &mut V,
    ) -> Result<()> {
        let node = &self.nodes[index];
        let (near, far) = match node.plane().classify_point(eye) {
            PlaneSide::Front | PlaneSide::OnPlane => (node.front(), node.back()),
            PlaneSide::Back => (node.back(), node.front()),
        };
        let (first, last) = if near_first { (near, far) } else { (far, near) };

        if let Some(child) = first {
            self.traverse_node(child, mesh, eye, near_first, visitor)?;
        }
        let stored: Vec<PolygonId> = node.all_coplanar().collect();
        let coplanar = mesh.resolve_all(&stored)?;
        if !coplanar.is_empty() {
            visitor.visit(&coplanar);
        }
        if let Some(child) = last {
            self.traverse_node(child, mesh, eye, near_first, visitor)?;
        }
        Ok(())
    }
}

/// Builds the subtree for `polygons` and returns its node index.
fn build_node<S: PlaneSelector>(
    mesh: &mut HalfEdgeMesh,
    mut polygons: Vec<PolygonId>,
    selector: &S,
    nodes: &mut Vec<BspNode>,
) -> Result<Option<usize>> {
    let Some(splitter) = selector.select(mesh, &polygons) else {
        return Ok(None);
    };
    let position = polygons
        .iter()
        .position(|&id| id == splitter)
        .ok_or_else(|| {
            MeshError::InvalidTopology(format!(
                "selector picked {splitter}, which is not among the node's polygons"
            ))
        })?;
    polygons.swap_remove(position);

    let plane = mesh.polygon_plane(splitter)?;
    // The rest may contain fragments of an earlier collateral split.
    let rest = mesh.resolve_all(&polygons)?;
    let split = mesh.split(&rest, &plane)?;

    let mut coplanar_front = vec![splitter];
    let mut coplanar_back = Vec::new();
    for id in split.coplanar {
        if faces_same_direction(mesh, id, &plane)? {
            coplanar_front.push(id);
        } else {
            coplanar_back.push(id);
        }
    }
    log::trace!(
        "node {} on {splitter}: {} coplanar, {} front, {} back",
        nodes.len(),
        coplanar_front.len() + coplanar_back.len(),
        split.front.len(),
        split.back.len()
    );

    let index = nodes.len();
    nodes.push(BspNode::with_coplanar(plane, coplanar_front, coplanar_back));
    let front = build_node(mesh, split.front, selector, nodes)?;
    let back = build_node(mesh, split.back, selector, nodes)?;
    nodes[index].set_children(front, back);
    Ok(Some(index))
}
