//! Half-edge mesh store.
//!
//! All vertices, half-edges and polygons live in append-only arenas owned by
//! [`HalfEdgeMesh`] and are referenced through [`VertexId`], [`HalfEdgeId`]
//! and [`PolygonId`] handles. Nothing is ever removed: a polygon replaced by
//! a split is tombstoned and keeps a list of the polygons that replaced it.
//!
//! # Example
//!
//! ```
//! use halfedge_bsp::HalfEdgeMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = HalfEdgeMesh::new();
//! let a = mesh.create_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.create_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.create_vertex(Point3::new(0.0, 1.0, 0.0));
//! let d = mesh.create_vertex(Point3::new(1.0, 1.0, 0.0));
//!
//! mesh.create_polygon(&[a, b, c]).unwrap();
//! mesh.create_polygon(&[c, b, d]).unwrap();
//!
//! // b->c and c->b found each other.
//! assert_eq!(mesh.boundary_edges().len(), 4);
//! ```

mod edge_index;
mod primitives;
mod topology;

use nalgebra::{Point3, Vector3};

pub(crate) use edge_index::EdgeIndex;
pub use primitives::CubeFace;

use crate::{HalfEdgeId, MeshError, Plane3D, PolygonId, Result, VertexId};

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    position: Point3<f32>,
    edge: HalfEdgeId,
}

impl Vertex {
    /// Position of the vertex. Fixed at creation.
    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// First half-edge ever created with this vertex as origin.
    ///
    /// Never rewritten, so after a split it may belong to a tombstoned
    /// polygon.
    #[inline]
    pub fn edge(&self) -> Option<HalfEdgeId> {
        self.edge.valid()
    }
}

/// A directed edge owned by exactly one polygon.
///
/// The origin is [`vertex`](Self::vertex); the destination is the origin of
/// [`next`](Self::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    twin: HalfEdgeId,
    next: HalfEdgeId,
    prev: HalfEdgeId,
    polygon: PolygonId,
    vertex: VertexId,
}

impl HalfEdge {
    /// Oppositely directed half-edge of the neighbouring polygon, `None` on a
    /// boundary.
    #[inline]
    pub fn twin(&self) -> Option<HalfEdgeId> {
        self.twin.valid()
    }

    /// Next half-edge around the owning polygon.
    #[inline]
    pub fn next(&self) -> HalfEdgeId {
        self.next
    }

    /// Previous half-edge around the owning polygon.
    #[inline]
    pub fn prev(&self) -> HalfEdgeId {
        self.prev
    }

    /// Owning polygon.
    #[inline]
    pub fn polygon(&self) -> PolygonId {
        self.polygon
    }

    /// Origin vertex.
    #[inline]
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }
}

/// A polygon, identified by one half-edge of its loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    edge: HalfEdgeId,
    live: bool,
    successors: Vec<PolygonId>,
}

impl Polygon {
    /// One half-edge of the loop. Following `next` from here visits the
    /// whole polygon.
    #[inline]
    pub fn edge(&self) -> HalfEdgeId {
        self.edge
    }

    /// `false` once the polygon has been replaced by split fragments.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Polygons that replaced this one. Empty while it is live.
    #[inline]
    pub fn successors(&self) -> &[PolygonId] {
        &self.successors
    }
}

/// Arena-backed half-edge mesh.
///
/// The directed-edge index used to find twins is construction scratch. A
/// split drops it when it finishes, so do the primitive builders and
/// [`Clone`]; it is rebuilt from the live polygons when next needed.
#[derive(Debug, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    polygons: Vec<Polygon>,
    edge_index: Option<EdgeIndex>,
}

impl Clone for HalfEdgeMesh {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            half_edges: self.half_edges.clone(),
            polygons: self.polygons.clone(),
            edge_index: None,
        }
    }
}

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex. Coincident positions are not welded.
    pub fn create_vertex(&mut self, position: Point3<f32>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex {
            position,
            edge: HalfEdgeId::INVALID,
        });
        id
    }

    /// Appends a polygon whose loop visits `vertices` in order.
    ///
    /// One half-edge is emitted per consecutive pair. If the reverse pair was
    /// already claimed by another half-edge, the two become twins.
    ///
    /// Fails with [`MeshError::InvalidTopology`] (leaving the mesh unchanged)
    /// for fewer than three vertices, an unknown vertex handle, or the same
    /// vertex twice in a row.
    pub fn create_polygon(&mut self, vertices: &[VertexId]) -> Result<PolygonId> {
        if vertices.len() < 3 {
            return Err(MeshError::InvalidTopology(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices.iter().find(|v| v.index() >= self.vertices.len()) {
            return Err(MeshError::InvalidTopology(format!(
                "vertex {bad} does not exist (store holds {})",
                self.vertices.len()
            )));
        }
        let n = vertices.len();
        if let Some(i) = (0..n).find(|&i| vertices[i] == vertices[(i + 1) % n]) {
            return Err(MeshError::InvalidTopology(format!(
                "vertex {} repeats at loop position {i}",
                vertices[i]
            )));
        }

        Ok(self.add_loop(vertices))
    }

    /// Drops the directed-edge index, ending a construction session. It is
    /// rebuilt from the live polygons the next time a polygon is created or
    /// a split runs.
    pub fn release_edge_index(&mut self) {
        self.edge_index = None;
    }

    /// Whether the directed-edge index is currently held.
    #[inline]
    pub fn has_edge_index(&self) -> bool {
        self.edge_index.is_some()
    }

    /// Returns the vertex record for `id`.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices
            .get(id.index())
            .ok_or_else(|| out_of_range("vertex", id.raw(), self.vertices.len()))
    }

    /// Returns the half-edge record for `id`.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdge> {
        self.half_edges
            .get(id.index())
            .ok_or_else(|| out_of_range("half-edge", id.raw(), self.half_edges.len()))
    }

    /// Returns the polygon record for `id`.
    pub fn polygon(&self, id: PolygonId) -> Result<&Polygon> {
        self.polygons
            .get(id.index())
            .ok_or_else(|| out_of_range("polygon", id.raw(), self.polygons.len()))
    }

    /// All vertices ever created, indexed by [`VertexId::index`].
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All half-edges ever created, including those of tombstoned polygons.
    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// All polygons ever created, including tombstoned ones.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Handles of the polygons that have not been replaced by a split.
    pub fn live_polygons(&self) -> impl Iterator<Item = PolygonId> + '_ {
        self.polygons
            .iter()
            .enumerate()
            .filter(|(_, p)| p.live)
            .map(|(i, _)| PolygonId::new(i))
    }

    /// Number of live polygons.
    pub fn live_polygon_count(&self) -> usize {
        self.polygons.iter().filter(|p| p.live).count()
    }

    /// Destination vertex of a half-edge (origin of its `next`).
    pub fn destination(&self, id: HalfEdgeId) -> Result<VertexId> {
        let next = self.half_edge(id)?.next;
        Ok(self.half_edge(next)?.vertex)
    }

    /// Iterates the half-edges of a polygon's loop, starting at its
    /// [`edge`](Polygon::edge).
    pub fn loop_edges(&self, id: PolygonId) -> Result<LoopEdges<'_>> {
        let start = self.polygon(id)?.edge;
        self.half_edge(start)?;
        Ok(LoopEdges {
            edges: &self.half_edges,
            start,
            current: Some(start),
            budget: self.half_edges.len(),
        })
    }

    /// Origin vertices of a polygon's loop, in order.
    pub fn polygon_vertices(&self, id: PolygonId) -> Result<Vec<VertexId>> {
        Ok(self
            .loop_edges(id)?
            .map(|e| self.half_edges[e.index()].vertex)
            .collect())
    }

    /// Positions of a polygon's loop, in order.
    pub fn polygon_positions(&self, id: PolygonId) -> Result<Vec<Point3<f32>>> {
        Ok(self
            .loop_edges(id)?
            .map(|e| self.position_of(self.half_edges[e.index()].vertex))
            .collect())
    }

    /// Number of vertices (and half-edges) in a polygon's loop.
    pub fn vertex_count(&self, id: PolygonId) -> Result<usize> {
        Ok(self.loop_edges(id)?.count())
    }

    /// Plane of a polygon, using Newell's normal so concave loops orient
    /// correctly.
    pub fn polygon_plane(&self, id: PolygonId) -> Result<Plane3D> {
        let positions = self.polygon_positions(id)?;
        let normal = newell_normal(&positions);
        if normal.norm() <= f32::EPSILON {
            return Err(MeshError::DegenerateGeometry(format!(
                "polygon {id} has zero area"
            )));
        }
        let centroid = positions.iter().map(|p| p.coords).sum::<Vector3<f32>>()
            / positions.len() as f32;
        Plane3D::from_point_and_normal(Point3::from(centroid), normal)
    }

    /// Live polygons descending from `id`: `id` itself while it is live,
    /// otherwise the live fragments it was split into.
    pub fn resolve(&self, id: PolygonId) -> Result<Vec<PolygonId>> {
        self.polygon(id)?;
        let mut live = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let polygon = &self.polygons[current.index()];
            if polygon.live {
                live.push(current);
            } else {
                stack.extend(polygon.successors.iter().rev());
            }
        }
        Ok(live)
    }

    /// Resolves every handle in `ids`, dropping duplicates but keeping the
    /// first-seen order.
    pub fn resolve_all(&self, ids: &[PolygonId]) -> Result<Vec<PolygonId>> {
        let mut seen = vec![false; self.polygons.len()];
        let mut resolved = Vec::with_capacity(ids.len());
        for &id in ids {
            for live in self.resolve(id)? {
                if !seen[live.index()] {
                    seen[live.index()] = true;
                    resolved.push(live);
                }
            }
        }
        Ok(resolved)
    }

    #[inline]
    pub(crate) fn position_of(&self, id: VertexId) -> Point3<f32> {
        self.vertices[id.index()].position
    }

    #[inline]
    pub(crate) fn edge_record(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.index()]
    }

    #[inline]
    pub(crate) fn destination_of(&self, id: HalfEdgeId) -> VertexId {
        let next = self.half_edges[id.index()].next;
        self.half_edges[next.index()].vertex
    }

    /// Appends a pre-validated loop, resolving twins through the edge index.
    pub(crate) fn add_loop(&mut self, vertices: &[VertexId]) -> PolygonId {
        let mut index = self.take_edge_index();
        let id = self.push_loop(vertices, &mut index);
        self.edge_index = Some(index);
        id
    }

    /// Hands out the edge index, building it from the live polygons if it
    /// was released.
    pub(crate) fn take_edge_index(&mut self) -> EdgeIndex {
        match self.edge_index.take() {
            Some(index) => index,
            None => {
                let mut index = EdgeIndex::with_capacity(self.half_edges.len());
                for (i, edge) in self.half_edges.iter().enumerate() {
                    if self.polygons[edge.polygon.index()].live {
                        let id = HalfEdgeId::new(i);
                        index.insert(edge.vertex, self.destination_of(id), id);
                    }
                }
                log::trace!("rebuilt edge index with {} entries", index.len());
                index
            }
        }
    }

    pub(crate) fn push_loop(&mut self, vertices: &[VertexId], index: &mut EdgeIndex) -> PolygonId {
        let polygon = PolygonId::new(self.polygons.len());
        let first = self.half_edges.len();
        let n = vertices.len();

        self.polygons.push(Polygon {
            edge: HalfEdgeId::new(first),
            live: true,
            successors: Vec::new(),
        });

        for (i, &vertex) in vertices.iter().enumerate() {
            let id = HalfEdgeId::new(first + i);
            self.half_edges.push(HalfEdge {
                twin: HalfEdgeId::INVALID,
                next: HalfEdgeId::new(first + (i + 1) % n),
                prev: HalfEdgeId::new(first + (i + n - 1) % n),
                polygon,
                vertex,
            });

            let record = &mut self.vertices[vertex.index()];
            if !record.edge.is_valid() {
                record.edge = id;
            }
        }

        for (i, &from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % n];
            let id = HalfEdgeId::new(first + i);
            if let Some(reverse) = index.get(to, from) {
                self.link_twins(id, reverse);
            }
            index.insert(from, to, id);
        }

        polygon
    }

    /// Links `edge` and `reverse` unless `reverse` is already paired, which
    /// only happens on non-manifold input. In that case `edge` stays a
    /// boundary so every twin link remains symmetric.
    fn link_twins(&mut self, edge: HalfEdgeId, reverse: HalfEdgeId) {
        let existing = self.half_edges[reverse.index()].twin;
        if existing.is_valid() && existing != edge {
            log::warn!(
                "non-manifold edge: {reverse} is already paired with {existing}, leaving {edge} as a boundary"
            );
            return;
        }
        self.half_edges[edge.index()].twin = reverse;
        self.half_edges[reverse.index()].twin = edge;
    }

    /// Tombstones `retired` and unpairs every live half-edge that pointed
    /// into them. Their directed pairs are removed from `index`.
    pub(crate) fn retire_polygons(&mut self, retired: &[PolygonId], index: &mut EdgeIndex) {
        for &id in retired {
            self.polygons[id.index()].live = false;
        }
        for &id in retired {
            let edges: Vec<HalfEdgeId> = LoopEdges {
                edges: &self.half_edges,
                start: self.polygons[id.index()].edge,
                current: Some(self.polygons[id.index()].edge),
                budget: self.half_edges.len(),
            }
            .collect();

            for edge in edges {
                let record = self.half_edges[edge.index()];
                index.remove_if(record.vertex, self.destination_of(edge), edge);
                if let Some(twin) = record.twin.valid() {
                    let owner = self.half_edges[twin.index()].polygon;
                    if self.polygons[owner.index()].live {
                        self.half_edges[twin.index()].twin = HalfEdgeId::INVALID;
                    }
                }
            }
        }
    }

    pub(crate) fn set_successors(&mut self, id: PolygonId, successors: Vec<PolygonId>) {
        self.polygons[id.index()].successors = successors;
    }
}

/// Iterator over the half-edges of one polygon loop.
///
/// Bounded by the total half-edge count, so a corrupted loop cannot spin
/// forever.
#[derive(Debug, Clone)]
pub struct LoopEdges<'a> {
    edges: &'a [HalfEdge],
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
    budget: usize,
}

impl Iterator for LoopEdges<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let current = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;
        let next = self.edges.get(current.index()).map(|e| e.next);
        self.current = next.filter(|&n| n != self.start && n.index() < self.edges.len());
        Some(current)
    }
}

/// Newell's polygon normal; its length is twice the polygon area.
pub(crate) fn newell_normal(positions: &[Point3<f32>]) -> Vector3<f32> {
    let n = positions.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = positions[i];
        let b = positions[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

fn out_of_range(kind: &'static str, index: u32, len: usize) -> MeshError {
    MeshError::IndexOutOfRange { kind, index, len }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_pair() -> (HalfEdgeMesh, [PolygonId; 2]) {
        // Two unit squares sharing the edge x = 1.
        let mut mesh = HalfEdgeMesh::new();
        let v: Vec<VertexId> = [
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [2.0, 0.0],
            [2.0, 1.0],
        ]
        .iter()
        .map(|[x, y]| mesh.create_vertex(Point3::new(*x, *y, 0.0)))
        .collect();
        let left = mesh.create_polygon(&[v[0], v[1], v[2], v[3]]).unwrap();
        let right = mesh.create_polygon(&[v[1], v[4], v[5], v[2]]).unwrap();
        (mesh, [left, right])
    }

    #[test]
    fn create_vertex_appends() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.create_vertex(Point3::new(1.0, 2.0, 3.0));
        let b = mesh.create_vertex(Point3::new(1.0, 2.0, 3.0));
        assert_ne!(a, b);
        assert_eq!(mesh.vertices().len(), 2);
        assert_eq!(mesh.vertex(a).unwrap().position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertex(a).unwrap().edge(), None);
    }

    #[test]
    fn loop_links_close() {
        let (mesh, [left, _]) = quad_pair();
        let edges: Vec<_> = mesh.loop_edges(left).unwrap().collect();
        assert_eq!(edges.len(), 4);
        for (i, &e) in edges.iter().enumerate() {
            let record = mesh.half_edge(e).unwrap();
            assert_eq!(record.next(), edges[(i + 1) % 4]);
            assert_eq!(mesh.half_edge(record.next()).unwrap().prev(), e);
            assert_eq!(record.polygon(), left);
        }
    }

    #[test]
    fn shared_edge_becomes_twins() {
        let (mesh, [left, right]) = quad_pair();
        let shared: Vec<_> = mesh
            .loop_edges(left)
            .unwrap()
            .filter_map(|e| mesh.half_edge(e).unwrap().twin().map(|t| (e, t)))
            .collect();
        assert_eq!(shared.len(), 1);
        let (e, t) = shared[0];
        assert_eq!(mesh.half_edge(t).unwrap().polygon(), right);
        assert_eq!(mesh.half_edge(t).unwrap().twin(), Some(e));
        assert_eq!(mesh.half_edge(e).unwrap().vertex(), mesh.destination(t).unwrap());
        assert_eq!(mesh.destination(e).unwrap(), mesh.half_edge(t).unwrap().vertex());
        assert_eq!(mesh.boundary_edges().len(), 6);
        mesh.check_topology().unwrap();
    }

    #[test]
    fn incident_edge_is_first_seen() {
        let (mesh, [left, right]) = quad_pair();
        let v1 = mesh.polygon_vertices(left).unwrap()[1];
        let first = mesh.vertex(v1).unwrap().edge().unwrap();
        assert_eq!(mesh.half_edge(first).unwrap().polygon(), left);
        assert!(mesh.polygon_vertices(right).unwrap().contains(&v1));
    }

    #[test]
    fn rejects_malformed_polygons_without_mutation() {
        let (mut mesh, _) = quad_pair();
        let before = (mesh.half_edges().len(), mesh.polygons().len());
        let v0 = VertexId::new(0);
        let v1 = VertexId::new(1);

        let short = mesh.create_polygon(&[v0, v1]).unwrap_err();
        assert!(matches!(short, MeshError::InvalidTopology(_)));

        let unknown = mesh.create_polygon(&[v0, v1, VertexId::new(99)]).unwrap_err();
        assert!(matches!(unknown, MeshError::InvalidTopology(_)));

        let looped = mesh.create_polygon(&[v0, v1, v1]).unwrap_err();
        assert!(matches!(looped, MeshError::InvalidTopology(_)));

        assert_eq!((mesh.half_edges().len(), mesh.polygons().len()), before);
    }

    #[test]
    fn accessors_report_out_of_range() {
        let (mesh, _) = quad_pair();
        let err = mesh.polygon(PolygonId::new(12)).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                kind: "polygon",
                index: 12,
                len: 2
            }
        );
        assert!(mesh.half_edge(HalfEdgeId::INVALID).is_err());
        assert!(mesh.vertex(VertexId::new(6)).is_err());
    }

    #[test]
    fn third_claim_on_an_edge_stays_boundary() {
        let (mut mesh, [left, right]) = quad_pair();
        // v2 -> v1 is already taken by `right`, whose twin is in `left`.
        let apex = mesh.create_vertex(Point3::new(1.0, 0.5, 1.0));
        let fin = mesh
            .create_polygon(&[VertexId::new(1), VertexId::new(2), apex])
            .unwrap();
        let fin_edge = mesh.loop_edges(fin).unwrap().next().unwrap();
        assert_eq!(mesh.half_edge(fin_edge).unwrap().twin(), None);
        for id in [left, right] {
            for e in mesh.loop_edges(id).unwrap() {
                if let Some(t) = mesh.half_edge(e).unwrap().twin() {
                    assert_eq!(mesh.half_edge(t).unwrap().twin(), Some(e));
                }
            }
        }
        mesh.check_topology().unwrap();
    }

    #[test]
    fn released_index_is_rebuilt_on_demand() {
        let (mut mesh, [_, right]) = quad_pair();
        assert!(mesh.has_edge_index());
        assert!(!mesh.clone().has_edge_index());
        mesh.release_edge_index();
        assert!(!mesh.has_edge_index());
        let v4 = VertexId::new(4);
        let v5 = VertexId::new(5);
        let far = mesh.create_vertex(Point3::new(3.0, 0.5, 0.0));
        let wedge = mesh.create_polygon(&[v4, far, v5]).unwrap();
        let shared = mesh
            .loop_edges(wedge)
            .unwrap()
            .find(|&e| mesh.half_edge(e).unwrap().twin().is_some())
            .unwrap();
        let twin = mesh.half_edge(shared).unwrap().twin().unwrap();
        assert_eq!(mesh.half_edge(twin).unwrap().polygon(), right);
        assert!(mesh.has_edge_index());
    }

    #[test]
    fn polygon_plane_faces_along_winding() {
        let (mesh, [left, _]) = quad_pair();
        let plane = mesh.polygon_plane(left).unwrap();
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.offset(), 0.0);
    }

    #[test]
    fn zero_area_polygon_has_no_plane() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.create_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.create_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.create_vertex(Point3::new(2.0, 0.0, 0.0));
        let flat = mesh.create_polygon(&[a, b, c]).unwrap();
        assert!(matches!(
            mesh.polygon_plane(flat),
            Err(MeshError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn resolve_live_polygon_is_identity() {
        let (mesh, [left, right]) = quad_pair();
        assert_eq!(mesh.resolve(left).unwrap(), vec![left]);
        assert_eq!(
            mesh.resolve_all(&[right, left, right]).unwrap(),
            vec![right, left]
        );
        assert_eq!(mesh.live_polygon_count(), 2);
    }
}
