//! Invariant checks over the live part of the mesh.

use crate::{HalfEdgeId, MeshError, PolygonId, Result};

use super::HalfEdgeMesh;

impl HalfEdgeMesh {
    /// Verifies the half-edge invariants for every live polygon:
    ///
    /// - each loop closes, has at least three edges and every edge in it is
    ///   owned by the polygon,
    /// - `next.prev` leads back to the edge,
    /// - twins are mutual, live, and run in the opposite direction,
    /// - no half-edge of a live polygon sits outside its loop.
    ///
    /// Returns the first violation found as [`MeshError::InvalidTopology`].
    pub fn check_topology(&self) -> Result<()> {
        let mut in_loops = 0usize;

        for id in self.live_polygons() {
            let start = self.polygons[id.index()].edge;
            let mut current = start;
            let mut length = 0usize;

            loop {
                let edge = self.half_edge(current).map_err(|_| {
                    violation(id, format!("loop reaches missing half-edge {current}"))
                })?;
                if edge.polygon != id {
                    return Err(violation(
                        id,
                        format!("{current} is owned by {}", edge.polygon),
                    ));
                }
                let next = self.half_edge(edge.next).map_err(|_| {
                    violation(id, format!("{current} has no valid next"))
                })?;
                if next.prev != current {
                    return Err(violation(
                        id,
                        format!("{}.prev is {}, expected {current}", edge.next, next.prev),
                    ));
                }
                if let Some(twin) = edge.twin() {
                    self.check_twin(id, current, twin)?;
                }

                length += 1;
                if length > self.half_edges.len() {
                    return Err(violation(id, "loop does not close".to_string()));
                }
                current = edge.next;
                if current == start {
                    break;
                }
            }

            if length < 3 {
                return Err(violation(id, format!("loop has only {length} edges")));
            }
            in_loops += length;
        }

        let owned = self
            .half_edges
            .iter()
            .filter(|e| self.polygons[e.polygon.index()].live)
            .count();
        if owned != in_loops {
            return Err(MeshError::InvalidTopology(format!(
                "{owned} half-edges belong to live polygons but only {in_loops} are reachable from their loops"
            )));
        }

        Ok(())
    }

    fn check_twin(&self, id: PolygonId, edge: HalfEdgeId, twin: HalfEdgeId) -> Result<()> {
        let record = self
            .half_edge(twin)
            .map_err(|_| violation(id, format!("{edge} has missing twin {twin}")))?;
        if record.twin != edge {
            return Err(violation(
                id,
                format!("{edge} -> {twin} but {twin} -> {}", record.twin),
            ));
        }
        if !self.polygons[record.polygon.index()].live {
            return Err(violation(
                id,
                format!("{edge} is paired with {twin} of tombstoned {}", record.polygon),
            ));
        }
        let origin = self.half_edges[edge.index()].vertex;
        let destination = self.destination_of(edge);
        if record.vertex != destination || self.destination_of(twin) != origin {
            return Err(violation(
                id,
                format!("{edge} and its twin {twin} do not share reversed endpoints"),
            ));
        }
        Ok(())
    }

    /// Live half-edges without a twin.
    pub fn boundary_edges(&self) -> Vec<HalfEdgeId> {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|(_, e)| self.polygons[e.polygon.index()].live && !e.twin.is_valid())
            .map(|(i, _)| HalfEdgeId::new(i))
            .collect()
    }

    /// `true` when every live half-edge has a twin.
    pub fn is_closed(&self) -> bool {
        self.boundary_edges().is_empty()
    }
}

fn violation(polygon: PolygonId, detail: String) -> MeshError {
    MeshError::InvalidTopology(format!("{polygon}: {detail}"))
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::VertexId;

    #[test]
    fn cube_passes_all_checks() {
        let mesh = HalfEdgeMesh::cube(Vector3::new(2.0, 2.0, 2.0), true);
        mesh.check_topology().unwrap();
        assert!(mesh.is_closed());
    }

    #[test]
    fn broken_twin_is_reported() {
        let mut mesh = HalfEdgeMesh::cube(Vector3::new(1.0, 1.0, 1.0), false);
        let e = HalfEdgeId::new(0);
        let t = mesh.half_edges[0].twin;
        // Point the twin somewhere else.
        mesh.half_edges[t.index()].twin = HalfEdgeId::new(5);
        let err = mesh.check_topology().unwrap_err();
        assert!(matches!(err, MeshError::InvalidTopology(_)));
        assert!(err.to_string().contains(&e.to_string()) || err.to_string().contains(&t.to_string()));
    }

    #[test]
    fn broken_prev_is_reported() {
        let mut mesh = HalfEdgeMesh::new();
        let v: Vec<VertexId> = (0..3)
            .map(|i| mesh.create_vertex(Point3::new(i as f32, (i * i) as f32, 0.0)))
            .collect();
        mesh.create_polygon(&v).unwrap();
        mesh.half_edges[1].prev = HalfEdgeId::new(2);
        assert!(mesh.check_topology().is_err());
    }

    #[test]
    fn open_triangle_has_three_boundary_edges() {
        let mut mesh = HalfEdgeMesh::new();
        let v: Vec<VertexId> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            .iter()
            .map(|[x, y]| mesh.create_vertex(Point3::new(*x, *y, 0.0)))
            .collect();
        mesh.create_polygon(&v).unwrap();
        assert_eq!(mesh.boundary_edges().len(), 3);
        assert!(!mesh.is_closed());
        mesh.check_topology().unwrap();
    }
}
