//! Triangle and wireframe export for visualization.
//!
//! Both exports are flat: every polygon gets its own copy of its corner
//! positions, so normals and colors never bleed across polygon borders.

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{HalfEdgeId, HalfEdgeMesh, MeshError, PolygonId, Result, SplitResult};

/// Color of polygons and edges that are not highlighted.
pub const BASE_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
/// Color of highlighted polygons and edges.
pub const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 0.35, 0.2];

/// Flat vertex buffers ready for upload.
///
/// `indices` are a triangle list for [`HalfEdgeMesh::to_tri_mesh`] and a
/// line list for [`HalfEdgeMesh::to_edge_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Option<Vec<[f32; 3]>>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    /// Number of triangles, reading `indices` as a triangle list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of segments, reading `indices` as a line list.
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    fn push(&mut self, position: Point3<f32>, normal: Vector3<f32>, color: Option<[f32; 3]>) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.into());
        self.normals.push(normal.into());
        if let (Some(colors), Some(color)) = (self.colors.as_mut(), color) {
            colors.push(color);
        }
        index
    }
}

/// Presentation-only marks kept outside the mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    polygons: HashSet<PolygonId>,
    edges: HashSet<HalfEdgeId>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight_polygon(&mut self, id: PolygonId) {
        self.polygons.insert(id);
    }

    pub fn highlight_edge(&mut self, id: HalfEdgeId) {
        self.edges.insert(id);
    }

    pub fn is_polygon_highlighted(&self, id: PolygonId) -> bool {
        self.polygons.contains(&id)
    }

    pub fn is_edge_highlighted(&self, id: HalfEdgeId) -> bool {
        self.edges.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.edges.is_empty()
    }
}

/// Marks every fragment of a split and the seams between them.
impl From<&SplitResult> for Highlights {
    fn from(result: &SplitResult) -> Self {
        let mut highlights = Self::new();
        for span in &result.spanning {
            for &fragment in span.front.iter().chain(&span.back) {
                highlights.highlight_polygon(fragment);
            }
            for &seam in &span.seams {
                highlights.highlight_edge(seam);
            }
        }
        highlights
    }
}

impl HalfEdgeMesh {
    /// Triangulates every live polygon, without colors.
    ///
    /// Fails with [`MeshError::DegenerateGeometry`] when a polygon has no
    /// two non-collinear consecutive edges.
    pub fn to_tri_mesh(&self) -> Result<TriMesh> {
        self.tessellate(None)
    }

    /// Triangulates every live polygon, coloring highlighted ones.
    pub fn to_tri_mesh_highlighted(&self, highlights: &Highlights) -> Result<TriMesh> {
        self.tessellate(Some(highlights))
    }

    fn tessellate(&self, highlights: Option<&Highlights>) -> Result<TriMesh> {
        let mut mesh = TriMesh {
            colors: highlights.map(|_| Vec::new()),
            ..TriMesh::default()
        };

        for id in self.live_polygons() {
            let positions = self.polygon_positions(id)?;
            let normal = face_normal(&positions).ok_or_else(|| {
                MeshError::DegenerateGeometry(format!("{id} has no well-defined normal"))
            })?;
            let color = highlights.map(|h| {
                if h.is_polygon_highlighted(id) {
                    HIGHLIGHT_COLOR
                } else {
                    BASE_COLOR
                }
            });

            let first = mesh.positions.len() as u32;
            for position in &positions {
                mesh.push(*position, normal, color);
            }
            for [a, b, c] in alternating_triangles(positions.len()) {
                mesh.indices
                    .extend([first + a as u32, first + b as u32, first + c as u32]);
            }
        }

        Ok(mesh)
    }

    /// One line segment per live half-edge, for inspecting topology.
    ///
    /// Normals come from the owning polygon (zero when it is degenerate);
    /// highlighted edges get [`HIGHLIGHT_COLOR`].
    pub fn to_edge_mesh(&self, highlights: &Highlights) -> TriMesh {
        let mut mesh = TriMesh {
            colors: Some(Vec::new()),
            ..TriMesh::default()
        };

        for id in self.live_polygons() {
            let Ok(edges) = self.loop_edges(id) else {
                continue;
            };
            let edges: Vec<HalfEdgeId> = edges.collect();
            let positions: Vec<Point3<f32>> = edges
                .iter()
                .map(|&e| self.position_of(self.edge_record(e).vertex()))
                .collect();
            let normal = face_normal(&positions).unwrap_or_else(Vector3::zeros);

            for &edge in &edges {
                let color = if highlights.is_edge_highlighted(edge) {
                    HIGHLIGHT_COLOR
                } else {
                    BASE_COLOR
                };
                let from = self.position_of(self.edge_record(edge).vertex());
                let to = self.position_of(self.destination_of(edge));
                let a = mesh.push(from, normal, Some(color));
                let b = mesh.push(to, normal, Some(color));
                mesh.indices.extend([a, b]);
            }
        }

        mesh
    }
}

/// Unit normal from the first pair of consecutive edges that are not
/// collinear. Split fragments often start with a vertex inserted on a
/// straight edge, so the very first pair may be degenerate.
fn face_normal(positions: &[Point3<f32>]) -> Option<Vector3<f32>> {
    let n = positions.len();
    if n < 3 {
        return None;
    }
    (0..n).find_map(|i| {
        let a = positions[i];
        let b = positions[(i + 1) % n];
        let c = positions[(i + 2) % n];
        (b - a).cross(&(c - b)).try_normalize(f32::EPSILON)
    })
}

/// Triangulates an `n`-gon by advancing alternately from the start and the
/// end of the loop, which keeps triangles of long thin polygons better
/// shaped than a single-apex fan.
fn alternating_triangles(n: usize) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(n.saturating_sub(2));
    if n < 3 {
        return triangles;
    }
    let (mut lo, mut hi) = (0, n - 1);
    let mut from_start = true;
    while hi - lo >= 2 {
        if from_start {
            triangles.push([lo, lo + 1, hi]);
            lo += 1;
        } else {
            triangles.push([lo, hi - 1, hi]);
            hi -= 1;
        }
        from_start = !from_start;
    }
    triangles
}
