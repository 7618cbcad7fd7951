//! Half-edge boundary representation with plane classification and
//! polygon splitting.
//!
//! [`HalfEdgeMesh`] stores polygons as loops of half-edges with twin links
//! between neighbours. [`HalfEdgeMesh::split`] cuts polygons by a
//! [`Plane3D`] in place, sharing every intersection vertex between the
//! polygons on both sides of an edge so closed meshes stay closed. The
//! [`bsp`] module builds a partition tree on top of that, and
//! [`HalfEdgeMesh::to_tri_mesh`] flattens the result for rendering.

pub mod bsp;
mod error;
mod handle;
mod mesh;
mod plane;
mod split;
mod tessellate;

pub use error::{MeshError, Result};
pub use handle::{HalfEdgeId, PolygonId, VertexId};
pub use mesh::{CubeFace, HalfEdge, HalfEdgeMesh, LoopEdges, Polygon, Vertex};
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};
pub use split::{SpanningPolygon, SplitResult};
pub use tessellate::{BASE_COLOR, HIGHLIGHT_COLOR, Highlights, TriMesh};
