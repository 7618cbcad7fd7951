//! Binary space partitioning over a [`HalfEdgeMesh`](crate::HalfEdgeMesh).
//!
//! The tree stores polygon handles, not geometry. Building it splits the
//! mesh in place with [`HalfEdgeMesh::split`](crate::HalfEdgeMesh::split),
//! so spanning polygons are replaced by their fragments and the mesh stays
//! watertight.
//!
//! # Example
//!
//! ```
//! use halfedge_bsp::HalfEdgeMesh;
//! use halfedge_bsp::bsp::{BspTree, CollectingVisitor, FirstPolygon};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut mesh = HalfEdgeMesh::cube(Vector3::new(1.0, 1.0, 1.0), true);
//! let polygons: Vec<_> = mesh.live_polygons().collect();
//! let tree = BspTree::build(&mut mesh, &polygons, &FirstPolygon).unwrap();
//!
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_back_to_front(&mesh, Point3::new(0.0, 0.0, 10.0), &mut visitor)
//!     .unwrap();
//! assert_eq!(visitor.polygons().len(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: arena of nodes plus the root index
//! - [`BspNode`]: a splitting plane and the polygons lying on it
//! - [`PlaneSelector`]: strategy for choosing the splitting polygon
//! - [`BspVisitor`]: callback for ordered traversal

mod node;
mod selector;
mod tree;
mod visitor;

pub use node::{BspNode, faces_same_direction};
pub use selector::{FirstPolygon, PlaneSelector};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor};
