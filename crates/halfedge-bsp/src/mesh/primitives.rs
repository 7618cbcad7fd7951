//! Factory shapes built through the regular construction path.

use nalgebra::{Point3, Vector3};

use crate::{MeshError, Result, VertexId};

use super::{HalfEdgeMesh, newell_normal};

/// One face of an axis-aligned cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// +Z
    Front,
    /// -Z
    Back,
    /// -X
    Left,
    /// +X
    Right,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl CubeFace {
    /// All six faces in construction order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Corner indices with counter-clockwise winding seen from outside.
    fn corners(self) -> [usize; 4] {
        match self {
            CubeFace::Front => [4, 5, 6, 7],
            CubeFace::Back => [1, 0, 3, 2],
            CubeFace::Left => [0, 4, 7, 3],
            CubeFace::Right => [5, 1, 2, 6],
            CubeFace::Top => [7, 6, 2, 3],
            CubeFace::Bottom => [0, 1, 5, 4],
        }
    }
}

impl HalfEdgeMesh {
    /// Builds an axis-aligned box with six outward-facing quads.
    ///
    /// With `center` the box spans `-size/2..size/2`, otherwise `0..size`.
    pub fn cube(size: Vector3<f32>, center: bool) -> Self {
        Self::cube_faces(size, center, &CubeFace::ALL)
    }

    /// Builds the eight cube corners but only the requested faces.
    ///
    /// Useful for open test fixtures, e.g. two opposing faces that share no
    /// edge.
    pub fn cube_faces(size: Vector3<f32>, center: bool, faces: &[CubeFace]) -> Self {
        let min = if center { -size / 2.0 } else { Vector3::zeros() };
        let max = min + size;

        let mut mesh = Self::new();
        let corners: Vec<VertexId> = [
            [min.x, min.y, min.z], // 0: left-bottom-back
            [max.x, min.y, min.z], // 1: right-bottom-back
            [max.x, max.y, min.z], // 2: right-top-back
            [min.x, max.y, min.z], // 3: left-top-back
            [min.x, min.y, max.z], // 4: left-bottom-front
            [max.x, min.y, max.z], // 5: right-bottom-front
            [max.x, max.y, max.z], // 6: right-top-front
            [min.x, max.y, max.z], // 7: left-top-front
        ]
        .iter()
        .map(|&[x, y, z]| mesh.create_vertex(Point3::new(x, y, z)))
        .collect();

        for face in faces {
            let loop_vertices = face.corners().map(|i| corners[i]);
            mesh.add_loop(&loop_vertices);
        }
        mesh.release_edge_index();
        mesh
    }

    /// Extrudes a planar `profile` along `extrusion` into a closed solid:
    /// two caps plus one quad per profile edge, all wound outward.
    ///
    /// The profile may be concave but must be simple.
    pub fn prism(profile: &[Point3<f32>], extrusion: Vector3<f32>) -> Result<Self> {
        if profile.len() < 3 {
            return Err(MeshError::InvalidTopology(format!(
                "prism profile needs at least 3 points, got {}",
                profile.len()
            )));
        }
        let normal = newell_normal(profile);
        let alignment = normal.dot(&extrusion);
        if normal.norm() <= f32::EPSILON || alignment.abs() <= f32::EPSILON {
            return Err(MeshError::DegenerateGeometry(
                "prism profile has zero area or extrusion lies in its plane".to_string(),
            ));
        }

        // Orient the profile so it winds counter-clockwise around the extrusion.
        let mut ordered = profile.to_vec();
        if alignment < 0.0 {
            ordered.reverse();
        }

        let mut mesh = Self::new();
        let bottom: Vec<VertexId> = ordered.iter().map(|p| mesh.create_vertex(*p)).collect();
        let top: Vec<VertexId> = ordered
            .iter()
            .map(|p| mesh.create_vertex(p + extrusion))
            .collect();

        let reversed_bottom: Vec<VertexId> = bottom.iter().rev().copied().collect();
        mesh.add_loop(&reversed_bottom);
        mesh.add_loop(&top);

        let n = ordered.len();
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_loop(&[bottom[i], bottom[j], top[j], top[i]]);
        }
        mesh.release_edge_index();
        Ok(mesh)
    }
}
