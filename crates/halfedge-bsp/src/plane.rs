//! Splitting planes and point classification.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{MeshError, Result};

/// Tolerance for every plane comparison.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every vertex is front or on the plane, at least one strictly front
    Front,
    /// Every vertex is back or on the plane, at least one strictly back
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// At least one vertex strictly on each side
    Spanning,
}

impl Classification {
    /// Combines per-vertex sides into a polygon classification.
    pub fn from_sides(sides: impl IntoIterator<Item = PlaneSide>) -> Self {
        let mut front = false;
        let mut back = false;
        for side in sides {
            match side {
                PlaneSide::Front => front = true,
                PlaneSide::Back => back = true,
                PlaneSide::OnPlane => {}
            }
        }
        match (front, back) {
            (false, false) => Classification::Coplanar,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (true, true) => Classification::Spanning,
        }
    }
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// Both are rescaled so the stored normal has unit length.
    ///
    /// Fails with [`MeshError::DegenerateGeometry`] when the normal is zero
    /// or not finite.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Result<Self> {
        let norm = normal.norm();
        if !norm.is_finite() || !offset.is_finite() || norm <= f32::EPSILON {
            return Err(MeshError::DegenerateGeometry(format!(
                "plane normal {normal:?} with offset {offset} cannot be normalized"
            )));
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Creates a plane through `point` with the given normal direction.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Result<Self> {
        let unit = Self::new(normal, 0.0)?;
        let offset = unit.normal.dot(&point.coords);
        Ok(Self {
            normal: unit.normal,
            offset,
        })
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        side_of_distance(self.signed_distance(point), epsilon)
    }

    /// Rejects planes that were deserialized or otherwise assembled with a
    /// non-unit or non-finite normal.
    pub(crate) fn ensure_unit(&self) -> Result<()> {
        let norm = self.normal.norm();
        if !self.offset.is_finite() || !norm.is_finite() || (norm - 1.0).abs() > 1e-3 {
            return Err(MeshError::DegenerateGeometry(format!(
                "plane normal {:?} is not unit length",
                self.normal
            )));
        }
        Ok(())
    }
}

/// Maps a signed distance to a side using the given tolerance.
#[inline]
pub(crate) fn side_of_distance(distance: f32, epsilon: f32) -> PlaneSide {
    if distance > epsilon {
        PlaneSide::Front
    } else if distance < -epsilon {
        PlaneSide::Back
    } else {
        PlaneSide::OnPlane
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn z_plane() -> Plane3D {
        Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 0.0).unwrap()
    }

    #[test]
    fn distance_sign_convention() {
        let plane = z_plane();
        assert_relative_eq!(plane.signed_distance(Point3::new(0.0, 0.0, 5.0)), 5.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(0.0, 0.0, -5.0)), -5.0);
        assert_relative_eq!(plane.signed_distance(Point3::origin()), 0.0);
        assert_eq!(plane.classify_point(Point3::origin()), PlaneSide::OnPlane);
    }

    #[test]
    fn new_normalizes_normal_and_offset() {
        let plane = Plane3D::new(Vector3::new(0.0, 2.0, 0.0), 4.0).unwrap();
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.offset(), 2.0);
        assert_eq!(plane.classify_point(Point3::new(0.0, 2.0, 0.0)), PlaneSide::OnPlane);
    }

    #[test]
    fn zero_normal_is_degenerate() {
        let err = Plane3D::new(Vector3::zeros(), 1.0).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry(_)));
        assert!(Plane3D::new(Vector3::new(f32::NAN, 0.0, 1.0), 0.0).is_err());
    }

    #[test]
    fn from_point_and_normal_passes_through_point() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let plane = Plane3D::from_point_and_normal(point, Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(plane.signed_distance(point).abs() < PLANE_EPSILON);
        assert_eq!(plane.classify_point(Point3::new(5.0, 5.0, 0.0)), PlaneSide::Front);
    }

    #[test]
    fn epsilon_band_is_inclusive() {
        let plane = z_plane();
        let inside = Point3::new(0.0, 0.0, PLANE_EPSILON * 0.5);
        let outside = Point3::new(0.0, 0.0, -PLANE_EPSILON * 4.0);
        assert_eq!(plane.classify_point(inside), PlaneSide::OnPlane);
        assert_eq!(plane.classify_point(outside), PlaneSide::Back);
        assert_eq!(
            plane.classify_point_with_epsilon(outside, 1e-3),
            PlaneSide::OnPlane
        );
    }

    #[test]
    fn classification_from_sides() {
        use PlaneSide::*;
        assert_eq!(Classification::from_sides([OnPlane, OnPlane, OnPlane]), Classification::Coplanar);
        assert_eq!(Classification::from_sides([Front, OnPlane, OnPlane]), Classification::Front);
        assert_eq!(Classification::from_sides([Back, Back, OnPlane]), Classification::Back);
        assert_eq!(Classification::from_sides([Front, OnPlane, Back]), Classification::Spanning);
    }

    #[test]
    fn ensure_unit_accepts_constructed_planes() {
        assert!(z_plane().ensure_unit().is_ok());
        let broken = Plane3D {
            normal: Vector3::new(0.0, 0.0, 3.0),
            offset: 0.0,
        };
        assert!(broken.ensure_unit().is_err());
    }

    #[test]
    fn non_unit_plane_is_rejected_by_classify_and_split() {
        let mut mesh = crate::HalfEdgeMesh::cube(Vector3::new(1.0, 1.0, 1.0), true);
        let stretched = Plane3D {
            normal: Vector3::new(2.0, 0.0, 0.0),
            offset: 0.0,
        };
        let first = crate::PolygonId::new(0);
        assert!(matches!(
            mesh.classify(first, &stretched),
            Err(MeshError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            mesh.split_all(&stretched),
            Err(MeshError::DegenerateGeometry(_))
        ));
        assert_eq!(mesh.live_polygon_count(), 6);
    }
}
