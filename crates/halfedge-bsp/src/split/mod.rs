//! Plane classification and splitting of polygon sets.
//!
//! [`HalfEdgeMesh::split`] sorts polygons into coplanar, front and back
//! lists and subdivides every spanning polygon in place. Each edge crossing
//! the plane gets one new vertex, shared by both polygons around the edge,
//! so the cut stays watertight. A neighbour that shares a crossing edge is
//! split as well, even when it was not part of the request.
//!
//! # Example
//!
//! ```
//! use halfedge_bsp::{HalfEdgeMesh, Plane3D};
//! use nalgebra::Vector3;
//!
//! let mut mesh = HalfEdgeMesh::cube(Vector3::new(1.0, 1.0, 1.0), true);
//! let plane = Plane3D::new(Vector3::x(), 0.0).unwrap();
//! let result = mesh.split_all(&plane).unwrap();
//!
//! assert_eq!(result.spanning.len(), 4);
//! assert_eq!(result.front.len(), 5);
//! assert_eq!(result.back.len(), 5);
//! assert!(mesh.is_closed());
//! ```

mod fragments;

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use fragments::{Corner, Fragment};

use crate::mesh::newell_normal;
use crate::plane::side_of_distance;
use crate::{
    Classification, HalfEdgeId, HalfEdgeMesh, MeshError, PLANE_EPSILON, Plane3D, PlaneSide,
    PolygonId, Result, VertexId,
};

/// Outcome of a split.
///
/// `coplanar`, `front` and `back` together cover every requested polygon
/// once: unsplit polygons by their own handle, split ones by their
/// fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResult {
    /// Requested polygons lying on the plane.
    pub coplanar: Vec<PolygonId>,
    /// Requested polygons (or fragments) in front of the plane.
    pub front: Vec<PolygonId>,
    /// Requested polygons (or fragments) behind the plane.
    pub back: Vec<PolygonId>,
    /// Every polygon that was split, requested or collateral.
    pub spanning: Vec<SpanningPolygon>,
    /// One half-edge per undirected edge that crossed the plane: the one
    /// without a twin, or the smaller handle of the pair.
    pub crossing_edges: Vec<HalfEdgeId>,
}

/// A polygon that was split, with the fragments that replaced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningPolygon {
    /// The tombstoned original.
    pub polygon: PolygonId,
    /// Its own half-edges that crossed the plane, in loop order.
    pub crossings: Vec<HalfEdgeId>,
    /// Fragments in front of the plane.
    pub front: Vec<PolygonId>,
    /// Fragments behind the plane.
    pub back: Vec<PolygonId>,
    /// Seam half-edges of every fragment, in fragment order (front first).
    /// A convex polygon has one per fragment; a fragment joining several
    /// runs of a concave loop has one per run.
    pub seams: Vec<HalfEdgeId>,
    /// `true` when the polygon was not requested but shared a crossing edge
    /// with one that was.
    pub collateral: bool,
}

impl SplitResult {
    /// Number of polygons split because a neighbour was.
    pub fn collateral_count(&self) -> usize {
        self.spanning.iter().filter(|s| s.collateral).count()
    }
}

struct Plan {
    polygon: PolygonId,
    collateral: bool,
    crossings: Vec<HalfEdgeId>,
    fragments: Vec<Fragment>,
}

/// Intersection points, one per undirected crossing edge.
#[derive(Default)]
struct Cuts {
    by_edge: HashMap<HalfEdgeId, usize>,
    points: Vec<(HalfEdgeId, Point3<f32>)>,
}

impl HalfEdgeMesh {
    /// Classifies a polygon against `plane` without modifying anything.
    ///
    /// A plane whose normal is not unit length is `DegenerateGeometry`, as
    /// in [`Self::split`].
    pub fn classify(&self, id: PolygonId, plane: &Plane3D) -> Result<Classification> {
        plane.ensure_unit()?;
        let positions = self.polygon_positions(id)?;
        Ok(Classification::from_sides(
            positions.into_iter().map(|p| plane.classify_point(p)),
        ))
    }

    /// Splits every live polygon of the mesh.
    pub fn split_all(&mut self, plane: &Plane3D) -> Result<SplitResult> {
        let all: Vec<PolygonId> = self.live_polygons().collect();
        self.split(&all, plane)
    }

    /// Classifies `polygons` against `plane`, subdividing spanning ones.
    ///
    /// Tombstoned handles are replaced by their live fragments and duplicates
    /// are ignored. Spanning polygons are tombstoned; their fragments are
    /// appended to the store and reported in the result.
    ///
    /// Everything that can fail is checked before the store is modified.
    /// The edge index is released once the split is committed.
    pub fn split(&mut self, polygons: &[PolygonId], plane: &Plane3D) -> Result<SplitResult> {
        plane.ensure_unit()?;
        let requested = self.resolve_all(polygons)?;
        let distances: Vec<f32> = self
            .vertices()
            .iter()
            .map(|v| plane.signed_distance(v.position()))
            .collect();
        let side = |v: VertexId| side_of_distance(distances[v.index()], PLANE_EPSILON);

        let mut result = SplitResult::default();
        let mut queued = vec![false; self.polygons().len()];
        let mut work: Vec<(PolygonId, bool)> = Vec::new();

        for &id in &requested {
            let sides = self.loop_edges(id)?.map(|e| side(self.edge_record(e).vertex()));
            match Classification::from_sides(sides) {
                Classification::Coplanar => result.coplanar.push(id),
                Classification::Front => result.front.push(id),
                Classification::Back => result.back.push(id),
                Classification::Spanning => {
                    queued[id.index()] = true;
                    work.push((id, false));
                }
            }
        }

        // Plan every fragment before touching the store. Crossing edges pull
        // their twin's polygon into the work list.
        let mut cuts = Cuts::default();
        let mut plans = Vec::with_capacity(work.len());
        let mut next = 0;
        while let Some(&(id, collateral)) = work.get(next) {
            next += 1;
            let plan = self.plan(id, collateral, plane, &distances, &mut cuts)?;
            for &crossing in &plan.crossings {
                if let Some(twin) = self.edge_record(crossing).twin() {
                    let owner = self.edge_record(twin).polygon();
                    if !queued[owner.index()] {
                        queued[owner.index()] = true;
                        work.push((owner, true));
                    }
                }
            }
            plans.push(plan);
        }

        self.commit(plans, &cuts, &mut result);
        result.crossing_edges = cuts.points.iter().map(|(edge, _)| *edge).collect();

        log::debug!(
            "split {} polygons: {} coplanar, {} front, {} back, {} spanning ({} collateral), {} crossing edges",
            requested.len(),
            result.coplanar.len(),
            result.front.len(),
            result.back.len(),
            result.spanning.len(),
            result.collateral_count(),
            result.crossing_edges.len(),
        );
        Ok(result)
    }

    fn plan(
        &self,
        id: PolygonId,
        collateral: bool,
        plane: &Plane3D,
        distances: &[f32],
        cuts: &mut Cuts,
    ) -> Result<Plan> {
        let mut corners = Vec::new();
        let mut crossings = Vec::new();

        for edge in self.loop_edges(id)? {
            let origin = self.edge_record(edge).vertex();
            let destination = self.destination_of(edge);
            let d0 = distances[origin.index()];
            let d1 = distances[destination.index()];
            let s0 = side_of_distance(d0, PLANE_EPSILON);
            let s1 = side_of_distance(d1, PLANE_EPSILON);

            corners.push((Corner::Existing(origin), s0));
            if matches!(
                (s0, s1),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            ) {
                crossings.push(edge);
                corners.push((Corner::Cut(self.cut_index(edge, distances, cuts)), PlaneSide::OnPlane));
            }
        }

        let runs = fragments::runs(id, &corners)?;
        let position = |corner: Corner| match corner {
            Corner::Existing(vertex) => self.position_of(vertex),
            Corner::Cut(i) => cuts.points[i].1,
        };
        // Only loops crossing more than twice need the cut line's direction.
        let line = if runs.len() > 2 {
            let loop_positions: Vec<Point3<f32>> =
                corners.iter().map(|&(corner, _)| position(corner)).collect();
            let line = newell_normal(&loop_positions).cross(&plane.normal());
            if line.norm() <= f32::EPSILON {
                return Err(MeshError::DegenerateGeometry(format!(
                    "{id} is parallel to the cutting plane"
                )));
            }
            line
        } else {
            Vector3::zeros()
        };
        let fragments =
            fragments::fragments(id, runs, |corner| position(corner).coords.dot(&line))?;
        Ok(Plan {
            polygon: id,
            collateral,
            crossings,
            fragments,
        })
    }

    /// Index of the intersection point on `edge`, computed once per
    /// undirected edge from its canonical half-edge so both sides agree
    /// bit for bit.
    fn cut_index(&self, edge: HalfEdgeId, distances: &[f32], cuts: &mut Cuts) -> usize {
        let canonical = match self.edge_record(edge).twin() {
            Some(twin) if twin < edge => twin,
            _ => edge,
        };
        if let Some(&index) = cuts.by_edge.get(&canonical) {
            return index;
        }

        let origin = self.edge_record(canonical).vertex();
        let destination = self.destination_of(canonical);
        let d0 = distances[origin.index()];
        let d1 = distances[destination.index()];
        let t = d0 / (d0 - d1);
        let p0 = self.position_of(origin);
        let p1 = self.position_of(destination);
        let point = Point3::from(p0.coords.lerp(&p1.coords, t));

        let index = cuts.points.len();
        cuts.points.push((canonical, point));
        cuts.by_edge.insert(canonical, index);
        index
    }

    fn commit(&mut self, plans: Vec<Plan>, cuts: &Cuts, result: &mut SplitResult) {
        if plans.is_empty() {
            return;
        }

        let mut index = self.take_edge_index();
        let cut_vertices: Vec<VertexId> = cuts
            .points
            .iter()
            .map(|(_, point)| self.create_vertex(*point))
            .collect();

        let retired: Vec<PolygonId> = plans.iter().map(|plan| plan.polygon).collect();
        self.retire_polygons(&retired, &mut index);

        for plan in plans {
            let mut front = Vec::new();
            let mut back = Vec::new();
            let mut seams = Vec::with_capacity(plan.fragments.len());

            // Front fragments first; the sort is stable so loop order is kept.
            let mut fragments: Vec<Fragment> = plan.fragments;
            fragments.sort_by_key(|fragment| !fragment.front);
            for planned in &fragments {
                let vertices: Vec<VertexId> = planned
                    .corners
                    .iter()
                    .map(|corner| match *corner {
                        Corner::Existing(vertex) => vertex,
                        Corner::Cut(i) => cut_vertices[i],
                    })
                    .collect();
                let fragment = self.push_loop(&vertices, &mut index);
                let first = self.polygons()[fragment.index()].edge().index();
                seams.extend(planned.seams.iter().map(|&k| HalfEdgeId::new(first + k)));
                log::trace!(
                    "{} -> {} {fragment} with {} vertices, {} seams",
                    plan.polygon,
                    if planned.front { "front" } else { "back" },
                    vertices.len(),
                    planned.seams.len()
                );
                if planned.front {
                    front.push(fragment);
                } else {
                    back.push(fragment);
                }
            }

            let successors = front.iter().chain(&back).copied().collect();
            self.set_successors(plan.polygon, successors);
            if !plan.collateral {
                result.front.extend_from_slice(&front);
                result.back.extend_from_slice(&back);
            }
            result.spanning.push(SpanningPolygon {
                polygon: plan.polygon,
                crossings: plan.crossings,
                front,
                back,
                seams,
                collateral: plan.collateral,
            });
        }

        // The index only serves this split; the next one rebuilds it.
        drop(index);
    }
}
