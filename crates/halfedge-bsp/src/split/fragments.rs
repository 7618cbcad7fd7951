//! Fragment planning: turns one spanning loop into same-side runs and joins
//! the runs into closed fragments.

use crate::{MeshError, PlaneSide, PolygonId, Result, VertexId};

/// A loop corner in a planned fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Corner {
    /// A vertex that already exists in the store.
    Existing(VertexId),
    /// The intersection point with this index in the split's cut list.
    Cut(usize),
}

/// A maximal run of same-side corners, bounded at both ends by on-plane
/// corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Run {
    pub(crate) front: bool,
    pub(crate) corners: Vec<Corner>,
}

/// One planned fragment: one or more runs of the same side, chained by seams
/// along the cut line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub(crate) front: bool,
    pub(crate) corners: Vec<Corner>,
    /// Positions in `corners` whose outgoing edge is a seam.
    pub(crate) seams: Vec<usize>,
}

/// Splits a loop (with cut corners already inserted) into runs.
///
/// On-plane corners between two runs close the earlier run and the last of
/// them opens the next one, so every original edge lands in exactly one
/// run and runs alternate sides. On-plane corners inside a run (the loop
/// touches the plane without crossing) stay in that run.
pub(crate) fn runs(polygon: PolygonId, corners: &[(Corner, PlaneSide)]) -> Result<Vec<Run>> {
    let n = corners.len();

    let mut last_side = corners
        .iter()
        .rev()
        .map(|(_, side)| *side)
        .find(|side| *side != PlaneSide::OnPlane);
    let start = corners
        .iter()
        .enumerate()
        .find_map(|(i, &(_, side))| {
            if side == PlaneSide::OnPlane {
                return None;
            }
            let previous = last_side.replace(side);
            (previous != Some(side)).then_some(i)
        })
        .ok_or_else(|| {
            MeshError::DegenerateGeometry(format!("{polygon} does not change sides"))
        })?;

    let mut runs = Vec::new();
    let mut current = Run {
        front: corners[start].1 == PlaneSide::Front,
        corners: Vec::with_capacity(n),
    };
    let mut pending: Vec<Corner> = Vec::new();

    for k in 0..n {
        let (corner, side) = corners[(start + k) % n];
        if side == PlaneSide::OnPlane {
            pending.push(corner);
            continue;
        }
        let front = side == PlaneSide::Front;
        if front != current.front {
            let opener = *pending.last().ok_or_else(|| {
                MeshError::DegenerateGeometry(format!(
                    "{polygon} changes sides without an on-plane corner"
                ))
            })?;
            current.corners.append(&mut pending);
            let next = Run {
                front,
                corners: vec![opener],
            };
            runs.push(std::mem::replace(&mut current, next));
        } else {
            current.corners.append(&mut pending);
        }
        current.corners.push(corner);
    }

    let opener = *pending.last().ok_or_else(|| {
        MeshError::DegenerateGeometry(format!("{polygon} does not close on the plane"))
    })?;
    current.corners.append(&mut pending);
    runs.push(current);
    runs[0].corners.insert(0, opener);

    if let Some(short) = runs.iter().find(|run| run.corners.len() < 3) {
        return Err(MeshError::DegenerateGeometry(format!(
            "{polygon} would produce a fragment with {} corners",
            short.corners.len()
        )));
    }
    Ok(runs)
}

/// Joins runs into closed fragments.
///
/// Run `r` ends at the corner where run `r + 1` starts. Sorted along the cut
/// line, those boundary corners pair up into the intervals where the line
/// runs inside the polygon: first with second, third with fourth. A fragment
/// leaves each run through a seam to its boundary's partner and continues
/// with the run starting there. `along` gives a boundary corner's position
/// on the line; it is only called when there are more than two runs.
pub(crate) fn fragments(
    polygon: PolygonId,
    runs: Vec<Run>,
    along: impl Fn(Corner) -> f32,
) -> Result<Vec<Fragment>> {
    let m = runs.len();
    if m == 2 {
        return Ok(runs
            .into_iter()
            .map(|run| Fragment {
                front: run.front,
                seams: vec![run.corners.len() - 1],
                corners: run.corners,
            })
            .collect());
    }
    if m % 2 != 0 {
        return Err(MeshError::DegenerateGeometry(format!(
            "{polygon} crosses the plane an odd number of times"
        )));
    }

    let keys: Vec<f32> = runs
        .iter()
        .map(|run| run.corners.last().map_or(0.0, |&corner| along(corner)))
        .collect();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    let mut partner = vec![0; m];
    for pair in order.chunks_exact(2) {
        partner[pair[0]] = pair[1];
        partner[pair[1]] = pair[0];
    }

    let mut used = vec![false; m];
    let mut fragments = Vec::new();
    for first in 0..m {
        if used[first] {
            continue;
        }
        let front = runs[first].front;
        let mut fragment = Fragment {
            front,
            corners: Vec::new(),
            seams: Vec::new(),
        };
        let mut r = first;
        loop {
            if used[r] || runs[r].front != front {
                return Err(MeshError::DegenerateGeometry(format!(
                    "{polygon} has cut points that do not pair along the plane"
                )));
            }
            used[r] = true;
            fragment.corners.extend_from_slice(&runs[r].corners);
            fragment.seams.push(fragment.corners.len() - 1);
            r = (partner[r] + 1) % m;
            if r == first {
                break;
            }
        }
        fragments.push(fragment);
    }
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlaneSide::{Back, Front, OnPlane};

    fn v(i: usize) -> Corner {
        Corner::Existing(VertexId::new(i))
    }

    fn p() -> PolygonId {
        PolygonId::new(0)
    }

    #[test]
    fn convex_quad_gives_two_runs() {
        // v0 F, v1 F, cut 0, v2 B, v3 B, cut 1
        let loop_corners = [
            (v(0), Front),
            (v(1), Front),
            (Corner::Cut(0), OnPlane),
            (v(2), Back),
            (v(3), Back),
            (Corner::Cut(1), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].front);
        assert_eq!(runs[0].corners, vec![Corner::Cut(1), v(0), v(1), Corner::Cut(0)]);
        assert!(!runs[1].front);
        assert_eq!(runs[1].corners, vec![Corner::Cut(0), v(2), v(3), Corner::Cut(1)]);
    }

    #[test]
    fn start_is_rotated_to_a_side_change() {
        // Loop begins in the middle of the back run.
        let loop_corners = [
            (v(0), Back),
            (Corner::Cut(0), OnPlane),
            (v(1), Front),
            (Corner::Cut(1), OnPlane),
            (v(2), Back),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].corners, vec![Corner::Cut(0), v(1), Corner::Cut(1)]);
        assert_eq!(runs[1].corners, vec![Corner::Cut(1), v(2), v(0), Corner::Cut(0)]);
    }

    #[test]
    fn vertex_on_plane_is_shared_by_both_runs() {
        // Triangle split through a vertex: v1 on the plane.
        let loop_corners = [
            (v(0), Front),
            (v(1), OnPlane),
            (v(2), Back),
            (Corner::Cut(0), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs[0].corners, vec![Corner::Cut(0), v(0), v(1)]);
        assert_eq!(runs[1].corners, vec![v(1), v(2), Corner::Cut(0)]);
    }

    #[test]
    fn edge_on_plane_stays_with_earlier_run() {
        let loop_corners = [
            (v(0), Front),
            (v(1), OnPlane),
            (v(2), OnPlane),
            (v(3), Back),
            (v(4), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs[0].corners, vec![v(4), v(0), v(1), v(2)]);
        assert_eq!(runs[1].corners, vec![v(2), v(3), v(4)]);
    }

    #[test]
    fn touching_vertex_stays_inside_run() {
        let loop_corners = [
            (v(0), Front),
            (v(1), OnPlane),
            (v(2), Front),
            (Corner::Cut(0), OnPlane),
            (v(3), Back),
            (Corner::Cut(1), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0].corners,
            vec![Corner::Cut(1), v(0), v(1), v(2), Corner::Cut(0)]
        );
    }

    #[test]
    fn four_crossings_give_four_runs() {
        let loop_corners = [
            (v(0), Front),
            (Corner::Cut(0), OnPlane),
            (v(1), Back),
            (Corner::Cut(1), OnPlane),
            (v(2), Front),
            (Corner::Cut(2), OnPlane),
            (v(3), Back),
            (Corner::Cut(3), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs.len(), 4);
        assert_eq!(runs.iter().filter(|r| r.front).count(), 2);
        assert!(runs.iter().all(|r| r.corners.len() == 3));
    }

    #[test]
    fn one_sided_loop_is_rejected() {
        let loop_corners = [(v(0), Front), (v(1), Front), (v(2), OnPlane)];
        assert!(matches!(
            runs(p(), &loop_corners),
            Err(MeshError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn two_runs_close_on_their_own_seam() {
        let loop_corners = [
            (v(0), Front),
            (Corner::Cut(0), OnPlane),
            (v(1), Back),
            (Corner::Cut(1), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        let fragments = fragments(p(), runs, |_| unreachable!()).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].corners, vec![Corner::Cut(1), v(0), Corner::Cut(0)]);
        assert_eq!(fragments[0].seams, vec![2]);
        assert_eq!(fragments[1].seams, vec![2]);
    }

    #[test]
    fn notch_joins_runs_across_the_cut() {
        // U profile cut across both arms; cut k sits at position k on the line.
        let loop_corners = [
            (v(0), Back),
            (v(1), Back),
            (Corner::Cut(3), OnPlane),
            (v(2), Front),
            (v(3), Front),
            (Corner::Cut(2), OnPlane),
            (v(4), Back),
            (v(5), Back),
            (Corner::Cut(1), OnPlane),
            (v(6), Front),
            (v(7), Front),
            (Corner::Cut(0), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        assert_eq!(runs.len(), 4);
        let along = |corner: Corner| match corner {
            Corner::Cut(i) => i as f32,
            Corner::Existing(_) => unreachable!(),
        };
        let fragments = fragments(p(), runs, along).unwrap();

        let front: Vec<&Fragment> = fragments.iter().filter(|f| f.front).collect();
        let back: Vec<&Fragment> = fragments.iter().filter(|f| !f.front).collect();
        assert_eq!(front.len(), 2);
        assert_eq!(back.len(), 1);
        assert!(front.iter().all(|f| f.corners.len() == 4 && f.seams == vec![3]));
        assert_eq!(
            back[0].corners,
            vec![
                Corner::Cut(0),
                v(0),
                v(1),
                Corner::Cut(3),
                Corner::Cut(2),
                v(4),
                v(5),
                Corner::Cut(1),
            ]
        );
        assert_eq!(back[0].seams, vec![3, 7]);
    }

    #[test]
    fn unpairable_cut_points_are_rejected() {
        // Boundaries sorted so that two run ends pair with each other.
        let loop_corners = [
            (v(0), Front),
            (Corner::Cut(0), OnPlane),
            (v(1), Back),
            (Corner::Cut(1), OnPlane),
            (v(2), Front),
            (Corner::Cut(2), OnPlane),
            (v(3), Back),
            (Corner::Cut(3), OnPlane),
        ];
        let runs = runs(p(), &loop_corners).unwrap();
        let along = |corner: Corner| match corner {
            Corner::Cut(0) | Corner::Cut(2) => 0.0,
            _ => 1.0,
        };
        assert!(matches!(
            fragments(p(), runs, along),
            Err(MeshError::DegenerateGeometry(_))
        ));
    }
}
