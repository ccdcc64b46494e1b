use crate::math::distance_2d::project_to_segment;
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, TOLERANCE};
use crate::topology::{EdgeSide, FloorPlan, WallId};

/// Result of a closest wall query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestWall {
    pub wall: WallId,
    /// The face of the wall the query point is on.
    pub side: EdgeSide,
    /// The clamped foot point on the wall centerline.
    pub position: Point2,
    /// Distance of `position` from the wall's start corner.
    pub along: f64,
    /// Distance from the query point to `position`.
    pub distance: f64,
}

/// A wall centerline offered to [`closest_wall_among`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCandidate {
    pub wall: WallId,
    pub start: Point2,
    pub end: Point2,
    pub has_front: bool,
    pub has_back: bool,
}

/// Finds the wall nearest to `point`.
///
/// Each projection is clamped to `[margin, length - margin]` along the wall
/// so the foot point always leaves room for an item of that half width. The
/// first candidate wins a tie. No distance threshold is applied.
#[must_use]
pub fn closest_wall_among(candidates: &[WallCandidate], point: &Point2, margin: f64) -> Option<ClosestWall> {
    let mut best: Option<(&WallCandidate, ClosestWall)> = None;
    for cand in candidates {
        if (cand.end - cand.start).norm() < TOLERANCE {
            continue;
        }
        let proj = project_to_segment(point, &cand.start, &cand.end, margin);
        if best.is_none_or(|(_, b)| proj.distance < b.distance) {
            best = Some((
                cand,
                ClosestWall {
                    wall: cand.wall,
                    side: EdgeSide::Front,
                    position: proj.closest,
                    along: proj.along,
                    distance: proj.distance,
                },
            ));
        }
    }

    best.map(|(cand, mut hit)| {
        let dir = (cand.end - cand.start).normalize();
        let facing = left_normal(&dir).dot(&(point - hit.position));
        let preferred = if facing >= 0.0 { EdgeSide::Front } else { EdgeSide::Back };
        let exists = |side| match side {
            EdgeSide::Front => cand.has_front,
            EdgeSide::Back => cand.has_back,
        };
        hit.side = if !exists(preferred) && exists(preferred.opposite()) {
            preferred.opposite()
        } else {
            preferred
        };
        hit
    })
}

/// Finds the wall nearest to a plan point. Read-only.
#[derive(Debug, Clone)]
pub struct FindClosestWall {
    point: Point2,
    margin: f64,
}

impl FindClosestWall {
    /// Creates a query at `point` with the given along-wall clamp margin.
    #[must_use]
    pub fn new(point: Point2, margin: f64) -> Self {
        Self { point, margin }
    }

    /// Executes the query. Returns `None` only when the plan has no walls.
    #[must_use]
    pub fn execute(&self, plan: &FloorPlan) -> Option<ClosestWall> {
        let candidates: Vec<WallCandidate> = plan
            .walls()
            .filter_map(|(id, wall)| {
                let (start, end) = plan.wall_points(id).ok()?;
                Some(WallCandidate {
                    wall: id,
                    start,
                    end,
                    has_front: wall.front_edge().is_some(),
                    has_back: wall.back_edge().is_some(),
                })
            })
            .collect();
        closest_wall_among(&candidates, &self.point, self.margin)
    }
}
