//! Mitered wall corners at junctions.
//!
//! A junction is the set of wall ends whose corners hash to the same
//! position. Each wall end (an "arm") is offset by half its thickness to
//! both sides; neighboring arms in angular order meet where the left face
//! of one crosses the right face of the next.

mod resolve;

pub use resolve::{CalculateJunctionIntersections, Junction, ListJunctions, Recompute};
pub(crate) use resolve::{rebuild_all, refresh_at};

use std::cmp::Ordering;

use crate::math::intersect_2d::LineEquation;
use crate::math::polygon_2d::{dedup_closed, left_normal, signed_area_2d};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::topology::{Miter, WallEnd, WallId};

/// Arms shorter than this are skipped as degenerate.
pub const MIN_ARM_LENGTH: f64 = 1e-6;

/// One wall end taking part in a junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionArm {
    pub wall: WallId,
    /// Which end of `wall` sits at the junction.
    pub end: WallEnd,
    /// The position of the wall's opposite corner.
    pub far: Point2,
    pub thickness: f64,
}

/// The resolved miter for one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmMiter {
    pub wall: WallId,
    pub end: WallEnd,
    pub miter: Miter,
}

/// Output of [`solve_junction`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JunctionSolution {
    /// One entry per non-degenerate arm, in angular order.
    pub miters: Vec<ArmMiter>,
    /// Counter-clockwise patch left uncovered between three or more walls.
    pub fill_polygon: Option<Vec<Point2>>,
}

impl JunctionSolution {
    /// The miter computed for a given wall end.
    #[must_use]
    pub fn miter_for(&self, wall: WallId, end: WallEnd) -> Option<&Miter> {
        self.miters
            .iter()
            .find(|m| m.wall == wall && m.end == end)
            .map(|m| &m.miter)
    }
}

/// Offset geometry of one arm, seen from the junction outward.
struct ArmFrame {
    arm: JunctionArm,
    angle: f64,
    length: f64,
    /// Left offset point (`meeting + n * t/2`).
    pa: Point2,
    /// Right offset point (`meeting - n * t/2`).
    pb: Point2,
    edge_a: LineEquation,
    edge_b: LineEquation,
}

fn arm_frame(meeting: &Point2, arm: &JunctionArm) -> Option<ArmFrame> {
    let v: Vector2 = arm.far - meeting;
    let length = v.norm();
    if length < MIN_ARM_LENGTH {
        return None;
    }
    let n = left_normal(&(v / length));
    let half = arm.thickness * 0.5;
    let pa = meeting + n * half;
    let pb = meeting - n * half;
    Some(ArmFrame {
        arm: *arm,
        angle: v.y.atan2(v.x),
        length,
        pa,
        pb,
        edge_a: LineEquation::through(&pa, &v)?,
        edge_b: LineEquation::through(&pb, &v)?,
    })
}

/// Total order on arms: angle, then length, then thickness, then wall id.
fn compare_frames(a: &ArmFrame, b: &ArmFrame) -> Ordering {
    a.angle
        .total_cmp(&b.angle)
        .then(a.length.total_cmp(&b.length))
        .then(a.arm.thickness.total_cmp(&b.arm.thickness))
        .then(a.arm.wall.cmp(&b.arm.wall))
}

/// Computes mitered left/right corners for every arm meeting at `meeting`.
///
/// Arms are ordered counter-clockwise by outgoing angle. For each arm and
/// its successor, the left offset line of the arm is intersected with the
/// right offset line of the successor; that point is the arm's `left` and
/// the successor's `right`. Parallel offset lines fall back to the arm's
/// own left offset point, so a straight run yields a plain butt joint and no
/// intersection can produce NaN or infinity.
///
/// A single arm gets a square cap. With three or more arms the miter points
/// in angular order form the fill polygon.
#[must_use]
pub fn solve_junction(meeting: &Point2, arms: &[JunctionArm]) -> JunctionSolution {
    let mut frames: Vec<ArmFrame> = arms
        .iter()
        .filter_map(|arm| arm_frame(meeting, arm))
        .collect();
    if frames.is_empty() {
        return JunctionSolution::default();
    }
    frames.sort_by(compare_frames);

    let n = frames.len();
    let mut lefts: Vec<Point2> = frames.iter().map(|f| f.pa).collect();
    let mut rights: Vec<Point2> = frames.iter().map(|f| f.pb).collect();

    if n >= 2 {
        for i in 0..n {
            let j = (i + 1) % n;
            let corner = frames[i]
                .edge_a
                .intersect(&frames[j].edge_b)
                .unwrap_or(frames[i].pa);
            lefts[i] = corner;
            rights[j] = corner;
        }
    }

    let miters = frames
        .iter()
        .enumerate()
        .map(|(i, f)| ArmMiter {
            wall: f.arm.wall,
            end: f.arm.end,
            miter: Miter {
                left: lefts[i],
                right: rights[i],
            },
        })
        .collect();

    let fill_polygon = if n >= 3 {
        let poly = dedup_closed(&lefts, TOLERANCE * 1e3);
        (poly.len() >= 3 && signed_area_2d(&poly).abs() > TOLERANCE).then_some(poly)
    } else {
        None
    };

    JunctionSolution {
        miters,
        fill_polygon,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use slotmap::SlotMap;

    fn wall_ids(n: usize) -> Vec<WallId> {
        let mut sm: SlotMap<WallId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    fn arm(wall: WallId, far: (f64, f64), thickness: f64) -> JunctionArm {
        JunctionArm {
            wall,
            end: WallEnd::Start,
            far: Point2::new(far.0, far.1),
            thickness,
        }
    }

    #[test]
    fn single_arm_gets_square_cap() {
        let ids = wall_ids(1);
        let sol = solve_junction(&Point2::origin(), &[arm(ids[0], (100.0, 0.0), 10.0)]);
        let m = sol.miter_for(ids[0], WallEnd::Start).unwrap();
        assert_abs_diff_eq!(m.left, Point2::new(0.0, 5.0));
        assert_abs_diff_eq!(m.right, Point2::new(0.0, -5.0));
        assert!(sol.fill_polygon.is_none());
    }

    #[test]
    fn collinear_pair_is_butt_joint() {
        let ids = wall_ids(2);
        let sol = solve_junction(
            &Point2::origin(),
            &[arm(ids[0], (300.0, 0.0), 10.0), arm(ids[1], (-200.0, 0.0), 10.0)],
        );
        let east = sol.miter_for(ids[0], WallEnd::Start).unwrap();
        let west = sol.miter_for(ids[1], WallEnd::Start).unwrap();
        assert_eq!(east.left, west.right);
        assert_eq!(west.left, east.right);
        assert_abs_diff_eq!(east.left, Point2::new(0.0, 5.0));
        assert_abs_diff_eq!(east.right, Point2::new(0.0, -5.0));
        assert!(sol.fill_polygon.is_none());
    }

    #[test]
    fn right_angle_miters() {
        let ids = wall_ids(2);
        let sol = solve_junction(
            &Point2::origin(),
            &[arm(ids[0], (300.0, 0.0), 10.0), arm(ids[1], (0.0, 300.0), 10.0)],
        );
        let east = sol.miter_for(ids[0], WallEnd::Start).unwrap();
        let north = sol.miter_for(ids[1], WallEnd::Start).unwrap();
        // Inner corner between east and north, outer corner on the far side.
        assert_abs_diff_eq!(east.left, Point2::new(5.0, 5.0), epsilon = 1e-9);
        assert_abs_diff_eq!(north.right, Point2::new(5.0, 5.0), epsilon = 1e-9);
        assert_abs_diff_eq!(north.left, Point2::new(-5.0, -5.0), epsilon = 1e-9);
        assert_abs_diff_eq!(east.right, Point2::new(-5.0, -5.0), epsilon = 1e-9);
    }

    #[test]
    fn tee_produces_triangle_fill() {
        let ids = wall_ids(3);
        let sol = solve_junction(
            &Point2::origin(),
            &[
                arm(ids[0], (300.0, 0.0), 10.0),
                arm(ids[1], (0.0, 300.0), 10.0),
                arm(ids[2], (-300.0, 0.0), 10.0),
            ],
        );
        let poly = sol.fill_polygon.unwrap();
        assert_eq!(poly.len(), 3);
        assert!(signed_area_2d(&poly) > 0.0);
        assert_abs_diff_eq!(poly[0], Point2::new(5.0, 5.0), epsilon = 1e-9);
        assert_abs_diff_eq!(poly[1], Point2::new(-5.0, 5.0), epsilon = 1e-9);
        assert_abs_diff_eq!(poly[2], Point2::new(0.0, -5.0), epsilon = 1e-9);
    }

    #[test]
    fn cross_produces_square_fill() {
        let ids = wall_ids(4);
        let sol = solve_junction(
            &Point2::origin(),
            &[
                arm(ids[0], (0.0, -100.0), 20.0),
                arm(ids[1], (100.0, 0.0), 20.0),
                arm(ids[2], (0.0, 100.0), 20.0),
                arm(ids[3], (-100.0, 0.0), 20.0),
            ],
        );
        let poly = sol.fill_polygon.unwrap();
        assert_eq!(poly.len(), 4);
        assert_abs_diff_eq!(signed_area_2d(&poly), 400.0, epsilon = 1e-6);
    }

    #[test]
    fn unequal_thickness_meets_on_both_faces() {
        let ids = wall_ids(2);
        let sol = solve_junction(
            &Point2::origin(),
            &[arm(ids[0], (300.0, 0.0), 20.0), arm(ids[1], (0.0, 300.0), 10.0)],
        );
        let east = sol.miter_for(ids[0], WallEnd::Start).unwrap();
        assert_abs_diff_eq!(east.left, Point2::new(5.0, 10.0), epsilon = 1e-9);
    }

    #[test]
    fn degenerate_arm_is_skipped() {
        let ids = wall_ids(2);
        let sol = solve_junction(
            &Point2::origin(),
            &[arm(ids[0], (0.0, 0.0), 10.0), arm(ids[1], (50.0, 0.0), 10.0)],
        );
        assert_eq!(sol.miters.len(), 1);
        assert!(sol.miter_for(ids[0], WallEnd::Start).is_none());
    }

    #[test]
    fn output_independent_of_input_order() {
        let ids = wall_ids(3);
        let arms = [
            arm(ids[0], (300.0, 10.0), 10.0),
            arm(ids[1], (-40.0, 250.0), 15.0),
            arm(ids[2], (-100.0, -120.0), 12.0),
        ];
        let forward = solve_junction(&Point2::new(1.5, -2.5), &arms);
        let mut reversed = arms;
        reversed.reverse();
        let backward = solve_junction(&Point2::new(1.5, -2.5), &reversed);
        assert_eq!(forward, backward);
    }

    #[test]
    fn nearly_parallel_stays_finite() {
        let ids = wall_ids(2);
        let sol = solve_junction(
            &Point2::origin(),
            &[arm(ids[0], (300.0, 0.0), 10.0), arm(ids[1], (-300.0, 1e-12), 10.0)],
        );
        for m in &sol.miters {
            assert!(m.miter.left.x.is_finite() && m.miter.left.y.is_finite());
            assert!(m.miter.right.x.is_finite() && m.miter.right.y.is_finite());
        }
    }
}
