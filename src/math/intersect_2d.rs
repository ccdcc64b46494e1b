use super::{Point2, Vector2, TOLERANCE};

/// Determinant below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// An implicit 2D line `a·x + b·y + c = 0`.
///
/// `(a, b)` is a unit normal when built through [`LineEquation::through`],
/// so the intersection determinant equals the sine of the angle between
/// the two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineEquation {
    /// Builds the line through `point` along `dir`.
    ///
    /// Returns `None` if `dir` has zero length.
    #[must_use]
    pub fn through(point: &Point2, dir: &Vector2) -> Option<Self> {
        let len = dir.norm();
        if len < TOLERANCE {
            return None;
        }
        let a = dir.y / len;
        let b = -dir.x / len;
        Some(Self {
            a,
            b,
            c: -(a * point.x + b * point.y),
        })
    }

    /// Signed distance from `p` to the line (positive on the normal side).
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Intersects two implicit lines.
    ///
    /// Returns `None` when the determinant is within [`PARALLEL_EPSILON`]
    /// of zero.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Point2> {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let x = (self.b * other.c - other.b * self.c) / det;
        let y = (other.a * self.c - self.a * other.c) / det;
        if x.is_finite() && y.is_finite() {
            Some(Point2::new(x, y))
        } else {
            None
        }
    }
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let d = p2 - p1;
    let t = d.perp(d2) / cross;
    let u = d.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}
