use super::{Point2, TOLERANCE};

/// A point projected onto a segment with an along-segment clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Distance from the segment start to `closest`, measured along the segment.
    pub along: f64,
    /// The clamped foot point on the segment.
    pub closest: Point2,
    /// Distance from the query point to `closest`.
    pub distance: f64,
}

/// Projects `p` onto segment `a`–`b`, clamping the along-segment distance
/// to `[margin, length - margin]`.
///
/// When the segment is shorter than `2 * margin` the foot is pinned to its
/// midpoint. A zero-length segment projects onto `a`.
#[must_use]
pub fn project_to_segment(p: &Point2, a: &Point2, b: &Point2, margin: f64) -> SegmentProjection {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return SegmentProjection {
            along: 0.0,
            closest: *a,
            distance: (p - a).norm(),
        };
    }
    let dir = d / len;
    let along = clamp_along((p - a).dot(&dir), len, margin);
    let closest = a + dir * along;
    SegmentProjection {
        along,
        closest,
        distance: (p - closest).norm(),
    }
}

/// Clamps an along-segment distance to `[margin, length - margin]`.
#[must_use]
pub fn clamp_along(t: f64, length: f64, margin: f64) -> f64 {
    let margin = margin.max(0.0);
    if length <= 2.0 * margin {
        length * 0.5
    } else {
        t.clamp(margin, length - margin)
    }
}

/// Returns the minimum distance from point `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_to_segment(p, a, b, 0.0).distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perpendicular_foot() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let proj = project_to_segment(&Point2::new(4.0, 3.0), &a, &b, 0.0);
        assert_abs_diff_eq!(proj.along, 4.0);
        assert_abs_diff_eq!(proj.distance, 3.0);
    }

    #[test]
    fn beyond_end_clamps_to_endpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_abs_diff_eq!(point_to_segment_dist(&Point2::new(13.0, 4.0), &a, &b), 5.0);
    }

    #[test]
    fn margin_keeps_foot_inside() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(300.0, 0.0);
        let proj = project_to_segment(&Point2::new(-40.0, 10.0), &a, &b, 50.0);
        assert_abs_diff_eq!(proj.along, 50.0);
        assert_abs_diff_eq!(proj.closest, Point2::new(50.0, 0.0));
    }

    #[test]
    fn short_segment_pins_midpoint() {
        assert_abs_diff_eq!(clamp_along(5.0, 80.0, 60.0), 40.0);
    }

    #[test]
    fn degenerate_segment() {
        let a = Point2::new(1.0, 1.0);
        assert_abs_diff_eq!(point_to_segment_dist(&Point2::new(4.0, 5.0), &a, &a), 5.0);
    }
}
