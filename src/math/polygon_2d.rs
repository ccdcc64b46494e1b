use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            a.x, a.y, b.x, b.y
        ))
        .into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Drops consecutive vertices closer than `tol`, including the wrap-around pair.
#[must_use]
pub fn dedup_closed(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|last| (p - last).norm() >= tol) {
            out.push(*p);
        }
    }
    while out.len() > 1 && out.first().zip(out.last()).is_some_and(|(f, l)| (f - l).norm() < tol) {
        out.pop();
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(ccw: bool) -> Vec<Point2> {
        let mut pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        if !ccw {
            pts.reverse();
        }
        pts
    }

    #[test]
    fn signed_area_orientation() {
        assert_abs_diff_eq!(signed_area_2d(&square(true)), 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(signed_area_2d(&square(false)), -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert_abs_diff_eq!(signed_area_2d(&[Point2::new(0.0, 0.0)]), 0.0);
        assert_abs_diff_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn direction_and_normal() {
        let d = segment_direction(&Point2::new(1.0, 1.0), &Point2::new(1.0, 5.0)).unwrap();
        assert_abs_diff_eq!(d, Vector2::new(0.0, 1.0), epsilon = TOLERANCE);
        assert_abs_diff_eq!(left_normal(&d), Vector2::new(-1.0, 0.0), epsilon = TOLERANCE);
    }

    #[test]
    fn zero_length_direction_is_degenerate() {
        let p = Point2::new(3.0, 3.0);
        assert!(segment_direction(&p, &p).is_err());
    }

    #[test]
    fn dedup_removes_repeats_and_wrap() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1e-12),
        ];
        let out = dedup_closed(&pts, 1e-9);
        assert_eq!(out.len(), 3);
    }
}
