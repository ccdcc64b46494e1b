//! Mapping between plan centimeters, world pixels, and screen pixels.
//!
//! World pixels are plan centimeters at a fixed scale. Screen pixels are world
//! pixels after the viewport's zoom and pan.

mod viewport;

pub use viewport::Viewport;

use crate::math::Point2;

/// Fixed drawing scale: world pixels per centimeter.
pub const PIXELS_PER_CM: f64 = 2.0;

/// Reciprocal of [`PIXELS_PER_CM`].
pub const CM_PER_PIXEL: f64 = 1.0 / PIXELS_PER_CM;

/// Converts a length in centimeters to world pixels.
#[must_use]
pub fn cm_to_pixel(v: f64) -> f64 {
    v * PIXELS_PER_CM
}

/// Converts a length in world pixels to centimeters.
#[must_use]
pub fn pixel_to_cm(v: f64) -> f64 {
    v / PIXELS_PER_CM
}

/// Maps a screen-space pixel position to plan centimeters.
#[must_use]
pub fn screen_to_world_cm(screen_x: f64, screen_y: f64, viewport: &Viewport) -> Point2 {
    let world_x = (screen_x - viewport.pan_x()) / viewport.zoom();
    let world_y = (screen_y - viewport.pan_y()) / viewport.zoom();
    Point2::new(pixel_to_cm(world_x), pixel_to_cm(world_y))
}

/// Maps plan centimeters to a screen-space pixel position.
#[must_use]
pub fn world_cm_to_screen(p: &Point2, viewport: &Viewport) -> Point2 {
    Point2::new(
        cm_to_pixel(p.x) * viewport.zoom() + viewport.pan_x(),
        cm_to_pixel(p.y) * viewport.zoom() + viewport.pan_y(),
    )
}

/// Rounds a plan position to the nearest grid intersection.
///
/// Non-positive or non-finite spacing leaves the point unchanged.
#[must_use]
pub fn snap_to_grid(p: &Point2, spacing: f64) -> Point2 {
    if !spacing.is_finite() || spacing <= 0.0 {
        return *p;
    }
    Point2::new(
        (p.x / spacing).round() * spacing,
        (p.y / spacing).round() * spacing,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scalar_conversions_invert() {
        assert_abs_diff_eq!(pixel_to_cm(cm_to_pixel(123.25)), 123.25);
        assert_abs_diff_eq!(cm_to_pixel(1.0) * CM_PER_PIXEL, 1.0);
    }

    #[test]
    fn round_trip_across_viewports() {
        let viewports = [
            Viewport::new(0.0, 0.0, 1.0).unwrap(),
            Viewport::new(-512.5, 300.25, 0.037).unwrap(),
            Viewport::new(1e4, -7.5e3, 37.0).unwrap(),
            Viewport::new(3.3, 4.4, 1e-3).unwrap(),
        ];
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(400.0, -250.5),
            Point2::new(-12_345.678, 9_876.5),
            Point2::new(0.001, 1e5),
        ];
        for vp in &viewports {
            for p in &points {
                let screen = world_cm_to_screen(p, vp);
                let back = screen_to_world_cm(screen.x, screen.y, vp);
                assert!((back - p).norm() < 1e-6, "vp={vp:?} p={p} back={back}");
            }
        }
    }

    #[test]
    fn pan_and_zoom_applied_in_order() {
        let vp = Viewport::new(100.0, 50.0, 2.0).unwrap();
        let p = screen_to_world_cm(140.0, 90.0, &vp);
        // (140 - 100) / 2 = 20 px = 10 cm
        assert_abs_diff_eq!(p, Point2::new(10.0, 10.0));
    }

    #[test]
    fn grid_snap() {
        let p = snap_to_grid(&Point2::new(14.0, -26.0), 10.0);
        assert_abs_diff_eq!(p, Point2::new(10.0, -30.0));
        let same = snap_to_grid(&Point2::new(14.0, -26.0), 0.0);
        assert_abs_diff_eq!(same, Point2::new(14.0, -26.0));
    }
}
