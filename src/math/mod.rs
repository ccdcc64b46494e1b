pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type (plan coordinates, centimeters).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (plan x/y plus vertical z).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if both coordinates are finite.
#[must_use]
pub fn is_finite_2d(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite()
}
