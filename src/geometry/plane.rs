use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite plane through `origin` with unit `normal`.
///
/// Wall faces are vertical planes: their normal has no z component, so
/// projecting onto them never changes a point's elevation.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length or not finite.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(GeometryError::Degenerate("plane normal has zero length".into()).into());
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    /// Signed distance from `p` to the plane along the normal.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(&self.normal)
    }

    /// Orthogonal projection of `p` onto the plane.
    #[must_use]
    pub fn project(&self, p: &Point3) -> Point3 {
        p - self.normal * self.signed_distance(p)
    }
}
