use crate::error::{GeometryError, Result};

/// Pan and zoom of the 2D view, in screen pixels.
///
/// Always holds a finite zoom greater than zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidViewport` if `zoom` is not finite or
    /// not positive, and `GeometryError::NonFinite` for a non-finite pan.
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Result<Self> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(GeometryError::InvalidViewport { zoom }.into());
        }
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return Err(GeometryError::NonFinite("viewport pan").into());
        }
        Ok(Self { pan_x, pan_y, zoom })
    }

    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_zoom() {
        assert!(Viewport::new(0.0, 0.0, 0.0).is_err());
        assert!(Viewport::new(0.0, 0.0, -2.0).is_err());
        assert!(Viewport::new(0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_nan_pan() {
        assert!(Viewport::new(f64::NAN, 0.0, 1.0).is_err());
    }
}
