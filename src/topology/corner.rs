use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a corner in the floor plan.
    pub struct CornerId;
}

/// A topology node: the plan position shared by one or more wall endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    pub(crate) position: Point2,
    /// Wall-top height at this corner, in centimeters.
    pub(crate) elevation: f64,
}

impl Corner {
    /// Creates a corner at `position` with the given wall-top elevation.
    #[must_use]
    pub fn new(position: Point2, elevation: f64) -> Self {
        Self {
            position,
            elevation,
        }
    }

    /// The plan position, in centimeters.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}
