use crate::config::PlanConfig;
use crate::error::Result;
use crate::topology::{Corner, CornerId, FloorPlan};

use super::finite_point;

/// Creates a corner, or returns an existing one within snap tolerance.
#[derive(Debug, Clone)]
pub struct NewCorner {
    x: f64,
    y: f64,
    elevation: Option<f64>,
}

impl NewCorner {
    /// Creates a new `NewCorner` command at `(x, y)` centimeters.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            elevation: None,
        }
    }

    /// Overrides the wall-top elevation (defaults to the configured wall height).
    #[must_use]
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if a coordinate or the elevation is
    /// not finite. The plan is untouched in that case.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<CornerId> {
        let p = finite_point(self.x, self.y, "corner position")?;
        let elevation = self.elevation.unwrap_or(config.default_wall_height);
        if !elevation.is_finite() {
            return Err(crate::error::GeometryError::NonFinite("corner elevation").into());
        }

        if let Some(existing) = plan.corner_near(&p, config.corner_snap_tolerance, None) {
            tracing::debug!(x = p.x, y = p.y, "snapped to existing corner");
            return Ok(existing);
        }
        Ok(plan.insert_corner(Corner::new(p, elevation)))
    }
}
