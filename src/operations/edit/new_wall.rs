use crate::config::PlanConfig;
use crate::error::{GeometryError, Result, TopologyError};
use crate::topology::{CornerId, FloorPlan, Wall, WallId};

use super::{commit, min_wall_length};

/// Connects two corners with a wall and resolves the junctions at both ends.
#[derive(Debug, Clone)]
pub struct NewWall {
    start: CornerId,
    end: CornerId,
    thickness: Option<f64>,
    height: Option<f64>,
}

impl NewWall {
    /// Creates a new `NewWall` command using the configured default dimensions.
    #[must_use]
    pub fn new(start: CornerId, end: CornerId) -> Self {
        Self {
            start,
            end,
            thickness: None,
            height: None,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Executes the command.
    ///
    /// If a wall already connects the two corners, that wall is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DegenerateWall` if both ends are the same
    /// corner or coincide in position, `GeometryError::Degenerate` for a
    /// non-positive thickness or negative height, and
    /// `TopologyError::EntityNotFound` for an unknown corner.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<WallId> {
        if self.start == self.end {
            return Err(TopologyError::DegenerateWall("wall must connect two distinct corners".into()).into());
        }
        let thickness = self.thickness.unwrap_or(config.default_wall_thickness);
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(GeometryError::Degenerate(format!("wall thickness must be > 0, got {thickness}")).into());
        }
        let height = self.height.unwrap_or(config.default_wall_height);
        if !height.is_finite() || height < 0.0 {
            return Err(GeometryError::Degenerate(format!("wall height must be >= 0, got {height}")).into());
        }

        let a = plan.corner(self.start)?.position();
        let b = plan.corner(self.end)?.position();
        if (b - a).norm() < min_wall_length(config) {
            return Err(TopologyError::DegenerateWall(format!(
                "corners coincide at ({:.3}, {:.3})",
                a.x, a.y
            ))
            .into());
        }

        if let Some(existing) = plan.wall_between(self.start, self.end) {
            tracing::debug!("wall already connects these corners");
            return Ok(existing);
        }

        plan.transact(|plan| {
            let id = plan.insert_wall(Wall::new(self.start, self.end, thickness, height));
            commit(plan, &[a, b], config)?;
            tracing::debug!(length = (b - a).norm(), thickness, "wall added");
            Ok(id)
        })
    }
}
