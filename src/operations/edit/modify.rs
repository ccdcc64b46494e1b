use crate::config::PlanConfig;
use crate::error::{GeometryError, Result, TopologyError};
use crate::operations::junction::Recompute;
use crate::topology::{CornerId, FloorPlan, WallId};

use super::{commit, finite_point, min_wall_length, neighborhood};

/// Moves a corner, dragging every wall attached to it.
///
/// Does not merge with whatever the corner lands on; follow up with
/// [`super::MergeWithIntersected`] when the drag ends.
#[derive(Debug, Clone)]
pub struct MoveCorner {
    corner: CornerId,
    x: f64,
    y: f64,
}

impl MoveCorner {
    #[must_use]
    pub fn new(corner: CornerId, x: f64, y: f64) -> Self {
        Self { corner, x, y }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for a non-finite target and
    /// `TopologyError::DegenerateWall` if an attached wall would collapse to
    /// zero length. The plan is left unchanged on error.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Recompute> {
        let target = finite_point(self.x, self.y, "corner position")?;
        plan.transact(|plan| {
            let mut points = neighborhood(plan, self.corner)?;
            plan.corner_mut(self.corner)?.position = target;
            points.push(target);

            let min = min_wall_length(config);
            for wall in plan.walls_at_corner(self.corner) {
                if plan.wall_length(wall)? < min {
                    return Err(TopologyError::DegenerateWall(format!(
                        "moving corner to ({:.2}, {:.2}) collapses a wall",
                        target.x, target.y
                    ))
                    .into());
                }
            }
            commit(plan, &points, config)
        })
    }
}

/// Changes a wall's thickness and recomputes the junctions at both ends.
#[derive(Debug, Clone)]
pub struct SetWallThickness {
    wall: WallId,
    thickness: f64,
}

impl SetWallThickness {
    #[must_use]
    pub fn new(wall: WallId, thickness: f64) -> Self {
        Self { wall, thickness }
    }

    /// Executes the command, returning every wall whose edges moved.
    ///
    /// Items on the wall are re-fitted to the new face.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive or non-finite
    /// thickness.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Recompute> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "wall thickness must be > 0, got {}",
                self.thickness
            ))
            .into());
        }
        plan.transact(|plan| {
            let (a, b) = plan.wall_points(self.wall)?;
            plan.wall_mut(self.wall)?.thickness = self.thickness;
            for item in plan.wall(self.wall)?.items().to_vec() {
                plan.item_mut(item)?.half_size.y = self.thickness * 0.5;
            }
            commit(plan, &[a, b], config)
        })
    }
}

/// Changes a wall's height. Plan geometry is unaffected.
#[derive(Debug, Clone)]
pub struct SetWallHeight {
    wall: WallId,
    height: f64,
}

impl SetWallHeight {
    #[must_use]
    pub fn new(wall: WallId, height: f64) -> Self {
        Self { wall, height }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a negative or non-finite height.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(GeometryError::Degenerate(format!("wall height must be >= 0, got {}", self.height)).into());
        }
        plan.wall_mut(self.wall)?.height = self.height;
        Ok(())
    }
}

/// Changes the wall-top elevation at a corner.
#[derive(Debug, Clone)]
pub struct SetCornerElevation {
    corner: CornerId,
    elevation: f64,
}

impl SetCornerElevation {
    #[must_use]
    pub fn new(corner: CornerId, elevation: f64) -> Self {
        Self { corner, elevation }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for a non-finite elevation.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        if !self.elevation.is_finite() {
            return Err(GeometryError::NonFinite("corner elevation").into());
        }
        plan.corner_mut(self.corner)?.elevation = self.elevation;
        Ok(())
    }
}
