use crate::config::PlanConfig;
use crate::error::Result;
use crate::math::distance_2d::project_to_segment;
use crate::math::Point2;
use crate::topology::{CornerId, FloorPlan, WallId};

use super::{commit, fold_duplicate, min_wall_length, neighborhood, split_wall};

/// Folds a corner into the topology it was dropped onto.
///
/// A corner within snap tolerance of another corner is merged into it; a
/// corner lying on a wall splits that wall. Returns `true` when either
/// happened, which ends the current drawing chain.
#[derive(Debug, Clone)]
pub struct MergeWithIntersected {
    corner: CornerId,
}

impl MergeWithIntersected {
    #[must_use]
    pub fn new(corner: CornerId) -> Self {
        Self { corner }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` for an unknown corner, or any
    /// error from recomputing the affected junctions. The plan is left
    /// unchanged on error.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<bool> {
        let pos = plan.corner(self.corner)?.position();

        if let Some(target) = plan.corner_near(&pos, config.corner_snap_tolerance, Some(self.corner)) {
            plan.transact(|plan| merge_corners(plan, self.corner, target, config))?;
            return Ok(true);
        }

        if let Some(wall) = wall_under(plan, self.corner, &pos, config)? {
            plan.transact(|plan| {
                let (a, b) = plan.wall_points(wall)?;
                split_wall(plan, wall, self.corner, config)?;
                commit(plan, &[a, b, pos], config)
            })?;
            tracing::debug!(x = pos.x, y = pos.y, "corner dropped onto wall");
            return Ok(true);
        }

        Ok(false)
    }
}

/// The nearest wall not touching `corner` whose interior passes within
/// `wall_snap_tolerance` of it.
fn wall_under(
    plan: &FloorPlan,
    corner: CornerId,
    pos: &Point2,
    config: &PlanConfig,
) -> Result<Option<WallId>> {
    let min = min_wall_length(config);
    let mut best: Option<(WallId, f64)> = None;
    for (id, wall) in plan.walls() {
        if wall.touches(corner) {
            continue;
        }
        let (a, b) = plan.wall_points(id)?;
        let len = (b - a).norm();
        let proj = project_to_segment(pos, &a, &b, 0.0);
        let inside = proj.along > min && proj.along < len - min;
        if inside
            && proj.distance <= config.wall_snap_tolerance
            && best.is_none_or(|(_, d)| proj.distance < d)
        {
            best = Some((id, proj.distance));
        }
    }
    Ok(best.map(|(id, _)| id))
}

/// Re-points every wall at `from` to `into`, then removes `from`.
///
/// Walls that collapse to zero length are dropped. A wall that duplicates an
/// existing one hands its items to the survivor and is dropped.
fn merge_corners(plan: &mut FloorPlan, from: CornerId, into: CornerId, config: &PlanConfig) -> Result<()> {
    let mut points = neighborhood(plan, from)?;
    points.push(plan.corner(into)?.position());

    let moved = plan.walls_at_corner(from);
    for &id in &moved {
        let wall = plan.wall_mut(id)?;
        if wall.start == from {
            wall.start = into;
        }
        if wall.end == from {
            wall.end = into;
        }
        wall.clear_geometry();
    }

    for &id in &moved {
        let (start, end) = {
            let w = plan.wall(id)?;
            (w.start(), w.end())
        };
        if start == end {
            let (_, items) = plan.remove_wall(id)?;
            tracing::debug!(items = items.len(), "collapsed wall dropped");
            continue;
        }
        fold_duplicate(plan, id)?;
    }

    plan.remove_orphan_corner(from)?;
    commit(plan, &points, config)?;
    Ok(())
}
