use crate::config::PlanConfig;
use crate::error::Result;
use crate::topology::{CornerId, FloorPlan, ItemId, WallId};

use super::{commit, neighborhood};

/// Everything a removal deleted, for callers that mirror the plan elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removed {
    pub corners: Vec<CornerId>,
    pub walls: Vec<WallId>,
    pub items: Vec<ItemId>,
}

/// Deletes a wall and the items it hosts.
#[derive(Debug, Clone)]
pub struct RemoveWall {
    wall: WallId,
}

impl RemoveWall {
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self { wall }
    }

    /// Executes the command, recomputing the junctions at both former ends.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` for an unknown wall.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Removed> {
        plan.transact(|plan| {
            let (a, b) = plan.wall_points(self.wall)?;
            let (_, items) = plan.remove_wall(self.wall)?;
            commit(plan, &[a, b], config)?;
            Ok(Removed {
                corners: Vec::new(),
                walls: vec![self.wall],
                items,
            })
        })
    }
}

/// Deletes a corner together with every wall that references it.
#[derive(Debug, Clone)]
pub struct RemoveCorner {
    corner: CornerId,
}

impl RemoveCorner {
    #[must_use]
    pub fn new(corner: CornerId) -> Self {
        Self { corner }
    }

    /// Executes the command, recomputing the junctions at the far ends of the
    /// removed walls.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` for an unknown corner.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Removed> {
        plan.transact(|plan| {
            let points = neighborhood(plan, self.corner)?;
            let mut removed = Removed {
                corners: vec![self.corner],
                ..Removed::default()
            };
            for wall in plan.walls_at_corner(self.corner) {
                let (_, items) = plan.remove_wall(wall)?;
                removed.walls.push(wall);
                removed.items.extend(items);
            }
            plan.remove_orphan_corner(self.corner)?;
            commit(plan, &points, config)?;
            tracing::debug!(walls = removed.walls.len(), "corner removed");
            Ok(removed)
        })
    }
}
