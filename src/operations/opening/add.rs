use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::edit::finite_point;
use crate::operations::query::FindClosestWall;
use crate::topology::{FloorPlan, InWallItem, ItemId, OpeningKind};

use super::{snap, Attached, OpeningParams};

/// Inserts a door or window on the wall nearest a plan point.
#[derive(Debug, Clone)]
pub struct AddOpeningAtPosition {
    x: f64,
    y: f64,
    kind: OpeningKind,
    params: OpeningParams,
}

impl AddOpeningAtPosition {
    #[must_use]
    pub fn new(x: f64, y: f64, kind: OpeningKind, params: OpeningParams) -> Self {
        Self { x, y, kind, params }
    }

    /// Executes the command.
    ///
    /// The nearest wall is searched with the configured insert margin, so the
    /// opening's center stays at least that far from either wall end. The new
    /// item is then snapped to the face of that wall the point lies on.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoWallFound` for a plan without walls and
    /// `OperationError::TooFar` when the nearest wall is beyond
    /// `opening_snap_threshold`. No item is created in either case.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Attached> {
        let p = finite_point(self.x, self.y, "opening position")?;
        self.params.validate()?;

        let hit = FindClosestWall::new(p, config.opening_insert_margin)
            .execute(plan)
            .ok_or(OperationError::NoWallFound)?;
        if hit.distance > config.opening_snap_threshold {
            tracing::debug!(
                distance = hit.distance,
                threshold = config.opening_snap_threshold,
                "opening too far from any wall"
            );
            return Err(OperationError::TooFar {
                distance: hit.distance,
                threshold: config.opening_snap_threshold,
            }
            .into());
        }

        let z = self.params.center_height(self.kind);
        plan.transact(|plan| {
            let thickness = plan.wall(hit.wall)?.thickness();
            let item = InWallItem {
                kind: self.kind,
                wall: hit.wall,
                offset: hit.along,
                half_size: Vector3::new(self.params.width, thickness, self.params.height) * 0.5,
                side: hit.side,
                position: Point3::new(hit.position.x, hit.position.y, z),
                rotation: 0.0,
            };
            let id = plan.insert_item(item)?;
            // Snap from the margin-clamped foot so the opening keeps clear of
            // the mitered corners at either end.
            let foot = Point3::new(hit.position.x, hit.position.y, z);
            let placed = snap::place(plan, id, &foot, hit.wall, hit.side)?;
            tracing::debug!(kind = ?self.kind, offset = placed.offset, side = ?placed.side, "opening added");
            Ok(placed)
        })
    }
}

/// Deletes an item and detaches it from its wall.
#[derive(Debug, Clone)]
pub struct RemoveOpening {
    item: ItemId,
}

impl RemoveOpening {
    #[must_use]
    pub fn new(item: ItemId) -> Self {
        Self { item }
    }

    /// Executes the command, returning the removed item.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` for an unknown item.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<InWallItem> {
        plan.remove_item(self.item)
    }
}
