use crate::config::PlanConfig;
use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::plane::Plane;
use crate::math::distance_2d::clamp_along;
use crate::math::polygon_2d::segment_direction;
use crate::math::{Point2, Point3, Vector3};
use crate::operations::edit::finite_point;
use crate::operations::query::FindClosestWall;
use crate::topology::{EdgeSide, FloorPlan, ItemId, WallId};

use super::Attached;

/// Fits `item` onto the `side` face of `wall` near `point`.
pub(super) fn place(
    plan: &mut FloorPlan,
    item: ItemId,
    point: &Point3,
    wall: WallId,
    side: EdgeSide,
) -> Result<Attached> {
    if !point.coords.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::NonFinite("snap point").into());
    }
    let (a, b) = plan.wall_points(wall)?;
    let dir = segment_direction(&a, &b)?;
    let length = (b - a).norm();
    let host = plan.wall(wall)?;
    let thickness = host.thickness();
    let edge = *host
        .edge(side)
        .ok_or_else(|| GeometryError::Degenerate(format!("wall has no {side:?} face")))?;
    let half_width = plan.item(item)?.half_width();

    let z = point.z;
    // Angle from +Y to the face normal, counterclockwise.
    let rotation = (-edge.normal.x).atan2(edge.normal.y);

    let offset = clamp_along((point.xy() - a).dot(&dir), length, half_width);
    let foot = a + dir * offset;

    let center = edge.center();
    let face = Plane::from_normal(
        Point3::new(center.x, center.y, z),
        Vector3::new(edge.normal.x, edge.normal.y, 0.0),
    )?;
    let projected = face.project(&Point3::new(foot.x, foot.y, z));
    let position = Point3::new(projected.x, projected.y, z);

    let record = plan.item_mut(item)?;
    record.offset = offset;
    record.side = side;
    record.position = position;
    record.rotation = rotation;
    record.half_size.y = thickness * 0.5;
    plan.attach_item(item, wall)?;

    Ok(Attached {
        item,
        wall,
        side,
        offset,
        position,
        rotation,
    })
}

/// Attaches an item to one face of a wall.
///
/// Running the command twice with the same input gives the same placement.
#[derive(Debug, Clone)]
pub struct SnapToWall {
    item: ItemId,
    point: Point3,
    wall: WallId,
    side: EdgeSide,
}

impl SnapToWall {
    /// `point` is the requested position. Its z is kept as the item's center
    /// height; x and y are fitted to the wall.
    #[must_use]
    pub fn new(item: ItemId, point: Point3, wall: WallId, side: EdgeSide) -> Self {
        Self {
            item,
            point,
            wall,
            side,
        }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the wall has no edge on the
    /// requested side, or `TopologyError::EntityNotFound` for an unknown item
    /// or wall. The plan is unchanged on error.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<Attached> {
        plan.transact(|plan| place(plan, self.item, &self.point, self.wall, self.side))
    }
}

/// Moves an existing item to the wall nearest a dragged-to point.
#[derive(Debug, Clone)]
pub struct DragOpening {
    item: ItemId,
    x: f64,
    y: f64,
}

impl DragOpening {
    #[must_use]
    pub fn new(item: ItemId, x: f64, y: f64) -> Self {
        Self { item, x, y }
    }

    /// Executes the command.
    ///
    /// The item's center stays `half_width + drag_margin_padding` away from
    /// both wall ends.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TooFar` if every wall is beyond the snap
    /// threshold; the item keeps its previous placement.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Attached> {
        let p: Point2 = finite_point(self.x, self.y, "drag position")?;
        let item = plan.item(self.item)?;
        let z = item.position().z;
        let margin = item.half_width() + config.drag_margin_padding;

        let hit = FindClosestWall::new(p, margin)
            .execute(plan)
            .ok_or(OperationError::NoWallFound)?;
        if hit.distance > config.opening_snap_threshold {
            return Err(OperationError::TooFar {
                distance: hit.distance,
                threshold: config.opening_snap_threshold,
            }
            .into());
        }

        let foot = Point3::new(hit.position.x, hit.position.y, z);
        let placed = SnapToWall::new(self.item, foot, hit.wall, hit.side).execute(plan)?;
        tracing::debug!(offset = placed.offset, side = ?placed.side, "opening dragged");
        Ok(placed)
    }
}
