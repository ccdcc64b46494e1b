//! Commands that mutate the corner/wall graph.
//!
//! Every command validates its input, applies the change, and recomputes the
//! junctions and item placements it affects before returning. A failing
//! command leaves the plan exactly as it found it.

mod intersections;
mod merge;
mod modify;
mod new_corner;
mod new_wall;
mod remove;

pub use intersections::NewWallsForIntersections;
pub use merge::MergeWithIntersected;
pub use modify::{MoveCorner, SetCornerElevation, SetWallHeight, SetWallThickness};
pub use new_corner::NewCorner;
pub use new_wall::NewWall;
pub use remove::{RemoveCorner, RemoveWall, Removed};

use crate::config::PlanConfig;
use crate::error::{GeometryError, Result, TopologyError};
use crate::math::{is_finite_2d, Point2, TOLERANCE};
use crate::operations::junction::{refresh_at, Recompute};
use crate::operations::opening::refit_items;
use crate::topology::{CornerId, FloorPlan, Wall, WallId};

/// Recomputes junctions at `points`, then re-fits items on every touched wall.
pub(crate) fn commit(plan: &mut FloorPlan, points: &[Point2], config: &PlanConfig) -> Result<Recompute> {
    let recompute = refresh_at(plan, points, config)?;
    refit_items(plan, &recompute.walls)?;
    Ok(recompute)
}

/// Checks a coordinate pair before it reaches the graph.
pub(crate) fn finite_point(x: f64, y: f64, what: &'static str) -> Result<Point2> {
    if is_finite_2d(x, y) {
        Ok(Point2::new(x, y))
    } else {
        Err(GeometryError::NonFinite(what).into())
    }
}

/// Shortest centerline a wall may have.
pub(crate) fn min_wall_length(config: &PlanConfig) -> f64 {
    config.junction_tolerance.max(TOLERANCE)
}

/// Endpoint positions of every wall at `corner`, plus the corner itself.
pub(crate) fn neighborhood(plan: &FloorPlan, corner: CornerId) -> Result<Vec<Point2>> {
    let mut points = vec![plan.corner(corner)?.position()];
    for id in plan.walls_at_corner(corner) {
        let (a, b) = plan.wall_points(id)?;
        points.push(a);
        points.push(b);
    }
    Ok(points)
}

/// Splits `wall` at `corner`, which must lie strictly inside it.
///
/// The original wall keeps its id and start corner and now ends at
/// `corner`; the returned wall runs from `corner` to the old end. Items past
/// the split move to the new wall with their offsets rebased. Derived
/// geometry is left for the caller to recompute.
pub(crate) fn split_wall(
    plan: &mut FloorPlan,
    wall: WallId,
    corner: CornerId,
    config: &PlanConfig,
) -> Result<WallId> {
    let original = plan.wall(wall)?.clone();
    if original.touches(corner) {
        return Err(TopologyError::DegenerateWall("cannot split a wall at its own corner".into()).into());
    }
    let (a, b) = plan.wall_points(wall)?;
    let c = plan.corner(corner)?.position();
    let d = b - a;
    let len = d.norm();
    let split = (c - a).dot(&d) / len;
    let min = min_wall_length(config);
    if !split.is_finite() || split < min || split > len - min {
        return Err(TopologyError::DegenerateWall(format!(
            "split point ({:.2}, {:.2}) is not inside the wall",
            c.x, c.y
        ))
        .into());
    }

    {
        let w = plan.wall_mut(wall)?;
        w.end = corner;
        w.clear_geometry();
    }
    let tail = plan.insert_wall(Wall::new(corner, original.end, original.thickness, original.height));

    for item in original.items {
        let offset = plan.item(item)?.offset();
        if offset > split {
            plan.item_mut(item)?.offset = offset - split;
            plan.attach_item(item, tail)?;
        }
    }

    tracing::debug!(split, "wall split");
    Ok(tail)
}

/// Folds `wall` into another wall joining the same two corners, if any.
///
/// Items move to the survivor with offsets and sides mirrored when the two
/// walls run in opposite directions. Returns the survivor.
pub(crate) fn fold_duplicate(plan: &mut FloorPlan, wall: WallId) -> Result<Option<WallId>> {
    let (start, end) = {
        let w = plan.wall(wall)?;
        (w.start(), w.end())
    };
    let survivor = plan
        .walls()
        .find(|(other, w)| {
            *other != wall && ((w.start == start && w.end == end) || (w.start == end && w.end == start))
        })
        .map(|(other, w)| (other, w.start == start));
    let Some((survivor, same_direction)) = survivor else {
        return Ok(None);
    };

    let len = plan.wall_length(survivor)?;
    for item in plan.wall(wall)?.items().to_vec() {
        if !same_direction {
            let it = plan.item_mut(item)?;
            it.offset = len - it.offset;
            it.side = it.side.opposite();
        }
        plan.attach_item(item, survivor)?;
    }
    plan.remove_wall(wall)?;
    tracing::debug!("duplicate wall folded");
    Ok(Some(survivor))
}
