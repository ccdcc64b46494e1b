pub mod corner;
pub mod item;
pub mod wall;

pub use corner::{Corner, CornerId};
pub use item::{InWallItem, ItemId, OpeningKind};
pub use wall::{EdgeSide, Miter, Wall, WallEdge, WallEnd, WallId};

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::error::{Result, TopologyError};
use crate::math::Point2;

/// A plan position quantized to the junction tolerance.
///
/// Wall endpoints whose corners hash to the same key meet at one junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionKey {
    x: i64,
    y: i64,
}

impl JunctionKey {
    /// Quantizes `p` to a grid of `tolerance` centimeters.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(p: &Point2, tolerance: f64) -> Self {
        Self {
            x: (p.x / tolerance).round() as i64,
            y: (p.y / tolerance).round() as i64,
        }
    }
}

/// Central arena that owns all corners, walls, and in-wall items.
///
/// Entities reference each other via typed IDs (generational indices).
/// Derived geometry (wall edges and junction fill polygons) is stored
/// alongside and kept current by the edit commands in
/// [`crate::operations::edit`].
#[derive(Debug, Clone, Default)]
pub struct FloorPlan {
    corners: SlotMap<CornerId, Corner>,
    walls: SlotMap<WallId, Wall>,
    items: SlotMap<ItemId, InWallItem>,
    fills: BTreeMap<JunctionKey, Vec<Point2>>,
}

impl FloorPlan {
    /// Creates a new, empty floor plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` as one atomic edit.
    ///
    /// If `f` fails the plan is restored to the state it had before the call.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub fn transact<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let backup = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::debug!(error = %err, "edit rolled back");
                *self = backup;
                Err(err)
            }
        }
    }

    // --- Corner operations ---

    /// Returns the corner, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn corner(&self, id: CornerId) -> Result<&Corner> {
        self.corners
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("corner").into())
    }

    /// Iterates all corners in arena order.
    pub fn corners(&self) -> impl Iterator<Item = (CornerId, &Corner)> {
        self.corners.iter()
    }

    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Returns the nearest corner within `tolerance` of `p`, skipping `exclude`.
    #[must_use]
    pub fn corner_near(&self, p: &Point2, tolerance: f64, exclude: Option<CornerId>) -> Option<CornerId> {
        let mut best: Option<(CornerId, f64)> = None;
        for (id, corner) in &self.corners {
            if Some(id) == exclude {
                continue;
            }
            let d = (corner.position - p).norm();
            if d <= tolerance && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    pub(crate) fn insert_corner(&mut self, corner: Corner) -> CornerId {
        self.corners.insert(corner)
    }

    pub(crate) fn corner_mut(&mut self, id: CornerId) -> Result<&mut Corner> {
        self.corners
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("corner").into())
    }

    /// Removes a corner that no wall references any longer.
    pub(crate) fn remove_orphan_corner(&mut self, id: CornerId) -> Result<Corner> {
        if self.walls.values().any(|w| w.touches(id)) {
            return Err(TopologyError::DegenerateWall(
                "cannot drop a corner that walls still reference".into(),
            )
            .into());
        }
        self.corners
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("corner").into())
    }

    // --- Wall operations ---

    /// Returns the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn wall(&self, id: WallId) -> Result<&Wall> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall").into())
    }

    /// Iterates all walls in arena order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter()
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Start and end positions of a wall's centerline.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is missing.
    pub fn wall_points(&self, id: WallId) -> Result<(Point2, Point2)> {
        let wall = self.wall(id)?;
        Ok((
            self.corner(wall.start)?.position,
            self.corner(wall.end)?.position,
        ))
    }

    /// Centerline length of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is missing.
    pub fn wall_length(&self, id: WallId) -> Result<f64> {
        let (a, b) = self.wall_points(id)?;
        Ok((b - a).norm())
    }

    /// All walls that start or end at `corner`, in arena order.
    #[must_use]
    pub fn walls_at_corner(&self, corner: CornerId) -> Vec<WallId> {
        self.walls
            .iter()
            .filter(|(_, w)| w.touches(corner))
            .map(|(id, _)| id)
            .collect()
    }

    /// The first wall connecting `a` and `b` in either direction.
    #[must_use]
    pub fn wall_between(&self, a: CornerId, b: CornerId) -> Option<WallId> {
        self.walls
            .iter()
            .find(|(_, w)| (w.start == a && w.end == b) || (w.start == b && w.end == a))
            .map(|(id, _)| id)
    }

    pub(crate) fn insert_wall(&mut self, wall: Wall) -> WallId {
        self.walls.insert(wall)
    }

    pub(crate) fn wall_mut(&mut self, id: WallId) -> Result<&mut Wall> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall").into())
    }

    /// Removes a wall together with every item it owns.
    pub(crate) fn remove_wall(&mut self, id: WallId) -> Result<(Wall, Vec<ItemId>)> {
        let wall = self
            .walls
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("wall"))?;
        for item in &wall.items {
            self.items.remove(*item);
        }
        let items = wall.items.clone();
        Ok((wall, items))
    }

    // --- Item operations ---

    /// Returns the item, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn item(&self, id: ItemId) -> Result<&InWallItem> {
        self.items
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("item").into())
    }

    /// Iterates all items in arena order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &InWallItem)> {
        self.items.iter()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Inserts an item and registers it with the wall it names.
    pub(crate) fn insert_item(&mut self, item: InWallItem) -> Result<ItemId> {
        let wall = item.wall;
        if !self.walls.contains_key(wall) {
            return Err(TopologyError::EntityNotFound("wall").into());
        }
        let id = self.items.insert(item);
        self.attach_item(id, wall)?;
        Ok(id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Result<&mut InWallItem> {
        self.items
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("item").into())
    }

    /// Makes `wall` the sole owner of `item`.
    ///
    /// The item leaves its previous wall's list and joins the new one in a
    /// single step; the new list is re-sorted by offset.
    pub(crate) fn attach_item(&mut self, item: ItemId, wall: WallId) -> Result<()> {
        if !self.walls.contains_key(wall) {
            return Err(TopologyError::EntityNotFound("wall").into());
        }
        let previous = self.item(item)?.wall;
        if previous != wall {
            if let Some(prev) = self.walls.get_mut(previous) {
                prev.items.retain(|&i| i != item);
            }
        }
        self.item_mut(item)?.wall = wall;

        let items = &self.items;
        let host = self
            .walls
            .get_mut(wall)
            .ok_or(TopologyError::EntityNotFound("wall"))?;
        if !host.items.contains(&item) {
            host.items.push(item);
        }
        host.items.sort_by(|a, b| {
            let oa = items.get(*a).map_or(0.0, |i| i.offset);
            let ob = items.get(*b).map_or(0.0, |i| i.offset);
            oa.total_cmp(&ob)
        });
        Ok(())
    }

    /// Detaches and deletes an item.
    pub(crate) fn remove_item(&mut self, id: ItemId) -> Result<InWallItem> {
        let item = self
            .items
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("item"))?;
        if let Some(wall) = self.walls.get_mut(item.wall) {
            wall.items.retain(|&i| i != id);
        }
        Ok(item)
    }

    // --- Junction fills ---

    /// Iterates the fill polygons of all 3+-way junctions, ordered by position key.
    pub fn fill_polygons(&self) -> impl Iterator<Item = &[Point2]> {
        self.fills.values().map(Vec::as_slice)
    }

    /// The fill polygon of the junction at `p`, if one exists.
    #[must_use]
    pub fn fill_at(&self, p: &Point2, tolerance: f64) -> Option<&[Point2]> {
        self.fills
            .get(&JunctionKey::new(p, tolerance))
            .map(Vec::as_slice)
    }

    pub(crate) fn set_fill(&mut self, key: JunctionKey, polygon: Option<Vec<Point2>>) {
        match polygon {
            Some(poly) => {
                self.fills.insert(key, poly);
            }
            None => {
                self.fills.remove(&key);
            }
        }
    }

    pub(crate) fn clear_fills(&mut self) {
        self.fills.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};

    fn two_corner_plan() -> (FloorPlan, CornerId, CornerId, WallId) {
        let mut plan = FloorPlan::new();
        let a = plan.insert_corner(Corner::new(Point2::new(0.0, 0.0), 250.0));
        let b = plan.insert_corner(Corner::new(Point2::new(300.0, 0.0), 250.0));
        let w = plan.insert_wall(Wall::new(a, b, 10.0, 250.0));
        (plan, a, b, w)
    }

    fn item_on(wall: WallId, offset: f64) -> InWallItem {
        InWallItem {
            kind: OpeningKind::Window,
            wall,
            offset,
            half_size: Vector3::new(40.0, 5.0, 60.0),
            side: EdgeSide::Front,
            position: Point3::new(offset, 5.0, 150.0),
            rotation: 0.0,
        }
    }

    #[test]
    fn junction_keys_merge_within_tolerance() {
        let a = JunctionKey::new(&Point2::new(100.0, 50.0), 1e-3);
        let b = JunctionKey::new(&Point2::new(100.000_2, 49.999_9), 1e-3);
        let c = JunctionKey::new(&Point2::new(100.01, 50.0), 1e-3);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn wall_lookup() {
        let (plan, a, b, w) = two_corner_plan();
        assert_eq!(plan.wall_between(b, a), Some(w));
        assert_eq!(plan.walls_at_corner(a), vec![w]);
        assert!((plan.wall_length(w).unwrap() - 300.0).abs() < 1e-12);
    }

    #[test]
    fn corner_near_picks_closest() {
        let (plan, a, b, _) = two_corner_plan();
        assert_eq!(plan.corner_near(&Point2::new(5.0, 5.0), 20.0, None), Some(a));
        assert_eq!(plan.corner_near(&Point2::new(5.0, 5.0), 20.0, Some(a)), None);
        assert_eq!(plan.corner_near(&Point2::new(290.0, 0.0), 20.0, None), Some(b));
    }

    #[test]
    fn items_sorted_by_offset() {
        let (mut plan, _, _, w) = two_corner_plan();
        let late = plan.insert_item(item_on(w, 200.0)).unwrap();
        let early = plan.insert_item(item_on(w, 80.0)).unwrap();
        assert_eq!(plan.wall(w).unwrap().items(), &[early, late]);
    }

    #[test]
    fn attach_moves_between_walls() {
        let (mut plan, a, _, w1) = two_corner_plan();
        let c = plan.insert_corner(Corner::new(Point2::new(0.0, 300.0), 250.0));
        let w2 = plan.insert_wall(Wall::new(a, c, 10.0, 250.0));
        let item = plan.insert_item(item_on(w1, 150.0)).unwrap();

        plan.attach_item(item, w2).unwrap();
        assert!(plan.wall(w1).unwrap().items().is_empty());
        assert_eq!(plan.wall(w2).unwrap().items(), &[item]);
        assert_eq!(plan.item(item).unwrap().wall(), w2);

        // Attaching again to the same wall must not duplicate it.
        plan.attach_item(item, w2).unwrap();
        assert_eq!(plan.wall(w2).unwrap().items().len(), 1);
    }

    #[test]
    fn removing_wall_drops_its_items() {
        let (mut plan, _, _, w) = two_corner_plan();
        let item = plan.insert_item(item_on(w, 150.0)).unwrap();
        let (_, removed) = plan.remove_wall(w).unwrap();
        assert_eq!(removed, vec![item]);
        assert!(plan.item(item).is_err());
    }

    #[test]
    fn transact_rolls_back_on_error() {
        let (mut plan, a, _, _) = two_corner_plan();
        let result: Result<()> = plan.transact(|p| {
            p.corner_mut(a)?.position = Point2::new(-50.0, -50.0);
            Err(TopologyError::DegenerateWall("forced".into()).into())
        });
        assert!(result.is_err());
        assert_eq!(plan.corner(a).unwrap().position(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn orphan_removal_refuses_referenced_corner() {
        let (mut plan, a, _, _) = two_corner_plan();
        assert!(plan.remove_orphan_corner(a).is_err());
    }
}
