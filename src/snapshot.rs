//! Persisted form of a floor plan.
//!
//! A snapshot holds only the source data: corners, walls by corner index,
//! and items by wall index. Miters, edges, fills and item positions are
//! re-derived on load.

use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3};
use crate::operations::junction::rebuild_all;
use crate::operations::opening::refit_items;
use crate::topology::{Corner, CornerId, EdgeSide, FloorPlan, InWallItem, OpeningKind, Wall, WallId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerRecord {
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    /// Index into [`PlanSnapshot::corners`].
    pub start: usize,
    pub end: usize,
    pub thickness: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub kind: OpeningKind,
    /// Index into [`PlanSnapshot::walls`].
    pub wall: usize,
    pub offset: f64,
    pub side: EdgeSide,
    pub width: f64,
    pub height: f64,
    /// Height of the item's center above the floor.
    pub elevation: f64,
}

/// Serializable source data of a [`FloorPlan`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub corners: Vec<CornerRecord>,
    pub walls: Vec<WallRecord>,
    pub items: Vec<ItemRecord>,
}

fn bad_index(what: &str, index: usize) -> crate::error::FloorplanError {
    OperationError::InvalidInput(format!("{what} index {index} out of range")).into()
}

impl FloorPlan {
    /// Captures corners, walls and items in arena order.
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        let mut corner_index: SecondaryMap<CornerId, usize> = SecondaryMap::new();
        let corners = self
            .corners()
            .enumerate()
            .map(|(i, (id, c))| {
                corner_index.insert(id, i);
                CornerRecord {
                    x: c.position.x,
                    y: c.position.y,
                    elevation: c.elevation,
                }
            })
            .collect();

        let mut wall_index: SecondaryMap<WallId, usize> = SecondaryMap::new();
        let mut walls = Vec::with_capacity(self.wall_count());
        for (id, w) in self.walls() {
            let (Some(&start), Some(&end)) = (corner_index.get(w.start), corner_index.get(w.end)) else {
                continue;
            };
            wall_index.insert(id, walls.len());
            walls.push(WallRecord {
                start,
                end,
                thickness: w.thickness,
                height: w.height,
            });
        }

        let items = self
            .items()
            .filter_map(|(_, item)| {
                Some(ItemRecord {
                    kind: item.kind,
                    wall: *wall_index.get(item.wall)?,
                    offset: item.offset,
                    side: item.side,
                    width: item.half_size.x * 2.0,
                    height: item.half_size.z * 2.0,
                    elevation: item.position.z,
                })
            })
            .collect();

        PlanSnapshot { corners, walls, items }
    }

    /// Rebuilds a plan from a snapshot and re-derives all geometry.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an out-of-range index or a
    /// non-finite value, and any error from re-deriving wall edges.
    pub fn from_snapshot(snapshot: &PlanSnapshot, config: &PlanConfig) -> Result<Self> {
        let mut plan = Self::new();

        let mut corner_ids = Vec::with_capacity(snapshot.corners.len());
        for c in &snapshot.corners {
            if !(c.x.is_finite() && c.y.is_finite() && c.elevation.is_finite()) {
                return Err(OperationError::InvalidInput("non-finite corner".into()).into());
            }
            corner_ids.push(plan.insert_corner(Corner::new(Point2::new(c.x, c.y), c.elevation)));
        }

        let mut wall_ids = Vec::with_capacity(snapshot.walls.len());
        for w in &snapshot.walls {
            let start = *corner_ids.get(w.start).ok_or_else(|| bad_index("corner", w.start))?;
            let end = *corner_ids.get(w.end).ok_or_else(|| bad_index("corner", w.end))?;
            if !(w.thickness.is_finite() && w.thickness > 0.0 && w.height.is_finite()) {
                return Err(OperationError::InvalidInput("wall thickness must be finite and > 0".into()).into());
            }
            wall_ids.push(plan.insert_wall(Wall::new(start, end, w.thickness, w.height)));
        }

        rebuild_all(&mut plan, config)?;

        for it in &snapshot.items {
            let wall = *wall_ids.get(it.wall).ok_or_else(|| bad_index("wall", it.wall))?;
            if ![it.offset, it.width, it.height, it.elevation].iter().all(|v| v.is_finite()) {
                return Err(OperationError::InvalidInput("non-finite item".into()).into());
            }
            let thickness = plan.wall(wall)?.thickness();
            plan.insert_item(InWallItem {
                kind: it.kind,
                wall,
                offset: it.offset,
                half_size: Vector3::new(it.width, thickness, it.height) * 0.5,
                side: it.side,
                position: Point3::new(0.0, 0.0, it.elevation),
                rotation: 0.0,
            })?;
        }
        refit_items(&mut plan, &wall_ids)?;

        tracing::debug!(
            corners = plan.corner_count(),
            walls = plan.wall_count(),
            items = plan.item_count(),
            "plan loaded from snapshot"
        );
        Ok(plan)
    }
}
