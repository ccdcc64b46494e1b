//! Door and window placement on walls.
//!
//! Items live on one face of their host wall. Every placement goes through
//! [`SnapToWall`], which clamps the item inside the wall, orients it to the
//! face normal and moves it between wall item lists in one step.

mod add;
mod snap;

pub use add::{AddOpeningAtPosition, RemoveOpening};
pub use snap::{DragOpening, SnapToWall};

use serde::{Deserialize, Serialize};

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{EdgeSide, FloorPlan, ItemId, OpeningKind, WallId};

/// Outer dimensions of an opening, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningParams {
    pub width: f64,
    pub height: f64,
    /// Height of the bottom edge above the floor. Ignored for doors.
    #[serde(default)]
    pub sill_height: f64,
}

impl OpeningParams {
    #[must_use]
    pub fn door(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sill_height: 0.0,
        }
    }

    #[must_use]
    pub fn window(width: f64, height: f64, sill_height: f64) -> Self {
        Self {
            width,
            height,
            sill_height,
        }
    }

    /// Height of the opening's center above the floor.
    #[must_use]
    pub fn center_height(&self, kind: OpeningKind) -> f64 {
        match kind {
            OpeningKind::Door => self.height * 0.5,
            OpeningKind::Window => self.sill_height + self.height * 0.5,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "opening {name} must be finite and > 0, got {value}"
                ))
                .into());
            }
        }
        if !self.sill_height.is_finite() || self.sill_height < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "sill height must be finite and >= 0, got {}",
                self.sill_height
            ))
            .into());
        }
        Ok(())
    }
}

/// Where an item ended up after a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attached {
    pub item: ItemId,
    pub wall: WallId,
    pub side: EdgeSide,
    pub offset: f64,
    pub position: Point3,
    pub rotation: f64,
}

/// Re-fits every item on `walls` to the wall's current length and faces.
///
/// Offsets are clamped back inside the wall and positions re-projected onto
/// the item's face. An item whose face is missing moves to the other face.
pub(crate) fn refit_items(plan: &mut FloorPlan, walls: &[WallId]) -> Result<()> {
    for &wall in walls {
        let Ok(host) = plan.wall(wall) else {
            continue;
        };
        let items = host.items().to_vec();
        if items.is_empty() {
            continue;
        }
        let (a, b) = plan.wall_points(wall)?;
        let dir = (b - a).normalize();
        for id in items {
            let item = plan.item(id)?;
            let host = plan.wall(wall)?;
            let side = if host.edge(item.side()).is_some() {
                item.side()
            } else {
                item.side().opposite()
            };
            let foot = a + dir * item.offset();
            let point = Point3::new(foot.x, foot.y, item.position().z);
            snap::place(plan, id, &point, wall, side)?;
        }
    }
    Ok(())
}
