use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};

use super::wall::{EdgeSide, WallId};

slotmap::new_key_type! {
    /// Unique identifier for an in-wall item in the floor plan.
    pub struct ItemId;
}

/// The kind of opening cut into a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window attached to exactly one wall.
///
/// `position` sits on the face plane of `side`, at the along-wall `offset`
/// measured from the wall's start corner. `half_size.x` runs along the wall,
/// `half_size.y` through it, `half_size.z` vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct InWallItem {
    pub(crate) kind: OpeningKind,
    pub(crate) wall: WallId,
    pub(crate) offset: f64,
    pub(crate) half_size: Vector3,
    pub(crate) side: EdgeSide,
    pub(crate) position: Point3,
    /// Rotation about the vertical axis, in radians.
    pub(crate) rotation: f64,
}

impl InWallItem {
    #[must_use]
    pub fn kind(&self) -> OpeningKind {
        self.kind
    }

    /// The wall that currently owns this item.
    #[must_use]
    pub fn wall(&self) -> WallId {
        self.wall
    }

    /// Along-wall distance of the item center from the wall's start corner.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn half_size(&self) -> Vector3 {
        self.half_size
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_size.x
    }

    #[must_use]
    pub fn side(&self) -> EdgeSide {
        self.side
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}
