use serde::{Deserialize, Serialize};

use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::corner::CornerId;
use super::item::ItemId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the floor plan.
    pub struct WallId;
}

/// Which face of a wall.
///
/// The front face lies on the left of the wall's start-to-end direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSide {
    Front,
    Back,
}

impl EdgeSide {
    /// The opposite face.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Which endpoint of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    Start,
    End,
}

/// Mitered offset corners of one wall at one junction.
///
/// `left` and `right` are taken looking from the junction along the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Miter {
    pub left: Point2,
    pub right: Point2,
}

/// One side face of a wall, between its two mitered endpoints.
///
/// The front edge runs from the wall start to the wall end; the back edge
/// runs the other way. Either way the wall body lies to the edge's right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallEdge {
    pub side: EdgeSide,
    pub start: Point2,
    pub end: Point2,
    /// Unit normal pointing away from the centerline.
    pub normal: Vector2,
}

impl WallEdge {
    /// Midpoint of the mitered edge.
    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }
}

/// A topology edge between two corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub(crate) start: CornerId,
    pub(crate) end: CornerId,
    pub(crate) thickness: f64,
    pub(crate) height: f64,
    pub(crate) start_miter: Option<Miter>,
    pub(crate) end_miter: Option<Miter>,
    pub(crate) front_edge: Option<WallEdge>,
    pub(crate) back_edge: Option<WallEdge>,
    /// Attached items, ordered by along-wall offset.
    pub(crate) items: Vec<ItemId>,
}

impl Wall {
    pub(crate) fn new(start: CornerId, end: CornerId, thickness: f64, height: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height,
            start_miter: None,
            end_miter: None,
            front_edge: None,
            back_edge: None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn start(&self) -> CornerId {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> CornerId {
        self.end
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn front_edge(&self) -> Option<&WallEdge> {
        self.front_edge.as_ref()
    }

    #[must_use]
    pub fn back_edge(&self) -> Option<&WallEdge> {
        self.back_edge.as_ref()
    }

    /// The edge on `side`, if it has been resolved.
    #[must_use]
    pub fn edge(&self, side: EdgeSide) -> Option<&WallEdge> {
        match side {
            EdgeSide::Front => self.front_edge.as_ref(),
            EdgeSide::Back => self.back_edge.as_ref(),
        }
    }

    /// The junction miter at `end`, if it has been resolved.
    #[must_use]
    pub fn miter(&self, end: WallEnd) -> Option<&Miter> {
        match end {
            WallEnd::Start => self.start_miter.as_ref(),
            WallEnd::End => self.end_miter.as_ref(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Returns `true` if the wall connects `corner`.
    #[must_use]
    pub fn touches(&self, corner: CornerId) -> bool {
        self.start == corner || self.end == corner
    }

    /// The corner at the other end from `corner`.
    #[must_use]
    pub fn other_end(&self, corner: CornerId) -> Option<CornerId> {
        if self.start == corner {
            Some(self.end)
        } else if self.end == corner {
            Some(self.start)
        } else {
            None
        }
    }

    pub(crate) fn set_miter(&mut self, end: WallEnd, miter: Miter) {
        match end {
            WallEnd::Start => self.start_miter = Some(miter),
            WallEnd::End => self.end_miter = Some(miter),
        }
    }

    pub(crate) fn clear_miter(&mut self, end: WallEnd) {
        match end {
            WallEnd::Start => self.start_miter = None,
            WallEnd::End => self.end_miter = None,
        }
    }

    /// Drops all derived geometry so it is recomputed from scratch.
    pub(crate) fn clear_geometry(&mut self) {
        self.start_miter = None;
        self.end_miter = None;
        self.front_edge = None;
        self.back_edge = None;
    }

    /// Rebuilds both side edges from the end miters and centerline.
    ///
    /// Leaves an edge unset when a miter is missing or the centerline has
    /// zero length.
    pub(crate) fn rebuild_edges(&mut self, start: Point2, end: Point2) {
        let d = end - start;
        let len = d.norm();
        let (Some(at_start), Some(at_end)) = (self.start_miter, self.end_miter) else {
            self.front_edge = None;
            self.back_edge = None;
            return;
        };
        if len < TOLERANCE {
            self.front_edge = None;
            self.back_edge = None;
            return;
        }
        let n = left_normal(&(d / len));

        // At the start the outgoing direction matches the wall, so its left is
        // the front. At the end the outgoing direction is reversed.
        self.front_edge = Some(WallEdge {
            side: EdgeSide::Front,
            start: at_start.left,
            end: at_end.right,
            normal: n,
        });
        self.back_edge = Some(WallEdge {
            side: EdgeSide::Back,
            start: at_end.left,
            end: at_start.right,
            normal: -n,
        });
    }

    /// Returns `true` once both side edges are resolved.
    #[must_use]
    pub fn has_edges(&self) -> bool {
        self.front_edge.is_some() && self.back_edge.is_some()
    }
}
