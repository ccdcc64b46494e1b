//! Plan fixtures shared by the unit tests.

#![allow(clippy::unwrap_used)]

use tracing_subscriber::EnvFilter;

use crate::config::PlanConfig;
use crate::operations::edit::{NewCorner, NewWall, NewWallsForIntersections};
use crate::operations::opening::{AddOpeningAtPosition, OpeningParams};
use crate::topology::{FloorPlan, ItemId, OpeningKind, WallId};

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a plan through the public edit commands.
pub(crate) struct PlanBuilder {
    plan: FloorPlan,
    config: PlanConfig,
}

impl PlanBuilder {
    pub(crate) fn new(config: &PlanConfig) -> Self {
        init_tracing();
        Self {
            plan: FloorPlan::new(),
            config: config.clone(),
        }
    }

    /// Draws a wall and splits it against existing walls. Returns the piece
    /// that starts at `a`.
    pub(crate) fn wall(&mut self, a: (f64, f64), b: (f64, f64)) -> WallId {
        let start = NewCorner::new(a.0, a.1).execute(&mut self.plan, &self.config).unwrap();
        let end = NewCorner::new(b.0, b.1).execute(&mut self.plan, &self.config).unwrap();
        NewWall::new(start, end).execute(&mut self.plan, &self.config).unwrap();
        let pieces = NewWallsForIntersections::new(start, end)
            .execute(&mut self.plan, &self.config)
            .unwrap();
        pieces[0]
    }

    /// Adds a 90 cm wide door centered `offset` along `wall`.
    pub(crate) fn door(&mut self, wall: WallId, offset: f64) -> ItemId {
        self.door_sized(wall, offset, 90.0)
    }

    pub(crate) fn door_sized(&mut self, wall: WallId, offset: f64, width: f64) -> ItemId {
        let (a, b) = self.plan.wall_points(wall).unwrap();
        let p = a + (b - a).normalize() * offset;
        let placed = AddOpeningAtPosition::new(p.x, p.y, OpeningKind::Door, OpeningParams::door(width, 210.0))
            .execute(&mut self.plan, &self.config)
            .unwrap();
        assert_eq!(placed.wall, wall);
        placed.item
    }

    pub(crate) fn finish(self) -> FloorPlan {
        self.plan
    }
}

/// A plan with one wall per segment, drawn in order.
pub(crate) fn plan_with_walls(
    config: &PlanConfig,
    segments: &[((f64, f64), (f64, f64))],
) -> (FloorPlan, Vec<WallId>) {
    let mut builder = PlanBuilder::new(config);
    let walls = segments.iter().map(|&(a, b)| builder.wall(a, b)).collect();
    (builder.finish(), walls)
}
