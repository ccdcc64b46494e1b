//! Click-by-click wall drawing.

use crate::config::PlanConfig;
use crate::error::{OperationError, Result, TopologyError};
use crate::math::Point2;
use crate::operations::edit::{finite_point, MergeWithIntersected, NewCorner, NewWall, NewWallsForIntersections};
use crate::topology::{CornerId, FloorPlan, WallId};
use crate::transform::snap_to_grid;

/// Outcome of one drawing click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawStep {
    /// The first corner of a chain was placed.
    Started { corner: CornerId },
    /// A wall was added and the chain continues from `corner`.
    Extended { walls: Vec<WallId>, corner: CornerId },
    /// The click landed on existing topology and ended the chain.
    Closed { walls: Vec<WallId>, corner: CornerId },
}

/// Draw-mode state: the corner the next wall will start from.
///
/// Each click is committed to the plan on its own, so cancelling keeps
/// everything drawn so far.
#[derive(Debug, Clone, Default)]
pub struct DrawSession {
    last: Option<CornerId>,
}

impl DrawSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a chain is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    #[must_use]
    pub fn last_corner(&self) -> Option<CornerId> {
        self.last
    }

    fn snapped(point: &Point2, config: &PlanConfig) -> Point2 {
        config
            .grid_spacing
            .map_or(*point, |spacing| snap_to_grid(point, spacing))
    }

    /// Places the next corner of the chain at `point`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when the click repeats the
    /// previous corner, or any error from the edit commands. The plan and the
    /// session are unchanged on error.
    pub fn click(&mut self, point: Point2, plan: &mut FloorPlan, config: &PlanConfig) -> Result<DrawStep> {
        let p = Self::snapped(&finite_point(point.x, point.y, "draw position")?, config);

        let Some(prev) = self.last else {
            let corner = plan.transact(|plan| {
                let corner = NewCorner::new(p.x, p.y).execute(plan, config)?;
                MergeWithIntersected::new(corner).execute(plan, config)?;
                surviving_corner(plan, corner, &p, config)
            })?;
            tracing::debug!(x = p.x, y = p.y, "chain started");
            self.last = Some(corner);
            return Ok(DrawStep::Started { corner });
        };

        let existing = plan.corner_near(&p, config.corner_snap_tolerance, None).is_some();
        let (walls, corner, closed) = plan.transact(|plan| {
            let corner = NewCorner::new(p.x, p.y).execute(plan, config)?;
            if corner == prev {
                return Err(OperationError::InvalidInput("click repeats the previous corner".into()).into());
            }
            NewWall::new(prev, corner).execute(plan, config)?;
            let pieces = NewWallsForIntersections::new(prev, corner).execute(plan, config)?;
            let merged = MergeWithIntersected::new(corner).execute(plan, config)?;
            let corner = surviving_corner(plan, corner, &p, config)?;
            let walls = pieces.into_iter().filter(|&w| plan.wall(w).is_ok()).collect();
            // Landing inside an existing wall splits it, leaving the corner shared.
            let closed = existing || merged || plan.walls_at_corner(corner).len() > 1;
            Ok((walls, corner, closed))
        })?;

        if closed {
            tracing::debug!(x = p.x, y = p.y, "chain closed");
            self.last = None;
            Ok(DrawStep::Closed { walls, corner })
        } else {
            self.last = Some(corner);
            Ok(DrawStep::Extended { walls, corner })
        }
    }

    /// The segment the next click at `point` would draw. Never mutates.
    #[must_use]
    pub fn preview(&self, point: &Point2, plan: &FloorPlan, config: &PlanConfig) -> Option<(Point2, Point2)> {
        let from = plan.corner(self.last?).ok()?.position();
        let p = Self::snapped(point, config);
        let to = plan
            .corner_near(&p, config.corner_snap_tolerance, None)
            .and_then(|c| plan.corner(c).ok())
            .map_or(p, |c| c.position());
        Some((from, to))
    }

    /// Ends the chain. Walls committed so far stay in the plan.
    pub fn cancel(&mut self) {
        self.last = None;
    }
}

/// `corner`, or the corner it was merged into.
fn surviving_corner(plan: &FloorPlan, corner: CornerId, p: &Point2, config: &PlanConfig) -> Result<CornerId> {
    if plan.corner(corner).is_ok() {
        return Ok(corner);
    }
    plan.corner_near(p, config.corner_snap_tolerance, None)
        .ok_or_else(|| TopologyError::EntityNotFound("merged corner").into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{init_tracing, PlanBuilder};

    fn click(session: &mut DrawSession, plan: &mut FloorPlan, config: &PlanConfig, x: f64, y: f64) -> DrawStep {
        session.click(Point2::new(x, y), plan, config).unwrap()
    }

    #[test]
    fn chain_closes_on_first_corner() {
        init_tracing();
        let config = PlanConfig::default();
        let mut plan = FloorPlan::new();
        let mut session = DrawSession::new();

        let first = match click(&mut session, &mut plan, &config, 0.0, 0.0) {
            DrawStep::Started { corner } => corner,
            other => panic!("unexpected step {other:?}"),
        };
        assert!(matches!(click(&mut session, &mut plan, &config, 400.0, 0.0), DrawStep::Extended { .. }));
        assert!(matches!(click(&mut session, &mut plan, &config, 400.0, 300.0), DrawStep::Extended { .. }));
        match click(&mut session, &mut plan, &config, 5.0, 3.0) {
            DrawStep::Closed { corner, walls } => {
                assert_eq!(corner, first);
                assert_eq!(walls.len(), 1);
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert!(!session.is_active());
        assert_eq!(plan.wall_count(), 3);
        assert_eq!(plan.corner_count(), 3);
        assert!(plan.walls().all(|(_, w)| w.has_edges()));
    }

    #[test]
    fn click_on_wall_splits_and_closes() {
        let config = PlanConfig::default();
        let mut b = PlanBuilder::new(&config);
        b.wall((0.0, 0.0), (400.0, 0.0));
        let mut plan = b.finish();
        let mut session = DrawSession::new();

        click(&mut session, &mut plan, &config, 200.0, 200.0);
        let step = click(&mut session, &mut plan, &config, 200.0, 0.0);
        assert!(matches!(step, DrawStep::Closed { .. }));
        assert_eq!(plan.wall_count(), 3);
        assert_eq!(plan.fill_polygons().count(), 1);
    }

    #[test]
    fn crossing_wall_splits_without_closing() {
        let config = PlanConfig::default();
        let mut b = PlanBuilder::new(&config);
        b.wall((0.0, 100.0), (400.0, 100.0));
        let mut plan = b.finish();
        let mut session = DrawSession::new();

        click(&mut session, &mut plan, &config, 200.0, 0.0);
        match click(&mut session, &mut plan, &config, 200.0, 300.0) {
            DrawStep::Extended { walls, .. } => assert_eq!(walls.len(), 2),
            other => panic!("unexpected step {other:?}"),
        }
        assert!(session.is_active());
        assert_eq!(plan.wall_count(), 4);
    }

    #[test]
    fn drawing_along_a_wall_reuses_it() {
        let config = PlanConfig::default();
        let mut b = PlanBuilder::new(&config);
        b.wall((0.0, 0.0), (400.0, 0.0));
        let mut plan = b.finish();
        let mut session = DrawSession::new();

        click(&mut session, &mut plan, &config, 200.0, 0.0);
        let step = click(&mut session, &mut plan, &config, 600.0, 0.0);
        assert!(matches!(step, DrawStep::Extended { ref walls, .. } if walls.len() == 2));

        let mut spans: Vec<(f64, f64)> = plan
            .walls()
            .map(|(id, _)| {
                let (a, b) = plan.wall_points(id).unwrap();
                (a.x.min(b.x), a.x.max(b.x))
            })
            .collect();
        spans.sort_by(|x, y| x.0.total_cmp(&y.0));
        assert_eq!(spans, vec![(0.0, 200.0), (200.0, 400.0), (400.0, 600.0)]);
    }

    #[test]
    fn cancel_keeps_committed_walls() {
        let config = PlanConfig::default();
        let mut plan = FloorPlan::new();
        let mut session = DrawSession::new();
        click(&mut session, &mut plan, &config, 0.0, 0.0);
        click(&mut session, &mut plan, &config, 300.0, 0.0);
        session.cancel();

        assert!(!session.is_active());
        assert!(session.preview(&Point2::new(300.0, 300.0), &plan, &config).is_none());
        assert_eq!(plan.wall_count(), 1);
        assert!(matches!(click(&mut session, &mut plan, &config, 0.0, 500.0), DrawStep::Started { .. }));
        assert_eq!(plan.wall_count(), 1);
    }

    #[test]
    fn preview_does_not_mutate() {
        let config = PlanConfig::default();
        let mut plan = FloorPlan::new();
        let mut session = DrawSession::new();
        click(&mut session, &mut plan, &config, 0.0, 0.0);

        let (from, to) = session.preview(&Point2::new(250.0, 40.0), &plan, &config).unwrap();
        assert_eq!(from, Point2::new(0.0, 0.0));
        assert_eq!(to, Point2::new(250.0, 40.0));
        assert_eq!(plan.corner_count(), 1);
        assert_eq!(plan.wall_count(), 0);
    }

    #[test]
    fn grid_snaps_clicks() {
        let config = PlanConfig {
            grid_spacing: Some(10.0),
            ..PlanConfig::default()
        };
        let mut plan = FloorPlan::new();
        let mut session = DrawSession::new();
        let DrawStep::Started { corner } = click(&mut session, &mut plan, &config, 13.0, 27.0) else {
            panic!("expected a start");
        };
        assert_eq!(plan.corner(corner).unwrap().position(), Point2::new(10.0, 30.0));
    }

    #[test]
    fn repeated_click_is_rejected() {
        let config = PlanConfig::default();
        let mut plan = FloorPlan::new();
        let mut session = DrawSession::new();
        let DrawStep::Started { corner } = click(&mut session, &mut plan, &config, 0.0, 0.0) else {
            panic!("expected a start");
        };
        assert!(session.click(Point2::new(4.0, 0.0), &mut plan, &config).is_err());
        assert_eq!(session.last_corner(), Some(corner));
        assert_eq!(plan.corner_count(), 1);
    }
}
