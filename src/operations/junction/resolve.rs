use std::collections::BTreeSet;

use crate::config::PlanConfig;
use crate::error::{GeometryError, Result};
use crate::math::Point2;
use crate::topology::{FloorPlan, JunctionKey, WallEnd, WallId};

use super::{solve_junction, JunctionArm, JunctionSolution};

/// Derived geometry touched by an edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recompute {
    /// Walls whose miters and edges were recomputed, ordered by id.
    pub walls: Vec<WallId>,
    /// Meeting points of the recomputed junctions with two or more walls.
    pub junctions: Vec<Point2>,
}

/// A meeting point and the walls that end there.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub point: Point2,
    pub walls: Vec<WallId>,
}

fn lexicographic_min(a: Point2, b: Point2) -> Point2 {
    if b.x.total_cmp(&a.x).then(b.y.total_cmp(&a.y)).is_lt() {
        b
    } else {
        a
    }
}

/// Collects every wall end hashing to `key`.
///
/// The meeting point is the lexicographically smallest corner position among
/// the arms, so it does not depend on wall iteration order.
fn arms_at_key(
    plan: &FloorPlan,
    key: JunctionKey,
    tolerance: f64,
) -> Result<(Option<Point2>, Vec<JunctionArm>)> {
    let mut arms = Vec::new();
    let mut meeting: Option<Point2> = None;
    for (id, wall) in plan.walls() {
        let a = plan.corner(wall.start())?.position();
        let b = plan.corner(wall.end())?.position();
        let key_a = JunctionKey::new(&a, tolerance);
        let key_b = JunctionKey::new(&b, tolerance);
        if key_a == key && key_b == key {
            return Err(GeometryError::Degenerate(format!(
                "wall ends coincide at ({:.4}, {:.4})",
                a.x, a.y
            ))
            .into());
        }
        for (end, here, far, here_key) in [(WallEnd::Start, a, b, key_a), (WallEnd::End, b, a, key_b)] {
            if here_key != key {
                continue;
            }
            arms.push(JunctionArm {
                wall: id,
                end,
                far,
                thickness: wall.thickness(),
            });
            meeting = Some(meeting.map_or(here, |m| lexicographic_min(m, here)));
        }
    }
    Ok((meeting, arms))
}

/// Recomputes the junctions at `points` and the edges of every wall ending there.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if a touched wall ends up without both
/// side edges.
pub(crate) fn refresh_at(
    plan: &mut FloorPlan,
    points: &[Point2],
    config: &PlanConfig,
) -> Result<Recompute> {
    let tolerance = config.junction_tolerance;
    let keys: BTreeSet<JunctionKey> = points
        .iter()
        .map(|p| JunctionKey::new(p, tolerance))
        .collect();

    let mut touched: BTreeSet<WallId> = BTreeSet::new();
    let mut junctions = Vec::new();

    for key in keys {
        let (meeting, arms) = arms_at_key(plan, key, tolerance)?;
        let Some(meeting) = meeting else {
            plan.set_fill(key, None);
            continue;
        };

        let solution = solve_junction(&meeting, &arms);
        for arm in &arms {
            touched.insert(arm.wall);
            let wall = plan.wall_mut(arm.wall)?;
            match solution.miter_for(arm.wall, arm.end) {
                Some(miter) => wall.set_miter(arm.end, *miter),
                None => wall.clear_miter(arm.end),
            }
        }
        if arms.len() >= 2 {
            junctions.push(meeting);
        }
        plan.set_fill(key, solution.fill_polygon);
    }

    for &id in &touched {
        let (a, b) = plan.wall_points(id)?;
        let wall = plan.wall_mut(id)?;
        wall.rebuild_edges(a, b);
        if !wall.has_edges() {
            return Err(GeometryError::Degenerate(format!(
                "wall from ({:.2}, {:.2}) to ({:.2}, {:.2}) has unresolved edges",
                a.x, a.y, b.x, b.y
            ))
            .into());
        }
    }

    tracing::trace!(
        walls = touched.len(),
        junctions = junctions.len(),
        "junctions recomputed"
    );

    Ok(Recompute {
        walls: touched.into_iter().collect(),
        junctions,
    })
}

/// Discards all derived geometry and recomputes it from corners and walls alone.
pub(crate) fn rebuild_all(plan: &mut FloorPlan, config: &PlanConfig) -> Result<Recompute> {
    let ids: Vec<WallId> = plan.walls().map(|(id, _)| id).collect();
    let mut points = Vec::with_capacity(ids.len() * 2);
    for &id in &ids {
        plan.wall_mut(id)?.clear_geometry();
        let (a, b) = plan.wall_points(id)?;
        points.push(a);
        points.push(b);
    }
    plan.clear_fills();
    refresh_at(plan, &points, config)
}

/// Solves the junction at a point without modifying the plan.
#[derive(Debug, Clone)]
pub struct CalculateJunctionIntersections {
    point: Point2,
}

impl CalculateJunctionIntersections {
    /// Creates a query for the junction at `point`.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query.
    ///
    /// Returns an empty solution when no wall ends at the point.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall references a missing corner or a wall
    /// starts and ends at this point.
    pub fn execute(&self, plan: &FloorPlan, config: &PlanConfig) -> Result<JunctionSolution> {
        let tolerance = config.junction_tolerance;
        let key = JunctionKey::new(&self.point, tolerance);
        let (meeting, arms) = arms_at_key(plan, key, tolerance)?;
        Ok(meeting.map_or_else(JunctionSolution::default, |m| solve_junction(&m, &arms)))
    }
}

/// Lists every position where two or more walls meet.
#[derive(Debug, Clone, Default)]
pub struct ListJunctions;

impl ListJunctions {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, returning junctions ordered by position key.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall references a missing corner.
    pub fn execute(&self, plan: &FloorPlan, config: &PlanConfig) -> Result<Vec<Junction>> {
        let tolerance = config.junction_tolerance;
        let mut keys = BTreeSet::new();
        for (id, _) in plan.walls() {
            let (a, b) = plan.wall_points(id)?;
            keys.insert(JunctionKey::new(&a, tolerance));
            keys.insert(JunctionKey::new(&b, tolerance));
        }

        let mut junctions = Vec::new();
        for key in keys {
            let (meeting, arms) = arms_at_key(plan, key, tolerance)?;
            let Some(point) = meeting else { continue };
            if arms.len() < 2 {
                continue;
            }
            let mut walls: Vec<WallId> = arms.iter().map(|a| a.wall).collect();
            walls.sort();
            walls.dedup();
            junctions.push(Junction { point, walls });
        }
        Ok(junctions)
    }
}
