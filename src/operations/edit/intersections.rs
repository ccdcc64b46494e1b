use crate::config::PlanConfig;
use crate::error::{Result, TopologyError};
use crate::math::intersect_2d::{segment_segment_intersect_2d, LineEquation};
use crate::math::Point2;
use crate::topology::{Corner, CornerId, FloorPlan, WallId};

use super::{commit, fold_duplicate, split_wall};

/// Splits the wall between two corners, and every wall it crosses, at
/// each crossing.
///
/// An X-crossing gets a new corner shared by four walls. A T-contact (an
/// endpoint of one wall lying inside the other) splits only the wall whose
/// interior is touched, at the existing corner. Where the drawn wall runs
/// along an existing one, both are cut at each other's ends and the shared
/// span is kept as the existing wall.
#[derive(Debug, Clone)]
pub struct NewWallsForIntersections {
    a: CornerId,
    b: CornerId,
}

/// A point where the drawn wall must be cut.
struct Cut {
    t: f64,
    corner: CornerId,
}

impl NewWallsForIntersections {
    /// Creates a new command for the wall connecting `a` and `b`.
    #[must_use]
    pub fn new(a: CornerId, b: CornerId) -> Self {
        Self { a, b }
    }

    /// Executes the command.
    ///
    /// Returns the pieces of the drawn wall in order from its start corner.
    /// Without crossings this is just the original wall.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if no wall connects the two
    /// corners, or any error from recomputing the affected junctions. The plan
    /// is left unchanged on error.
    pub fn execute(&self, plan: &mut FloorPlan, config: &PlanConfig) -> Result<Vec<WallId>> {
        let wall = plan
            .wall_between(self.a, self.b)
            .ok_or(TopologyError::EntityNotFound("wall between corners"))?;

        plan.transact(|plan| {
            let (ws, we) = {
                let w = plan.wall(wall)?;
                (w.start(), w.end())
            };
            let (p0, p1) = plan.wall_points(wall)?;
            let tol = config.wall_snap_tolerance.max(config.junction_tolerance);
            let eps_t = tol / (p1 - p0).norm();

            let mut cuts: Vec<Cut> = Vec::new();
            let mut points: Vec<Point2> = vec![p0, p1];

            let centerline = LineEquation::through(&p0, &(p1 - p0));
            let others: Vec<WallId> = plan.walls().map(|(id, _)| id).filter(|&id| id != wall).collect();

            for other in others {
                let (q0, q1) = plan.wall_points(other)?;
                let (os, oe, touching) = {
                    let o = plan.wall(other)?;
                    (o.start(), o.end(), o.touches(ws) || o.touches(we))
                };
                let eps_u = tol / (q1 - q0).norm();

                let collinear = centerline
                    .is_some_and(|l| l.signed_distance(&q0).abs() <= tol && l.signed_distance(&q1).abs() <= tol);
                if collinear {
                    // Overlapping runs: each wall is cut where the other one ends.
                    let span = p1 - p0;
                    for (corner, q) in [(os, q0), (oe, q1)] {
                        let t = (q - p0).dot(&span) / span.norm_squared();
                        if t > eps_t && t < 1.0 - eps_t {
                            cuts.push(Cut { t, corner });
                        }
                    }
                    let other_span = q1 - q0;
                    let mut inner: Vec<(f64, CornerId)> = [(ws, p0), (we, p1)]
                        .into_iter()
                        .map(|(corner, p)| ((p - q0).dot(&other_span) / other_span.norm_squared(), corner))
                        .filter(|&(u, _)| u > eps_u && u < 1.0 - eps_u)
                        .collect();
                    inner.sort_by(|x, y| x.0.total_cmp(&y.0));
                    let mut current = other;
                    for (_, corner) in inner {
                        current = split_wall(plan, current, corner, config)?;
                    }
                    points.extend([q0, q1]);
                    continue;
                }
                if touching {
                    continue;
                }

                let Some((pt, t, u)) = segment_segment_intersect_2d(&p0, &p1, &q0, &q1) else {
                    continue;
                };
                let t_inside = t > eps_t && t < 1.0 - eps_t;
                let u_inside = u > eps_u && u < 1.0 - eps_u;

                match (t_inside, u_inside) {
                    (true, true) => {
                        let height = plan.wall(other)?.height();
                        let corner = plan.insert_corner(Corner::new(pt, height));
                        split_wall(plan, other, corner, config)?;
                        cuts.push(Cut { t, corner });
                        points.extend([q0, q1, pt]);
                    }
                    (true, false) => {
                        let corner = if u <= eps_u { os } else { oe };
                        cuts.push(Cut { t, corner });
                        points.push(if u <= eps_u { q0 } else { q1 });
                    }
                    (false, true) => {
                        let corner = if t <= eps_t { ws } else { we };
                        split_wall(plan, other, corner, config)?;
                        points.extend([q0, q1]);
                    }
                    (false, false) => {}
                }
            }

            cuts.sort_by(|x, y| x.t.total_cmp(&y.t));
            cuts.dedup_by(|x, y| x.corner == y.corner);

            let mut pieces = vec![wall];
            let mut current = wall;
            for cut in cuts {
                if plan.wall(current)?.touches(cut.corner) {
                    continue;
                }
                current = split_wall(plan, current, cut.corner, config)?;
                pieces.push(current);
            }

            // Pieces laid over an existing wall collapse into it.
            for piece in &mut pieces {
                if let Some(existing) = fold_duplicate(plan, *piece)? {
                    *piece = existing;
                }
            }

            commit(plan, &points, config)?;
            if pieces.len() > 1 {
                tracing::debug!(pieces = pieces.len(), "drawn wall split at crossings");
            }
            Ok(pieces)
        })
    }
}
