// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greedy wall-aware route planner
//!
//! Tries, in order:
//! 1. the straight line to the destination,
//! 2. an L-shaped detour that moves along y first,
//! 3. an L-shaped detour that moves along x first,
//! 4. a deflection point beside the nearest blocking wall, followed by an
//!    L-shaped detour from there.
//!
//! Step 4 is best effort. Its route may still cross a wall, which is
//! reported through [`RouteStrategy::WallDeflection`].

use mapnav_floorplan::{FloorPlan, InterceptPoint};
use mapnav_geometry::{axis_distance, LineSegment, Point};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::config::PlannerConfig;
use crate::error::Result;

/// Which planning branch produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStrategy {
    Direct,
    /// Via `(user.x, dest.y)`
    CornerVerticalFirst,
    /// Via `(dest.x, user.y)`
    CornerHorizontalFirst,
    /// Via a deflection point beside the nearest wall. `verified` is true
    /// when every leg of the route was checked clear.
    WallDeflection { verified: bool },
}

/// Ordered waypoints from the user's position to the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    waypoints: SmallVec<[Point; 5]>,
    strategy: RouteStrategy,
}

impl Route {
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn strategy(&self) -> RouteStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint the user should head for now.
    pub fn next_waypoint(&self) -> Option<Point> {
        self.waypoints.get(1).copied()
    }

    pub fn destination(&self) -> Option<Point> {
        self.waypoints.last().copied()
    }

    /// Consecutive waypoint pairs as segments.
    pub fn legs(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.waypoints
            .windows(2)
            .map(|pair| LineSegment::new(pair[0], pair[1]))
    }

    /// True when no leg crosses a wall of `floor_plan`.
    pub fn is_clear(&self, floor_plan: &FloorPlan) -> bool {
        self.legs()
            .all(|leg| floor_plan.intersections(&leg).is_empty())
    }
}

/// Stateless planner holding only its tuning.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
}

impl PathPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a route from `user` to `dest`. The first waypoint is always
    /// `user` and the last is always `dest`.
    ///
    /// Only fails when the nearest blocking wall has zero length, which the
    /// floor plan builder already rules out.
    pub fn plan(&self, user: Point, dest: Point, floor_plan: &FloorPlan) -> Result<Route> {
        let blocking = floor_plan.intersections_between(user, dest);
        if blocking.is_empty() {
            tracing::debug!("Route: direct line of sight");
            return Ok(Route {
                waypoints: smallvec![user, dest],
                strategy: RouteStrategy::Direct,
            });
        }

        if let Some((corner, strategy)) = clear_corner(user, dest, floor_plan) {
            tracing::debug!(?strategy, x = corner.x, y = corner.y, "Route: single corner");
            return Ok(Route {
                waypoints: smallvec![user, corner, dest],
                strategy,
            });
        }

        self.deflect(user, dest, &blocking[0], floor_plan)
    }

    fn deflect(
        &self,
        user: Point,
        dest: Point,
        nearest: &InterceptPoint,
        floor_plan: &FloorPlan,
    ) -> Result<Route> {
        let intercept = nearest.point();
        if !intercept.is_finite() {
            // Only collinear overlaps block the way; there is no side to pick.
            tracing::warn!("Route: blocked by a collinear wall, falling back to direct");
            return Ok(Route {
                waypoints: smallvec![user, dest],
                strategy: RouteStrategy::WallDeflection { verified: false },
            });
        }

        let deflection = self.deflection_point(user, dest, intercept, &nearest.segment)?;

        let mut waypoints: SmallVec<[Point; 5]> = smallvec![user, deflection];
        let corner = clear_corner(deflection, dest, floor_plan);
        if let Some((point, _)) = corner {
            waypoints.push(point);
        }
        waypoints.push(dest);

        let verified = corner.is_some() && floor_plan.is_clear(user, deflection);
        if verified {
            tracing::debug!(
                x = deflection.x,
                y = deflection.y,
                "Route: deflected around nearest wall"
            );
        } else {
            tracing::warn!(
                x = deflection.x,
                y = deflection.y,
                path = nearest.wall.path,
                segment = nearest.wall.segment,
                "Route: no clear leg past deflection point"
            );
        }

        Ok(Route {
            waypoints,
            strategy: RouteStrategy::WallDeflection { verified },
        })
    }

    /// A point past the end of `wall` on the user's side of the destination.
    ///
    /// When the chosen wall end lies above the user (greater y) the point
    /// keeps the user's x. Otherwise both coordinates are derived from the
    /// intercept's y, so for `user.x > dest.x` the point lands on `x == y`.
    fn deflection_point(
        &self,
        user: Point,
        dest: Point,
        intercept: Point,
        wall: &LineSegment,
    ) -> Result<Point> {
        let unit = wall.unit_vector()?;
        let axis = self.config.axis_inflation;
        let degenerate = self.config.degenerate_inflation;

        let point = if user.x > dest.x {
            let diff = axis_distance(&wall.start, &intercept);
            let shift = unit.y * diff.y;
            if wall.start.y > user.y {
                Point::new(user.x, intercept.y - shift * axis)
            } else {
                let v = intercept.y - shift * degenerate;
                Point::new(v, v)
            }
        } else {
            let diff = axis_distance(&wall.end, &intercept);
            let shift = unit.y * diff.y;
            if wall.end.y > user.y {
                Point::new(user.x, intercept.y + shift * axis)
            } else {
                Point::new(
                    intercept.y + shift * degenerate,
                    intercept.y - shift * degenerate,
                )
            }
        };
        Ok(point)
    }
}

/// First clear L-shaped detour from `from` to `to`, trying the
/// `(from.x, to.y)` corner before `(to.x, from.y)`.
fn clear_corner(from: Point, to: Point, floor_plan: &FloorPlan) -> Option<(Point, RouteStrategy)> {
    let candidates = [
        (Point::new(from.x, to.y), RouteStrategy::CornerVerticalFirst),
        (Point::new(to.x, from.y), RouteStrategy::CornerHorizontalFirst),
    ];
    candidates
        .into_iter()
        .find(|(corner, _)| floor_plan.is_clear(from, *corner) && floor_plan.is_clear(to, *corner))
}

/// Plans with the default tuning.
pub fn plan(user: Point, dest: Point, floor_plan: &FloorPlan) -> Result<Route> {
    PathPlanner::default().plan(user, dest, floor_plan)
}
