// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall intersection and local-geometry queries
//!
//! Every query is a linear scan over all walls. Segments are rebuilt from the
//! stored points on each call, so nothing can go stale.

use mapnav_geometry::{is_zero, LineSegment, Point};

use crate::error::{Error, Result};
use crate::types::{InterceptPoint, LabeledPoint, Path, WallId};

/// An immutable set of wall polylines plus named landmarks, in meters.
///
/// Build one with [`FloorPlanBuilder`]. Once built it has no interior
/// mutability, so shared references can be queried from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct FloorPlan {
    paths: Vec<Path>,
    landmarks: Vec<LabeledPoint>,
}

impl FloorPlan {
    pub fn builder() -> FloorPlanBuilder {
        FloorPlanBuilder::default()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn landmarks(&self) -> &[LabeledPoint] {
        &self.landmarks
    }

    /// Looks up a landmark by its exact label.
    pub fn landmark(&self, label: &str) -> Option<&LabeledPoint> {
        self.landmarks.iter().find(|l| l.label == label)
    }

    /// Total number of walls across all paths.
    pub fn segment_count(&self) -> usize {
        self.paths.iter().map(Path::segment_count).sum()
    }

    fn walls(&self) -> impl Iterator<Item = (WallId, LineSegment)> + '_ {
        self.paths.iter().enumerate().flat_map(|(path_idx, path)| {
            path.segments().enumerate().map(move |(seg_idx, segment)| {
                (
                    WallId {
                        path: path_idx,
                        segment: seg_idx,
                    },
                    segment,
                )
            })
        })
    }

    /// Every wall as a segment, in path order.
    pub fn all_segments(&self) -> Vec<LineSegment> {
        self.walls().map(|(_, segment)| segment).collect()
    }

    /// Walls crossed by `query`, nearest to `query.start` first.
    ///
    /// A wall identical to the query (in either direction) is skipped.
    /// Intercepts whose distances differ by less than the shared tolerance
    /// keep their scan order.
    pub fn intersections(&self, query: &LineSegment) -> Vec<InterceptPoint> {
        let origin = query.start;
        let mut hits: Vec<(f64, InterceptPoint)> = Vec::new();

        for (wall, segment) in self.walls() {
            if segment.same(query) {
                continue;
            }
            if let Some(intersection) = query.intersect(&segment) {
                let hit = InterceptPoint {
                    wall,
                    segment,
                    intersection,
                };
                insert_by_distance(&mut hits, origin.distance_to(&hit.point()), hit);
            }
        }

        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    /// Shorthand for [`FloorPlan::intersections`] on the segment `start -> end`.
    pub fn intersections_between(&self, start: Point, end: Point) -> Vec<InterceptPoint> {
        self.intersections(&LineSegment::new(start, end))
    }

    /// True when the straight walk `start -> end` touches no wall.
    pub fn is_clear(&self, start: Point, end: Point) -> bool {
        self.intersections_between(start, end).is_empty()
    }

    /// Walls that start at, end at, or pass through `point`, each re-oriented
    /// so that its start is `point`.
    ///
    /// A wall passing through `point` is split into two segments, one towards
    /// each of its endpoints.
    pub fn geometry_at(&self, point: Point) -> Vec<LineSegment> {
        let mut result = Vec::new();

        for (_, segment) in self.walls() {
            if segment.start.approx_eq(&point) {
                result.push(segment);
            } else if segment.end.approx_eq(&point) {
                result.push(segment.reversed());
            } else if segment.contains(&point) {
                result.push(LineSegment::new(point, segment.start));
                result.push(LineSegment::new(point, segment.end));
            }
        }

        result
    }
}

/// Stable insertion under the tolerant distance order. An element only moves
/// ahead of another when it is nearer by more than the tolerance, which keeps
/// near-ties in scan order without handing a non-total comparator to `sort_by`.
fn insert_by_distance(hits: &mut Vec<(f64, InterceptPoint)>, distance: f64, hit: InterceptPoint) {
    let mut idx = hits.len();
    while idx > 0 {
        let prev = hits[idx - 1].0;
        if is_zero(distance - prev) || distance >= prev {
            break;
        }
        idx -= 1;
    }
    hits.insert(idx, (distance, hit));
}

/// Incremental, validating constructor for [`FloorPlan`].
///
/// Paths can only be appended. A path is rejected when it has fewer than two
/// points, a non-finite coordinate, or two consecutive coincident points.
#[derive(Debug, Default)]
pub struct FloorPlanBuilder {
    paths: Vec<Path>,
    landmarks: Vec<LabeledPoint>,
}

impl FloorPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends one wall polyline.
    pub fn add_path<I, P>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let path_idx = self.paths.len();
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();

        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                path: path_idx,
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::NonFiniteCoordinate {
                path: path_idx,
                index,
            });
        }
        for (index, pair) in points.windows(2).enumerate() {
            if LineSegment::new(pair[0], pair[1]).length().is_err() {
                return Err(Error::ZeroLengthWall {
                    path: path_idx,
                    index,
                });
            }
        }

        self.paths.push(Path::from_points(points));
        Ok(self)
    }

    /// Appends a named point of interest.
    pub fn add_landmark(&mut self, point: Point, label: impl Into<String>) -> &mut Self {
        self.landmarks.push(LabeledPoint::new(point, label));
        self
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn build(self) -> FloorPlan {
        FloorPlan {
            paths: self.paths,
            landmarks: self.landmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_wall(x1: f64, y1: f64, x2: f64, y2: f64) -> FloorPlan {
        let mut builder = FloorPlan::builder();
        builder.add_path([(x1, y1), (x2, y2)]).unwrap();
        builder.build()
    }

    #[test]
    fn horizontal_query_hits_vertical_wall_once() {
        let plan = single_wall(5.0, 0.0, 5.0, 10.0);
        let hits = plan.intersections_between(Point::new(0.0, 5.0), Point::new(10.0, 5.0));

        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].point().x, 5.0);
        assert_relative_eq!(hits[0].point().y, 5.0);
        assert_eq!(hits[0].wall, WallId { path: 0, segment: 0 });
    }

    #[test]
    fn results_are_sorted_nearest_first() {
        let mut builder = FloorPlan::builder();
        builder.add_path([(8.0, -1.0), (8.0, 1.0)]).unwrap();
        builder.add_path([(2.0, -1.0), (2.0, 1.0)]).unwrap();
        builder.add_path([(5.0, -1.0), (5.0, 1.0)]).unwrap();
        let plan = builder.build();

        let hits = plan.intersections_between(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let xs: Vec<f64> = hits.iter().map(|h| h.point().x).collect();
        assert_eq!(xs, vec![2.0, 5.0, 8.0]);

        // walking the other way reverses the order
        let hits = plan.intersections_between(Point::new(10.0, 0.0), Point::new(0.0, 0.0));
        let paths: Vec<usize> = hits.iter().map(|h| h.wall.path).collect();
        assert_eq!(paths, vec![0, 2, 1]);
    }

    #[test]
    fn ties_keep_scan_order() {
        // both walls meet the query at the same point (5, 0)
        let mut builder = FloorPlan::builder();
        builder.add_path([(5.0, 0.0), (6.0, 2.0)]).unwrap();
        builder.add_path([(5.0, 0.0), (4.0, 2.0)]).unwrap();
        let plan = builder.build();

        let hits = plan.intersections_between(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let paths: Vec<usize> = hits.iter().map(|h| h.wall.path).collect();
        assert_eq!(paths, vec![0, 1]);
    }

    #[test]
    fn collinear_overlap_sorts_last() {
        let mut builder = FloorPlan::builder();
        builder.add_path([(0.0, 0.0), (0.0, 3.0)]).unwrap();
        builder.add_path([(-1.0, 2.0), (1.0, 2.0)]).unwrap();
        let plan = builder.build();

        let hits = plan.intersections_between(Point::new(0.0, 1.0), Point::new(0.0, 5.0));
        assert_eq!(hits.len(), 2);
        assert!(hits[0].point().approx_eq(&Point::new(0.0, 2.0)));
        assert!(hits[1].intersection.is_collinear());
    }

    #[test]
    fn query_identical_to_wall_is_skipped() {
        let plan = single_wall(0.0, 0.0, 4.0, 3.0);
        assert!(plan.is_clear(Point::new(4.0, 3.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn zero_length_query_is_always_clear() {
        let plan = single_wall(0.0, 10.0, 0.0, 20.0);
        let here = Point::new(0.0, 0.0);
        assert!(plan.is_clear(here, here));
        assert!(plan.is_clear(Point::new(0.0, 15.0), Point::new(0.0, 15.0)));
    }

    #[test]
    fn geometry_at_corner_reorients_walls() {
        let mut builder = FloorPlan::builder();
        builder
            .add_path([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
            .unwrap();
        let plan = builder.build();

        let corner = Point::new(10.0, 0.0);
        let segments = plan.geometry_at(corner);
        assert_eq!(segments.len(), 2);
        for s in &segments {
            assert!(s.start.approx_eq(&corner));
        }
        assert!(segments[0].end.approx_eq(&Point::new(0.0, 0.0)));
        assert!(segments[1].end.approx_eq(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn geometry_at_interior_point_splits_wall() {
        let plan = single_wall(0.0, 0.0, 10.0, 0.0);
        let mid = Point::new(4.0, 0.0);
        let segments = plan.geometry_at(mid);

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.start.approx_eq(&mid)));
        assert!(segments[0].end.approx_eq(&Point::new(0.0, 0.0)));
        assert!(segments[1].end.approx_eq(&Point::new(10.0, 0.0)));

        assert!(plan.geometry_at(Point::new(4.0, 1.0)).is_empty());
    }

    #[test]
    fn builder_rejects_short_paths() {
        let mut builder = FloorPlan::builder();
        let err = builder.add_path([(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::TooFewPoints { path: 0, count: 1 }));
    }

    #[test]
    fn builder_rejects_non_finite_points() {
        let mut builder = FloorPlan::builder();
        builder.add_path([(0.0, 0.0), (1.0, 0.0)]).unwrap();
        let err = builder
            .add_path([(0.0, 0.0), (f64::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { path: 1, index: 1 }));
        assert_eq!(builder.path_count(), 1);
    }

    #[test]
    fn builder_rejects_zero_length_walls() {
        let mut builder = FloorPlan::builder();
        let err = builder
            .add_path([(0.0, 0.0), (2.0, 0.0), (2.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, Error::ZeroLengthWall { path: 0, index: 1 }));
    }

    #[test]
    fn all_segments_flattens_paths() {
        let mut builder = FloorPlan::builder();
        builder
            .add_path([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
            .unwrap();
        builder.add_path([(3.0, 3.0), (4.0, 4.0)]).unwrap();
        let plan = builder.build();

        assert_eq!(plan.segment_count(), 3);
        let segments = plan.all_segments();
        assert_eq!(segments.len(), 3);
        assert!(segments[2].start.approx_eq(&Point::new(3.0, 3.0)));
    }
}
