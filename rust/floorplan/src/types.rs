// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan queries

use mapnav_geometry::{Intersection, LineSegment, Point};
use serde::{Deserialize, Serialize};

/// An open polyline of walls. Consecutive points form one wall; the last
/// point is not joined back to the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Wraps already-validated points. Use [`crate::FloorPlanBuilder`] for
    /// untrusted input.
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of walls in this path.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Walls in path order.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points
            .windows(2)
            .map(|pair| LineSegment::new(pair[0], pair[1]))
    }
}

/// Position of a wall inside its floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallId {
    /// Index of the path in the floor plan
    pub path: usize,
    /// Index of the wall inside the path
    pub segment: usize,
}

/// Where a query segment meets a wall, tagged with the wall that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptPoint {
    pub wall: WallId,
    pub segment: LineSegment,
    pub intersection: Intersection,
}

impl InterceptPoint {
    /// The crossing location; [`Point::AT_INFINITY`] for collinear overlaps.
    pub fn point(&self) -> Point {
        self.intersection.point()
    }
}

/// A named point of interest on the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledPoint {
    pub point: Point,
    pub label: String,
}

impl LabeledPoint {
    pub fn new(point: Point, label: impl Into<String>) -> Self {
        Self {
            point,
            label: label.into(),
        }
    }
}
