// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::tolerance::approx_eq;

/// A position on the floor plan in meters.
///
/// Plan coordinates are y-down: north is `-y`, east is `+x`.
/// Compare points with [`Point::approx_eq`], never with `==`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Marker location reported for collinear overlaps.
    pub const AT_INFINITY: Point = Point {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(&self, other: &Point) -> Vector2<f64> {
        Vector2::new(other.x - self.x, other.y - self.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.vector_to(other).norm()
    }

    /// Tolerance-based equality on both axes.
    pub fn approx_eq(&self, other: &Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}
