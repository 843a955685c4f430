// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line segments and their intersection rules
//!
//! A segment keeps the line it lies on in slope/intercept form. Vertical
//! segments carry their `x` instead of an infinite slope, so every branch that
//! depends on verticality is an explicit match arm rather than an IEEE
//! infinity check.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::Point;
use crate::tolerance::{approx_eq, is_zero};

/// The infinite line a segment lies on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Slope {
    /// `x = x` for every point of the line.
    Vertical { x: f64 },
    /// `y = m * x + b`
    Sloped { m: f64, b: f64 },
}

impl Slope {
    fn through(start: &Point, end: &Point) -> Self {
        let dx = end.x - start.x;
        if dx == 0.0 {
            return Slope::Vertical { x: start.x };
        }
        let m = (end.y - start.y) / dx;
        Slope::Sloped {
            m,
            b: start.y - start.x * m,
        }
    }

    /// True for a sloped line whose slope is exactly zero.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Slope::Sloped { m, .. } if *m == 0.0)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Slope::Vertical { .. })
    }

    /// Same line within tolerance: matching `x` for verticals, matching slope
    /// and intercept otherwise.
    pub fn approx_eq(&self, other: &Slope) -> bool {
        match (self, other) {
            (Slope::Vertical { x: a }, Slope::Vertical { x: b }) => approx_eq(*a, *b),
            (Slope::Sloped { m: m1, b: b1 }, Slope::Sloped { m: m2, b: b2 }) => {
                approx_eq(*m1, *m2) && approx_eq(*b1, *b2)
            }
            _ => false,
        }
    }

    fn passes_through(&self, point: &Point) -> bool {
        match *self {
            Slope::Vertical { x } => approx_eq(point.x, x),
            Slope::Sloped { m, b } => approx_eq(point.x * m + b, point.y),
        }
    }
}

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The segments cross or touch at a single point.
    At(Point),
    /// Both segments are vertical on the same `x`, or both horizontal on the
    /// same `y`. There is no single location; [`Intersection::point`] reports
    /// [`Point::AT_INFINITY`].
    Collinear,
}

impl Intersection {
    pub fn point(&self) -> Point {
        match self {
            Intersection::At(p) => *p,
            Intersection::Collinear => Point::AT_INFINITY,
        }
    }

    pub fn is_collinear(&self) -> bool {
        matches!(self, Intersection::Collinear)
    }
}

/// An immutable directed segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
    slope: Slope,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            slope: Slope::through(&start, &end),
        }
    }

    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// The same segment walked from `end` to `start`.
    pub fn reversed(&self) -> LineSegment {
        LineSegment::new(self.end, self.start)
    }

    /// True when both endpoints are the same point.
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Euclidean distance from start to end.
    pub fn length(&self) -> Result<f64> {
        let length = self.start.distance_to(&self.end);
        if is_zero(length) {
            return Err(Error::DegenerateGeometry {
                x: self.start.x,
                y: self.start.y,
            });
        }
        Ok(length)
    }

    /// Unit direction vector from start to end.
    pub fn unit_vector(&self) -> Result<Vector2<f64>> {
        let length = self.length()?;
        Ok(self.start.vector_to(&self.end) / length)
    }

    /// Inclusive bounding-box test with the tolerance applied per axis at the
    /// endpoints' coordinates.
    fn within_bounds(&self, point: &Point) -> bool {
        let (min_x, max_x) = min_max(self.start.x, self.end.x);
        let (min_y, max_y) = min_max(self.start.y, self.end.y);

        let x_ok = (point.x >= min_x && point.x <= max_x)
            || approx_eq(point.x, self.start.x)
            || approx_eq(point.x, self.end.x);
        let y_ok = (point.y >= min_y && point.y <= max_y)
            || approx_eq(point.y, self.start.y)
            || approx_eq(point.y, self.end.y);

        x_ok && y_ok
    }

    /// Intersection of the two segments, or `None` when they do not meet.
    ///
    /// The infinite lines are intersected first and the result must then lie
    /// within both segments' bounds. Parallel sloped lines never intersect,
    /// and neither does a segment whose endpoints coincide, since it has no
    /// line to intersect.
    pub fn intersect(&self, other: &LineSegment) -> Option<Intersection> {
        if self.is_point() || other.is_point() {
            return None;
        }
        let (x, y) = match (self.slope, other.slope) {
            (Slope::Vertical { x: a }, Slope::Vertical { x: b }) => {
                return approx_eq(a, b).then_some(Intersection::Collinear);
            }
            (s, o) if s.is_horizontal() && o.is_horizontal() => {
                return approx_eq(self.start.y, other.start.y).then_some(Intersection::Collinear);
            }
            (Slope::Sloped { m, b }, Slope::Vertical { x })
            | (Slope::Vertical { x }, Slope::Sloped { m, b }) => (x, m * x + b),
            (Slope::Sloped { m: m1, b: b1 }, Slope::Sloped { m: m2, b: b2 }) => {
                let x = (b1 - b2) / (m2 - m1);
                if !x.is_finite() {
                    return None;
                }
                (x, m1 * x + b1)
            }
        };

        let point = Point::new(x, y);
        (self.within_bounds(&point) && other.within_bounds(&point)).then_some(Intersection::At(point))
    }

    /// True when `point` lies on this segment.
    ///
    /// The point must be on the line, and then either inside the closed
    /// bounding box or on one of the endpoints. The endpoint check catches
    /// boundary points that drift out of the box under rounding.
    pub fn contains(&self, point: &Point) -> bool {
        if !self.slope.passes_through(point) {
            return false;
        }

        let (min_x, max_x) = min_max(self.start.x, self.end.x);
        let (min_y, max_y) = min_max(self.start.y, self.end.y);
        let in_box = point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y;

        in_box || point.approx_eq(&self.start) || point.approx_eq(&self.end)
    }

    /// Same segment regardless of direction: endpoints match as a set and the
    /// lines match.
    pub fn same(&self, other: &LineSegment) -> bool {
        let endpoints_match = (self.start.approx_eq(&other.start) && self.end.approx_eq(&other.end))
            || (self.start.approx_eq(&other.end) && self.end.approx_eq(&other.start));

        endpoints_match && self.slope.approx_eq(&other.slope)
    }

    /// Collinear, and the start of one lies on the other.
    pub fn overlapping(&self, other: &LineSegment) -> bool {
        self.slope.approx_eq(&other.slope)
            && (self.contains(&other.start) || other.contains(&self.start))
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
