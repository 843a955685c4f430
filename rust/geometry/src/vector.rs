// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free-standing vector helpers

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::point::Point;

/// Signed angle in radians from the ray `origin -> a` to the ray `origin -> b`.
///
/// Computed as `atan2(cross, dot)`, so the result is in `(-PI, PI]` and is
/// positive when `b` is counter-clockwise from `a` in a right-handed frame.
/// Plan coordinates are y-down, which makes a positive angle a clockwise turn
/// on screen.
pub fn angle_between(origin: &Point, a: &Point, b: &Point) -> f64 {
    let va = origin.vector_to(a);
    let vb = origin.vector_to(b);
    let angle = va.perp(&vb).atan2(va.dot(&vb));
    // atan2 yields -PI for (-0.0, negative); fold it onto the open end
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// Absolute per-axis distance between two points.
pub fn axis_distance(a: &Point, b: &Point) -> Vector2<f64> {
    Vector2::new((a.x - b.x).abs(), (a.y - b.y).abs())
}
