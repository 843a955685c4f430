// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MapNav Geometry Kernel
//!
//! Pure 2D line-segment primitives used by the floor plan index, the step
//! gate and the route planner. All coordinates are real-world meters and all
//! float comparisons go through the single [`EPSILON`] tolerance.

pub mod error;
pub mod point;
pub mod segment;
pub mod tolerance;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::Vector2;

pub use error::{Error, Result};
pub use point::Point;
pub use segment::{Intersection, LineSegment, Slope};
pub use tolerance::{approx_eq, is_zero, EPSILON};
pub use vector::{angle_between, axis_distance};
