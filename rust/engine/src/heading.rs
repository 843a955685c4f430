// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Compass heading buckets
//!
//! Two independent discretizations of a heading in degrees `[0, 360)`:
//! - [`Quadrant`]: 4 buckets of 90°, used to accumulate step displacement.
//! - [`Octant`]: 8 buckets of 45°, used for orientation labels and for the
//!   forward reference direction of turn instructions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Applies a calibration offset and wraps the result into `[0, 360)`.
pub fn normalize_heading(raw: f64, offset: f64) -> f64 {
    let heading = (raw - offset).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

/// 4-way heading bucket centred on N/E/S/W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    /// `[315, 45)` North, `[45, 135)` East, `[135, 225)` South, `[225, 315)` West.
    pub fn from_heading(heading: f64) -> Self {
        if heading >= 315.0 || heading < 45.0 {
            Quadrant::North
        } else if heading < 135.0 {
            Quadrant::East
        } else if heading < 225.0 {
            Quadrant::South
        } else {
            Quadrant::West
        }
    }

    /// Change to the `(north, east)` step counters for one step.
    pub fn counter_delta(&self) -> (i32, i32) {
        match self {
            Quadrant::North => (1, 0),
            Quadrant::East => (0, 1),
            Quadrant::South => (-1, 0),
            Quadrant::West => (0, -1),
        }
    }
}

/// 8-way heading bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Octant {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Octant {
    const ALL: [Octant; 8] = [
        Octant::N,
        Octant::NE,
        Octant::E,
        Octant::SE,
        Octant::S,
        Octant::SW,
        Octant::W,
        Octant::NW,
    ];

    /// 45° buckets centred on each compass point; N covers `[337.5, 22.5)`.
    pub fn from_heading(heading: f64) -> Self {
        let shifted = (heading + 22.5).rem_euclid(360.0);
        let idx = (shifted / 45.0) as usize;
        Self::ALL[idx.min(7)]
    }

    /// Unit offset in plan coordinates (y-down) one step ahead.
    pub fn forward_offset(&self) -> (f64, f64) {
        match self {
            Octant::N => (0.0, -1.0),
            Octant::NE => (1.0, -1.0),
            Octant::E => (1.0, 0.0),
            Octant::SE => (1.0, 1.0),
            Octant::S => (0.0, 1.0),
            Octant::SW => (-1.0, 1.0),
            Octant::W => (-1.0, 0.0),
            Octant::NW => (-1.0, -1.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Octant::N => "N",
            Octant::NE => "NE",
            Octant::E => "E",
            Octant::SE => "SE",
            Octant::S => "S",
            Octant::SW => "SW",
            Octant::W => "W",
            Octant::NW => "NW",
        }
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_is_subtracted_and_wrapped() {
        assert_relative_eq!(normalize_heading(10.0, 0.0), 10.0);
        assert_relative_eq!(normalize_heading(10.0, 30.0), 340.0);
        assert_relative_eq!(normalize_heading(370.0, 0.0), 10.0);
        assert_relative_eq!(normalize_heading(90.0, 90.0), 0.0);
        assert!(normalize_heading(0.0, 1e-17) < 360.0);
    }

    #[test]
    fn quadrant_boundaries() {
        assert_eq!(Quadrant::from_heading(0.0), Quadrant::North);
        assert_eq!(Quadrant::from_heading(44.9), Quadrant::North);
        assert_eq!(Quadrant::from_heading(315.0), Quadrant::North);
        assert_eq!(Quadrant::from_heading(45.0), Quadrant::East);
        assert_eq!(Quadrant::from_heading(134.9), Quadrant::East);
        assert_eq!(Quadrant::from_heading(135.0), Quadrant::South);
        assert_eq!(Quadrant::from_heading(225.0), Quadrant::West);
        assert_eq!(Quadrant::from_heading(314.9), Quadrant::West);
    }

    #[test]
    fn quadrant_deltas() {
        assert_eq!(Quadrant::North.counter_delta(), (1, 0));
        assert_eq!(Quadrant::South.counter_delta(), (-1, 0));
        assert_eq!(Quadrant::East.counter_delta(), (0, 1));
        assert_eq!(Quadrant::West.counter_delta(), (0, -1));
    }

    #[test]
    fn octant_boundaries() {
        assert_eq!(Octant::from_heading(0.0), Octant::N);
        assert_eq!(Octant::from_heading(22.4), Octant::N);
        assert_eq!(Octant::from_heading(337.5), Octant::N);
        assert_eq!(Octant::from_heading(22.5), Octant::NE);
        assert_eq!(Octant::from_heading(90.0), Octant::E);
        assert_eq!(Octant::from_heading(180.0), Octant::S);
        assert_eq!(Octant::from_heading(250.0), Octant::W);
        assert_eq!(Octant::from_heading(300.0), Octant::NW);
        assert_eq!(Octant::from_heading(359.99), Octant::N);
    }

    #[test]
    fn buckets_disagree_where_they_should() {
        // 30° is a north step but a north-east label
        assert_eq!(Quadrant::from_heading(30.0), Quadrant::North);
        assert_eq!(Octant::from_heading(30.0), Octant::NE);
    }

    #[test]
    fn forward_offsets_point_north_up() {
        assert_eq!(Octant::N.forward_offset(), (0.0, -1.0));
        assert_eq!(Octant::SE.forward_offset(), (1.0, 1.0));
        assert_eq!(Octant::W.to_string(), "W");
    }
}
