// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turn-by-turn instruction for the next route leg

use std::fmt;

use mapnav_geometry::{angle_between, Point};
use serde::{Deserialize, Serialize};

use crate::config::InstructionConfig;
use crate::heading::Octant;
use crate::planner::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnDirection::Left => f.write_str("left"),
            TurnDirection::Right => f.write_str("right"),
        }
    }
}

/// What the user should do next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TurnInstruction {
    Arrived,
    /// `degrees` is always positive
    Turn { direction: TurnDirection, degrees: f64 },
    WalkForward,
}

impl TurnInstruction {
    /// Derives the instruction for a user at `user` facing `heading` degrees.
    ///
    /// The user's forward direction is the heading's octant. The turn angle is
    /// measured from that direction to the route's next waypoint, or to the
    /// destination for a route with a single point.
    pub fn derive(
        user: Point,
        heading: f64,
        route: &Route,
        destination: Point,
        config: &InstructionConfig,
    ) -> Self {
        if user.distance_to(&destination) < config.arrival_radius {
            return TurnInstruction::Arrived;
        }

        let (dx, dy) = Octant::from_heading(heading).forward_offset();
        let reference = user.offset(dx, dy);
        let next = route.next_waypoint().unwrap_or(destination);
        let angle = angle_between(&user, &reference, &next).to_degrees();
        Self::from_turn_angle(angle, config)
    }

    /// Turn or walk for a signed turn angle in degrees. Only angles strictly
    /// beyond the threshold produce a turn.
    pub fn from_turn_angle(angle: f64, config: &InstructionConfig) -> Self {
        if angle.abs() > config.turn_threshold_deg {
            // y grows downwards, so a positive angle turns clockwise
            let direction = if angle > 0.0 {
                TurnDirection::Right
            } else {
                TurnDirection::Left
            };
            TurnInstruction::Turn {
                direction,
                degrees: angle.abs(),
            }
        } else {
            TurnInstruction::WalkForward
        }
    }
}

impl fmt::Display for TurnInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnInstruction::Arrived => f.write_str("Destination reached"),
            TurnInstruction::Turn { direction, degrees } => {
                write!(f, "Turn {} {:.2} degrees", direction, degrees)
            }
            TurnInstruction::WalkForward => f.write_str("Walk forward"),
        }
    }
}
