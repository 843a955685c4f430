// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step detection with a wall-crossing gate
//!
//! A step is a high → low → settle pattern in the smoothed vertical
//! acceleration, observed while the device is held steady:
//!
//! ```text
//!   z
//!   |    _
//!   |   / \             high_threshold
//!   |--/---\----------------------------
//!   | /     \      __   (settle band)
//!   |/       \    /
//!   |---------\--/----------------------  low_threshold
//!   |          \/
//!   +-------------------------------> t
//!       Rising  Falling  ReadyToCommit
//! ```
//!
//! Each completed pattern becomes a step candidate in one of four compass
//! quadrants. The candidate is only committed when the straight walk from the
//! current position to the tentative one crosses no wall.

use mapnav_floorplan::{FloorPlan, WallId};
use mapnav_geometry::Point;
use serde::{Deserialize, Serialize};

use crate::config::StepDetectorConfig;
use crate::heading::{normalize_heading, Quadrant};

/// One linear-acceleration reading, with the rotation rate and compass
/// heading current at the time it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Device-frame linear acceleration, gravity removed (m/s²)
    pub linear_acceleration: [f64; 3],
    /// Gyroscope rates (rad/s)
    pub rotation_rate: [f64; 3],
    /// Uncalibrated compass heading (degrees)
    pub heading: f64,
}

/// Progress through the step pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepPhase {
    #[default]
    Idle,
    /// High point seen
    Rising,
    /// High and low points seen
    Falling,
    /// Pattern complete, committed on the same sample
    ReadyToCommit,
}

/// Cumulative step counters. `north` and `east` are signed unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepCounters {
    pub steps: u32,
    pub north: i32,
    pub east: i32,
}

/// A step candidate and the walk it would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub quadrant: Quadrant,
    /// Calibrated heading at commit time (degrees)
    pub heading: f64,
    /// Counters after the step if committed, before it if rejected
    pub counters: StepCounters,
    pub from: Point,
    pub to: Point,
    /// First wall crossed by `from -> to`, if any
    pub blocked_by: Option<WallId>,
}

/// Result of feeding one sample to the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    NoStep,
    Committed(StepEvent),
    /// The candidate would have crossed a wall. Counters are unchanged.
    Rejected(StepEvent),
}

impl StepOutcome {
    pub fn event(&self) -> Option<&StepEvent> {
        match self {
            StepOutcome::NoStep => None,
            StepOutcome::Committed(event) | StepOutcome::Rejected(event) => Some(event),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, StepOutcome::Committed(_))
    }
}

/// Incremental step detector. Feed samples strictly in arrival order.
#[derive(Debug, Clone)]
pub struct StepDetector {
    config: StepDetectorConfig,
    phase: StepPhase,
    smoothed: f64,
    counters: StepCounters,
    heading_offset: f64,
    last_raw_heading: f64,
}

impl StepDetector {
    pub fn new(config: StepDetectorConfig) -> Self {
        Self {
            config,
            phase: StepPhase::Idle,
            smoothed: 0.0,
            counters: StepCounters::default(),
            heading_offset: 0.0,
            last_raw_heading: 0.0,
        }
    }

    pub fn config(&self) -> &StepDetectorConfig {
        &self.config
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn counters(&self) -> StepCounters {
        self.counters
    }

    /// Last smoothed vertical acceleration.
    pub fn smoothed_vertical(&self) -> f64 {
        self.smoothed
    }

    pub fn heading_offset(&self) -> f64 {
        self.heading_offset
    }

    /// Heading of the last sample with the calibration offset applied.
    pub fn heading(&self) -> f64 {
        normalize_heading(self.last_raw_heading, self.heading_offset)
    }

    /// Current position for the given origin.
    ///
    /// Counters are divided by the step length to land in plan units, and
    /// north points towards decreasing y.
    pub fn position(&self, origin: Point) -> Point {
        self.position_for(origin, self.counters.north, self.counters.east)
    }

    fn position_for(&self, origin: Point, north: i32, east: i32) -> Point {
        let length = self.config.step_length;
        origin.offset(east as f64 / length, -(north as f64) / length)
    }

    /// `(north, east)` walked so far, in meters.
    pub fn displacement(&self) -> (f64, f64) {
        let length = self.config.step_length;
        (
            self.counters.north as f64 * length,
            self.counters.east as f64 * length,
        )
    }

    /// Zeros counters, phase and smoothing state. The heading offset is kept.
    pub fn reset(&mut self) {
        self.phase = StepPhase::Idle;
        self.smoothed = 0.0;
        self.counters = StepCounters::default();
    }

    /// Makes the most recent raw heading the new north.
    pub fn calibrate_north(&mut self) {
        self.heading_offset = self.last_raw_heading;
        tracing::debug!(offset = self.heading_offset, "Heading calibrated");
    }

    /// Advances the phase machine by one sample and, on a completed pattern,
    /// gates the step against `floor_plan`.
    pub fn process(
        &mut self,
        sample: &MotionSample,
        floor_plan: &FloorPlan,
        origin: Point,
    ) -> StepOutcome {
        self.last_raw_heading = sample.heading;

        let raw_z = sample.linear_acceleration[2] - self.config.vertical_bias;
        let alpha = self.config.smoothing_alpha;
        self.smoothed = alpha * raw_z + (1.0 - alpha) * self.smoothed;

        self.advance_phase(self.smoothed, sample.linear_acceleration[1], &sample.rotation_rate);

        if self.phase != StepPhase::ReadyToCommit {
            return StepOutcome::NoStep;
        }
        self.phase = StepPhase::Idle;
        self.gate_step(floor_plan, origin)
    }

    fn advance_phase(&mut self, z: f64, lateral: f64, gyro: &[f64; 3]) {
        let cfg = &self.config;
        let steady = gyro[0].abs() < cfg.gyro_bound && gyro[1].abs() < cfg.gyro_bound;
        let previous = self.phase;

        if z > cfg.high_threshold && lateral.abs() > cfg.lateral_threshold && steady {
            if self.phase == StepPhase::Idle {
                self.phase = StepPhase::Rising;
            }
        } else if z < cfg.low_threshold && self.phase != StepPhase::Idle && steady {
            if self.phase == StepPhase::Rising {
                self.phase = StepPhase::Falling;
            }
        } else if z < cfg.high_threshold
            && z > cfg.low_threshold
            && self.phase == StepPhase::Falling
            && steady
        {
            self.phase = StepPhase::ReadyToCommit;
        }

        if gyro[0].abs() > cfg.gyro_guard || gyro[1].abs() > cfg.gyro_guard {
            if self.phase != StepPhase::Idle {
                tracing::trace!(phase = ?self.phase, "Rotation guard cleared step phase");
            }
            self.phase = StepPhase::Idle;
        } else if self.phase != previous {
            tracing::trace!(from = ?previous, to = ?self.phase, z, "Step phase");
        }
    }

    fn gate_step(&mut self, floor_plan: &FloorPlan, origin: Point) -> StepOutcome {
        let heading = self.heading();
        let quadrant = Quadrant::from_heading(heading);
        let (d_north, d_east) = quadrant.counter_delta();

        let north = self.counters.north + d_north;
        let east = self.counters.east + d_east;
        let from = self.position(origin);
        let to = self.position_for(origin, north, east);

        let blocked_by = floor_plan
            .intersections_between(from, to)
            .first()
            .map(|hit| hit.wall);

        if let Some(wall) = blocked_by {
            tracing::debug!(
                ?quadrant,
                path = wall.path,
                segment = wall.segment,
                "Step rejected at wall"
            );
            return StepOutcome::Rejected(StepEvent {
                quadrant,
                heading,
                counters: self.counters,
                from,
                to,
                blocked_by,
            });
        }

        self.counters = StepCounters {
            steps: self.counters.steps + 1,
            north,
            east,
        };
        tracing::debug!(
            ?quadrant,
            steps = self.counters.steps,
            north,
            east,
            x = to.x,
            y = to.y,
            "Step committed"
        );
        StepOutcome::Committed(StepEvent {
            quadrant,
            heading,
            counters: self.counters,
            from,
            to,
            blocked_by: None,
        })
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new(StepDetectorConfig::default())
    }
}
