// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navigation session
//!
//! Owns everything that changes while a user walks: origin, destination and
//! step detector state. The floor plan is shared read-only, so several
//! sessions can navigate the same building at once.

use std::fmt;
use std::sync::Arc;

use mapnav_floorplan::FloorPlan;
use mapnav_geometry::Point;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::heading::Octant;
use crate::instruction::TurnInstruction;
use crate::planner::{PathPlanner, Route};
use crate::step_detector::{MotionSample, StepDetector, StepOutcome};

/// Observer for position changes. Every method has an empty default.
pub trait PositionListener {
    fn origin_changed(&mut self, _origin: Point) {}

    fn destination_changed(&mut self, _destination: Point) {}

    /// Called after each committed step.
    fn position_changed(&mut self, _position: Point) {}
}

/// Counters and orientation for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigationStatus {
    pub steps: u32,
    /// Meters walked north
    pub displacement_north: f64,
    /// Meters walked east
    pub displacement_east: f64,
    pub orientation: Octant,
    /// Calibrated heading (degrees)
    pub heading: f64,
    /// Straight-line distance to the destination
    pub distance: f64,
}

impl fmt::Display for NavigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Step Count: {}", self.steps)?;
        writeln!(f, "Displacement North: {:.3}", self.displacement_north)?;
        writeln!(f, "Displacement East: {:.3}", self.displacement_east)?;
        writeln!(f, "Orientation: {}", self.orientation)?;
        writeln!(f, "Heading: {:.3}", self.heading)?;
        write!(f, "Distance: {:.3}", self.distance)
    }
}

/// Everything the presentation layer needs after one sample.
#[derive(Debug, Clone)]
pub struct NavigationUpdate {
    pub outcome: StepOutcome,
    pub position: Point,
    pub status: NavigationStatus,
    pub route: Route,
    pub instruction: TurnInstruction,
}

pub struct NavigationSession {
    floor_plan: Arc<FloorPlan>,
    config: EngineConfig,
    detector: StepDetector,
    planner: PathPlanner,
    origin: Point,
    destination: Point,
    listeners: Vec<Box<dyn PositionListener>>,
}

impl NavigationSession {
    /// Starts a session with origin and destination at `(0, 0)`.
    pub fn new(floor_plan: Arc<FloorPlan>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            floor_plan,
            detector: StepDetector::new(config.step_detector.clone()),
            planner: PathPlanner::new(config.planner.clone()),
            config,
            origin: Point::default(),
            destination: Point::default(),
            listeners: Vec::new(),
        })
    }

    pub fn add_listener(&mut self, listener: Box<dyn PositionListener>) {
        self.listeners.push(listener);
    }

    pub fn floor_plan(&self) -> &FloorPlan {
        &self.floor_plan
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn detector(&self) -> &StepDetector {
        &self.detector
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    /// Current user position derived from the origin and the step counters.
    pub fn position(&self) -> Point {
        self.detector.position(self.origin)
    }

    /// Moves the origin, which also restarts step counting. Returns the new
    /// user position.
    pub fn set_origin(&mut self, origin: Point) -> Point {
        self.origin = origin;
        self.detector.reset();
        tracing::info!(x = origin.x, y = origin.y, "Origin set");
        for listener in &mut self.listeners {
            listener.origin_changed(origin);
        }
        self.position()
    }

    pub fn set_destination(&mut self, destination: Point) {
        self.destination = destination;
        tracing::info!(x = destination.x, y = destination.y, "Destination set");
        for listener in &mut self.listeners {
            listener.destination_changed(destination);
        }
    }

    /// Sets the destination to a landmark of the floor plan.
    pub fn set_destination_to_landmark(&mut self, label: &str) -> Result<Point> {
        let point = self
            .floor_plan
            .landmark(label)
            .map(|landmark| landmark.point)
            .ok_or_else(|| Error::UnknownLandmark(label.to_string()))?;
        self.set_destination(point);
        Ok(point)
    }

    /// Zeros the step counters without moving the origin.
    pub fn reset_counters(&mut self) {
        self.detector.reset();
    }

    pub fn calibrate_north(&mut self) {
        self.detector.calibrate_north();
    }

    /// Feeds one sample and recomputes route and instruction.
    pub fn on_sample(&mut self, sample: &MotionSample) -> Result<NavigationUpdate> {
        let outcome = self.detector.process(sample, &self.floor_plan, self.origin);
        let position = self.position();

        if outcome.is_committed() {
            for listener in &mut self.listeners {
                listener.position_changed(position);
            }
        }

        let route = self.route()?;
        let instruction = self.instruction_for(&route);
        Ok(NavigationUpdate {
            outcome,
            position,
            status: self.status(),
            route,
            instruction,
        })
    }

    pub fn status(&self) -> NavigationStatus {
        let (north, east) = self.detector.displacement();
        let heading = self.detector.heading();
        NavigationStatus {
            steps: self.detector.counters().steps,
            displacement_north: north,
            displacement_east: east,
            orientation: Octant::from_heading(heading),
            heading,
            distance: self.position().distance_to(&self.destination),
        }
    }

    /// Route from the current position to the destination.
    pub fn route(&self) -> Result<Route> {
        self.planner
            .plan(self.position(), self.destination, &self.floor_plan)
    }

    pub fn instruction(&self) -> Result<TurnInstruction> {
        let route = self.route()?;
        Ok(self.instruction_for(&route))
    }

    fn instruction_for(&self, route: &Route) -> TurnInstruction {
        TurnInstruction::derive(
            self.position(),
            self.detector.heading(),
            route,
            self.destination,
            &self.config.instruction,
        )
    }
}

impl fmt::Debug for NavigationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationSession")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("detector", &self.detector)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
