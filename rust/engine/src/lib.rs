// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MapNav Engine
//!
//! Pedestrian dead reckoning on a 2D floor plan:
//! - **Step detection**: a phase machine over smoothed vertical acceleration,
//!   gated so that no step ever crosses a wall
//! - **Route planning**: line of sight, single-corner detours, and a
//!   nearest-wall deflection fallback
//! - **Turn instructions**: left/right/forward relative to the heading octant
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mapnav_engine::{EngineConfig, NavigationSession, Point};
//!
//! let plan = Arc::new(mapnav_floorplan::load_from_file("floor.json")?);
//! let mut session = NavigationSession::new(plan, EngineConfig::default())?;
//! session.set_origin(Point::new(2.0, 2.0));
//! session.set_destination_to_landmark("Lab")?;
//!
//! for sample in samples {
//!     let update = session.on_sample(&sample)?;
//!     println!("{}", update.instruction);
//! }
//! ```

pub mod config;
pub mod error;
pub mod heading;
pub mod instruction;
pub mod planner;
pub mod session;
pub mod step_detector;

pub use config::{EngineConfig, InstructionConfig, PlannerConfig, StepDetectorConfig};
pub use error::{Error, Result};
pub use heading::{normalize_heading, Octant, Quadrant};
pub use instruction::{TurnDirection, TurnInstruction};
pub use planner::{plan, PathPlanner, Route, RouteStrategy};
pub use session::{NavigationSession, NavigationStatus, NavigationUpdate, PositionListener};
pub use step_detector::{
    MotionSample, StepCounters, StepDetector, StepEvent, StepOutcome, StepPhase,
};

pub use mapnav_floorplan::FloorPlan;
pub use mapnav_geometry::Point;
