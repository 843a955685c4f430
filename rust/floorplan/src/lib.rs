// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan index for indoor navigation
//!
//! A floor plan is a list of wall polylines in meters. This crate answers the
//! two questions the rest of the engine asks of it:
//! 1. Which walls does a segment cross, nearest first?
//! 2. Which walls start at, end at, or pass through a point?
//!
//! # Usage
//!
//! ```rust,ignore
//! use mapnav_floorplan::{load_from_str, Point};
//!
//! let plan = load_from_str(r#"{ "paths": [[[5, 0], [5, 10]]] }"#)?;
//! let hits = plan.intersections_between(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
//! assert_eq!(hits.len(), 1);
//! ```

pub mod error;
pub mod floor_plan;
pub mod loader;
pub mod types;

pub use error::{Error, Result};
pub use floor_plan::{FloorPlan, FloorPlanBuilder};
pub use loader::{load_from_file, load_from_str, MapDocument};
pub use types::{InterceptPoint, LabeledPoint, Path, WallId};

pub use mapnav_geometry::{LineSegment, Point};
