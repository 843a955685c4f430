// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while tracking or routing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(#[from] mapnav_geometry::Error),

    #[error("Floor plan error: {0}")]
    FloorPlan(#[from] mapnav_floorplan::Error),

    #[error("Unknown landmark: {0}")]
    UnknownLandmark(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
}
