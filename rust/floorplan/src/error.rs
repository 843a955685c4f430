// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map loading errors.

/// Result type alias for floor plan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or loading a floor plan.
///
/// A malformed wall is always rejected; walls are never silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A path needs at least two points to form a wall.
    #[error("path {path} has {count} point(s); at least 2 are required")]
    TooFewPoints { path: usize, count: usize },

    /// A coordinate is NaN or infinite.
    #[error("path {path} point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { path: usize, index: usize },

    /// Two consecutive points coincide.
    #[error("path {path} wall {index} has zero length")]
    ZeroLengthWall { path: usize, index: usize },

    /// The map document has no paths.
    #[error("map contains no paths")]
    EmptyMap,

    /// Scale factors must be positive and finite.
    #[error("invalid map scale ({0}, {1})")]
    InvalidScale(f64, f64),

    #[error("geometry error: {0}")]
    Geometry(#[from] mapnav_geometry::Error),

    #[error("map JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map I/O error: {0}")]
    Io(#[from] std::io::Error),
}
