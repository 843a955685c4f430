// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON map documents
//!
//! ```json
//! {
//!   "scale": [0.05, 0.05],
//!   "paths": [[[0, 0], [200, 0], [200, 200]]],
//!   "landmarks": [{ "label": "Lab", "point": [80, 80] }]
//! }
//! ```
//!
//! File coordinates are multiplied by `scale` here, so everything past the
//! loader is already in meters.

use std::fs;
use std::path::Path as FsPath;

use mapnav_geometry::Point;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::floor_plan::FloorPlan;

/// On-disk representation of a floor plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDocument {
    /// Meters per file unit on each axis
    #[serde(default = "unit_scale")]
    pub scale: [f64; 2],
    pub paths: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub landmarks: Vec<LandmarkEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkEntry {
    pub label: String,
    pub point: [f64; 2],
}

fn unit_scale() -> [f64; 2] {
    [1.0, 1.0]
}

impl MapDocument {
    /// Converts to meters and validates every path.
    pub fn into_floor_plan(self) -> Result<FloorPlan> {
        let [sx, sy] = self.scale;
        if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
            return Err(Error::InvalidScale(sx, sy));
        }
        if self.paths.is_empty() {
            return Err(Error::EmptyMap);
        }

        let to_meters = |[x, y]: [f64; 2]| Point::new(x * sx, y * sy);

        let mut builder = FloorPlan::builder();
        for path in self.paths {
            builder.add_path(path.into_iter().map(to_meters))?;
        }
        for entry in self.landmarks {
            builder.add_landmark(to_meters(entry.point), entry.label);
        }

        let plan = builder.build();
        tracing::info!(
            paths = plan.paths().len(),
            walls = plan.segment_count(),
            landmarks = plan.landmarks().len(),
            "Loaded floor plan"
        );
        Ok(plan)
    }
}

/// Parses and validates a map document from a JSON string.
pub fn load_from_str(json: &str) -> Result<FloorPlan> {
    let document: MapDocument = serde_json::from_str(json)?;
    document.into_floor_plan()
}

/// Reads, parses and validates a map document from disk.
pub fn load_from_file(path: impl AsRef<FsPath>) -> Result<FloorPlan> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scale_converts_to_meters() {
        let plan = load_from_str(
            r#"{
                "scale": [0.05, 0.1],
                "paths": [[[0, 0], [200, 0], [200, 100]]],
                "landmarks": [{ "label": "Lab", "point": [40, 40] }]
            }"#,
        )
        .unwrap();

        let points = plan.paths()[0].points();
        assert_relative_eq!(points[1].x, 10.0);
        assert_relative_eq!(points[2].y, 10.0);

        let lab = plan.landmark("Lab").unwrap();
        assert_relative_eq!(lab.point.x, 2.0);
        assert_relative_eq!(lab.point.y, 4.0);
    }

    #[test]
    fn scale_defaults_to_meters() {
        let plan = load_from_str(r#"{ "paths": [[[1, 2], [3, 4]]] }"#).unwrap();
        assert_relative_eq!(plan.paths()[0].points()[1].x, 3.0);
        assert!(plan.landmarks().is_empty());
    }

    #[test]
    fn empty_map_is_rejected() {
        let err = load_from_str(r#"{ "paths": [] }"#).unwrap_err();
        assert!(matches!(err, Error::EmptyMap));
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let err = load_from_str(r#"{ "scale": [0, 1], "paths": [[[0, 0], [1, 1]]] }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidScale(..)));
    }

    #[test]
    fn single_point_path_is_rejected() {
        let err = load_from_str(r#"{ "paths": [[[0, 0], [1, 1]], [[2, 2]]] }"#).unwrap_err();
        assert!(matches!(err, Error::TooFewPoints { path: 1, count: 1 }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = load_from_str(r#"{ "paths": [[[0, 0], [1]]] }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
