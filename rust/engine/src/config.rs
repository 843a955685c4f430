// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine tuning parameters.
//!
//! Every field has a default, so a JSON file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds for the step phase machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StepDetectorConfig {
    /// Exponential smoothing factor for vertical acceleration (0-1]
    pub smoothing_alpha: f64,
    /// Subtracted from the raw vertical axis before smoothing (m/s²)
    pub vertical_bias: f64,
    /// Smoothed vertical acceleration that marks the high point (m/s²)
    pub high_threshold: f64,
    /// Smoothed vertical acceleration that marks the low point (m/s²)
    pub low_threshold: f64,
    /// Minimum |lateral acceleration| at the high point (m/s²)
    pub lateral_threshold: f64,
    /// Maximum |gyro x| and |gyro y| while a latch is being set (rad/s)
    pub gyro_bound: f64,
    /// |gyro x| or |gyro y| above this clears every latch (rad/s)
    pub gyro_guard: f64,
    /// Step length (m per count)
    pub step_length: f64,
}

impl Default for StepDetectorConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.35,
            vertical_bias: 1.0,
            high_threshold: 1.0,
            low_threshold: -0.5,
            lateral_threshold: 1.5,
            gyro_bound: 2.5,
            gyro_guard: 5.0,
            step_length: 0.66,
        }
    }
}

/// Inflation factors for the wall-deflection fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Applied when the deflection point keeps the user's x
    pub axis_inflation: f64,
    /// Applied when both coordinates come from the intercept's y
    pub degenerate_inflation: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            axis_inflation: 1.1,
            degenerate_inflation: 1.2,
        }
    }
}

/// Turn instruction policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstructionConfig {
    /// Distance to the destination below which the user has arrived (m)
    pub arrival_radius: f64,
    /// Turn angle above which a turn is announced (degrees)
    pub turn_threshold_deg: f64,
}

impl Default for InstructionConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 1.0,
            turn_threshold_deg: 25.0,
        }
    }
}

/// All engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub step_detector: StepDetectorConfig,
    pub planner: PlannerConfig,
    pub instruction: InstructionConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let step = &self.step_detector;
        if !(step.smoothing_alpha > 0.0 && step.smoothing_alpha <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "smoothing_alpha must be in (0, 1], got {}",
                step.smoothing_alpha
            )));
        }
        if !(step.step_length.is_finite() && step.step_length > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "step_length must be positive, got {}",
                step.step_length
            )));
        }
        if step.high_threshold <= step.low_threshold {
            return Err(Error::InvalidConfig(format!(
                "high_threshold ({}) must exceed low_threshold ({})",
                step.high_threshold, step.low_threshold
            )));
        }
        if !(self.planner.axis_inflation.is_finite() && self.planner.degenerate_inflation.is_finite()) {
            return Err(Error::InvalidConfig("planner inflation factors must be finite".into()));
        }
        if !(self.instruction.arrival_radius >= 0.0 && self.instruction.turn_threshold_deg >= 0.0) {
            return Err(Error::InvalidConfig(
                "arrival_radius and turn_threshold_deg must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
