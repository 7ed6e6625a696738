//! Engine configuration and precondition errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the engine picks the direction of column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialDirection {
    /// Always start rising. An opening decline is absorbed by the rising
    /// branch until the first reversal.
    #[default]
    Rising,
    /// Start in the direction of the first close that sits at least one box
    /// away from the first close. Falls back to rising when no close does.
    Inferred,
}

/// Parameters for a single transform call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Price increment represented by one box. Must be finite and > 0.
    pub box_size: f64,
    /// Boxes price must move against the column before a new one opens.
    pub reversal_boxes: u32,
    #[serde(default)]
    pub initial_direction: InitialDirection,
}

impl EngineConfig {
    pub fn new(box_size: f64, reversal_boxes: u32) -> Self {
        Self {
            box_size,
            reversal_boxes,
            initial_direction: InitialDirection::Rising,
        }
    }

    pub fn with_initial_direction(mut self, initial_direction: InitialDirection) -> Self {
        self.initial_direction = initial_direction;
        self
    }

    /// Price distance that triggers a reversal.
    pub fn reversal_distance(&self) -> f64 {
        self.box_size * f64::from(self.reversal_boxes)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "box size must be a positive finite number, got {}",
                self.box_size
            )));
        }
        if self.reversal_boxes < 1 {
            return Err(EngineError::InvalidConfiguration(
                "reversal must be at least 1 box".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// One-point boxes with the classic three-box reversal.
    fn default() -> Self {
        Self::new(1.0, 3)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
