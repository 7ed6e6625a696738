//! TOML settings: chart parameters and synthetic walk defaults.

use crate::data::SyntheticParams;
use crate::engine::{EngineConfig, EngineError, InitialDirection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chart: ChartSettings,
    pub synthetic: SyntheticSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub box_size: f64,
    pub reversal: u32,
    pub initial_direction: InitialDirection,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            box_size: engine.box_size,
            reversal: engine.reversal_boxes,
            initial_direction: engine.initial_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSettings {
    pub seed: u64,
    #[serde(flatten)]
    pub params: SyntheticParams,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            params: SyntheticParams::default(),
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated engine configuration for the `[chart]` table.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig::new(self.chart.box_size, self.chart.reversal)
            .with_initial_direction(self.chart.initial_direction);
        config.validate()?;
        Ok(config)
    }
}
