//! Application configuration.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides. An empty JSON object is a valid configuration.

use crate::construction::CanvasConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Animation and tessellation parameters of the lamp scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampConfig {
    /// Strips and samples per strip of every parametric surface
    pub tessellation_level: u32,
    /// Viewport width / height
    pub aspect: f64,
    /// Frames before the lower arm and the shade reverse direction
    pub swing_period: u32,
    /// Frames before the upper arm reverses direction
    pub upper_swing_period: u32,
    /// Angular speed of the shade relative to the arms
    pub shade_speed: f64,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            tessellation_level: 20,
            aspect: 1.0,
            swing_period: 100,
            upper_swing_period: 200,
            shade_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub lamp: LampConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
