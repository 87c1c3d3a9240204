//! Application configuration
//!
//! Defaults mirror the original form; a JSON file may override any field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::grid::WEEKS_PER_ROW;
use crate::params::DEFAULT_LIFE_EXPECTANCY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay added per cell index before it fades in.
    pub stagger_ms: u32,
    pub initial_opacity: f64,
    pub initial_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 5,
            initial_opacity: 0.0,
            initial_scale: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_life_expectancy: u32,
    /// Not configurable; reported so the front end lays out the same grid.
    #[serde(skip_deserializing)]
    pub weeks_per_row: u32,
    /// File name of the JSON key-value store inside the data directory.
    pub store_file: String,
    pub animation: AnimationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_life_expectancy: DEFAULT_LIFE_EXPECTANCY,
            weeks_per_row: WEEKS_PER_ROW,
            store_file: "life-in-weeks.json".into(),
            animation: AnimationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load overrides from `path`, or the defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config: AppConfig = serde_json::from_str(&text)?;
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
