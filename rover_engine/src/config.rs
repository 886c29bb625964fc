//! Configuration loading for the rover engine.

use crate::error::ConfigError;
use crate::grid::GridBounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoverConfig {
    /// Default log filter when `RUST_LOG` is not set (default: "info").
    pub log_level: String,
    pub grid: GridConfig,
    pub recorder: RecorderConfig,
}

impl Default for RoverConfig {
    fn default() -> Self {
        RoverConfig {
            log_level: "info".to_string(),
            grid: GridConfig::default(),
            recorder: RecorderConfig::default(),
        }
    }
}

/// Grid bounds, inclusive on both ends (default: `[0, 4] x [0, 4]`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let bounds = GridBounds::default();
        GridConfig {
            min_x: bounds.min_x(),
            min_y: bounds.min_y(),
            max_x: bounds.max_x(),
            max_y: bounds.max_y(),
        }
    }
}

/// Run history settings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecorderConfig {
    /// File runs are appended to. Runs are not recorded when unset.
    pub path: Option<PathBuf>,
}

impl RoverConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// The validated grid bounds.
    pub fn bounds(&self) -> Result<GridBounds, ConfigError> {
        GridBounds::new(
            self.grid.min_x,
            self.grid.min_y,
            self.grid.max_x,
            self.grid.max_y,
        )
    }
}

impl FromStr for RoverConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: RoverConfig = toml::from_str(content)?;
        // Reject bad bounds at load time rather than on the first run
        config.bounds()?;
        Ok(config)
    }
}
