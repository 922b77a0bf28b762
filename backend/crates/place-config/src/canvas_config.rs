use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Canvas dimension constraints (pixels)
pub const MIN_CANVAS_DIMENSION: u32 = 1;
pub const MAX_CANVAS_DIMENSION: u32 = 16384;
pub const DEFAULT_CANVAS_DIMENSION: u32 = 1024;

// Snapshot save interval constraints (seconds)
pub const MIN_SAVE_INTERVAL_SECS: u64 = 1;
pub const MAX_SAVE_INTERVAL_SECS: u64 = 86400;
pub const DEFAULT_SAVE_INTERVAL_SECS: u64 = 180;

pub const DEFAULT_SAVE_PATH: &str = "./place.png";

/// Canvas bootstrap and persistence settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of a freshly created canvas
    pub width: u32,
    /// Height of a freshly created canvas
    pub height: u32,
    /// PNG to load as the initial canvas
    pub load_path: Option<String>,
    /// Where snapshots are written
    pub save_path: String,
    pub save_interval_secs: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_DIMENSION,
            height: DEFAULT_CANVAS_DIMENSION,
            load_path: None,
            save_path: String::from(DEFAULT_SAVE_PATH),
            save_interval_secs: DEFAULT_SAVE_INTERVAL_SECS,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_CANVAS_DIMENSION..=MAX_CANVAS_DIMENSION).contains(&value) {
                return Err(ConfigError::canvas(format!(
                    "canvas.{} must be {}-{}, got {}",
                    name, MIN_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION, value
                )));
            }
        }

        if self.save_interval_secs < MIN_SAVE_INTERVAL_SECS
            || self.save_interval_secs > MAX_SAVE_INTERVAL_SECS
        {
            return Err(ConfigError::canvas(format!(
                "canvas.save_interval_secs must be {}-{}, got {}",
                MIN_SAVE_INTERVAL_SECS, MAX_SAVE_INTERVAL_SECS, self.save_interval_secs
            )));
        }

        if self.save_path.trim().is_empty() {
            return Err(ConfigError::canvas("canvas.save_path cannot be empty"));
        }

        Ok(())
    }
}
