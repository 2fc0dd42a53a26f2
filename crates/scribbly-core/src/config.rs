//! Document configuration.

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::error::{ConfigError, ConfigResult};
use crate::history::MAX_ACTIVITIES;
use crate::invalidate::DEFAULT_FPS;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables for a [`Document`](crate::Document) and its render loop.
///
/// Missing fields in JSON fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// History length at which the oldest activity is evicted.
    pub max_activities: usize,
    /// Render ticks per second.
    pub fps: u32,
    /// Lower zoom limit.
    pub min_zoom: f64,
    /// Upper zoom limit.
    pub max_zoom: f64,
    /// Position of the canvas element inside the page.
    pub canvas_offset: Vec2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_activities: MAX_ACTIVITIES,
            fps: DEFAULT_FPS,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            canvas_offset: Vec2::ZERO,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_activities < 2 {
            return Err(ConfigError::Invalid {
                field: "max_activities",
                reason: format!("must be at least 2, got {}", self.max_activities),
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_zoom",
                reason: format!("must be positive, got {}", self.min_zoom),
            });
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(ConfigError::Invalid {
                field: "max_zoom",
                reason: format!(
                    "must be at least min_zoom ({}), got {}",
                    self.min_zoom, self.max_zoom
                ),
            });
        }
        if !self.canvas_offset.is_finite() {
            return Err(ConfigError::Invalid {
                field: "canvas_offset",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}
