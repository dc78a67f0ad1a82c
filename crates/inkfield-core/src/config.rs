//! Engine configuration.
//!
//! Every field has a default; a JSON file only needs the values it wants to
//! override:
//!
//! ```json
//! { "brush_radius": 4.0, "stroke_width": 5.0 }
//! ```

use crate::brush::{DEFAULT_FRICTION, DEFAULT_RADIUS};
use crate::shapes::SerializableColor;
use crate::viewport::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default stroke hit-test distance for the eraser, in world units.
pub const DEFAULT_ERASER_THRESHOLD: f64 = 2.0;
/// Default world-space grid spacing.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables of the interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom-in factor; zoom-out uses the reciprocal.
    pub zoom_step: f64,
    pub brush_radius: f64,
    pub brush_friction: f64,
    pub eraser_threshold: f64,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    pub grid_size: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            brush_radius: DEFAULT_RADIUS,
            brush_friction: DEFAULT_FRICTION,
            eraser_threshold: DEFAULT_ERASER_THRESHOLD,
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            grid_size: DEFAULT_GRID_SIZE,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scale bounds must satisfy 0 < min <= 1 <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if self.brush_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "brush_radius must not be negative, got {}",
                self.brush_radius
            )));
        }
        if !(self.brush_friction > 0.0 && self.brush_friction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "brush_friction must be in (0, 1), got {}",
                self.brush_friction
            )));
        }
        if self.eraser_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "eraser_threshold must not be negative, got {}",
                self.eraser_threshold
            )));
        }
        if self.stroke_width <= 0.0 || self.grid_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "stroke_width and grid_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
