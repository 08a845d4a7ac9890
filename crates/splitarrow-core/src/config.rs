//! Selector configuration.

use crate::easing::TimingFunction;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default notch depth and gap width, in logical pixels.
pub const DEFAULT_DEPTH_OF_CUT: f64 = 30.0;
/// Default transition duration, in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.3;
/// Longest accepted transition duration, in seconds.
pub const MAX_ANIMATION_DURATION: f64 = 60.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Color in a serialization-friendly form (8-bit RGBA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with the given level.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }

    /// Light gray (two thirds white).
    pub const fn light_gray() -> Self {
        Self::gray(170)
    }

    /// Dark gray (one third white).
    pub const fn dark_gray() -> Self {
        Self::gray(85)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Tunable appearance of a selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Notch depth, which is also the gap between the panels.
    pub depth_of_cut: f64,
    /// Transition duration in seconds.
    pub animation_duration: f64,
    /// Fill of the panel the arrow points away from.
    pub light_color: SerializableColor,
    /// Fill of the panel the arrow points into.
    pub dark_color: SerializableColor,
    /// Easing used for both the shape morph and the color fade.
    pub timing: TimingFunction,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            depth_of_cut: DEFAULT_DEPTH_OF_CUT,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            light_color: SerializableColor::light_gray(),
            dark_color: SerializableColor::dark_gray(),
            timing: TimingFunction::default(),
        }
    }
}

impl SelectorConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded selector config from {}", path.display());
        Ok(config)
    }

    /// Check that all numeric options are finite and non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.depth_of_cut.is_finite() || self.depth_of_cut < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "depth_of_cut must be a non-negative number, got {}",
                self.depth_of_cut
            )));
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "animation_duration must be a non-negative number, got {}",
                self.animation_duration
            )));
        }
        if self.animation_duration > MAX_ANIMATION_DURATION {
            return Err(ConfigError::Invalid(format!(
                "animation_duration must be at most {} seconds, got {}",
                MAX_ANIMATION_DURATION, self.animation_duration
            )));
        }
        Ok(())
    }

    /// Transition duration, clamped to `[0, MAX_ANIMATION_DURATION]`.
    ///
    /// Total even for unvalidated configs: NaN maps to zero.
    pub fn duration(&self) -> Duration {
        let secs = self.animation_duration.max(0.0).min(MAX_ANIMATION_DURATION);
        Duration::from_secs_f64(secs)
    }

    pub fn light(&self) -> Color {
        self.light_color.into()
    }

    pub fn dark(&self) -> Color {
        self.dark_color.into()
    }
}
