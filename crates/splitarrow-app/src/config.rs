//! Application configuration and errors.

use std::str::FromStr;

use peniko::Color;
use splitarrow_core::{ArrowDirection, ConfigError, SelectorConfig};
use thiserror::Error;

/// Environment variable naming a JSON selector config file.
pub const CONFIG_ENV: &str = "SPLITARROW_CONFIG";
/// Environment variable choosing the selector backend (`vello` or `egui`).
pub const BACKEND_ENV: &str = "SPLITARROW_BACKEND";

/// Errors from starting or running the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Surface creation failed: {0}")]
    Surface(String),
    #[error("Renderer creation failed: {0}")]
    Renderer(String),
    #[error("Frame render failed: {0}")]
    Render(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// How the selector itself is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Selector drawn into the Vello scene, pointer events routed by the app.
    #[default]
    Vello,
    /// Selector drawn as an egui widget inside the overlay.
    Egui,
}

impl FromStr for Backend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vello" => Ok(Backend::Vello),
            "egui" => Ok(Backend::Egui),
            other => Err(AppError::UnknownBackend(other.to_string())),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Logical size of the selector, centered in the window.
    pub selector_size: kurbo::Size,
    pub selector: SelectorConfig,
    /// Direction applied before the first frame.
    pub initial_direction: ArrowDirection,
    pub backend: Backend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SplitArrow".to_string(),
            width: 640,
            height: 400,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            selector_size: kurbo::Size::new(320.0, 64.0),
            selector: SelectorConfig::default(),
            initial_direction: ArrowDirection::PointingLeft,
            backend: Backend::default(),
        }
    }
}

impl AppConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        let config_path = std::env::var(CONFIG_ENV).ok();
        let backend = std::env::var(BACKEND_ENV).ok();
        Self::from_vars(config_path.as_deref(), backend.as_deref())
    }

    /// Build a configuration from optional variable values.
    pub fn from_vars(config_path: Option<&str>, backend: Option<&str>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(path) = config_path.filter(|p| !p.is_empty()) {
            config.selector = SelectorConfig::load(path)?;
        }
        if let Some(backend) = backend.filter(|b| !b.is_empty()) {
            config.backend = backend.parse()?;
        }
        Ok(config)
    }

    /// Selector bounds centered in a viewport of the given logical size.
    pub fn selector_bounds(&self, viewport: kurbo::Size) -> kurbo::Rect {
        let width = self.selector_size.width.min(viewport.width).max(0.0);
        let height = self.selector_size.height.min(viewport.height).max(0.0);
        let origin = kurbo::Point::new(
            ((viewport.width - width) / 2.0).max(0.0),
            ((viewport.height - height) / 2.0).max(0.0),
        );
        kurbo::Rect::from_origin_size(origin, (width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.initial_direction, ArrowDirection::PointingLeft);
        assert_eq!(config.backend, Backend::Vello);
        assert!((config.selector.depth_of_cut - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("egui".parse::<Backend>().ok(), Some(Backend::Egui));
        assert_eq!(" Vello ".parse::<Backend>().ok(), Some(Backend::Vello));
        assert!(matches!(
            "skia".parse::<Backend>(),
            Err(AppError::UnknownBackend(name)) if name == "skia"
        ));
    }

    #[test]
    fn test_from_vars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"depth_of_cut": 12.0}}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = AppConfig::from_vars(Some(&path), Some("egui")).unwrap();
        assert!((config.selector.depth_of_cut - 12.0).abs() < f64::EPSILON);
        assert_eq!(config.backend, Backend::Egui);

        let config = AppConfig::from_vars(None, Some("")).unwrap();
        assert_eq!(config.backend, Backend::Vello);
    }

    #[test]
    fn test_from_vars_missing_file() {
        let result = AppConfig::from_vars(Some("/nonexistent/splitarrow.json"), None);
        assert!(matches!(result, Err(AppError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn test_from_vars_rejects_overlong_duration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"animation_duration": 1e20}}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let result = AppConfig::from_vars(Some(&path), None);
        assert!(matches!(result, Err(AppError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_selector_bounds_centered() {
        let config = AppConfig::default();
        let bounds = config.selector_bounds(kurbo::Size::new(640.0, 400.0));
        assert!((bounds.x0 - 160.0).abs() < 1e-9);
        assert!((bounds.y0 - 168.0).abs() < 1e-9);
        assert!((bounds.width() - 320.0).abs() < 1e-9);

        // Shrinks to fit a small window
        let bounds = config.selector_bounds(kurbo::Size::new(200.0, 40.0));
        assert!((bounds.width() - 200.0).abs() < 1e-9);
        assert!((bounds.height() - 40.0).abs() < 1e-9);
        assert!(bounds.x0.abs() < 1e-9);
    }
}
