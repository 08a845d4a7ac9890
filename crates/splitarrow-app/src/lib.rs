//! SplitArrow Application
//!
//! The host window: winit event loop, Vello scene for the selector, egui
//! control overlay, and the host screen that receives selection callbacks.

mod app;
mod config;
mod host;
mod ui;

pub use app::App;
pub use config::{AppConfig, AppError, AppResult, Backend, BACKEND_ENV, CONFIG_ENV};
pub use host::{selection_message, HostScreen, SelectionEntry, SelectionLog};
pub use ui::{render_ui, UiAction, UiState};
