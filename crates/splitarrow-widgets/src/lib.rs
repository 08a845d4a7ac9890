//! egui components for SplitArrow.
//!
//! - **Selector**: draws a [`splitarrow_core::SelectorView`] with the egui
//!   painter and routes clicks to it
//! - **Controls**: toggle buttons, direction picker, labels and frames used
//!   by the host's control panel

pub mod controls;
pub mod selector;

pub use controls::{direction_picker, panel_frame, section_label, separator, ToggleButton};
pub use selector::{paint_frame, to_color32, SelectorResponse, SelectorWidget};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Default selector height when embedded in a layout
    pub const SELECTOR_HEIGHT: f32 = 56.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
