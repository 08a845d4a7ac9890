//! UI components using egui.

use egui::{Align2, Context, Id, Vec2};
use splitarrow_core::config::MAX_ANIMATION_DURATION;
use splitarrow_core::{ArrowDirection, SelectorConfig, SelectorView};
use splitarrow_widgets::{
    direction_picker, panel_frame, section_label, separator, theme, SelectorWidget, ToggleButton,
};

use crate::config::{AppConfig, Backend};
use crate::host::SelectionLog;

/// Number of log entries shown in the controls panel.
const VISIBLE_LOG_ENTRIES: usize = 6;

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Set the direction programmatically (animates, does not notify).
    SetDirection(ArrowDirection),
    /// Change the depth of cut.
    SetDepth(f64),
    /// Change the transition duration in seconds.
    SetDuration(f64),
    /// Clear the selection log.
    ClearLog,
}

impl UiAction {
    /// Apply this action to the selector and log.
    pub fn apply(self, view: &mut SelectorView, log: &mut SelectionLog) {
        match self {
            UiAction::SetDirection(direction) => view.set_current_direction(direction),
            UiAction::SetDepth(depth) => {
                let config = SelectorConfig {
                    depth_of_cut: depth.max(0.0),
                    ..view.config().clone()
                };
                view.set_config(config);
            }
            UiAction::SetDuration(seconds) => {
                let config = SelectorConfig {
                    animation_duration: seconds.clamp(0.0, MAX_ANIMATION_DURATION),
                    ..view.config().clone()
                };
                view.set_config(config);
            }
            UiAction::ClearLog => log.clear(),
        }
    }
}

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Stroke panel outlines.
    pub show_outline: bool,
    /// Slider value for the depth of cut.
    pub depth_of_cut: f64,
    /// Slider value for the transition duration.
    pub animation_duration: f64,
}

impl UiState {
    /// Seed slider values from a selector config.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            show_outline: false,
            depth_of_cut: config.depth_of_cut,
            animation_duration: config.animation_duration,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

/// Render the UI and return any triggered action.
///
/// With the egui backend the selector itself is drawn here too; taps on it
/// reach the delegate directly.
pub fn render_ui(
    ctx: &Context,
    ui_state: &mut UiState,
    view: &mut SelectorView,
    log: &SelectionLog,
    config: &AppConfig,
) -> Option<UiAction> {
    if config.backend == Backend::Egui {
        render_selector(ctx, ui_state, view, config);
    }
    render_controls(ctx, ui_state, view, log)
}

fn render_selector(ctx: &Context, ui_state: &UiState, view: &mut SelectorView, config: &AppConfig) {
    let size = Vec2::new(
        config.selector_size.width as f32,
        config.selector_size.height as f32,
    );
    egui::Area::new(Id::new("selector"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            let mut widget = SelectorWidget::new(view).size(size);
            if ui_state.show_outline {
                widget = widget.outline(theme::ACCENT);
            }
            widget.show(ui);
        });
}

fn render_controls(
    ctx: &Context,
    ui_state: &mut UiState,
    view: &SelectorView,
    log: &SelectionLog,
) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(Id::new("controls"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_max_width(220.0);

                section_label(ui, "Direction");
                if let Some(direction) = direction_picker(ui, view.current_direction()) {
                    action = Some(UiAction::SetDirection(direction));
                }
                let status = if view.is_animating() {
                    format!("{} (animating)", view.current_direction().name())
                } else {
                    view.current_direction().name().to_string()
                };
                ui.label(egui::RichText::new(status).size(11.0));

                separator(ui);

                section_label(ui, "Depth of cut");
                let depth = egui::Slider::new(&mut ui_state.depth_of_cut, 0.0..=80.0).suffix(" px");
                if ui.add(depth).changed() {
                    action = Some(UiAction::SetDepth(ui_state.depth_of_cut));
                }

                section_label(ui, "Animation");
                let duration =
                    egui::Slider::new(&mut ui_state.animation_duration, 0.0..=2.0).suffix(" s");
                if ui.add(duration).changed() {
                    action = Some(UiAction::SetDuration(ui_state.animation_duration));
                }

                ui.checkbox(&mut ui_state.show_outline, "Outline panels");

                separator(ui);

                ui.horizontal(|ui| {
                    section_label(ui, &format!("Selections ({})", log.total()));
                    if ToggleButton::new("Clear", false).show(ui) {
                        action = Some(UiAction::ClearLog);
                    }
                });
                if log.entries().is_empty() {
                    ui.label(
                        egui::RichText::new("Tap a panel")
                            .size(11.0)
                            .color(theme::TEXT_MUTED),
                    );
                }
                for entry in log.entries().iter().rev().take(VISIBLE_LOG_ENTRIES) {
                    ui.label(egui::RichText::new(&entry.message).size(11.0));
                }
            });
        });

    action
}
