//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Rect, Stroke};
use peniko::{Color, Fill};
use splitarrow_core::{PanelFrame, SelectorFrame};
use vello::Scene;

/// Vello-based renderer for selector frames.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_selector(&mut self, selector: &SelectorFrame, transform: Affine, outline: Option<Color>) {
        for panel in &selector.panels {
            self.render_panel(panel, transform, outline);
        }
    }

    /// Fill a panel's clip polygon with its presented color.
    fn render_panel(&mut self, panel: &PanelFrame, transform: Affine, outline: Option<Color>) {
        if panel.frame.is_zero_area() {
            return;
        }
        let path = panel.scene_path();
        self.scene.fill(Fill::NonZero, transform, panel.fill, None, &path);

        if let Some(color) = outline {
            self.scene.stroke(&Stroke::new(1.0), transform, color, None, &path);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let background = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            self.background_color(ctx),
            None,
            &background,
        );

        // Selector geometry is logical; the surface is physical
        let transform = Affine::scale(ctx.scale_factor);
        for selector in ctx.selectors {
            self.render_selector(selector, transform, ctx.outline_color);
        }
    }
}
