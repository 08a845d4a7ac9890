//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use splitarrow_core::SelectorFrame;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Selectors to draw, in order.
    pub selectors: &'a [SelectorFrame],
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI). Selector geometry is in logical pixels.
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Stroke panel outlines in this color (debug aid).
    pub outline_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(selectors: &'a [SelectorFrame], viewport_size: Size) -> Self {
        Self {
            selectors,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            outline_color: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Outline every panel.
    pub fn with_outline(mut self, color: Option<Color>) -> Self {
        self.outline_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene for a frame.
    ///
    /// Called once per frame; should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
