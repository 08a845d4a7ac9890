//! SplitArrow Render Library
//!
//! Renderer abstraction for selector frames. The default implementation
//! builds a Vello scene.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, Renderer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
