//! SplitArrow Core Library
//!
//! Platform-agnostic state, geometry and animation for the two-pane arrow
//! selector. Nothing here draws or owns a window; hosts feed it layout and
//! pointer events and sample [`SelectorView::frame`] once per frame.

pub mod animation;
pub mod config;
pub mod direction;
pub mod easing;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod selector;

pub use animation::{Animated, Animation, Clock, Interpolate, ManualClock, SystemClock};
pub use config::{ConfigError, ConfigResult, SelectorConfig, SerializableColor};
pub use direction::{ArrowDirection, ArrowPosition, Panel};
pub use easing::TimingFunction;
pub use geometry::{mask_path, NotchPolygon};
pub use gesture::TapRecognizer;
pub use layout::PanelLayout;
pub use selector::{PanelFrame, SelectionDelegate, SelectorFrame, SelectorView};
