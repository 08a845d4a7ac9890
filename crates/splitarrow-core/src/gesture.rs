//! Tap recognition from raw pointer events.

use crate::direction::Panel;
use crate::layout::PanelLayout;
use kurbo::Point;

/// Maximum pointer travel between press and release for a tap, in logical px.
pub const DEFAULT_TAP_SLOP: f64 = 10.0;

/// Recognizes single taps on either panel.
///
/// A tap is a press and a release on the same panel with the pointer moving
/// no further than the slop radius in between.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    slop: f64,
    pressed: Option<(Panel, Point)>,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_TAP_SLOP)
    }
}

impl TapRecognizer {
    /// Create a recognizer with a custom slop radius.
    pub fn new(slop: f64) -> Self {
        Self {
            slop,
            pressed: None,
        }
    }

    /// Pointer went down. Returns the panel under it, if any.
    pub fn pointer_down(&mut self, layout: &PanelLayout, position: Point) -> Option<Panel> {
        self.pressed = layout.hit_test(position).map(|panel| (panel, position));
        self.pressed.map(|(panel, _)| panel)
    }

    /// Pointer moved. A press that wanders past the slop is abandoned.
    pub fn pointer_moved(&mut self, position: Point) {
        if let Some((_, start)) = self.pressed {
            if start.distance(position) > self.slop {
                self.pressed = None;
            }
        }
    }

    /// Pointer went up. Returns the tapped panel if this completed a tap.
    pub fn pointer_up(&mut self, layout: &PanelLayout, position: Point) -> Option<Panel> {
        let (panel, start) = self.pressed.take()?;
        if start.distance(position) > self.slop {
            return None;
        }
        (layout.hit_test(position) == Some(panel)).then_some(panel)
    }

    /// Drop any pending press (pointer left the window, touch cancelled).
    pub fn cancel(&mut self) {
        self.pressed = None;
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn layout() -> PanelLayout {
        PanelLayout::compute(Rect::new(0.0, 0.0, 230.0, 50.0), 30.0)
    }

    #[test]
    fn test_tap_on_left() {
        let mut taps = TapRecognizer::default();
        assert_eq!(taps.pointer_down(&layout(), Point::new(40.0, 20.0)), Some(Panel::Left));
        assert_eq!(taps.pointer_up(&layout(), Point::new(42.0, 21.0)), Some(Panel::Left));
        assert!(!taps.is_pressed());
    }

    #[test]
    fn test_release_on_other_panel_is_not_a_tap() {
        let mut taps = TapRecognizer::new(500.0);
        taps.pointer_down(&layout(), Point::new(90.0, 20.0));
        assert_eq!(taps.pointer_up(&layout(), Point::new(140.0, 20.0)), None);
    }

    #[test]
    fn test_drag_beyond_slop_cancels() {
        let mut taps = TapRecognizer::default();
        taps.pointer_down(&layout(), Point::new(160.0, 20.0));
        taps.pointer_moved(Point::new(190.0, 20.0));
        assert!(!taps.is_pressed());
        assert_eq!(taps.pointer_up(&layout(), Point::new(160.0, 20.0)), None);
    }

    #[test]
    fn test_press_in_gap_ignored() {
        let mut taps = TapRecognizer::default();
        assert_eq!(taps.pointer_down(&layout(), Point::new(115.0, 20.0)), None);
        assert_eq!(taps.pointer_up(&layout(), Point::new(115.0, 20.0)), None);
    }

    #[test]
    fn test_up_without_down() {
        let mut taps = TapRecognizer::default();
        assert_eq!(taps.pointer_up(&layout(), Point::new(40.0, 20.0)), None);
    }

    #[test]
    fn test_cancel() {
        let mut taps = TapRecognizer::default();
        taps.pointer_down(&layout(), Point::new(200.0, 20.0));
        taps.cancel();
        assert_eq!(taps.pointer_up(&layout(), Point::new(200.0, 20.0)), None);
    }
}
