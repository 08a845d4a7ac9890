//! Panel layout: two equal-width panels separated by a fixed gap.

use crate::direction::Panel;
use kurbo::{Point, Rect};

/// Frames of both panels, in the selector's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub left: Rect,
    pub right: Rect,
}

impl PanelLayout {
    /// Lay out both panels inside `bounds`.
    ///
    /// Each panel is `(bounds.width() - depth_of_cut) / 2` wide and spans
    /// the full height. The left panel is flush with the left edge, the right
    /// panel with the right edge. Widths are clamped at zero.
    pub fn compute(bounds: Rect, depth_of_cut: f64) -> Self {
        let panel_width = ((bounds.width() - depth_of_cut) / 2.0).max(0.0);
        let left = Rect::new(bounds.x0, bounds.y0, bounds.x0 + panel_width, bounds.y1);
        let right = Rect::new(bounds.x1 - panel_width, bounds.y0, bounds.x1, bounds.y1);
        Self { left, right }
    }

    /// Frame of a panel.
    pub fn frame(&self, panel: Panel) -> Rect {
        match panel {
            Panel::Left => self.left,
            Panel::Right => self.right,
        }
    }

    /// Panel whose frame contains `point`, if any. Points in the gap hit nothing.
    pub fn hit_test(&self, point: Point) -> Option<Panel> {
        Panel::ALL
            .into_iter()
            .find(|&panel| !self.frame(panel).is_zero_area() && self.frame(panel).contains(point))
    }

    /// The gap between the panels.
    pub fn gap(&self) -> Rect {
        Rect::new(self.left.x1, self.left.y0, self.right.x0, self.left.y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_widths_and_gap() {
        let layout = PanelLayout::compute(Rect::new(0.0, 0.0, 230.0, 50.0), 30.0);
        assert!((layout.left.width() - 100.0).abs() < f64::EPSILON);
        assert!((layout.right.width() - 100.0).abs() < f64::EPSILON);
        assert!((layout.gap().width() - 30.0).abs() < f64::EPSILON);
        assert!((layout.left.height() - 50.0).abs() < f64::EPSILON);
        assert!((layout.right.x1 - 230.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offset_bounds() {
        let layout = PanelLayout::compute(Rect::new(10.0, 20.0, 240.0, 70.0), 30.0);
        assert_eq!(layout.left, Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(layout.right, Rect::new(140.0, 20.0, 240.0, 70.0));
    }

    #[test]
    fn test_narrow_bounds_clamp() {
        let layout = PanelLayout::compute(Rect::new(0.0, 0.0, 20.0, 50.0), 30.0);
        assert!(layout.left.width().abs() < f64::EPSILON);
        assert!(layout.right.width().abs() < f64::EPSILON);
        assert_eq!(layout.hit_test(Point::new(0.0, 10.0)), None);
    }

    #[test]
    fn test_hit_test() {
        let layout = PanelLayout::compute(Rect::new(0.0, 0.0, 230.0, 50.0), 30.0);
        assert_eq!(layout.hit_test(Point::new(50.0, 25.0)), Some(Panel::Left));
        assert_eq!(layout.hit_test(Point::new(200.0, 25.0)), Some(Panel::Right));
        assert_eq!(layout.hit_test(Point::new(115.0, 25.0)), None);
        assert_eq!(layout.hit_test(Point::new(50.0, 80.0)), None);
    }
}
