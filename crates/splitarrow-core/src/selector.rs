//! The selector: two notched panels, one arrow direction.

use crate::animation::{Animated, Clock, SystemClock};
use crate::config::SelectorConfig;
use crate::direction::{ArrowDirection, Panel};
use crate::geometry::{mask_path, NotchPolygon};
use crate::gesture::TapRecognizer;
use crate::layout::PanelLayout;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

/// Receives selection changes made by the user.
pub trait SelectionDelegate {
    /// Called once per tap, after the direction has been applied.
    ///
    /// Redundant taps (on a panel that is already selected) are reported too.
    fn did_change_selection(&mut self, selector: &SelectorView, selected: ArrowDirection);
}

impl<F> SelectionDelegate for F
where
    F: FnMut(&SelectorView, ArrowDirection),
{
    fn did_change_selection(&mut self, selector: &SelectorView, selected: ArrowDirection) {
        self(selector, selected)
    }
}

/// Per-panel state.
#[derive(Debug, Clone)]
struct PanelState {
    frame: Rect,
    mask: Animated<NotchPolygon>,
    fill: Animated<Color>,
}

/// What to draw for one panel at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub panel: Panel,
    /// Panel frame in selector coordinates.
    pub frame: Rect,
    /// Presented clip polygon in panel-local coordinates.
    pub mask: NotchPolygon,
    /// Presented fill color.
    pub fill: Color,
}

impl PanelFrame {
    /// Clip polygon in selector coordinates.
    pub fn scene_polygon(&self) -> NotchPolygon {
        self.mask.translated(self.frame.origin().to_vec2())
    }

    /// Clip outline in selector coordinates.
    pub fn scene_path(&self) -> BezPath {
        self.scene_polygon().to_bez_path()
    }
}

/// A snapshot of everything needed to draw a selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorFrame {
    pub bounds: Rect,
    pub direction: ArrowDirection,
    pub panels: [PanelFrame; 2],
    /// Whether any animation was still running when the snapshot was taken.
    pub animating: bool,
}

impl SelectorFrame {
    pub fn panel(&self, panel: Panel) -> &PanelFrame {
        &self.panels[panel.index()]
    }
}

/// Two-pane arrow selector.
///
/// Owns the selection state and both panels. Changing the direction commits
/// the new masks and colors immediately and layers animations on top; the
/// host samples them through [`SelectorView::frame`].
pub struct SelectorView {
    bounds: Rect,
    config: SelectorConfig,
    direction: ArrowDirection,
    /// Direction the most recent transition started from.
    transition_from: ArrowDirection,
    layout: PanelLayout,
    panels: [PanelState; 2],
    taps: TapRecognizer,
    delegate: Option<Box<dyn SelectionDelegate>>,
    clock: Box<dyn Clock>,
}

impl SelectorView {
    /// Create a selector filling `bounds`, pointing right.
    pub fn new(bounds: Rect, config: SelectorConfig) -> Self {
        Self::with_clock(bounds, config, SystemClock)
    }

    /// Create a selector reading time from `clock`.
    pub fn with_clock(bounds: Rect, config: SelectorConfig, clock: impl Clock + 'static) -> Self {
        let direction = ArrowDirection::default();
        let layout = PanelLayout::compute(bounds, config.depth_of_cut);
        let panels = Panel::ALL.map(|panel| {
            let frame = layout.frame(panel);
            PanelState {
                frame,
                mask: Animated::new(mask_path(
                    frame.size(),
                    panel.position(),
                    direction,
                    config.depth_of_cut,
                )),
                fill: Animated::new(fill_for(&config, panel, direction)),
            }
        });

        Self {
            bounds,
            config,
            direction,
            transition_from: direction,
            layout,
            panels,
            taps: TapRecognizer::default(),
            delegate: None,
            clock: Box::new(clock),
        }
    }

    /// Current selection.
    pub fn current_direction(&self) -> ArrowDirection {
        self.direction
    }

    /// Change the selection programmatically.
    ///
    /// Does nothing if `direction` is already current; otherwise runs the
    /// transition. The delegate is not notified.
    pub fn set_current_direction(&mut self, direction: ArrowDirection) {
        if self.direction == direction {
            return;
        }
        let from = self.direction;
        self.direction = direction;
        self.transition(from, direction);
    }

    /// Animate both panels from the `from` arrangement to the `to` arrangement.
    ///
    /// New masks and fills are committed before this returns; the animations
    /// only affect what is presented. With `from == to` nothing visible
    /// changes.
    pub fn transition(&mut self, from: ArrowDirection, to: ArrowDirection) {
        let now = self.clock.now();
        let duration = self.config.duration();
        let timing = self.config.timing;
        let depth = self.config.depth_of_cut;

        log::debug!("Selector transition {:?} -> {:?}", from, to);

        for panel in Panel::ALL {
            let fill = fill_for(&self.config, panel, to);
            let state = &mut self.panels[panel.index()];
            let size = state.frame.size();
            let old_mask = mask_path(size, panel.position(), from, depth);
            let new_mask = mask_path(size, panel.position(), to, depth);
            state.mask.animate(old_mask, new_mask, now, duration, timing);

            let old_fill = *state.fill.value();
            state.fill.animate(old_fill, fill, now, duration, timing);
        }
        self.transition_from = from;
    }

    /// Selector bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the selector and lay the panels out again.
    pub fn set_frame(&mut self, bounds: Rect) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.layout();
    }

    /// Re-derive panel frames and re-seat their masks at the new size.
    ///
    /// Does not start an animation. A transition that is still running keeps
    /// going, with its endpoints recomputed for the new size.
    pub fn layout(&mut self) {
        let depth = self.config.depth_of_cut;
        self.layout = PanelLayout::compute(self.bounds, depth);

        for panel in Panel::ALL {
            let frame = self.layout.frame(panel);
            let state = &mut self.panels[panel.index()];
            state.frame = frame;
            let size = frame.size();
            state.mask.retarget(
                mask_path(size, panel.position(), self.direction, depth),
                Some(mask_path(size, panel.position(), self.transition_from, depth)),
            );
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Replace the configuration, re-laying out and re-coloring the panels.
    pub fn set_config(&mut self, config: SelectorConfig) {
        self.config = config;
        self.layout();
        for panel in Panel::ALL {
            let to = fill_for(&self.config, panel, self.direction);
            let from = fill_for(&self.config, panel, self.transition_from);
            self.panels[panel.index()].fill.retarget(to, Some(from));
        }
    }

    /// Panel frames.
    pub fn panel_layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Panel under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<Panel> {
        self.layout.hit_test(point)
    }

    /// Committed clip polygon of a panel, in panel-local coordinates.
    pub fn mask(&self, panel: Panel) -> NotchPolygon {
        *self.panels[panel.index()].mask.value()
    }

    /// Committed fill color of a panel.
    pub fn fill(&self, panel: Panel) -> Color {
        *self.panels[panel.index()].fill.value()
    }

    /// Register the delegate, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: impl SelectionDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Remove the delegate.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Handle a tap on a panel: select it and notify the delegate.
    pub fn tap(&mut self, panel: Panel) {
        let direction = panel.direction_on_tap();
        self.set_current_direction(direction);
        log::info!("{} panel tapped, {}", panel.name(), direction.name().to_lowercase());
        self.notify(direction);
    }

    /// Tap whichever panel lies under `point`.
    pub fn tap_at(&mut self, point: Point) -> Option<Panel> {
        let panel = self.hit_test(point)?;
        self.tap(panel);
        Some(panel)
    }

    /// Raw pointer press.
    pub fn pointer_down(&mut self, position: Point) {
        self.taps.pointer_down(&self.layout, position);
    }

    /// Raw pointer motion.
    pub fn pointer_moved(&mut self, position: Point) {
        self.taps.pointer_moved(position);
    }

    /// Raw pointer release. Dispatches the tap if one was recognized.
    pub fn pointer_up(&mut self, position: Point) -> Option<Panel> {
        let panel = self.taps.pointer_up(&self.layout, position)?;
        self.tap(panel);
        Some(panel)
    }

    /// Abandon a pending press.
    pub fn pointer_cancel(&mut self) {
        self.taps.cancel();
    }

    fn notify(&mut self, direction: ArrowDirection) {
        // Taken out for the call so the delegate can borrow the selector.
        if let Some(mut delegate) = self.delegate.take() {
            delegate.did_change_selection(self, direction);
            self.delegate = Some(delegate);
        }
    }

    /// Whether any panel is still animating.
    pub fn is_animating(&self) -> bool {
        let now = self.clock.now();
        self.panels
            .iter()
            .any(|p| p.mask.is_animating(now) || p.fill.is_animating(now))
    }

    /// Snapshot of what should be drawn right now.
    pub fn frame(&self) -> SelectorFrame {
        let now = self.clock.now();
        let panels = Panel::ALL.map(|panel| {
            let state = &self.panels[panel.index()];
            PanelFrame {
                panel,
                frame: state.frame,
                mask: state.mask.presented(now),
                fill: state.fill.presented(now),
            }
        });
        SelectorFrame {
            bounds: self.bounds,
            direction: self.direction,
            panels,
            animating: self.is_animating(),
        }
    }

    /// Drop finished animations. Call once per frame.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for state in &mut self.panels {
            state.mask.prune(now);
            state.fill.prune(now);
        }
    }
}

/// Fill color of `panel` when the arrow points `direction`.
fn fill_for(config: &SelectorConfig, panel: Panel, direction: ArrowDirection) -> Color {
    if direction.target_panel() == panel {
        config.dark()
    } else {
        config.light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualClock;
    use crate::direction::ArrowPosition;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn selector() -> (SelectorView, ManualClock) {
        let clock = ManualClock::new();
        let view = SelectorView::with_clock(
            Rect::new(0.0, 0.0, 230.0, 50.0),
            SelectorConfig::default(),
            clock.clone(),
        );
        (view, clock)
    }

    fn recorder(view: &mut SelectorView) -> Rc<RefCell<Vec<ArrowDirection>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        view.set_delegate(move |selector: &SelectorView, selected: ArrowDirection| {
            assert_eq!(selector.current_direction(), selected);
            sink.borrow_mut().push(selected);
        });
        events
    }

    fn light() -> Color {
        SelectorConfig::default().light()
    }

    fn dark() -> Color {
        SelectorConfig::default().dark()
    }

    #[test]
    fn test_initial_state() {
        let (view, _) = selector();
        assert_eq!(view.current_direction(), ArrowDirection::PointingRight);
        assert_eq!(view.fill(Panel::Left), light());
        assert_eq!(view.fill(Panel::Right), dark());
        assert!(!view.is_animating());
        assert_eq!(
            view.mask(Panel::Right),
            mask_path(
                kurbo::Size::new(100.0, 50.0),
                ArrowPosition::RightSide,
                ArrowDirection::PointingRight,
                30.0
            )
        );
    }

    #[test]
    fn test_tap_right_from_default() {
        let (mut view, _) = selector();
        let events = recorder(&mut view);

        view.tap(Panel::Right);

        assert_eq!(view.current_direction(), ArrowDirection::PointingLeft);
        assert_eq!(*events.borrow(), vec![ArrowDirection::PointingLeft]);
        assert_eq!(view.fill(Panel::Right), light());
        assert_eq!(view.fill(Panel::Left), dark());
    }

    #[test]
    fn test_redundant_taps_notify_each_time() {
        let (mut view, _) = selector();
        let events = recorder(&mut view);

        view.tap(Panel::Left);
        view.tap(Panel::Left);

        assert_eq!(view.current_direction(), ArrowDirection::PointingRight);
        assert_eq!(
            *events.borrow(),
            vec![ArrowDirection::PointingRight, ArrowDirection::PointingRight]
        );
        assert!(!view.is_animating());
    }

    #[test]
    fn test_programmatic_write_does_not_notify() {
        let (mut view, _) = selector();
        let events = recorder(&mut view);

        view.set_current_direction(ArrowDirection::PointingLeft);

        assert_eq!(view.current_direction(), ArrowDirection::PointingLeft);
        assert!(events.borrow().is_empty());
        assert!(view.is_animating());
    }

    #[test]
    fn test_same_direction_write_is_noop() {
        let (mut view, _) = selector();
        view.set_current_direction(ArrowDirection::PointingRight);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_idempotent_transition() {
        let (mut view, clock) = selector();
        let masks = Panel::ALL.map(|p| view.mask(p));
        let fills = Panel::ALL.map(|p| view.fill(p));

        view.transition(ArrowDirection::PointingRight, ArrowDirection::PointingRight);

        assert_eq!(Panel::ALL.map(|p| view.mask(p)), masks);
        assert_eq!(Panel::ALL.map(|p| view.fill(p)), fills);
        clock.advance_secs(0.1);
        let frame = view.frame();
        for panel in Panel::ALL {
            assert_eq!(frame.panel(panel).mask, masks[panel.index()]);
            assert_eq!(frame.panel(panel).fill, fills[panel.index()]);
        }
    }

    #[test]
    fn test_animation_presents_intermediate_geometry() {
        let (mut view, clock) = selector();
        view.tap(Panel::Right);

        // Committed immediately, presented from the old shape
        let start = view.frame();
        assert!(start.animating);
        assert!((start.panel(Panel::Right).mask.tip().x - 30.0).abs() < 1e-9);
        assert_eq!(start.panel(Panel::Right).fill, dark());
        assert!(view.mask(Panel::Right).tip().x.abs() < 1e-9);

        clock.advance_secs(0.15);
        let mid = view.frame();
        let tip = mid.panel(Panel::Right).mask.tip().x;
        assert!(tip > 0.0 && tip < 30.0, "tip at {}", tip);

        clock.advance_secs(0.2);
        let end = view.frame();
        assert!(!end.animating);
        assert!(end.panel(Panel::Right).mask.tip().x.abs() < 1e-9);
        assert_eq!(end.panel(Panel::Right).fill, light());
        assert_eq!(end.panel(Panel::Left).fill, dark());

        view.tick();
        assert!(!view.is_animating());
    }

    #[test]
    fn test_layout_reseats_without_animating() {
        let (mut view, _) = selector();
        view.set_frame(Rect::new(0.0, 0.0, 430.0, 80.0));

        assert!(!view.is_animating());
        assert_eq!(view.panel_layout().left.width(), 200.0);
        let right = view.mask(Panel::Right);
        assert_eq!(right.points()[0], Point::new(200.0, 0.0));
        assert_eq!(right.tip(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_layout_mid_animation_retargets() {
        let (mut view, clock) = selector();
        view.set_current_direction(ArrowDirection::PointingLeft);
        view.set_frame(Rect::new(0.0, 0.0, 430.0, 80.0));
        assert!(view.is_animating());

        clock.advance_secs(1.0);
        let frame = view.frame();
        assert_eq!(frame.panel(Panel::Left).mask.tip(), Point::new(170.0, 40.0));
    }

    #[test]
    fn test_panels_mirror_about_gap_midpoint() {
        let (view, _) = selector();
        let center = view.bounds().center().x;
        for direction in [ArrowDirection::PointingRight, ArrowDirection::PointingLeft] {
            let mut a = SelectorView::new(view.bounds(), SelectorConfig::default());
            let mut b = SelectorView::new(view.bounds(), SelectorConfig::default());
            a.set_current_direction(direction);
            b.set_current_direction(direction.opposite());
            a.tick();
            let left = a.frame().panel(Panel::Left).frame;
            let left_poly = a.mask(Panel::Left).translated(left.origin().to_vec2());
            let right = b.frame().panel(Panel::Right).frame;
            let right_poly = b.mask(Panel::Right).translated(right.origin().to_vec2());
            assert_eq!(left_poly.mirrored(2.0 * center), right_poly);
        }
    }

    #[test]
    fn test_pointer_tap_dispatch() {
        let (mut view, _) = selector();
        let events = recorder(&mut view);

        view.pointer_down(Point::new(200.0, 25.0));
        assert_eq!(view.pointer_up(Point::new(201.0, 25.0)), Some(Panel::Right));

        view.pointer_down(Point::new(115.0, 25.0));
        assert_eq!(view.pointer_up(Point::new(115.0, 25.0)), None);

        assert_eq!(*events.borrow(), vec![ArrowDirection::PointingLeft]);
    }

    #[test]
    fn test_tap_at() {
        let (mut view, _) = selector();
        assert_eq!(view.tap_at(Point::new(10.0, 10.0)), Some(Panel::Left));
        assert_eq!(view.tap_at(Point::new(115.0, 10.0)), None);
        assert_eq!(view.current_direction(), ArrowDirection::PointingRight);
    }

    #[test]
    fn test_set_config_recolors_and_relayouts() {
        let (mut view, _) = selector();
        let config = SelectorConfig {
            depth_of_cut: 10.0,
            light_color: crate::config::SerializableColor::gray(250),
            ..Default::default()
        };
        view.set_config(config);
        assert_eq!(view.panel_layout().left.width(), 110.0);
        assert_eq!(view.fill(Panel::Left).to_rgba8().r, 250);
        assert_eq!(view.mask(Panel::Right).tip(), Point::new(10.0, 25.0));
    }

    #[test]
    fn test_delegate_replaced_and_cleared() {
        let (mut view, _) = selector();
        let first = recorder(&mut view);
        let second = recorder(&mut view);
        view.tap(Panel::Right);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);

        view.clear_delegate();
        assert!(!view.has_delegate());
        view.tap(Panel::Left);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_retap_mid_animation_restarts_from_committed_target() {
        let (mut view, clock) = selector();
        let events = recorder(&mut view);

        view.tap(Panel::Right);
        clock.advance_secs(0.1);
        view.tap(Panel::Left);

        // The new transition starts from the PointingLeft arrangement
        let start = view.frame();
        assert!(start.animating);
        assert!(start.panel(Panel::Right).mask.tip().x.abs() < 1e-9);
        assert!((start.panel(Panel::Left).mask.tip().x - 70.0).abs() < 1e-9);
        assert_eq!(start.panel(Panel::Left).fill, dark());
        assert_eq!(start.panel(Panel::Right).fill, light());

        clock.advance_secs(0.3);
        let end = view.frame();
        assert!(!end.animating);
        assert_eq!(view.current_direction(), ArrowDirection::PointingRight);
        assert!((end.panel(Panel::Right).mask.tip().x - 30.0).abs() < 1e-9);
        assert!((end.panel(Panel::Left).mask.tip().x - 100.0).abs() < 1e-9);
        assert_eq!(end.panel(Panel::Left).fill, light());
        assert_eq!(end.panel(Panel::Right).fill, dark());
        assert_eq!(
            *events.borrow(),
            vec![ArrowDirection::PointingLeft, ArrowDirection::PointingRight]
        );
    }

    #[test]
    fn test_set_config_retargets_running_fill() {
        let (mut view, clock) = selector();
        view.tap(Panel::Right);

        let black = crate::config::SerializableColor::gray(0);
        view.set_config(SelectorConfig {
            dark_color: black,
            ..Default::default()
        });

        // Still animating, now from the light color toward the new dark one
        assert!(view.is_animating());
        assert_eq!(view.frame().panel(Panel::Left).fill, light());
        assert_eq!(view.fill(Panel::Left), Color::from(black));

        clock.advance_secs(0.3);
        let end = view.frame();
        assert!(!end.animating);
        assert_eq!(end.panel(Panel::Left).fill, Color::from(black));
        assert_eq!(end.panel(Panel::Right).fill, light());
    }

    #[test]
    fn test_overlong_duration_does_not_panic() {
        let clock = ManualClock::new();
        let config = SelectorConfig {
            animation_duration: 1e20,
            ..Default::default()
        };
        let mut view =
            SelectorView::with_clock(Rect::new(0.0, 0.0, 230.0, 50.0), config, clock.clone());
        view.tap(Panel::Right);
        assert!(view.is_animating());

        clock.advance_secs(60.0);
        assert!(!view.is_animating());
        assert_eq!(view.frame().panel(Panel::Left).fill, dark());
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let clock = ManualClock::new();
        let config = SelectorConfig {
            animation_duration: 0.0,
            ..Default::default()
        };
        let mut view = SelectorView::with_clock(Rect::new(0.0, 0.0, 230.0, 50.0), config, clock);
        view.tap(Panel::Right);
        assert!(!view.is_animating());
        assert_eq!(view.frame().panel(Panel::Left).fill, dark());
    }
}
