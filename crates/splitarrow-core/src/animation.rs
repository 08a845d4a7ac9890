//! Explicit, clock-driven property animation.
//!
//! Nothing here runs on its own: an [`Animation`] records where a value
//! started, where it ends and when, and the host samples it once per frame.

use crate::easing::TimingFunction;
use crate::geometry::NotchPolygon;
use peniko::Color;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Values that can be tweened.
pub trait Interpolate: Clone {
    /// Blend from `self` (at `t = 0`) to `other` (at `t = 1`).
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for NotchPolygon {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolate for Color {
    /// Channel-wise blend in sRGB, alpha included.
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp_rect(*other, t as f32)
    }
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Move time forward by fractional seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.0)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A single value moving from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct Animation<T: Interpolate> {
    pub from: T,
    pub to: T,
    pub start: Instant,
    pub duration: Duration,
    pub timing: TimingFunction,
}

impl<T: Interpolate> Animation<T> {
    /// Create an animation starting at `start`.
    pub fn new(from: T, to: T, start: Instant, duration: Duration, timing: TimingFunction) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            timing,
        }
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Value at `now`, eased.
    pub fn sample(&self, now: Instant) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, self.timing.apply(progress))
    }

    /// Whether the animation has reached its end value.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A committed value with an optional animation layered on top.
///
/// The committed value is what the property *is*; the animation only
/// changes what is *presented* until it finishes.
#[derive(Debug, Clone)]
pub struct Animated<T: Interpolate> {
    value: T,
    animation: Option<Animation<T>>,
}

impl<T: Interpolate> Animated<T> {
    /// Create a settled value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    /// The committed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replace the committed value without animating; drops any animation.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.animation = None;
    }

    /// Commit `to` immediately and animate the presentation from `from`.
    pub fn animate(&mut self, from: T, to: T, start: Instant, duration: Duration, timing: TimingFunction) {
        self.value = to.clone();
        self.animation = Some(Animation::new(from, to, start, duration, timing));
    }

    /// Value to draw at `now`.
    pub fn presented(&self, now: Instant) -> T {
        match &self.animation {
            Some(animation) if !animation.is_finished(now) => animation.sample(now),
            _ => self.value.clone(),
        }
    }

    /// Whether an animation is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| !animation.is_finished(now))
    }

    /// Current animation, if any.
    pub fn animation(&self) -> Option<&Animation<T>> {
        self.animation.as_ref()
    }

    /// Re-seat both the committed value and a running animation's endpoints.
    pub fn retarget(&mut self, value: T, from: Option<T>) {
        self.value = value.clone();
        if let Some(animation) = &mut self.animation {
            animation.to = value;
            if let Some(from) = from {
                animation.from = from;
            }
        }
    }

    /// Drop the animation once it has finished.
    pub fn prune(&mut self, now: Instant) {
        if self.animation.as_ref().is_some_and(|a| a.is_finished(now)) {
            self.animation = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_sampling_linear() {
        let clock = ManualClock::new();
        let anim = Animation::new(0.0, 10.0, clock.now(), Duration::from_millis(100), TimingFunction::Linear);
        assert!(anim.sample(clock.now()).abs() < 1e-9);
        clock.advance(Duration::from_millis(50));
        assert!((anim.sample(clock.now()) - 5.0).abs() < 1e-6);
        clock.advance(Duration::from_millis(100));
        assert!((anim.sample(clock.now()) - 10.0).abs() < f64::EPSILON);
        assert!(anim.is_finished(clock.now()));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let clock = ManualClock::new();
        let anim = Animation::new(0.0, 1.0, clock.now(), Duration::ZERO, TimingFunction::EaseInOut);
        assert!(anim.is_finished(clock.now()));
        assert!((anim.sample(clock.now()) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_before_start_is_from() {
        let clock = ManualClock::new();
        let start = clock.now() + Duration::from_secs(1);
        let anim = Animation::new(2.0, 4.0, start, Duration::from_secs(1), TimingFunction::Linear);
        assert!((anim.sample(clock.now()) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_color_interpolation() {
        let black = Color::from_rgba8(0, 0, 0, 255);
        let white = Color::from_rgba8(255, 255, 255, 255);
        let mid = black.interpolate(&white, 0.5).to_rgba8();
        assert!((mid.r as i32 - 128).abs() <= 1);
        assert_eq!(mid.a, 255);
        assert_eq!(black.interpolate(&white, 1.0).to_rgba8(), white.to_rgba8());
    }

    #[test]
    fn test_animated_commits_immediately() {
        let clock = ManualClock::new();
        let mut value = Animated::new(0.0);
        value.animate(0.0, 1.0, clock.now(), Duration::from_millis(300), TimingFunction::EaseInOut);
        assert!((value.value() - 1.0).abs() < f64::EPSILON);
        assert!(value.presented(clock.now()).abs() < 1e-9);
        assert!(value.is_animating(clock.now()));

        clock.advance(Duration::from_millis(300));
        assert!(!value.is_animating(clock.now()));
        assert!((value.presented(clock.now()) - 1.0).abs() < f64::EPSILON);

        value.prune(clock.now());
        assert!(value.animation().is_none());
    }

    #[test]
    fn test_retarget_moves_running_animation() {
        let clock = ManualClock::new();
        let mut value = Animated::new(0.0);
        value.animate(0.0, 1.0, clock.now(), Duration::from_secs(1), TimingFunction::Linear);
        value.retarget(2.0, Some(1.0));
        clock.advance(Duration::from_millis(500));
        assert!((value.presented(clock.now()) - 1.5).abs() < 1e-6);
        assert!((value.value() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_drops_animation() {
        let clock = ManualClock::new();
        let mut value = Animated::new(0.0);
        value.animate(0.0, 1.0, clock.now(), Duration::from_secs(1), TimingFunction::Linear);
        value.set(3.0);
        assert!(!value.is_animating(clock.now()));
        assert!((value.presented(clock.now()) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let before = other.now();
        clock.advance_secs(0.25);
        assert_eq!(other.now() - before, Duration::from_millis(250));
    }
}
