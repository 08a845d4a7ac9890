//! Timing curves for transitions.

use serde::{Deserialize, Serialize};

/// Maps linear progress in `[0, 1]` to eased progress.
///
/// The named curves are the standard cubic-bezier presets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TimingFunction {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// Custom curve through control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

impl TimingFunction {
    /// Control points of the curve, `None` for linear.
    pub fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            TimingFunction::Linear => None,
            TimingFunction::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            TimingFunction::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            TimingFunction::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Eased value for `progress`, clamped to `[0, 1]` on input.
    pub fn apply(self, progress: f64) -> f64 {
        let x = if progress.is_nan() { 1.0 } else { progress.clamp(0.0, 1.0) };
        match self.control_points() {
            None => x,
            Some((x1, y1, x2, y2)) => {
                if x <= 0.0 {
                    return 0.0;
                }
                if x >= 1.0 {
                    return 1.0;
                }
                // x1/x2 outside [0, 1] would make x(t) non-monotonic
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let t = solve_curve_x(x, x1, x2);
                bezier(t, y1, y2)
            }
        }
    }
}

/// One-dimensional cubic bezier from 0 to 1 with inner control values `a`, `b`.
fn bezier(t: f64, a: f64, b: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * a + 3.0 * mt * t * t * b + t * t * t
}

fn bezier_derivative(t: f64, a: f64, b: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * a + 6.0 * mt * t * (b - a) + 3.0 * t * t * (1.0 - b)
}

/// Find `t` such that `bezier(t, x1, x2) == x`.
fn solve_curve_x(x: f64, x1: f64, x2: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut t = x;
    for _ in 0..8 {
        let err = bezier(t, x1, x2) - x;
        if err.abs() < EPSILON {
            return t;
        }
        let d = bezier_derivative(t, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled, fall back to bisection
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let value = bezier(t, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}
