//! Easing curves for time-based tweens
//!
//! The named curves are the usual CSS cubic-bezier presets. `Power1Out` is
//! the quadratic ease-out used by the scroll-scrubbed background timeline.

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    Power1Out,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier (control points (x1,y1), (x2,y2)) at x = `t`
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |s: f32| ((ax * s + bx) * s + cx) * s;
    let sample_y = |s: f32| ((ay * s + by) * s + cy) * s;
    let slope_x = |s: f32| (3.0 * ax * s + 2.0 * bx) * s + cx;

    // Newton first, bisection if the slope flattens out
    let mut s = t;
    for _ in 0..8 {
        let err = sample_x(s) - t;
        if err.abs() < 1e-6 {
            return sample_y(s);
        }
        let d = slope_x(s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = sample_x(s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    sample_y(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Power1Out,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-3);
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_ease_out_leads_ease_in() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(Easing::EaseOut.apply(t) > t);
            assert!(Easing::EaseIn.apply(t) < t);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut, Easing::Power1Out] {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-5, "{easing:?} not monotonic at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_power1_out() {
        assert!((Easing::Power1Out.apply(0.5) - 0.75).abs() < 1e-6);
    }
}
