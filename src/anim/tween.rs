//! Fixed-duration tween between two scalars

use super::easing::Easing;
use crate::lerp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds
    pub duration: f32,
    /// Seconds since start (may include a start delay as negative time)
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Tween that holds `from` for `delay` seconds before starting
    pub fn delayed(from: f32, to: f32, duration: f32, delay: f32, easing: Easing) -> Self {
        Self {
            elapsed: -delay.max(0.0),
            ..Self::new(from, to, duration, easing)
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.elapsed <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn value(&self) -> f32 {
        if self.is_done() {
            return self.to;
        }
        lerp(self.from, self.to, self.easing.apply(self.progress()))
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= 0.0 && self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = Tween::new(0.0, 10.0, 0.6, Easing::EaseOut);
        for _ in 0..40 {
            tween.advance(1.0 / 60.0);
        }
        assert!(tween.is_done());
        assert_eq!(tween.value(), 10.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = Tween::new(3.0, -2.0, 0.0, Easing::Linear);
        assert!(tween.is_done());
        assert_eq!(tween.value(), -2.0);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut tween = Tween::delayed(0.0, 1.0, 1.0, 0.6, Easing::Linear);
        tween.advance(0.5);
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.is_done());
        tween.advance(0.6);
        assert!((tween.value() - 0.5).abs() < 1e-5);
        tween.advance(0.5);
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_linear_midpoint() {
        let mut tween = Tween::new(-4.0, 4.0, 2.0, Easing::Linear);
        tween.advance(1.0);
        assert!(tween.value().abs() < 1e-6);
    }
}
