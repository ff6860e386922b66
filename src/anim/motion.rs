//! Animated scalar values
//!
//! A `MotionValue` starts undefined, is given a value either directly or by
//! animating toward a target, and is advanced every frame by `step(dt)`.
//! Retargeting mid-flight starts from the current value (and, for springs,
//! the current velocity).

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::spring::{Spring, SpringParams};
use super::tween::Tween;

/// How a value travels to a new target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transition {
    Tween {
        /// Seconds
        duration: f32,
        #[serde(default)]
        easing: Easing,
    },
    Spring(SpringParams),
}

impl Transition {
    pub const fn tween(duration: f32, easing: Easing) -> Self {
        Transition::Tween { duration, easing }
    }

    pub const fn spring(stiffness: f32, damping: f32, mass: f32) -> Self {
        Transition::Spring(SpringParams::new(stiffness, damping, mass))
    }

    /// Same transition with all travel time removed
    pub fn instant(self) -> Self {
        match self {
            Transition::Tween { easing, .. } => Transition::Tween {
                duration: 0.0,
                easing,
            },
            Transition::Spring(_) => Transition::Tween {
                duration: 0.0,
                easing: Easing::Linear,
            },
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Transition::Spring(SpringParams::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Driver {
    Idle,
    Tween(Tween),
    Spring(Spring),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionValue {
    current: Option<f32>,
    velocity: f32,
    driver: Driver,
}

impl Default for MotionValue {
    fn default() -> Self {
        Self::undefined()
    }
}

impl MotionValue {
    /// A value that has never been set
    pub const fn undefined() -> Self {
        Self {
            current: None,
            velocity: 0.0,
            driver: Driver::Idle,
        }
    }

    pub const fn new(value: f32) -> Self {
        Self {
            current: Some(value),
            velocity: 0.0,
            driver: Driver::Idle,
        }
    }

    pub fn get(&self) -> Option<f32> {
        self.current
    }

    /// Current value, or `fallback` while undefined
    pub fn get_or(&self, fallback: f32) -> f32 {
        self.current.unwrap_or(fallback)
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Jump to `value`, cancelling any running animation
    pub fn set(&mut self, value: f32) {
        self.current = Some(value);
        self.velocity = 0.0;
        self.driver = Driver::Idle;
    }

    /// Target of the running animation, if any
    pub fn target(&self) -> Option<f32> {
        match self.driver {
            Driver::Idle => None,
            Driver::Tween(t) => Some(t.to),
            Driver::Spring(s) => Some(s.target),
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.driver, Driver::Idle)
    }

    /// Start travelling toward `target`. An undefined value jumps straight
    /// to the target since there is nothing to travel from.
    pub fn animate_to(&mut self, target: f32, transition: &Transition) {
        let Some(from) = self.current else {
            self.set(target);
            return;
        };

        if self.target() == Some(target) {
            return;
        }
        if !self.is_animating() && from == target {
            return;
        }

        self.driver = match *transition {
            Transition::Tween { duration, easing } => {
                let tween = Tween::new(from, target, duration, easing);
                if tween.is_done() {
                    self.set(target);
                    return;
                }
                Driver::Tween(tween)
            }
            Transition::Spring(params) => {
                let mut spring = match self.driver {
                    Driver::Spring(s) => s,
                    _ => Spring {
                        value: from,
                        velocity: self.velocity,
                        target,
                        params,
                    },
                };
                spring.params = params;
                spring.set_target(target);
                Driver::Spring(spring)
            }
        };
    }

    /// Advance the running animation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        match &mut self.driver {
            Driver::Idle => {}
            Driver::Tween(tween) => {
                let before = tween.value();
                tween.advance(dt);
                let after = tween.value();
                self.current = Some(after);
                self.velocity = if dt > 0.0 { (after - before) / dt } else { 0.0 };
                if tween.is_done() {
                    self.velocity = 0.0;
                    self.driver = Driver::Idle;
                }
            }
            Driver::Spring(spring) => {
                spring.step(dt);
                self.current = Some(spring.value);
                self.velocity = spring.velocity;
                if spring.is_at_rest() {
                    self.driver = Driver::Idle;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &mut MotionValue, seconds: f32) {
        for _ in 0..(seconds * 60.0) as usize {
            value.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_undefined_until_set() {
        let mut value = MotionValue::undefined();
        assert_eq!(value.get(), None);
        value.step(0.1);
        assert_eq!(value.get(), None);
        value.set(2.0);
        assert_eq!(value.get(), Some(2.0));
    }

    #[test]
    fn test_animate_from_undefined_jumps() {
        let mut value = MotionValue::undefined();
        value.animate_to(-5.0, &Transition::default());
        assert_eq!(value.get(), Some(-5.0));
        assert!(!value.is_animating());
    }

    #[test]
    fn test_tween_transition_lands_on_target() {
        let mut value = MotionValue::new(0.0);
        value.animate_to(1.0, &Transition::tween(0.8, Easing::EaseInOut));
        run(&mut value, 0.4);
        let mid = value.get().unwrap();
        assert!(mid > 0.0 && mid < 1.0);
        run(&mut value, 0.5);
        assert_eq!(value.get(), Some(1.0));
        assert!(!value.is_animating());
    }

    #[test]
    fn test_spring_transition_lands_on_target() {
        let mut value = MotionValue::new(0.0);
        value.animate_to(5.0, &Transition::spring(500.0, 50.0, 5.0));
        run(&mut value, 5.0);
        assert_eq!(value.get(), Some(5.0));
        assert!(!value.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut value = MotionValue::new(0.0);
        let transition = Transition::tween(1.0, Easing::Linear);
        value.animate_to(10.0, &transition);
        run(&mut value, 0.5);
        let halfway = value.get().unwrap();
        value.animate_to(0.0, &transition);
        value.step(0.0);
        assert!((value.get().unwrap() - halfway).abs() < 1e-4);
        run(&mut value, 1.1);
        assert_eq!(value.get(), Some(0.0));
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut value = MotionValue::new(0.0);
        let transition = Transition::tween(1.0, Easing::Linear);
        value.animate_to(1.0, &transition);
        run(&mut value, 0.5);
        value.animate_to(1.0, &transition);
        run(&mut value, 0.55);
        assert_eq!(value.get(), Some(1.0));
    }

    #[test]
    fn test_instant_transition() {
        let mut value = MotionValue::new(0.0);
        value.animate_to(3.0, &Transition::default().instant());
        assert_eq!(value.get(), Some(3.0));
    }

    #[test]
    fn test_transition_serde_shape() {
        let json = r#"{"type":"spring","stiffness":500.0,"damping":50.0,"mass":5.0}"#;
        let transition: Transition = serde_json::from_str(json).unwrap();
        assert_eq!(transition, Transition::spring(500.0, 50.0, 5.0));
    }
}
