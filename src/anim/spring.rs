//! Damped spring integrator
//!
//! Integrated with semi-implicit Euler in fixed sub-steps so large frame
//! times stay stable. Once both displacement and speed drop below the rest
//! thresholds the spring snaps exactly onto its target.

use serde::{Deserialize, Serialize};

/// Longest integration sub-step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Displacement under which the spring may come to rest
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f32,
    /// Speed under which the spring may come to rest
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
}

fn default_rest_delta() -> f32 {
    1e-3
}

fn default_rest_speed() -> f32 {
    1e-2
}

impl SpringParams {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 1e-3,
            rest_speed: 1e-2,
        }
    }

    pub const fn with_rest_delta(mut self, rest_delta: f32) -> Self {
        self.rest_delta = rest_delta;
        self
    }

    /// damping / (2 * sqrt(stiffness * mass)); 1.0 is critical
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        // Stock spring of the motion library the scene was designed against
        Self::new(100.0, 10.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    pub params: SpringParams,
}

impl Spring {
    pub fn new(value: f32, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Retarget without touching the current value or velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_at_rest() {
            return;
        }

        let SpringParams {
            stiffness,
            damping,
            mass,
            rest_delta,
            rest_speed,
        } = self.params;
        let mass = mass.max(1e-4);

        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }

        if (self.value - self.target).abs() <= rest_delta && self.velocity.abs() <= rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_exactly_on_target() {
        let mut spring = Spring::new(0.0, SpringParams::new(60.0, 10.0, 1.0));
        spring.set_target(0.6);
        settle(&mut spring, 5.0);
        assert_eq!(spring.value, 0.6);
        assert_eq!(spring.velocity, 0.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let params = SpringParams::new(60.0, 10.0, 1.0);
        assert!(params.damping_ratio() < 1.0);
        let mut spring = Spring::new(0.0, params);
        spring.set_target(1.0);
        let mut peak = 0.0_f32;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value);
        }
        assert!(peak > 1.0, "peak {peak} should overshoot");
    }

    #[test]
    fn test_large_dt_stays_stable() {
        let mut spring = Spring::new(0.0, SpringParams::new(500.0, 50.0, 5.0));
        spring.set_target(-5.0);
        spring.step(0.5);
        assert!(spring.value.is_finite());
        assert!(spring.value.abs() < 20.0);
        settle(&mut spring, 5.0);
        assert_eq!(spring.value, -5.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(0.0, SpringParams::default());
        spring.set_target(1.0);
        spring.step(0.05);
        let v = spring.velocity;
        assert!(v > 0.0);
        spring.set_target(0.0);
        assert_eq!(spring.velocity, v);
    }
}
