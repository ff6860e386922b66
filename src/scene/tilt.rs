//! Pointer-follow tilt of the highlighted project card

use glam::Vec2;

use crate::anim::{Spring, SpringParams};
use crate::consts::{TILT_DAMPING, TILT_STIFFNESS};

pub const TILT_SPRING: SpringParams = SpringParams::new(TILT_STIFFNESS, TILT_DAMPING, 1.0);

/// Spring-damped (x, y) rotation offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    x: Spring,
    y: Spring,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            x: Spring::new(0.0, TILT_SPRING),
            y: Spring::new(0.0, TILT_SPRING),
        }
    }
}

impl Tilt {
    /// Aim at the normalized `pointer` while `active`, otherwise at rest
    pub fn set_target(&mut self, active: bool, pointer: Vec2, gain: f32) {
        let target = if active {
            // Vertical pointer motion tips the card around X and vice versa
            Vec2::new(pointer.y, pointer.x) * gain
        } else {
            Vec2::ZERO
        };
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    /// Current (rotation.x, rotation.y)
    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value, self.y.value)
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}
