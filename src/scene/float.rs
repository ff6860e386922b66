//! Bobbing decorative shapes of the skills group
//!
//! Each shape sways around its rest pose on a slow sine, phase-shifted by a
//! seeded random offset so the three never move in lockstep.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Fixed seed keeps the phases identical between page loads
pub const FLOAT_SEED: u64 = 0x5ca1_ab1e;

const MAX_PHASE: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Cube,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingShape {
    pub kind: ShapeKind,
    pub color: Vec3,
    pub opacity: f32,
    /// Rest position inside the skills group
    pub position: Vec3,
    pub scale: f32,
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    phase: f32,
}

impl FloatingShape {
    fn new(kind: ShapeKind, color: Vec3, position: Vec3, scale: f32, phase: f32) -> Self {
        Self {
            kind,
            color,
            opacity: 0.8,
            position,
            scale,
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
            phase,
        }
    }

    /// (vertical offset, euler rotation) at `time` seconds
    pub fn sway(&self, time: f32) -> (f32, Vec3) {
        let t = (self.phase + time) / 4.0 * self.speed;
        let rotation = Vec3::new(t.cos() / 8.0, t.sin() / 8.0, t.sin() / 20.0) * self.rotation_intensity;
        (t.sin() / 10.0 * self.float_intensity, rotation)
    }

    /// Local matrix at `time`; `animate = false` gives the rest pose
    pub fn matrix(&self, time: f32, animate: bool) -> Mat4 {
        let (lift, rotation) = if animate {
            self.sway(time)
        } else {
            (0.0, Vec3::ZERO)
        };
        let sway = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
            Vec3::new(0.0, lift, 0.0),
        );
        sway * Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), Quat::IDENTITY, self.position)
    }
}

/// The red sphere, yellow sphere and blue cube
pub fn skills_shapes(seed: u64) -> Vec<FloatingShape> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut phase = || rng.random_range(0.0..MAX_PHASE);
    vec![
        FloatingShape::new(ShapeKind::Sphere, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, -3.0, -15.0), 2.0, phase()),
        FloatingShape::new(ShapeKind::Sphere, Vec3::new(1.0, 1.0, 0.0), Vec3::new(3.0, 1.0, -18.0), 3.0, phase()),
        FloatingShape::new(ShapeKind::Cube, Vec3::new(0.0, 0.0, 1.0), Vec3::new(-3.0, -1.0, -11.0), 1.4, phase()),
    ]
}
