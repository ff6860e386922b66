//! Scene camera and the menu pan rig

use glam::{Mat4, Vec2, Vec3};

use crate::anim::{MotionValue, Transition};
use crate::consts::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, MENU_CAMERA_X, MENU_LOOK_AT_X};

/// Right-handed perspective camera
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            // Looking straight down -Z until the rig first aims it
            target: CAMERA_EYE - Vec3::Z,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Visible world-space (width, height) of a plane facing the camera at
    /// the distance of `point`
    pub fn viewport_at(&self, point: Vec3) -> Vec2 {
        let distance = self.eye.distance(point);
        let height = 2.0 * (self.fovy_radians / 2.0).tan() * distance;
        Vec2::new(height * self.aspect, height)
    }

    /// World-space ray through a pixel of a `size`-pixel canvas.
    ///
    /// Returns `(origin, direction)`.
    pub fn screen_ray(&self, pixel: Vec2, size: Vec2) -> (Vec3, Vec3) {
        let ndc_x = 2.0 * pixel.x / size.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * pixel.y / size.y.max(1.0);
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        (self.eye, (near - self.eye).normalize_or_zero())
    }
}

/// Pans the camera sideways while the menu is open
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    position_x: MotionValue,
    look_at_x: MotionValue,
}

impl CameraRig {
    /// Both channels stay undefined until the menu state is first applied
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_menu_opened(&mut self, opened: bool, transition: &Transition) {
        let (x, look) = if opened {
            (MENU_CAMERA_X, MENU_LOOK_AT_X)
        } else {
            (0.0, 0.0)
        };
        self.position_x.animate_to(x, transition);
        self.look_at_x.animate_to(look, transition);
    }

    pub fn step(&mut self, dt: f32) {
        self.position_x.step(dt);
        self.look_at_x.step(dt);
    }

    pub fn values(&self) -> Option<(f32, f32)> {
        Some((self.position_x.get()?, self.look_at_x.get()?))
    }

    /// Writes the pan into `camera`; returns false and leaves the camera
    /// untouched while either channel is undefined
    pub fn apply(&self, camera: &mut Camera) -> bool {
        let Some((x, look_x)) = self.values() else {
            return false;
        };
        camera.eye.x = x;
        camera.target = Vec3::new(look_x, 0.0, 0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_transition;

    #[test]
    fn test_undefined_rig_leaves_camera_alone() {
        let rig = CameraRig::new();
        let mut camera = Camera::default();
        let before = camera.clone();
        assert!(!rig.apply(&mut camera));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_menu_pan_and_return() {
        let transition = default_transition();
        let mut rig = CameraRig::new();
        let mut camera = Camera::default();

        rig.set_menu_opened(false, &transition);
        assert!(rig.apply(&mut camera));
        assert_eq!(camera.eye, Vec3::new(0.0, 3.0, 10.0));
        assert_eq!(camera.target, Vec3::ZERO);

        rig.set_menu_opened(true, &transition);
        rig.step(1.0 / 60.0);
        let (x, look) = rig.values().unwrap();
        assert!(x < 0.0 && x > -5.0);
        assert!(look > 0.0 && look < 5.0);

        for _ in 0..600 {
            rig.step(1.0 / 60.0);
        }
        rig.apply(&mut camera);
        assert_eq!(camera.eye.x, -5.0);
        assert_eq!(camera.target, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_viewport_at_origin() {
        let camera = Camera {
            aspect: 2.0,
            ..Camera::default()
        };
        let size = camera.viewport_at(Vec3::ZERO);
        let expected = 2.0 * (21.0_f32).to_radians().tan() * 109.0_f32.sqrt();
        assert!((size.y - expected).abs() < 1e-4);
        assert!((size.x - expected * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera {
            target: Vec3::ZERO,
            ..Camera::default()
        };
        let (origin, dir) = camera.screen_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert_eq!(origin, camera.eye);
        let expected = (Vec3::ZERO - camera.eye).normalize();
        assert!((dir - expected).length() < 1e-3);
    }
}
