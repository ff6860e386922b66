//! Scrollfolio - a scroll-driven 3D portfolio scene
//!
//! Core modules:
//! - `anim`: Frame-stepped tweens, springs and motion values
//! - `scene`: Scroll → section state machine, transform tables, camera rig,
//!   character clip scheduling, projects carousel
//! - `content`: Static portfolio content, reveal timing, contact form
//! - `renderer`: WebGPU rendering of placeholder scene geometry
//! - `platform`: Browser glue (wasm32 only)
//! - `settings`: Persisted user preferences

pub mod anim;
pub mod content;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use settings::{QualityPreset, Settings};

use glam::{Vec2, Vec3};

/// Scene configuration constants
pub mod consts {
    use super::Vec3;

    /// Number of scroll pages (one per section)
    pub const PAGE_COUNT: usize = 4;
    /// Exponential damping applied to the raw scroll offset
    pub const SCROLL_DAMPING: f32 = 0.1;

    /// Avatar clip swap: time spent in Falling before settling (seconds)
    pub const FALLING_DELAY_SECS: f64 = 0.6;

    /// Per-group section transition durations (seconds)
    pub const AVATAR_TRANSITION_SECS: f32 = 0.6;
    pub const PROJECTS_TRANSITION_SECS: f32 = 0.8;

    /// Camera start pose
    pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 3.0, 10.0);
    pub const CAMERA_FOV_DEG: f32 = 42.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
    /// Camera pan while the menu is open
    pub const MENU_CAMERA_X: f32 = -5.0;
    pub const MENU_LOOK_AT_X: f32 = 5.0;

    /// Horizontal distance between carousel cards
    pub const CAROUSEL_SPACING: f32 = 3.25;
    /// Pointer → tilt gain (radians per normalized unit)
    pub const TILT_GAIN: f32 = 0.6;
    pub const TILT_STIFFNESS: f32 = 60.0;
    pub const TILT_DAMPING: f32 = 10.0;

    /// Project card plane size
    pub const CARD_WIDTH: f32 = 2.86;
    pub const CARD_HEIGHT: f32 = 3.0;
    /// Card background opacity, highlighted vs receded
    pub const CARD_OPACITY_HIGHLIGHTED: f32 = 0.8;
    pub const CARD_OPACITY_RECEDED: f32 = 0.4;

    /// Tag row layout under each card
    pub const TAG_START_X: f32 = -1.3;
    pub const TAG_SPACING: f32 = 0.15;
    pub const TAG_ROW_Y: f32 = -1.25;
    pub const TAG_FONT_SIZE: f32 = 0.12;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation of two colours/vectors
#[inline]
pub fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Convert a pointer position in screen pixels to [-1, 1] on both axes.
///
/// Y is not flipped: the top edge maps to -1.
#[inline]
pub fn normalize_pointer(client: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(client.x / size.x * 2.0 - 1.0, client.y / size.y * 2.0 - 1.0)
}
