//! Frame-stepped animation primitives
//!
//! Nothing here sleeps or schedules; every animation advances by the elapsed
//! time handed to it once per frame.

pub mod easing;
pub mod motion;
pub mod spring;
pub mod tween;

pub use easing::{Easing, cubic_bezier};
pub use motion::{MotionValue, Transition};
pub use spring::{Spring, SpringParams};
pub use tween::Tween;
