//! Damped scroll progress
//!
//! The page reports a raw offset in [0, 1]; the scene follows a smoothed copy
//! of it so sections and scrubbed timelines glide instead of jumping.

use crate::consts::{PAGE_COUNT, SCROLL_DAMPING};

/// Gap under which the damped offset snaps onto the raw one
const SNAP_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    raw: f32,
    current: f32,
    pub page_count: usize,
    /// Fraction of the remaining gap closed per 60 Hz frame
    pub damping: f32,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(PAGE_COUNT, SCROLL_DAMPING)
    }
}

impl ScrollTracker {
    pub fn new(page_count: usize, damping: f32) -> Self {
        Self {
            raw: 0.0,
            current: 0.0,
            page_count: page_count.max(1),
            damping: damping.clamp(0.0, 1.0),
        }
    }

    /// Feed the latest offset reported by the scroll container
    pub fn set_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.raw = offset.clamp(0.0, 1.0);
        }
    }

    /// Jump straight to `offset` without smoothing
    pub fn jump_to(&mut self, offset: f32) {
        self.set_offset(offset);
        self.current = self.raw;
    }

    pub fn raw_offset(&self) -> f32 {
        self.raw
    }

    /// Smoothed progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.current
    }

    /// Offset that brings the top of page `section` to the top of the
    /// scroll container. The scrollable range spans `page_count - 1` pages.
    pub fn offset_for_section(&self, section: usize) -> f32 {
        if self.page_count <= 1 {
            return 0.0;
        }
        let last = self.page_count - 1;
        (section.min(last) as f32 / last as f32).clamp(0.0, 1.0)
    }

    pub fn update(&mut self, dt: f32) {
        if self.damping >= 1.0 {
            self.current = self.raw;
            return;
        }
        // Frame-rate independent exponential approach
        let keep = (1.0 - self.damping).powf(dt.max(0.0) * 60.0);
        self.current = self.raw + (self.current - self.raw) * keep;
        if (self.current - self.raw).abs() < SNAP_EPSILON {
            self.current = self.raw;
        }
    }
}

/// Normalized offset of a container scrolled to `top` out of `range` pixels
pub fn offset_from_scroll_top(top: i32, range: i32) -> f32 {
    if range <= 0 {
        return 0.0;
    }
    (top as f32 / range as f32).clamp(0.0, 1.0)
}

/// Pixel `scrollTop` for a normalized `offset` over `range` pixels
pub fn scroll_top_for(offset: f32, range: i32) -> f64 {
    range.max(0) as f64 * offset.clamp(0.0, 1.0) as f64
}
