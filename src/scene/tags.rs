//! Left-to-right tag row under each project card
//!
//! Text widths are only known once glyphs have been measured, so the row is
//! laid out twice: first with zero widths, then once with the measured ones.

use crate::consts::{TAG_FONT_SIZE, TAG_SPACING, TAG_START_X};

/// Tag fill colours, cycled per tag
pub const TAG_PALETTE: [&str; 5] = ["#F472B6", "#4ADE80", "#60A5FA", "#FACC15", "#A78BFA"];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTag {
    pub label: String,
    pub x: f32,
    pub width: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct TagLayout {
    tags: Vec<PlacedTag>,
    measured: bool,
}

/// x of each tag given its width: first at `TAG_START_X`, then previous x +
/// previous width + `TAG_SPACING`
pub fn tag_positions(widths: &[f32]) -> Vec<f32> {
    let mut x = TAG_START_X;
    widths
        .iter()
        .map(|w| {
            let here = x;
            x += w + TAG_SPACING;
            here
        })
        .collect()
}

/// Text advance measured at `font_px` pixels, in scene units at `TAG_FONT_SIZE`
pub fn scene_width(width_px: f64, font_px: f64) -> f32 {
    if font_px <= 0.0 || !width_px.is_finite() {
        return 0.0;
    }
    (width_px / font_px) as f32 * TAG_FONT_SIZE
}

/// Palette colour for the tag at `index`
pub fn tag_color(index: usize) -> &'static str {
    TAG_PALETTE[index % TAG_PALETTE.len()]
}

impl TagLayout {
    /// Provisional layout, every width assumed zero
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut layout = Self {
            tags: labels
                .iter()
                .enumerate()
                .map(|(i, label)| PlacedTag {
                    label: label.as_ref().to_string(),
                    x: 0.0,
                    width: 0.0,
                    color: tag_color(i),
                })
                .collect(),
            measured: false,
        };
        layout.place();
        layout
    }

    fn place(&mut self) {
        let widths: Vec<f32> = self.tags.iter().map(|t| t.width).collect();
        for (tag, x) in self.tags.iter_mut().zip(tag_positions(&widths)) {
            tag.x = x;
        }
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn tags(&self) -> &[PlacedTag] {
        &self.tags
    }

    pub fn positions(&self) -> Vec<f32> {
        self.tags.iter().map(|t| t.x).collect()
    }

    /// Corrective pass. Consumes the measurement sequence once: surplus
    /// widths are dropped, missing or non-finite ones stay zero, and later
    /// calls are ignored. Returns whether the layout changed.
    pub fn apply_measurements<I>(&mut self, widths: I) -> bool
    where
        I: IntoIterator<Item = f32>,
    {
        if self.measured {
            return false;
        }
        self.measured = true;
        for (tag, width) in self.tags.iter_mut().zip(widths) {
            if width.is_finite() && width > 0.0 {
                tag.width = width;
            }
        }
        self.place();
        true
    }
}
