//! Text measurement for the tag rows

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::scene::Portfolio;
use crate::scene::tags::scene_width;

/// Reference size glyphs are measured at
const MEASURE_FONT_PX: f64 = 48.0;

/// Offscreen 2D context used only for `measureText`
pub struct TextMetrics {
    context: CanvasRenderingContext2d,
}

impl TextMetrics {
    pub fn new(document: &Document) -> Option<Self> {
        let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        let context: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        context.set_font(&format!("{MEASURE_FONT_PX}px sans-serif"));
        Some(Self { context })
    }

    /// Width of `text` in scene units
    pub fn width(&self, text: &str) -> f32 {
        self.context
            .measure_text(text)
            .map(|m| scene_width(m.width(), MEASURE_FONT_PX))
            .unwrap_or_default()
    }

    /// Measure every unmeasured tag row; returns how many rows were updated
    pub fn measure_tags(&self, portfolio: &mut Portfolio) -> usize {
        let mut updated = 0;
        for project in 0..portfolio.carousel().len() {
            let Some(layout) = portfolio.tag_layout(project) else {
                continue;
            };
            if layout.is_measured() {
                continue;
            }
            let widths: Vec<f32> = layout.tags().iter().map(|t| self.width(&t.label)).collect();
            if portfolio.apply_tag_measurements(project, widths) {
                updated += 1;
            }
        }
        if updated > 0 {
            log::debug!("Measured tag rows for {updated} projects");
        }
        updated
    }
}
