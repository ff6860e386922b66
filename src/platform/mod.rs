//! Browser glue (wasm32 only)
//!
//! - `dom`: content markup, reveal styles, menu and form UI
//! - `input`: scroll/pointer/click/resize listeners and viewport reveals
//! - `metrics`: canvas-2D text measurement for the tag rows
//! - `submit`: contact form delivery via `fetch`

pub mod dom;
pub mod input;
pub mod metrics;
pub mod submit;

pub use input::{InputQueue, SharedInput};
pub use submit::FetchSubmitter;

/// Seconds since page load
pub fn now_secs() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or_default()
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}
