//! Browser event listeners feeding the frame tick
//!
//! Listeners only record what happened; the animation frame drains the
//! queue into a `FrameInput` so all state changes happen inside `tick`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions,
};

use crate::content::reveal_parent;
use crate::scene::scroll::{offset_from_scroll_top, scroll_top_for};
use crate::scene::{CarouselCommand, FrameInput, SectionIndex};

/// Everything recorded since the last frame
#[derive(Debug, Default)]
pub struct InputQueue {
    scroll_offset: Option<f32>,
    viewport_px: Option<Vec2>,
    pointer_px: Option<Vec2>,
    click: bool,
    toggle_menu: bool,
    navigate: Option<SectionIndex>,
    carousel: Option<CarouselCommand>,
    /// `data-reveal` ids of elements that entered the viewport
    revealed: Vec<String>,
}

pub type SharedInput = Rc<RefCell<InputQueue>>;

impl InputQueue {
    /// Drain into a frame input plus the newly revealed block ids
    pub fn take_frame(&mut self, now: f64) -> (FrameInput, Vec<String>) {
        let input = FrameInput {
            now,
            scroll_offset: self.scroll_offset.take(),
            viewport_px: self.viewport_px.take(),
            pointer_px: self.pointer_px.take(),
            click: std::mem::take(&mut self.click),
            toggle_menu: std::mem::take(&mut self.toggle_menu),
            navigate: self.navigate.take(),
            carousel: self.carousel.take(),
        };
        (input, std::mem::take(&mut self.revealed))
    }
}

fn window_size() -> Option<Vec2> {
    let window = web_sys::window()?;
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some(Vec2::new(w as f32, h as f32))
}

/// Normalized offset of the scroll container
fn scroll_offset(el: &Element) -> f32 {
    offset_from_scroll_top(el.scroll_top(), el.scroll_height() - el.client_height())
}

/// Smooth-scroll the container to `offset` ∈ [0, 1]
pub fn scroll_to(scroller: &Element, offset: f32) {
    let range = scroller.scroll_height() - scroller.client_height();
    let options = ScrollToOptions::new();
    options.set_top(scroll_top_for(offset, range));
    options.set_behavior(ScrollBehavior::Smooth);
    scroller.scroll_to_with_scroll_to_options(&options);
}

fn on_click<F>(el: &Element, mut f: F)
where
    F: FnMut() + 'static,
{
    let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        event.stop_propagation();
        f();
    });
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach every listener; returns the shared queue
pub fn install(document: &web_sys::Document, scroller: &Element) -> SharedInput {
    let queue: SharedInput = Rc::new(RefCell::new(InputQueue {
        viewport_px: window_size(),
        ..Default::default()
    }));
    let Some(window) = web_sys::window() else {
        return queue;
    };

    // Scroll container
    {
        let queue = queue.clone();
        let el = scroller.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            queue.borrow_mut().scroll_offset = Some(scroll_offset(&el));
        });
        let _ = scroller.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Pointer position anywhere on the page
    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            queue.borrow_mut().pointer_px =
                Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
        });
        let _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Clicks that did not land on an interactive element reach the scene
    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let interactive = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a, button, input, textarea, label, form").ok().flatten())
                .is_some();
            if !interactive {
                queue.borrow_mut().click = true;
            }
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Viewport size
    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            queue.borrow_mut().viewport_px = window_size();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    if let Some(button) = document.get_element_by_id("menu-button") {
        let queue = queue.clone();
        on_click(&button, move || queue.borrow_mut().toggle_menu = true);
    }

    // Menu entries and the "Contact me" button carry data-section
    if let Ok(entries) = document.query_selector_all("[data-section]") {
        for i in 0..entries.length() {
            let Some(el) = entries.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(section) = el
                .get_attribute("data-section")
                .and_then(|s| s.parse::<usize>().ok())
            else {
                continue;
            };
            let queue = queue.clone();
            on_click(&el, move || {
                queue.borrow_mut().navigate = Some(SectionIndex(section));
            });
        }
    }

    for (id, command) in [
        ("project-prev", CarouselCommand::Previous),
        ("project-next", CarouselCommand::Next),
    ] {
        if let Some(el) = document.get_element_by_id(id) {
            let queue = queue.clone();
            on_click(&el, move || queue.borrow_mut().carousel = Some(command));
        }
    }

    observe_reveals(document, queue.clone());

    queue
}

/// Report each top-level `[data-reveal]` element the first time it intersects
fn observe_reveals(document: &web_sys::Document, queue: SharedInput) {
    let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(id) = target.get_attribute("data-reveal") {
                    log::debug!("Revealing {id}");
                    queue.borrow_mut().revealed.push(id);
                }
                // One-shot: stop watching once revealed
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(0.25));
    let Ok(observer) =
        IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
    else {
        log::warn!("IntersectionObserver unavailable; content stays hidden");
        return;
    };
    closure.forget();

    if let Ok(nodes) = document.query_selector_all("[data-reveal]") {
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            // Staggered rows start with their section
            let child = el
                .get_attribute("data-reveal")
                .is_some_and(|id| reveal_parent(&id).is_some());
            if !child {
                observer.observe(&el);
            }
        }
    }
}
