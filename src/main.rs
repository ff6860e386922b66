//! Scrollfolio entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement};

    use scrollfolio::content::{ContactForm, Content, FormSubmitter};
    use scrollfolio::platform::metrics::TextMetrics;
    use scrollfolio::platform::{FetchSubmitter, SharedInput, dom, input, now_secs};
    use scrollfolio::renderer::{RenderState, scene_mesh};
    use scrollfolio::scene::{Portfolio, SceneEvent};
    use scrollfolio::settings::Settings;

    /// Page instance holding all state
    struct App {
        portfolio: Portfolio,
        render_state: Option<RenderState>,
        input: SharedInput,
        reveals: dom::Reveals,
        metrics: Option<TextMetrics>,
        document: Document,
        scroller: Element,
        canvas: HtmlCanvasElement,
        last_time: f64,
        frames_rendered: u64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        /// Match the canvas backing store to its CSS size
        fn resize_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if width == 0 || height == 0 {
                return;
            }
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }

        fn update(&mut self, time_ms: f64) {
            let dt = if self.last_time > 0.0 {
                ((time_ms - self.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            self.last_time = time_ms;
            let dt = dt.min(0.1);

            let now = now_secs();
            let (frame, revealed) = self.input.borrow_mut().take_frame(now);
            if frame.viewport_px.is_some() {
                self.resize_canvas();
            }

            let events = self.portfolio.tick(&frame, dt);
            for event in events {
                self.apply_event(event);
            }

            self.reveals.trigger(revealed, now);
            self.reveals
                .apply_with(now, self.portfolio.settings.reduced_motion);

            // Fonts are ready once the first frame has been presented
            if self.frames_rendered == 1 {
                if let Some(metrics) = &self.metrics {
                    metrics.measure_tags(&mut self.portfolio);
                }
            }

            self.frame_times[self.frame_index] = time_ms;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time_ms - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
            dom::set_fps(&self.document, self.fps, self.portfolio.settings.show_fps);
        }

        fn apply_event(&mut self, event: SceneEvent) {
            match event {
                SceneEvent::SectionChanged { to, .. } => dom::set_section(&self.document, to),
                SceneEvent::MenuToggled(opened) => dom::set_menu_open(&self.document, opened),
                SceneEvent::ScrollRequested(offset) => input::scroll_to(&self.scroller, offset),
                SceneEvent::ProjectOpened { index, url } => {
                    log::info!("Opening project {index}: {url}");
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url_and_target(&url, "_blank");
                    }
                }
                SceneEvent::ProjectSelected(index) => log::debug!("Project {index} selected"),
                SceneEvent::CharacterAnimationChanged(clip) => {
                    log::debug!("Avatar clip {}", clip.clip_name())
                }
            }
        }

        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            let mesh = scene_mesh(&self.portfolio);
            let view_proj = self.portfolio.camera.view_projection();
            match render_state.render(&mesh, view_proj, self.portfolio.background_color()) {
                Ok(_) => self.frames_rendered += 1,
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    async fn create_renderer(canvas: &HtmlCanvasElement) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Failed to get device: {e}");
                None
            }
        }
    }

    /// Contact form submission, kept outside `App` so it can span frames
    fn setup_contact_form(document: &Document, form_id: String) {
        let Some(element) = document.get_element_by_id("contact-form") else {
            return;
        };
        let form = Rc::new(RefCell::new(ContactForm::new()));
        let submitter = Rc::new(FetchSubmitter::new(form_id));
        let document = document.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let submission = {
                let mut form = form.borrow_mut();
                dom::read_form(&document, &mut form);
                form.begin_submit()
            };
            let Some(submission) = submission else {
                return;
            };
            dom::render_form(&document, &form.borrow());

            let form = form.clone();
            let submitter = submitter.clone();
            let document = document.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = submitter.submit(submission).await;
                let mut form = form.borrow_mut();
                form.finish(result);
                dom::render_form(&document, &form);
            });
        });
        let _ = element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            app.update(time);
            app.render();
        }

        request_animation_frame(app);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Scrollfolio starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let content = Content::load().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut settings = Settings::load();
        let query = window.location().search().unwrap_or_default();
        if settings.apply_query(&query) {
            settings.save();
        }
        let prefers_reduced = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|list| list.matches());
        let settings = settings.with_system_reduced_motion(prefers_reduced);
        log::info!(
            "Quality {}, reduced motion {}",
            settings.quality.as_str(),
            settings.reduced_motion
        );

        dom::build(&document, &content)?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let scroller = document.get_element_by_id("scroll").ok_or("no scroll container")?;

        let dpr = window.device_pixel_ratio();
        canvas.set_width(((canvas.client_width() as f64 * dpr) as u32).max(1));
        canvas.set_height(((canvas.client_height() as f64 * dpr) as u32).max(1));

        let render_state = create_renderer(&canvas).await;
        if render_state.is_none() {
            log::warn!("WebGPU unavailable; showing the HTML content only");
        }

        setup_contact_form(&document, settings.form_id.clone());
        let input = input::install(&document, &scroller);
        let reveals = dom::Reveals::collect(&document);

        let app = Rc::new(RefCell::new(App {
            portfolio: Portfolio::new(&content, settings),
            render_state,
            input,
            reveals,
            metrics: TextMetrics::new(&document),
            document,
            scroller,
            canvas,
            last_time: 0.0,
            frames_rendered: 0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        log::info!("Scrollfolio ready");
        request_animation_frame(app);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Start-up failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Scrollfolio (native) starting...");
    log::info!("Native mode runs a headless walk through the sections - run with `trunk serve` for the web version");

    if let Err(e) = headless_demo() {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scroll through every section, flip the carousel, then jump to Contact
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() -> Result<(), scrollfolio::content::ContentError> {
    use glam::Vec2;
    use scrollfolio::content::Content;
    use scrollfolio::renderer::scene_mesh;
    use scrollfolio::scene::{CarouselCommand, FrameInput, Portfolio, SectionIndex};
    use scrollfolio::settings::Settings;

    const DT: f32 = 1.0 / 60.0;

    let content = Content::load()?;
    let mut portfolio = Portfolio::new(&content, Settings::default());
    let mut now = 0.0_f64;
    let mut frame = |portfolio: &mut Portfolio, input: FrameInput| {
        now += DT as f64;
        let input = FrameInput { now, ..input };
        for event in portfolio.tick(&input, DT) {
            log::info!("t={now:.2}s {event:?}");
        }
    };

    frame(
        &mut portfolio,
        FrameInput {
            viewport_px: Some(Vec2::new(1280.0, 720.0)),
            ..Default::default()
        },
    );

    // Four seconds of steady scrolling to the bottom
    for i in 0..=240 {
        frame(
            &mut portfolio,
            FrameInput {
                scroll_offset: Some(i as f32 / 240.0),
                ..Default::default()
            },
        );
    }

    // Back to Projects and browse
    frame(
        &mut portfolio,
        FrameInput {
            scroll_offset: Some(0.5),
            ..Default::default()
        },
    );
    for command in [CarouselCommand::Next, CarouselCommand::Previous, CarouselCommand::Previous] {
        frame(
            &mut portfolio,
            FrameInput {
                carousel: Some(command),
                ..Default::default()
            },
        );
        for _ in 0..30 {
            frame(&mut portfolio, FrameInput::default());
        }
    }

    frame(
        &mut portfolio,
        FrameInput {
            navigate: Some(SectionIndex::CONTACT),
            ..Default::default()
        },
    );
    for _ in 0..120 {
        frame(&mut portfolio, FrameInput::default());
    }

    let mesh = scene_mesh(&portfolio);
    println!(
        "section {} | clip {} | project {} | {} vertices | background {:?}",
        portfolio.section(),
        portfolio.character().clip_name(),
        portfolio.carousel().current(),
        mesh.len(),
        portfolio.background_color(),
    );
    Ok(())
}
