//! Top-level scene context and the per-frame tick
//!
//! `Portfolio` owns every piece of shared state (section, menu, carousel) and
//! is the only writer of each. The platform layer feeds it a `FrameInput`
//! once per animation frame and reacts to the returned `SceneEvent`s.

use glam::{Mat4, Vec2, Vec3};

use super::background::BackgroundTimeline;
use super::camera::{Camera, CameraRig};
use super::carousel::{CardPose, ProjectCarousel};
use super::character::{CharacterAnimation, CharacterAnimator};
use super::composer::SceneComposer;
use super::float::{FLOAT_SEED, FloatingShape, skills_shapes};
use super::groups::{PROJECTS_ANCHOR_Y, SceneGroup};
use super::picking::pick_card;
use super::scroll::ScrollTracker;
use super::section::{SectionIndex, SectionResolver};
use super::tags::TagLayout;
use crate::content::Content;
use crate::consts::PAGE_COUNT;
use crate::normalize_pointer;
use crate::settings::Settings;

/// Carousel navigation requested by the HTML controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Previous,
}

/// Everything the page reported since the previous frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since start
    pub now: f64,
    /// Raw scroll offset in [0, 1]
    pub scroll_offset: Option<f32>,
    /// Canvas size in CSS pixels
    pub viewport_px: Option<Vec2>,
    /// Pointer position in CSS pixels
    pub pointer_px: Option<Vec2>,
    /// Primary button released over the canvas
    pub click: bool,
    pub toggle_menu: bool,
    /// Menu entry or "Contact me" pressed
    pub navigate: Option<SectionIndex>,
    pub carousel: Option<CarouselCommand>,
}

/// Outcomes the page has to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    SectionChanged { from: SectionIndex, to: SectionIndex },
    CharacterAnimationChanged(CharacterAnimation),
    MenuToggled(bool),
    ProjectSelected(usize),
    /// The page should smooth-scroll to this offset
    ScrollRequested(f32),
    /// A card was clicked; open its link
    ProjectOpened { index: usize, url: String },
}

pub struct Portfolio {
    pub settings: Settings,
    pub camera: Camera,
    scroll: ScrollTracker,
    resolver: SectionResolver,
    menu_opened: bool,
    composer: SceneComposer,
    rig: CameraRig,
    character: CharacterAnimator,
    carousel: ProjectCarousel,
    tags: Vec<TagLayout>,
    project_urls: Vec<String>,
    background: BackgroundTimeline,
    shapes: Vec<FloatingShape>,
    viewport_px: Vec2,
    pointer: Vec2,
    pointer_px: Option<Vec2>,
    time: f64,
    started: bool,
}

impl Portfolio {
    pub fn new(content: &Content, settings: Settings) -> Self {
        let camera = Camera::default();
        let viewport_height = camera.viewport_at(Vec3::ZERO).y;
        let scroll = ScrollTracker::new(PAGE_COUNT, settings.effective_scroll_damping());
        Self {
            composer: SceneComposer::new(SectionIndex::HOME, viewport_height),
            carousel: ProjectCarousel::new(content.projects.len()),
            tags: content
                .projects
                .iter()
                .map(|p| TagLayout::new(&p.tags))
                .collect(),
            project_urls: content.projects.iter().map(|p| p.url.clone()).collect(),
            resolver: SectionResolver::new(PAGE_COUNT),
            rig: CameraRig::new(),
            character: CharacterAnimator::new(),
            background: BackgroundTimeline::default(),
            shapes: skills_shapes(FLOAT_SEED),
            menu_opened: false,
            viewport_px: Vec2::new(1280.0, 720.0),
            pointer: Vec2::ZERO,
            pointer_px: None,
            time: 0.0,
            started: false,
            scroll,
            camera,
            settings,
        }
    }

    pub fn section(&self) -> SectionIndex {
        self.resolver.current()
    }

    pub fn menu_opened(&self) -> bool {
        self.menu_opened
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll.progress()
    }

    pub fn character(&self) -> CharacterAnimation {
        self.character.current()
    }

    pub fn carousel(&self) -> &ProjectCarousel {
        &self.carousel
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn tag_layout(&self, project: usize) -> Option<&TagLayout> {
        self.tags.get(project)
    }

    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Visible world height at the scene origin
    pub fn viewport_height(&self) -> f32 {
        self.camera.viewport_at(Vec3::ZERO).y
    }

    /// Clear colour for the current scroll position (sRGB)
    pub fn background_color(&self) -> Vec3 {
        self.background.sample(self.scroll.progress())
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.scroll.damping = settings.effective_scroll_damping();
        self.settings = settings;
    }

    /// Close the menu and return the offset the page must scroll to
    pub fn navigate_to(&mut self, section: SectionIndex, events: &mut Vec<SceneEvent>) -> f32 {
        self.set_menu(false, events);
        let offset = self.scroll.offset_for_section(section.get());
        events.push(SceneEvent::ScrollRequested(offset));
        offset
    }

    fn set_menu(&mut self, opened: bool, events: &mut Vec<SceneEvent>) {
        if self.menu_opened != opened {
            self.menu_opened = opened;
            events.push(SceneEvent::MenuToggled(opened));
        }
        self.rig
            .set_menu_opened(opened, &self.settings.effective_transition());
    }

    /// Late text metrics for the tag row of `project`
    pub fn apply_tag_measurements<I>(&mut self, project: usize, widths: I) -> bool
    where
        I: IntoIterator<Item = f32>,
    {
        self.tags
            .get_mut(project)
            .is_some_and(|layout| layout.apply_measurements(widths))
    }

    /// Whole-scene offset from the scroll container: content further down
    /// the page slides up into view
    pub fn scroll_matrix(&self) -> Mat4 {
        let h = self.viewport_height();
        Mat4::from_translation(Vec3::new(
            0.0,
            h * (PAGE_COUNT as f32 - 1.0) * self.scroll.progress(),
            0.0,
        ))
    }

    /// World matrix of `group`, scroll offset included, with its opacity
    pub fn group_world(&self, group: SceneGroup) -> (Mat4, f32) {
        let (local, opacity) = self.composer.group_transform(group);
        (self.scroll_matrix() * local, opacity)
    }

    /// World matrices and poses of the project cards
    pub fn card_worlds(&self) -> Vec<(Mat4, CardPose)> {
        let (projects, _) = self.group_world(SceneGroup::Projects);
        let anchor = Mat4::from_translation(Vec3::new(
            0.0,
            PROJECTS_ANCHOR_Y.resolve(self.composer.viewport_height()),
            0.0,
        ));
        self.carousel
            .poses()
            .map(|pose| (projects * anchor * pose.matrix(), pose))
            .collect()
    }

    /// Advance one frame. Order: viewport, scroll, section, timers,
    /// menu/camera, carousel, motion, camera apply.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        self.time = input.now;

        if let Some(size) = input.viewport_px.filter(|s| s.x > 0.0 && s.y > 0.0) {
            if size != self.viewport_px {
                self.viewport_px = size;
                self.camera.set_aspect(size.x, size.y);
                let h = self.viewport_height();
                self.composer.set_viewport_height(h, &self.settings);
            }
        }

        if let Some(offset) = input.scroll_offset {
            self.scroll.set_offset(offset);
        }
        self.scroll.update(dt);

        if let Some(change) = self.resolver.update(self.scroll.progress()) {
            log::info!("Section {} -> {}", change.from, change.to);
            events.push(SceneEvent::SectionChanged {
                from: change.from,
                to: change.to,
            });
            self.set_menu(false, &mut events);
            self.character.on_section_change(change.to, input.now);
            events.push(SceneEvent::CharacterAnimationChanged(CharacterAnimation::Falling));
            self.composer.set_section(change.to, &self.settings);
        }

        if let Some(settled) = self.character.update(input.now) {
            log::debug!("Avatar clip -> {}", settled.clip_name());
            events.push(SceneEvent::CharacterAnimationChanged(settled));
        }

        if !self.started {
            // First frame defines the rig's values
            self.started = true;
            self.rig
                .set_menu_opened(self.menu_opened, &self.settings.effective_transition());
        }
        if input.toggle_menu {
            self.set_menu(!self.menu_opened, &mut events);
        }
        if let Some(section) = input.navigate {
            self.navigate_to(section, &mut events);
        }

        let transition = self.settings.effective_transition();
        let before = self.carousel.current();
        match input.carousel {
            Some(CarouselCommand::Next) => self.carousel.next(&transition),
            Some(CarouselCommand::Previous) => self.carousel.previous(&transition),
            None => {}
        }
        if self.carousel.current() != before {
            events.push(SceneEvent::ProjectSelected(self.carousel.current()));
        }

        if let Some(px) = input.pointer_px {
            self.pointer_px = Some(px);
            self.pointer = normalize_pointer(px, self.viewport_px);
        }
        let hovered = self.hovered_card();
        self.carousel.set_hovered(hovered);
        if input.click {
            if let Some(index) = hovered {
                if let Some(url) = self.project_urls.get(index) {
                    events.push(SceneEvent::ProjectOpened {
                        index,
                        url: url.clone(),
                    });
                }
            }
        }

        self.carousel.step(dt, self.pointer, self.settings.tilt_gain);
        self.composer.step(dt);
        self.rig.step(dt);
        self.rig.apply(&mut self.camera);

        events
    }

    fn hovered_card(&self) -> Option<usize> {
        let px = self.pointer_px?;
        let (origin, dir) = self.camera.screen_ray(px, self.viewport_px);
        let (_, opacity) = self.composer.group_transform(SceneGroup::Projects);
        if opacity <= 0.0 {
            return None;
        }
        let worlds: Vec<Mat4> = self.card_worlds().into_iter().map(|(m, _)| m).collect();
        pick_card(origin, dir, &worlds)
    }
}
