//! Fade/slide-in of content blocks
//!
//! A block stays hidden until it first intersects the viewport, then eases
//! into place after its delay. Revealing is one-way: leaving the viewport
//! again does not hide it. Staggered rows are children of their section:
//! they start when the section does, never on their own.

use std::collections::HashMap;

use crate::anim::{Easing, Tween};

/// `data-reveal` id of each page's section block, in page order
pub const SECTION_REVEAL_IDS: [&str; 4] = [
    "section-about",
    "section-skills",
    "section-projects",
    "section-contact",
];

/// Section whose trigger starts the skill and database rows
pub const SKILLS_SECTION_ID: &str = SECTION_REVEAL_IDS[1];

/// Start state and timing of a reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    /// Seconds after the trigger
    pub delay: f32,
    pub duration: f32,
    pub easing: Easing,
    pub hidden_opacity: f32,
    /// Pixels below the resting position while hidden
    pub hidden_offset_y: f32,
    /// Horizontal scale while hidden (bars grow from 0)
    pub hidden_scale_x: f32,
}

impl RevealSpec {
    /// Whole section: fades up 50 px after 0.6 s
    pub const SECTION: RevealSpec = RevealSpec {
        delay: 0.6,
        duration: 1.0,
        easing: Easing::EaseOut,
        hidden_opacity: 0.0,
        hidden_offset_y: 50.0,
        hidden_scale_x: 1.0,
    };

    /// About paragraph
    pub const ABOUT_TEXT: RevealSpec = RevealSpec {
        delay: 1.5,
        hidden_offset_y: 25.0,
        ..Self::SECTION
    };

    /// "Contact me" button
    pub const ABOUT_BUTTON: RevealSpec = RevealSpec {
        delay: 2.0,
        hidden_offset_y: 25.0,
        ..Self::SECTION
    };

    /// Proficiency row `index` of a list whose first row starts at `base`
    pub fn staggered_row(base: f32, index: usize) -> RevealSpec {
        RevealSpec {
            delay: base + index as f32 * 0.2,
            hidden_offset_y: 0.0,
            hidden_scale_x: 0.0,
            ..Self::SECTION
        }
    }

    pub fn skill_row(index: usize) -> RevealSpec {
        Self::staggered_row(1.0, index)
    }

    pub fn database_row(index: usize) -> RevealSpec {
        Self::staggered_row(2.0, index)
    }

    /// Row title: fades in alongside its bar without moving or scaling
    pub fn title_of(row: RevealSpec) -> RevealSpec {
        RevealSpec {
            hidden_offset_y: 0.0,
            hidden_scale_x: 1.0,
            ..row
        }
    }

    /// Reveal timing for a markup block id (`section-*`, `about-text`, `skill-3`, ...)
    pub fn for_id(id: &str) -> Option<RevealSpec> {
        match id {
            "about-text" => return Some(Self::ABOUT_TEXT),
            "about-button" => return Some(Self::ABOUT_BUTTON),
            _ => {}
        }
        if id.strip_prefix("section-").is_some_and(|rest| !rest.is_empty()) {
            return Some(Self::SECTION);
        }
        let (kind, index) = id.rsplit_once('-')?;
        let index = index.parse::<usize>().ok()?;
        match kind {
            "skill" => Some(Self::skill_row(index)),
            "database" => Some(Self::database_row(index)),
            "skill-title" => Some(Self::title_of(Self::skill_row(index))),
            "database-title" => Some(Self::title_of(Self::database_row(index))),
            _ => None,
        }
    }
}

/// Block whose trigger starts `id`, for blocks that never trigger themselves
pub fn reveal_parent(id: &str) -> Option<&'static str> {
    let (kind, index) = id.rsplit_once('-')?;
    index.parse::<usize>().ok()?;
    match kind {
        "skill" | "database" | "skill-title" | "database-title" => Some(SKILLS_SECTION_ID),
        _ => None,
    }
}

/// Animated style of a block at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSample {
    pub opacity: f32,
    pub offset_y: f32,
    pub scale_x: f32,
}

#[derive(Debug, Clone)]
pub struct RevealBlock {
    spec: RevealSpec,
    triggered_at: Option<f64>,
}

impl RevealBlock {
    pub fn new(spec: RevealSpec) -> Self {
        Self {
            spec,
            triggered_at: None,
        }
    }

    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered_at.is_some()
    }

    /// Mark the block as having entered the viewport; only the first call counts
    pub fn trigger(&mut self, now: f64) -> bool {
        if self.triggered_at.is_some() {
            return false;
        }
        self.triggered_at = Some(now);
        true
    }

    fn progress(&self, now: f64) -> f32 {
        let Some(start) = self.triggered_at else {
            return 0.0;
        };
        let mut tween = Tween::delayed(0.0, 1.0, self.spec.duration, self.spec.delay, self.spec.easing);
        tween.advance((now - start).max(0.0) as f32);
        tween.value()
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Hidden before the trigger, at rest after it (no easing)
    pub fn settled(&self) -> RevealSample {
        let s = &self.spec;
        if self.is_triggered() {
            RevealSample {
                opacity: 1.0,
                offset_y: 0.0,
                scale_x: 1.0,
            }
        } else {
            RevealSample {
                opacity: s.hidden_opacity,
                offset_y: s.hidden_offset_y,
                scale_x: s.hidden_scale_x,
            }
        }
    }

    pub fn sample(&self, now: f64) -> RevealSample {
        let t = self.progress(now);
        let s = &self.spec;
        RevealSample {
            opacity: crate::lerp(s.hidden_opacity, 1.0, t),
            offset_y: crate::lerp(s.hidden_offset_y, 0.0, t),
            scale_x: crate::lerp(s.hidden_scale_x, 1.0, t),
        }
    }
}

/// Every reveal block on the page, addressed by id
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    ids: Vec<String>,
    blocks: Vec<RevealBlock>,
    by_id: HashMap<String, usize>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`; returns its slot, or `None` for unknown or duplicate ids
    pub fn insert(&mut self, id: &str) -> Option<usize> {
        if self.by_id.contains_key(id) {
            return None;
        }
        let spec = RevealSpec::for_id(id)?;
        let slot = self.blocks.len();
        self.ids.push(id.to_string());
        self.blocks.push(RevealBlock::new(spec));
        self.by_id.insert(id.to_string(), slot);
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RevealBlock> {
        self.by_id.get(id).map(|&i| &self.blocks[i])
    }

    pub fn blocks(&self) -> &[RevealBlock] {
        &self.blocks
    }

    /// Start `id` at `now` together with its children. A child id starts
    /// its parent instead. Returns how many blocks started.
    pub fn trigger(&mut self, id: &str, now: f64) -> usize {
        let root = reveal_parent(id).unwrap_or(id);
        let mut started = 0;
        for (child, block) in self.ids.iter().zip(&mut self.blocks) {
            let belongs = child == root || reveal_parent(child) == Some(root);
            if belongs && block.trigger(now) {
                started += 1;
            }
        }
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_skips_delay() {
        let mut block = RevealBlock::new(RevealSpec::skill_row(3));
        assert_eq!(block.settled().scale_x, 0.0);
        block.trigger(5.0);
        let settled = block.settled();
        assert_eq!(settled.opacity, 1.0);
        assert_eq!(settled.scale_x, 1.0);
        // Eased sample is still hidden during the delay
        assert_eq!(block.sample(5.0).scale_x, 0.0);
    }

    #[test]
    fn test_spec_for_id() {
        assert_eq!(RevealSpec::for_id("section-skills"), Some(RevealSpec::SECTION));
        assert_eq!(RevealSpec::for_id("about-button"), Some(RevealSpec::ABOUT_BUTTON));
        assert_eq!(RevealSpec::for_id("skill-2"), Some(RevealSpec::skill_row(2)));
        assert_eq!(RevealSpec::for_id("database-0"), Some(RevealSpec::database_row(0)));
        assert_eq!(RevealSpec::for_id("section-"), None);
        assert_eq!(RevealSpec::for_id("skill-x"), None);
        assert_eq!(RevealSpec::for_id("banner"), None);
    }

    #[test]
    fn test_every_section_fades_up() {
        for id in SECTION_REVEAL_IDS {
            assert_eq!(RevealSpec::for_id(id), Some(RevealSpec::SECTION), "{id}");
            assert_eq!(reveal_parent(id), None);
        }
    }

    #[test]
    fn test_title_fades_without_moving() {
        let title = RevealSpec::for_id("skill-title-1").unwrap();
        assert_eq!(title.delay, RevealSpec::skill_row(1).delay);
        assert_eq!(title.hidden_opacity, 0.0);
        assert_eq!(title.hidden_offset_y, 0.0);
        assert_eq!(title.hidden_scale_x, 1.0);
    }

    #[test]
    fn test_reveal_parents() {
        assert_eq!(reveal_parent("skill-3"), Some(SKILLS_SECTION_ID));
        assert_eq!(reveal_parent("database-title-0"), Some(SKILLS_SECTION_ID));
        assert_eq!(reveal_parent("section-skills"), None);
        assert_eq!(reveal_parent("about-text"), None);
    }

    fn skills_set() -> RevealSet {
        let mut set = RevealSet::new();
        for id in [
            "section-skills",
            "skill-0",
            "skill-title-0",
            "skill-2",
            "database-1",
            "section-contact",
        ] {
            assert!(set.insert(id).is_some());
        }
        set
    }

    #[test]
    fn test_children_start_with_their_section() {
        let mut set = skills_set();
        assert_eq!(set.trigger("section-skills", 10.0), 5);

        // skill-2 runs from 10 + 1.4 for 1 s, measured from the section's trigger
        let bar = set.get("skill-2").unwrap();
        assert_eq!(bar.sample(11.3).scale_x, 0.0);
        assert_eq!(bar.sample(12.5).scale_x, 1.0);
        let db = set.get("database-1").unwrap();
        assert_eq!(db.sample(13.3).opacity, 1.0);
        assert_eq!(set.get("skill-title-0").unwrap().sample(12.1).opacity, 1.0);

        assert!(!set.get("section-contact").unwrap().is_triggered());
    }

    #[test]
    fn test_child_trigger_starts_parent() {
        let mut set = skills_set();
        assert_eq!(set.trigger("skill-0", 4.0), 5);
        assert!(set.get("section-skills").unwrap().is_triggered());
        assert_eq!(set.trigger("section-skills", 9.0), 0);
        // Still timed from the first trigger
        assert_eq!(set.get("skill-0").unwrap().sample(6.1).scale_x, 1.0);
    }

    #[test]
    fn test_insert_rejects_unknown_and_duplicates() {
        let mut set = RevealSet::new();
        assert_eq!(set.insert("section-about"), Some(0));
        assert_eq!(set.insert("section-about"), None);
        assert_eq!(set.insert("banner"), None);
        assert_eq!(set.len(), 1);
        assert_eq!(set.trigger("banner", 1.0), 0);
    }

    #[test]
    fn test_hidden_until_triggered() {
        let block = RevealBlock::new(RevealSpec::SECTION);
        let sample = block.sample(100.0);
        assert_eq!(sample.opacity, 0.0);
        assert_eq!(sample.offset_y, 50.0);
    }

    #[test]
    fn test_section_timing() {
        let mut block = RevealBlock::new(RevealSpec::SECTION);
        assert!(block.trigger(10.0));
        assert_eq!(block.sample(10.5).opacity, 0.0);
        let mid = block.sample(11.1);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.offset_y > 0.0 && mid.offset_y < 50.0);
        let done = block.sample(11.7);
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.offset_y, 0.0);
        assert!(block.is_complete(11.7));
    }

    #[test]
    fn test_retrigger_is_ignored() {
        let mut block = RevealBlock::new(RevealSpec::ABOUT_BUTTON);
        block.trigger(0.0);
        assert!(!block.trigger(5.0));
        assert_eq!(block.sample(3.0).opacity, 1.0);
    }

    #[test]
    fn test_staggered_rows() {
        for (i, expected) in [1.0, 1.2, 1.4].into_iter().enumerate() {
            assert!((RevealSpec::skill_row(i).delay - expected).abs() < 1e-6);
        }
        assert!((RevealSpec::database_row(2).delay - 2.4).abs() < 1e-6);

        let mut bar = RevealBlock::new(RevealSpec::skill_row(1));
        bar.trigger(0.0);
        assert_eq!(bar.sample(1.0).scale_x, 0.0);
        assert_eq!(bar.sample(2.3).scale_x, 1.0);
        assert_eq!(bar.sample(2.3).offset_y, 0.0);
    }
}
