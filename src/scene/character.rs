//! Avatar animation clip selection
//!
//! Any section change drops the avatar into `Falling`; 600 ms later it
//! settles into `Typing` (home) or `Standing` (anywhere else). A newer change
//! cancels the pending settle so only the latest one lands.

use serde::{Deserialize, Serialize};

use super::section::SectionIndex;
use super::timer::{TimerId, Timers};
use crate::consts::FALLING_DELAY_SECS;

/// Named clip on the rigged avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterAnimation {
    Typing,
    Standing,
    Falling,
}

impl CharacterAnimation {
    /// Clip name as stored in the model
    pub fn clip_name(self) -> &'static str {
        match self {
            CharacterAnimation::Typing => "Typing",
            CharacterAnimation::Standing => "Standing",
            CharacterAnimation::Falling => "Falling",
        }
    }

    /// Clip the avatar settles into once it has landed in `section`
    pub fn resting_for(section: SectionIndex) -> Self {
        if section == SectionIndex::HOME {
            CharacterAnimation::Typing
        } else {
            CharacterAnimation::Standing
        }
    }
}

#[derive(Debug, Clone)]
pub struct CharacterAnimator {
    current: CharacterAnimation,
    timers: Timers<SectionIndex>,
    pending: Option<TimerId>,
    delay: f64,
}

impl Default for CharacterAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterAnimator {
    pub fn new() -> Self {
        Self {
            current: CharacterAnimation::Typing,
            timers: Timers::new(),
            pending: None,
            delay: FALLING_DELAY_SECS,
        }
    }

    pub fn current(&self) -> CharacterAnimation {
        self.current
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Start falling toward `section` at time `now` (seconds)
    pub fn on_section_change(&mut self, section: SectionIndex, now: f64) {
        if let Some(stale) = self.pending.take() {
            self.timers.cancel(stale);
        }
        self.current = CharacterAnimation::Falling;
        self.pending = Some(self.timers.schedule(now + self.delay, section));
    }

    /// Resolve a due settle; returns the new clip when it changed
    pub fn update(&mut self, now: f64) -> Option<CharacterAnimation> {
        let mut changed = None;
        for (id, section) in self.timers.poll(now) {
            if self.pending != Some(id) {
                continue;
            }
            self.pending = None;
            let next = CharacterAnimation::resting_for(section);
            if next != self.current {
                self.current = next;
                changed = Some(next);
            }
        }
        changed
    }
}
