//! Scroll progress → discrete section

use serde::{Deserialize, Serialize};

/// Index of the page currently in view, always < page count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SectionIndex(pub usize);

impl SectionIndex {
    pub const HOME: SectionIndex = SectionIndex(0);
    pub const SKILLS: SectionIndex = SectionIndex(1);
    pub const PROJECTS: SectionIndex = SectionIndex(2);
    pub const CONTACT: SectionIndex = SectionIndex(3);

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `floor(progress × page_count)` clamped to a valid index.
///
/// NaN and negative progress resolve to the first section.
pub fn resolve_section(progress: f32, page_count: usize) -> SectionIndex {
    let last = page_count.saturating_sub(1);
    if progress.is_nan() || progress <= 0.0 {
        return SectionIndex(0);
    }
    let raw = (progress * page_count as f32).floor();
    SectionIndex((raw as usize).min(last))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChange {
    pub from: SectionIndex,
    pub to: SectionIndex,
}

/// Remembers the last resolved section and reports changes
#[derive(Debug, Clone)]
pub struct SectionResolver {
    page_count: usize,
    current: SectionIndex,
}

impl SectionResolver {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count: page_count.max(1),
            current: SectionIndex::HOME,
        }
    }

    pub fn current(&self) -> SectionIndex {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Recompute from `progress`; `Some` only when the index moved
    pub fn update(&mut self, progress: f32) -> Option<SectionChange> {
        let next = resolve_section(progress, self.page_count);
        if next == self.current {
            return None;
        }
        let change = SectionChange {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_examples() {
        assert_eq!(resolve_section(0.0, 4), SectionIndex(0));
        assert_eq!(resolve_section(0.26, 4), SectionIndex(1));
        assert_eq!(resolve_section(0.5, 4), SectionIndex(2));
        assert_eq!(resolve_section(0.99, 4), SectionIndex(3));
        assert_eq!(resolve_section(1.0, 4), SectionIndex(3));
    }

    #[test]
    fn test_degenerate_progress() {
        assert_eq!(resolve_section(f32::NAN, 4), SectionIndex(0));
        assert_eq!(resolve_section(-0.5, 4), SectionIndex(0));
        assert_eq!(resolve_section(3.0, 4), SectionIndex(3));
        assert_eq!(resolve_section(0.7, 0), SectionIndex(0));
    }

    #[test]
    fn test_resolver_reports_only_changes() {
        let mut resolver = SectionResolver::new(4);
        assert_eq!(resolver.update(0.1), None);
        assert_eq!(
            resolver.update(0.3),
            Some(SectionChange {
                from: SectionIndex(0),
                to: SectionIndex(1)
            })
        );
        assert_eq!(resolver.update(0.4), None);
        assert_eq!(
            resolver.update(0.0),
            Some(SectionChange {
                from: SectionIndex(1),
                to: SectionIndex(0)
            })
        );
        assert_eq!(resolver.current(), SectionIndex::HOME);
    }

    proptest! {
        #[test]
        fn prop_matches_clamped_floor(p in 0.0f32..=1.0) {
            let expected = ((p * 4.0).floor() as usize).min(3);
            prop_assert_eq!(resolve_section(p, 4), SectionIndex(expected));
        }

        #[test]
        fn prop_always_in_range(p in proptest::num::f32::ANY, n in 1usize..16) {
            prop_assert!(resolve_section(p, n).get() < n);
        }
    }
}
