//! Per-section transform tables for the scene groups
//!
//! Every target is a literal; only the vertical offsets of some groups depend
//! on the visible viewport height.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Vec3;

use super::section::SectionIndex;
use crate::anim::{Easing, Transition};
use crate::consts::{AVATAR_TRANSITION_SECS, PROJECTS_TRANSITION_SECS};

/// Named groups whose transforms follow the section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneGroup {
    Avatar,
    Office,
    Skills,
    Projects,
}

impl SceneGroup {
    pub const ALL: [SceneGroup; 4] = [
        SceneGroup::Avatar,
        SceneGroup::Office,
        SceneGroup::Skills,
        SceneGroup::Projects,
    ];

    pub fn index(self) -> usize {
        match self {
            SceneGroup::Avatar => 0,
            SceneGroup::Office => 1,
            SceneGroup::Skills => 2,
            SceneGroup::Projects => 3,
        }
    }

    /// Timing used when this group moves between sections; `None` means the
    /// global transition
    pub fn own_transition(self) -> Option<Transition> {
        match self {
            SceneGroup::Avatar => Some(Transition::tween(AVATAR_TRANSITION_SECS, Easing::EaseOut)),
            SceneGroup::Projects => Some(Transition::tween(
                PROJECTS_TRANSITION_SECS,
                Easing::EaseInOut,
            )),
            SceneGroup::Office | SceneGroup::Skills => None,
        }
    }
}

/// A height that follows the viewport: `-height × multiplier + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportY {
    pub multiplier: f32,
    pub offset: f32,
}

impl ViewportY {
    pub const fn new(multiplier: f32, offset: f32) -> Self {
        Self { multiplier, offset }
    }

    pub fn resolve(self, viewport_height: f32) -> f32 {
        -viewport_height * self.multiplier + self.offset
    }
}

/// Where a group should be for one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformTarget {
    pub position: Vec3,
    /// Euler angles, XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
}

impl Default for TransformTarget {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
        }
    }
}

/// Resting pose of the avatar while the home section is shown
pub const AVATAR_HOME_POSITION: Vec3 = Vec3::new(1.894_565_6, 0.198, 2.694_53);
pub const AVATAR_HOME_ROTATION: Vec3 = Vec3::new(-PI, 1.205_398_2, PI);
pub const AVATAR_HOME_SCALE: f32 = 0.9;

pub const OFFICE_X: f32 = 1.5;
pub const OFFICE_Z: f32 = 3.0;
pub const OFFICE_SCALE: f32 = 0.9;

/// Anchor height of the project carousel
pub const PROJECTS_ANCHOR_Y: ViewportY = ViewportY::new(2.0, 1.0);

/// Target transform of `group` in `section` for a viewport `viewport_height`
/// scene units tall
pub fn target_for(group: SceneGroup, section: SectionIndex, viewport_height: f32) -> TransformTarget {
    let h = viewport_height;
    match group {
        SceneGroup::Avatar => match section.get() {
            0 => TransformTarget {
                position: AVATAR_HOME_POSITION,
                rotation: AVATAR_HOME_ROTATION,
                scale: Vec3::splat(AVATAR_HOME_SCALE),
                ..Default::default()
            },
            1 => TransformTarget {
                position: Vec3::new(0.0, ViewportY::new(1.0, 0.5).resolve(h), 7.0),
                ..Default::default()
            },
            2 => TransformTarget {
                position: Vec3::new(-2.0, ViewportY::new(2.0, 0.5).resolve(h), 0.0),
                rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
                ..Default::default()
            },
            _ => TransformTarget {
                position: Vec3::new(0.3, ViewportY::new(3.0, 1.0).resolve(h), 8.5),
                rotation: Vec3::new(0.0, -FRAC_PI_4, 0.0),
                ..Default::default()
            },
        },
        SceneGroup::Office => TransformTarget {
            position: Vec3::new(
                OFFICE_X,
                if section == SectionIndex::HOME { 0.0 } else { -1.0 },
                OFFICE_Z,
            ),
            rotation: Vec3::new(0.0, -FRAC_PI_4, 0.0),
            scale: Vec3::splat(OFFICE_SCALE),
            ..Default::default()
        },
        SceneGroup::Skills => {
            let (y, z) = if section == SectionIndex::SKILLS {
                (ViewportY::new(1.0, 0.0).resolve(h), 0.0)
            } else {
                (-1.5, -10.0)
            };
            TransformTarget {
                position: Vec3::new(0.0, y, z),
                ..Default::default()
            }
        }
        SceneGroup::Projects => {
            let (y, opacity) = match section.get() {
                2 => (0.0, 1.0),
                3 => (ViewportY::new(-2.0, 0.0).resolve(h), 0.5),
                _ => (ViewportY::new(3.0, 0.0).resolve(h), 0.0),
            };
            TransformTarget {
                position: Vec3::new(0.1, y, 0.0),
                opacity,
                ..Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scaled_anchor() {
        assert_eq!(PROJECTS_ANCHOR_Y.resolve(5.0), -9.0);
        assert_eq!(ViewportY::new(1.0, 0.5).resolve(5.0), -4.5);
    }

    #[test]
    fn test_avatar_section_two_tracks_viewport() {
        let target = target_for(SceneGroup::Avatar, SectionIndex::PROJECTS, 5.0);
        assert_eq!(target.position, Vec3::new(-2.0, -9.5, 0.0));
        assert_eq!(target.rotation.y, FRAC_PI_2);
        let taller = target_for(SceneGroup::Avatar, SectionIndex::PROJECTS, 8.0);
        assert_eq!(taller.position.y, -15.5);
    }

    #[test]
    fn test_avatar_home_pose() {
        let target = target_for(SceneGroup::Avatar, SectionIndex::HOME, 5.0);
        assert_eq!(target.position, AVATAR_HOME_POSITION);
        assert_eq!(target.rotation, AVATAR_HOME_ROTATION);
        assert_eq!(target.scale, Vec3::splat(0.9));
    }

    #[test]
    fn test_office_drops_after_home() {
        assert_eq!(target_for(SceneGroup::Office, SectionIndex::HOME, 5.0).position.y, 0.0);
        for s in 1..4 {
            let target = target_for(SceneGroup::Office, SectionIndex(s), 5.0);
            assert_eq!(target.position, Vec3::new(1.5, -1.0, 3.0));
        }
    }

    #[test]
    fn test_skills_only_visible_in_section_one() {
        let shown = target_for(SceneGroup::Skills, SectionIndex::SKILLS, 6.0);
        assert_eq!(shown.position, Vec3::new(0.0, -6.0, 0.0));
        let hidden = target_for(SceneGroup::Skills, SectionIndex::CONTACT, 6.0);
        assert_eq!(hidden.position, Vec3::new(0.0, -1.5, -10.0));
    }

    #[test]
    fn test_projects_opacity_by_section() {
        let opacities: Vec<f32> = (0..4)
            .map(|s| target_for(SceneGroup::Projects, SectionIndex(s), 5.0).opacity)
            .collect();
        assert_eq!(opacities, vec![0.0, 0.0, 1.0, 0.5]);
        assert_eq!(target_for(SceneGroup::Projects, SectionIndex::CONTACT, 5.0).position.y, 10.0);
        assert_eq!(target_for(SceneGroup::Projects, SectionIndex::HOME, 5.0).position.y, -15.0);
    }

    #[test]
    fn test_own_transitions() {
        assert_eq!(
            SceneGroup::Projects.own_transition(),
            Some(Transition::tween(0.8, Easing::EaseInOut))
        );
        assert_eq!(SceneGroup::Office.own_transition(), None);
    }
}
