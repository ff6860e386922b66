//! Animated group transforms
//!
//! Each group exposes ten scalar channels (position, rotation, scale,
//! opacity). On a section change or viewport resize every channel is pointed
//! at the new table entry; `step` advances them each frame.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::groups::{SceneGroup, TransformTarget, target_for};
use super::section::SectionIndex;
use crate::anim::{MotionValue, Transition};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
struct GroupMotion {
    position: [MotionValue; 3],
    rotation: [MotionValue; 3],
    scale: [MotionValue; 3],
    opacity: MotionValue,
}

impl GroupMotion {
    fn at(target: &TransformTarget) -> Self {
        let mut motion = Self::default();
        for i in 0..3 {
            motion.position[i].set(target.position[i]);
            motion.rotation[i].set(target.rotation[i]);
            motion.scale[i].set(target.scale[i]);
        }
        motion.opacity.set(target.opacity);
        motion
    }

    fn animate_to(&mut self, target: &TransformTarget, transition: &Transition) {
        for i in 0..3 {
            self.position[i].animate_to(target.position[i], transition);
            self.rotation[i].animate_to(target.rotation[i], transition);
            self.scale[i].animate_to(target.scale[i], transition);
        }
        self.opacity.animate_to(target.opacity, transition);
    }

    fn channels_mut(&mut self) -> impl Iterator<Item = &mut MotionValue> {
        self.position
            .iter_mut()
            .chain(self.rotation.iter_mut())
            .chain(self.scale.iter_mut())
            .chain(std::iter::once(&mut self.opacity))
    }

    fn current(&self) -> TransformTarget {
        let read = |v: &[MotionValue; 3], fallback: f32| {
            Vec3::new(v[0].get_or(fallback), v[1].get_or(fallback), v[2].get_or(fallback))
        };
        TransformTarget {
            position: read(&self.position, 0.0),
            rotation: read(&self.rotation, 0.0),
            scale: read(&self.scale, 1.0),
            opacity: self.opacity.get_or(1.0),
        }
    }
}

/// Drives every `SceneGroup` toward its table entry for the current section
#[derive(Debug, Clone)]
pub struct SceneComposer {
    groups: [GroupMotion; 4],
    section: SectionIndex,
    viewport_height: f32,
}

impl SceneComposer {
    /// Groups start already resting on their targets for `section`
    pub fn new(section: SectionIndex, viewport_height: f32) -> Self {
        let groups = SceneGroup::ALL.map(|g| GroupMotion::at(&target_for(g, section, viewport_height)));
        Self {
            groups,
            section,
            viewport_height,
        }
    }

    pub fn section(&self) -> SectionIndex {
        self.section
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Point every group at its target for `section`
    pub fn set_section(&mut self, section: SectionIndex, settings: &Settings) {
        self.section = section;
        self.retarget(settings);
    }

    /// Viewport-scaled targets move with the viewport; ignores no-op resizes
    pub fn set_viewport_height(&mut self, viewport_height: f32, settings: &Settings) {
        if !viewport_height.is_finite() || viewport_height == self.viewport_height {
            return;
        }
        self.viewport_height = viewport_height;
        self.retarget(settings);
    }

    fn retarget(&mut self, settings: &Settings) {
        for group in SceneGroup::ALL {
            let transition = settings.effective(
                group
                    .own_transition()
                    .unwrap_or(settings.transition),
            );
            let target = target_for(group, self.section, self.viewport_height);
            self.groups[group.index()].animate_to(&target, &transition);
        }
    }

    pub fn step(&mut self, dt: f32) {
        for group in &mut self.groups {
            for channel in group.channels_mut() {
                channel.step(dt);
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.groups.iter().any(|g| {
            g.position
                .iter()
                .chain(g.rotation.iter())
                .chain(g.scale.iter())
                .chain(std::iter::once(&g.opacity))
                .any(MotionValue::is_animating)
        })
    }

    /// Current animated transform of `group`
    pub fn current(&self, group: SceneGroup) -> TransformTarget {
        self.groups[group.index()].current()
    }

    /// World matrix and opacity of `group`
    pub fn group_transform(&self, group: SceneGroup) -> (Mat4, f32) {
        let t = self.current(group);
        let rotation = Quat::from_euler(EulerRot::XYZ, t.rotation.x, t.rotation.y, t.rotation.z);
        (
            Mat4::from_scale_rotation_translation(t.scale, rotation, t.position),
            t.opacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(composer: &mut SceneComposer, seconds: f32) {
        for _ in 0..(seconds * 60.0) as usize {
            composer.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_starts_on_targets() {
        let composer = SceneComposer::new(SectionIndex::HOME, 5.0);
        assert!(!composer.is_animating());
        assert_eq!(
            composer.current(SceneGroup::Avatar),
            target_for(SceneGroup::Avatar, SectionIndex::HOME, 5.0)
        );
    }

    #[test]
    fn test_section_change_reaches_new_targets() {
        let settings = Settings::default();
        let mut composer = SceneComposer::new(SectionIndex::HOME, 5.0);
        composer.set_section(SectionIndex::PROJECTS, &settings);
        assert!(composer.is_animating());

        // The avatar tween lasts 0.6 s; the projects group is still moving
        settle(&mut composer, 0.65);
        assert_eq!(
            composer.current(SceneGroup::Avatar).position,
            Vec3::new(-2.0, -9.5, 0.0)
        );
        let projects = composer.current(SceneGroup::Projects);
        assert!(projects.opacity > 0.0 && projects.opacity < 1.0);

        settle(&mut composer, 5.0);
        assert!(!composer.is_animating());
        for group in SceneGroup::ALL {
            assert_eq!(
                composer.current(group),
                target_for(group, SectionIndex::PROJECTS, 5.0)
            );
        }
    }

    #[test]
    fn test_resize_moves_viewport_scaled_groups() {
        let settings = Settings::default();
        let mut composer = SceneComposer::new(SectionIndex::SKILLS, 5.0);
        composer.set_viewport_height(8.0, &settings);
        settle(&mut composer, 5.0);
        assert_eq!(composer.current(SceneGroup::Skills).position.y, -8.0);
        assert_eq!(composer.current(SceneGroup::Avatar).position.y, -7.5);
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut composer = SceneComposer::new(SectionIndex::HOME, 5.0);
        composer.set_section(SectionIndex::CONTACT, &settings);
        assert!(!composer.is_animating());
        assert_eq!(composer.current(SceneGroup::Projects).opacity, 0.5);
    }

    #[test]
    fn test_group_transform_matrix() {
        let composer = SceneComposer::new(SectionIndex::SKILLS, 5.0);
        let (matrix, opacity) = composer.group_transform(SceneGroup::Office);
        assert_eq!(opacity, 1.0);
        let origin = matrix.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.5, -1.0, 3.0)).length() < 1e-5);
    }
}
