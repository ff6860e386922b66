//! Projects carousel: selection, card poses and hover tilt
//!
//! The selected index is shared by the 3D cards and the HTML prev/next
//! controls; both go through `next`/`previous`/`select`.

use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use super::tilt::Tilt;
use crate::anim::{MotionValue, Transition};
use crate::consts::{CARD_OPACITY_HIGHLIGHTED, CARD_OPACITY_RECEDED, CAROUSEL_SPACING};

/// Rotation of a card that is not highlighted
pub const RECEDED_ROTATION_X: f32 = -PI / 3.0;
pub const RECEDED_ROTATION_Z: f32 = -0.1 * PI;

/// Resolved pose of one card relative to the carousel anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub background_opacity: f32,
}

impl CardPose {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(rotation, self.position)
    }
}

/// Target pose of card `index` while `current` is highlighted
pub fn target_pose(index: usize, current: usize) -> CardPose {
    let x = CAROUSEL_SPACING * (index as f32 - current as f32);
    if index == current {
        CardPose {
            position: Vec3::new(x, 0.0, -2.0),
            rotation: Vec3::ZERO,
            background_opacity: CARD_OPACITY_HIGHLIGHTED,
        }
    } else {
        CardPose {
            position: Vec3::new(x, -0.1, -3.0),
            rotation: Vec3::new(RECEDED_ROTATION_X, 0.0, RECEDED_ROTATION_Z),
            background_opacity: CARD_OPACITY_RECEDED,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CardMotion {
    position: [MotionValue; 3],
    rotation_z: MotionValue,
    background_opacity: MotionValue,
}

impl CardMotion {
    fn at(pose: &CardPose) -> Self {
        let mut motion = Self::default();
        motion.animate_to(pose, &Transition::default().instant());
        motion
    }

    fn animate_to(&mut self, pose: &CardPose, transition: &Transition) {
        for i in 0..3 {
            self.position[i].animate_to(pose.position[i], transition);
        }
        self.rotation_z.animate_to(pose.rotation.z, transition);
        self.background_opacity
            .animate_to(pose.background_opacity, transition);
    }

    fn step(&mut self, dt: f32) {
        for channel in self
            .position
            .iter_mut()
            .chain([&mut self.rotation_z, &mut self.background_opacity])
        {
            channel.step(dt);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectCarousel {
    len: usize,
    current: usize,
    hovered: Option<usize>,
    cards: Vec<CardMotion>,
    tilt: Tilt,
}

impl ProjectCarousel {
    /// Starts on the middle project with every card at rest
    pub fn new(len: usize) -> Self {
        let current = len / 2;
        let cards = (0..len)
            .map(|i| CardMotion::at(&target_pose(i, current)))
            .collect();
        Self {
            len,
            current,
            hovered: None,
            cards,
            tilt: Tilt::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn next(&mut self, transition: &Transition) {
        if self.len > 0 {
            self.select((self.current + 1) % self.len, transition);
        }
    }

    pub fn previous(&mut self, transition: &Transition) {
        if self.len > 0 {
            self.select((self.current + self.len - 1) % self.len, transition);
        }
    }

    /// Highlight `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize, transition: &Transition) {
        if index >= self.len || index == self.current {
            return;
        }
        self.current = index;
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.animate_to(&target_pose(i, index), transition);
        }
    }

    /// Replace the hovered card wholesale (from picking)
    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        self.hovered = hovered.filter(|&i| i < self.len);
    }

    /// Whether the highlighted card is the one under the pointer
    pub fn tilt_active(&self) -> bool {
        self.hovered == Some(self.current)
    }

    /// Advance card poses and the tilt toward the normalized `pointer`
    pub fn step(&mut self, dt: f32, pointer: Vec2, tilt_gain: f32) {
        self.tilt.set_target(self.tilt_active(), pointer, tilt_gain);
        self.tilt.step(dt);
        for card in &mut self.cards {
            card.step(dt);
        }
    }

    pub fn tilt(&self) -> Vec2 {
        self.tilt.value()
    }

    /// Current pose of card `index`, tilt included on the highlighted card
    pub fn pose(&self, index: usize) -> Option<CardPose> {
        let card = self.cards.get(index)?;
        let target = target_pose(index, self.current);
        let position = Vec3::new(
            card.position[0].get_or(target.position.x),
            card.position[1].get_or(target.position.y),
            card.position[2].get_or(target.position.z),
        );
        // Pitch is not animated: the tilt drives the highlighted card and
        // every other card sits at the receded angle
        let rotation_z = card.rotation_z.get_or(target.rotation.z);
        let rotation = if index == self.current {
            let tilt = self.tilt.value();
            Vec3::new(tilt.x, tilt.y, rotation_z)
        } else {
            Vec3::new(RECEDED_ROTATION_X, 0.0, rotation_z)
        };
        Some(CardPose {
            position,
            rotation,
            background_opacity: card
                .background_opacity
                .get_or(target.background_opacity),
        })
    }

    pub fn poses(&self) -> impl Iterator<Item = CardPose> + '_ {
        (0..self.len).filter_map(|i| self.pose(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_transition;
    use proptest::prelude::*;

    fn settle(carousel: &mut ProjectCarousel, pointer: Vec2, seconds: f32) {
        for _ in 0..(seconds * 60.0) as usize {
            carousel.step(1.0 / 60.0, pointer, 0.6);
        }
    }

    #[test]
    fn test_starts_in_the_middle() {
        assert_eq!(ProjectCarousel::new(3).current(), 1);
        assert_eq!(ProjectCarousel::new(4).current(), 2);
        assert_eq!(ProjectCarousel::new(0).current(), 0);
    }

    #[test]
    fn test_wraps_both_ways() {
        let t = default_transition();
        let mut carousel = ProjectCarousel::new(3);
        carousel.next(&t);
        carousel.next(&t);
        assert_eq!(carousel.current(), 0);
        carousel.previous(&t);
        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn test_empty_carousel_ignores_navigation() {
        let t = default_transition();
        let mut carousel = ProjectCarousel::new(0);
        carousel.next(&t);
        carousel.previous(&t);
        carousel.set_hovered(Some(0));
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.hovered(), None);
        assert_eq!(carousel.pose(0), None);
    }

    #[test]
    fn test_target_poses() {
        let highlighted = target_pose(1, 1);
        assert_eq!(highlighted.position, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(highlighted.rotation, Vec3::ZERO);
        assert_eq!(highlighted.background_opacity, 0.8);

        let left = target_pose(0, 1);
        assert_eq!(left.position, Vec3::new(-3.25, -0.1, -3.0));
        assert_eq!(left.rotation, Vec3::new(-PI / 3.0, 0.0, -0.1 * PI));
        assert_eq!(left.background_opacity, 0.4);
    }

    #[test]
    fn test_cards_slide_after_next() {
        let t = default_transition();
        let mut carousel = ProjectCarousel::new(3);
        carousel.next(&t);
        settle(&mut carousel, Vec2::ZERO, 5.0);
        let pose = carousel.pose(2).unwrap();
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(pose.background_opacity, 0.8);
        assert_eq!(carousel.pose(0).unwrap().position.x, -6.5);
    }

    #[test]
    fn test_tilt_only_on_hovered_highlighted_card() {
        let mut carousel = ProjectCarousel::new(3);
        let pointer = Vec2::new(1.0, 0.5);

        carousel.set_hovered(Some(0));
        settle(&mut carousel, pointer, 1.0);
        assert_eq!(carousel.tilt(), Vec2::ZERO);

        carousel.set_hovered(Some(1));
        settle(&mut carousel, pointer, 4.0);
        assert!((carousel.tilt() - Vec2::new(0.3, 0.6)).length() < 1e-5);
        let pose = carousel.pose(1).unwrap();
        assert!((pose.rotation.y - 0.6).abs() < 1e-5);
        assert_eq!(carousel.pose(0).unwrap().rotation.x, RECEDED_ROTATION_X);

        carousel.set_hovered(None);
        settle(&mut carousel, pointer, 6.0);
        assert_eq!(carousel.tilt(), Vec2::ZERO);
    }

    #[test]
    fn test_pitch_follows_tilt_mid_transition() {
        let t = default_transition();
        let mut carousel = ProjectCarousel::new(3);
        carousel.next(&t);
        carousel.set_hovered(Some(2));
        settle(&mut carousel, Vec2::new(0.0, 1.0), 0.1);

        // Position and roll are still travelling, pitch is the tilt alone
        let pose = carousel.pose(2).unwrap();
        assert!(pose.position.z < -2.0);
        assert_eq!(pose.rotation.x, carousel.tilt().x);
        assert_eq!(carousel.pose(1).unwrap().rotation.x, RECEDED_ROTATION_X);
    }

    proptest! {
        #[test]
        fn prop_next_previous_are_inverse(k in 0usize..3) {
            let t = default_transition();
            let mut carousel = ProjectCarousel::new(3);
            carousel.select(k, &t);
            prop_assert_eq!(carousel.current(), k);

            carousel.next(&t);
            carousel.previous(&t);
            prop_assert_eq!(carousel.current(), k);

            carousel.previous(&t);
            carousel.next(&t);
            prop_assert_eq!(carousel.current(), k);
        }

        #[test]
        fn prop_cards_evenly_spaced(n in 1usize..8, pick in 0usize..8) {
            let current = pick % n;
            for i in 0..n {
                let pose = target_pose(i, current);
                let expected = 3.25 * (i as f32 - current as f32);
                prop_assert!((pose.position.x - expected).abs() < 1e-5);
            }
        }
    }
}
