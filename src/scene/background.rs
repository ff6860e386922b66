//! Scroll-scrubbed background colour

use glam::Vec3;

use crate::anim::Easing;
use crate::lerp3;

pub const BACKGROUND_STOPS: [&str; 5] = ["#b9bcff", "#dee2e6", "#495057", "#7a7ca5", "#9b96dd"];

/// Parse `#rrggbb` into sRGB components in [0, 1]
pub fn parse_hex_color(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(digits.get(i..i + 2)?, 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };
    Some(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

/// A timeline of equal-length colour segments, positioned by scroll
#[derive(Debug, Clone)]
pub struct BackgroundTimeline {
    stops: Vec<Vec3>,
    easing: Easing,
}

impl Default for BackgroundTimeline {
    fn default() -> Self {
        Self::new(
            BACKGROUND_STOPS
                .iter()
                .filter_map(|hex| parse_hex_color(hex))
                .collect(),
            Easing::Power1Out,
        )
    }
}

impl BackgroundTimeline {
    pub fn new(stops: Vec<Vec3>, easing: Easing) -> Self {
        Self { stops, easing }
    }

    /// Colour at `progress` ∈ [0, 1] of the whole timeline
    pub fn sample(&self, progress: f32) -> Vec3 {
        match self.stops.as_slice() {
            [] => Vec3::ZERO,
            [only] => *only,
            stops => {
                let segments = stops.len() - 1;
                let p = if progress.is_finite() {
                    progress.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let scaled = p * segments as f32;
                let index = (scaled.floor() as usize).min(segments - 1);
                let local = self.easing.apply(scaled - index as f32);
                lerp3(stops[index], stops[index + 1], local)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_color("#ffffff"), Some(Vec3::ONE));
        assert_eq!(parse_hex_color("#000000"), Some(Vec3::ZERO));
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_endpoints_and_stops() {
        let timeline = BackgroundTimeline::default();
        let stop = |i: usize| parse_hex_color(BACKGROUND_STOPS[i]).unwrap();
        assert!(close(timeline.sample(0.0), stop(0)));
        assert!(close(timeline.sample(0.5), stop(2)));
        assert!(close(timeline.sample(1.0), stop(4)));
        assert!(close(timeline.sample(f32::NAN), stop(0)));
    }

    #[test]
    fn test_segments_are_eased_out() {
        let timeline = BackgroundTimeline::new(vec![Vec3::ZERO, Vec3::ONE], Easing::Power1Out);
        // power1.out at half time is already three quarters of the way
        assert!(close(timeline.sample(0.5), Vec3::splat(0.75)));
    }
}
