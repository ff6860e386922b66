//! Viewer settings and preferences
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::anim::Transition;
use crate::consts::{SCROLL_DAMPING, TILT_GAIN};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Segments around a placeholder sphere
    pub fn sphere_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }

    /// Whether the skills shapes bob in place
    pub fn float_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// The global motion configuration: a heavy, well-damped spring
pub fn default_transition() -> Transition {
    Transition::Spring(crate::anim::SpringParams::new(500.0, 50.0, 5.0).with_rest_delta(1e-4))
}

fn default_scroll_damping() -> f32 {
    SCROLL_DAMPING
}

fn default_tilt_gain() -> f32 {
    TILT_GAIN
}

fn default_form_id() -> String {
    "xnnpqapo".to_string()
}

/// Viewer settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    /// Minimize motion: transitions complete instantly, no bobbing
    pub reduced_motion: bool,

    /// Transition used by every value without its own timing
    #[serde(default = "default_transition")]
    pub transition: Transition,

    /// Scroll smoothing factor (0 = frozen, 1 = no smoothing)
    #[serde(default = "default_scroll_damping")]
    pub scroll_damping: f32,

    /// Pointer → card tilt gain
    #[serde(default = "default_tilt_gain")]
    pub tilt_gain: f32,

    /// Contact form endpoint id at the form service
    #[serde(default = "default_form_id")]
    pub form_id: String,

    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            reduced_motion: false,
            transition: default_transition(),
            scroll_damping: SCROLL_DAMPING,
            tilt_gain: TILT_GAIN,
            form_id: default_form_id(),
            show_fps: false,
        }
    }
}

impl Settings {
    /// Apply `?quality=low&reduced-motion=1&fps=1` style overrides.
    /// Returns whether anything changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let before = self.clone();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => match QualityPreset::parse(value) {
                    Some(preset) => self.quality = preset,
                    None => log::warn!("Unknown quality preset: {value}"),
                },
                "reduced-motion" | "reduced_motion" => {
                    if let Some(on) = parse_flag(value) {
                        self.reduced_motion = on;
                    }
                }
                "fps" => {
                    if let Some(on) = parse_flag(value) {
                        self.show_fps = on;
                    }
                }
                _ => {}
            }
        }

        *self != before
    }

    /// Honour the OS reduced-motion preference for this visit only
    pub fn with_system_reduced_motion(mut self, prefers_reduced: bool) -> Self {
        self.reduced_motion |= prefers_reduced;
        self
    }

    /// Global transition, collapsed to an instant one under reduced motion
    pub fn effective_transition(&self) -> Transition {
        if self.reduced_motion {
            self.transition.instant()
        } else {
            self.transition
        }
    }

    /// Any per-group transition, collapsed under reduced motion
    pub fn effective(&self, transition: Transition) -> Transition {
        if self.reduced_motion {
            transition.instant()
        } else {
            transition
        }
    }

    /// Effective bobbing of floating shapes
    pub fn effective_float(&self) -> bool {
        self.quality.float_enabled() && !self.reduced_motion
    }

    /// Effective scroll damping (reduced motion follows the page directly)
    pub fn effective_scroll_damping(&self) -> f32 {
        if self.reduced_motion {
            1.0
        } else {
            self.scroll_damping.clamp(0.001, 1.0)
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "scrollfolio_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Easing;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_reduced_motion_collapses_transitions() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(
            settings.effective_transition(),
            Transition::tween(0.0, Easing::Linear)
        );
        assert_eq!(
            settings.effective(Transition::tween(0.8, Easing::EaseInOut)),
            Transition::tween(0.0, Easing::EaseInOut)
        );
        assert!(!settings.effective_float());
        assert_eq!(settings.effective_scroll_damping(), 1.0);
    }

    #[test]
    fn test_low_preset_disables_float() {
        let low = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        assert!(!low.effective_float());
        assert!(Settings::default().effective_float());
    }

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        assert!(settings.apply_query("?quality=HIGH&reduced-motion&fps=1&utm=x"));
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.reduced_motion);
        assert!(settings.show_fps);

        assert!(settings.apply_query("reduced_motion=off"));
        assert!(!settings.reduced_motion);
        assert_eq!(settings.quality, QualityPreset::High);
    }

    #[test]
    fn test_query_ignores_unknown_values() {
        let mut settings = Settings::default();
        assert!(!settings.apply_query(""));
        assert!(!settings.apply_query("?quality=ultra&fps=maybe"));
        assert!(!settings.apply_query("?quality=medium"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_system_reduced_motion_only_turns_it_on() {
        let settings = Settings::default().with_system_reduced_motion(true);
        assert!(settings.reduced_motion);

        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        }
        .with_system_reduced_motion(false);
        assert!(settings.reduced_motion);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let json = r#"{"quality":"High","reduced_motion":false,"show_fps":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.form_id, "xnnpqapo");
        assert_eq!(settings.transition, default_transition());
        assert_eq!(settings.tilt_gain, TILT_GAIN);
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut settings = Settings::default();
        settings.apply_query("?quality=low");
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
