//! Static portfolio content and the HTML-side behaviour around it
//!
//! - `reveal`: fade/slide-in timing of content blocks
//! - `form`: contact form state and submission seam

pub mod form;
pub mod reveal;

pub use form::{ContactForm, FieldError, FormStatus, FormSubmitter, SubmitError};
pub use reveal::{RevealBlock, RevealSample, RevealSet, RevealSpec, reveal_parent};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled content, embedded at compile time
const CONTENT_JSON: &str = include_str!("../../assets/content.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("content has no projects")]
    NoProjects,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub url: String,
    pub image: String,
    /// Category tags shown under the card, e.g. `#React`
    pub tags: Vec<String>,
    pub description: String,
}

/// A labelled proficiency bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    /// Percent, 0-100
    pub level: u8,
}

impl Skill {
    /// Bar width as a fraction of the track
    pub fn fraction(&self) -> f32 {
        f32::from(self.level.min(100)) / 100.0
    }
}

/// Entry on the experience or education timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub position: String,
    pub organization: String,
    pub link: String,
    pub time: String,
    pub address: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub owner: String,
    pub tagline: Vec<String>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub databases: Vec<Skill>,
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
}

impl Content {
    /// Decode the bundled content
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(CONTENT_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        if content.projects.is_empty() {
            return Err(ContentError::NoProjects);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_decodes() {
        let content = Content::load().unwrap();
        assert_eq!(content.projects.len(), 3);
        assert_eq!(content.projects[1].title, "CommitGenie");
        assert_eq!(content.skills.len(), 7);
        assert_eq!(content.databases[0].title, "MongoDB");
        assert_eq!(content.education[1].summary, None);
        assert!(content.experience.iter().all(|e| e.summary.is_some()));
    }

    #[test]
    fn test_skill_fraction() {
        let skill = Skill {
            title: "Bun".into(),
            level: 80,
        };
        assert!((skill.fraction() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Content::from_json("{"),
            Err(ContentError::Decode(_))
        ));
        let empty = r#"{"owner":"x","tagline":[],"projects":[],"skills":[],"databases":[],"experience":[],"education":[]}"#;
        assert!(matches!(
            Content::from_json(empty),
            Err(ContentError::NoProjects)
        ));
    }
}
