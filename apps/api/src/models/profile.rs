use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile data collected by the landing form.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
    /// Comma-separated free text, e.g. "Go, Rust".
    pub skills: String,
    pub resume: Option<ResumeUpload>,
}

/// An uploaded resume. Held in memory only; never written to storage.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

impl UserProfile {
    /// Splits the free-text skills field into trimmed, non-empty entries.
    pub fn skill_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }
}

pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Profile content captured when a portfolio is generated, used to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub name: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub highlights: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ProfileSnapshot {
    pub fn capture(profile: &UserProfile, highlights: Vec<String>) -> Self {
        ProfileSnapshot {
            name: profile.name.trim().to_string(),
            bio: profile.bio.trim().to_string(),
            skills: profile.skill_list(),
            highlights,
            submitted_at: Utc::now(),
        }
    }
}
