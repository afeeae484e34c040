//! Resume highlight extraction.
//!
//! The uploaded resume is never stored. At generation time its text is
//! pulled out (PDF via `pdf-extract`, plain text as-is) and a handful of
//! substantial lines are kept as highlights for the rendered portfolio.
//! Anything unreadable yields no highlights rather than failing generation.

use tracing::{debug, warn};

use crate::models::profile::ResumeUpload;

const MAX_HIGHLIGHTS: usize = 5;
const MIN_HIGHLIGHT_CHARS: usize = 20;
const MAX_HIGHLIGHT_CHARS: usize = 160;

pub async fn extract_highlights(resume: &ResumeUpload) -> Vec<String> {
    let text = if resume.is_pdf() {
        let bytes = resume.bytes.clone();
        // pdf-extract is CPU-bound and can panic on malformed input
        match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Could not read PDF resume '{}': {e:?}", resume.file_name);
                return Vec::new();
            }
            Err(e) => {
                warn!("PDF extraction aborted for '{}': {e}", resume.file_name);
                return Vec::new();
            }
        }
    } else if is_plain_text(resume) {
        String::from_utf8_lossy(&resume.bytes).into_owned()
    } else {
        debug!(
            "Skipping resume '{}' with unsupported type {:?}",
            resume.file_name, resume.content_type
        );
        return Vec::new();
    };

    select_highlights(&text)
}

fn is_plain_text(resume: &ResumeUpload) -> bool {
    let name = resume.file_name.to_ascii_lowercase();
    resume
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("text/"))
        || name.ends_with(".txt")
        || name.ends_with(".md")
}

/// Picks the first few lines that read like sentences, whitespace-collapsed.
pub fn select_highlights(text: &str) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line
            .trim_start_matches(['-', '*', '•', ' ', '\t'])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let len = line.chars().count();
        if !(MIN_HIGHLIGHT_CHARS..=MAX_HIGHLIGHT_CHARS).contains(&len) {
            continue;
        }
        if highlights.contains(&line) {
            continue;
        }
        highlights.push(line);
        if highlights.len() == MAX_HIGHLIGHTS {
            break;
        }
    }
    highlights
}
