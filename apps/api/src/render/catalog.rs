//! The fixed set of portfolio templates.
//!
//! Every descriptor's `template_id` must resolve here. Unknown ids are a
//! `NotFound`, never a panic.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::UserProfile;

/// Placeholder content shown when a portfolio has no captured profile.
#[derive(Debug, Clone, Serialize)]
pub struct DemoContent {
    pub name: &'static str,
    pub headline: &'static str,
    pub bio: &'static str,
    pub skills: &'static [&'static str],
    pub highlights: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "templateId")]
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub preview_image: &'static str,
    /// Name of the compiled template in the renderer.
    #[serde(skip)]
    pub file: &'static str,
    /// Descriptor blurb; `{name}` and `{skills}` are substituted.
    #[serde(skip)]
    pub description_pattern: &'static str,
    #[serde(skip)]
    pub demo: DemoContent,
}

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "1",
        name: "Minimalist Portfolio",
        tagline: "Clean, modern design with focus on content",
        preview_image: "/thumbnails/minimal.jpg",
        file: "minimalist.html",
        description_pattern: "A clean portfolio for {name} focused on their skills in {skills}",
        demo: DemoContent {
            name: "John Doe",
            headline: "Software Engineer | Web Developer",
            bio: "Engineer who enjoys building small, fast and accessible web applications.",
            skills: &["React", "Next.js", "Tailwind CSS"],
            highlights: &[],
        },
    },
    Template {
        id: "2",
        name: "Creative Portfolio",
        tagline: "Bold, colorful design for creative professionals",
        preview_image: "/thumbnails/creative.jpg",
        file: "creative.html",
        description_pattern: "A bold, creative showcase highlighting {name}'s work and experience with {skills}",
        demo: DemoContent {
            name: "Jane Smith",
            headline: "Full-Stack Developer & UX Designer",
            bio: "Passionate about creating beautiful, functional, and user-friendly applications.",
            skills: &["React", "Next.js", "Firebase", "Figma"],
            highlights: &[
                "E-commerce Platform: a full-featured online store with Stripe integration",
                "Task Management App: a productivity tool built with React and Firebase",
            ],
        },
    },
    Template {
        id: "3",
        name: "Developer Portfolio",
        tagline: "Technical focus with code snippets and project showcases",
        preview_image: "/thumbnails/developer.jpg",
        file: "developer.html",
        description_pattern: "Technical portfolio showcasing {name}'s projects and coding skills in {skills}",
        demo: DemoContent {
            name: "Sam Rivera",
            headline: "Backend Engineer",
            bio: "Builds reliable services and the tooling around them.",
            skills: &["Rust", "PostgreSQL", "Kubernetes"],
            highlights: &["Open-source contributor to several networking libraries"],
        },
    },
];

pub fn resolve(template_id: &str) -> Result<&'static Template, AppError> {
    TEMPLATES
        .iter()
        .find(|t| t.id == template_id)
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
}

impl Template {
    pub fn describe(&self, profile: &UserProfile) -> String {
        self.description_pattern
            .replace("{name}", profile.name.trim())
            .replace("{skills}", profile.skills.trim())
    }
}
