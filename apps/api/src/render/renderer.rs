//! HTML rendering via minijinja.
//!
//! All templates are compiled into the binary and share `layout.html`;
//! the three portfolio styles only override its blocks. Rendering is a pure
//! function of (template, page data).

use minijinja::{context, Environment};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::portfolio::PortfolioDescriptor;
use crate::models::profile::ProfileSnapshot;
use crate::render::catalog::{Template, TEMPLATES};

const SOURCES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
    ("minimalist.html", include_str!("../../templates/minimalist.html")),
    ("creative.html", include_str!("../../templates/creative.html")),
    ("developer.html", include_str!("../../templates/developer.html")),
];

/// What a portfolio page shows: the user's captured profile, or the
/// template's demo content when there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub highlights: Vec<String>,
    /// Shown as "Generated on ..."; demo pages have none.
    pub generated_on: Option<String>,
}

impl PageContent {
    pub fn from_snapshot(snapshot: &ProfileSnapshot) -> Self {
        PageContent {
            name: snapshot.name.clone(),
            headline: snapshot
                .skills
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(" | "),
            bio: snapshot.bio.clone(),
            skills: snapshot.skills.clone(),
            highlights: snapshot.highlights.clone(),
            generated_on: Some(snapshot.submitted_at.format("%B %-d, %Y").to_string()),
        }
    }

    pub fn demo(template: &Template) -> Self {
        let demo = &template.demo;
        PageContent {
            name: demo.name.to_string(),
            headline: demo.headline.to_string(),
            bio: demo.bio.to_string(),
            skills: demo.skills.iter().map(|s| s.to_string()).collect(),
            highlights: demo.highlights.iter().map(|s| s.to_string()).collect(),
            generated_on: None,
        }
    }
}

/// A fully rendered standalone HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub html: String,
}

pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        for &(name, source) in SOURCES {
            env.add_template(name, source)
                .map_err(|e| AppError::Render(format!("Failed to compile {name}: {e}")))?;
        }
        Ok(TemplateRenderer { env })
    }

    pub fn render(
        &self,
        template: &Template,
        descriptor: &PortfolioDescriptor,
        content: &PageContent,
    ) -> Result<Document, AppError> {
        let title = format!("{} · {}", content.name, template.name);
        let html = self.render_named(
            template.file,
            context! {
                title => &title,
                template => template,
                portfolio => descriptor,
                content => content,
            },
        )?;
        Ok(Document { title, html })
    }

    /// Landing page with the profile form and template catalog.
    pub fn render_home(&self) -> Result<Document, AppError> {
        let title = "Portfolio Builder".to_string();
        let html = self.render_named(
            "home.html",
            context! { title => &title, templates => TEMPLATES },
        )?;
        Ok(Document { title, html })
    }

    /// The dedicated "not found" view, always with a link back home.
    pub fn render_not_found(&self, message: &str) -> Result<Document, AppError> {
        let title = "Portfolio not found".to_string();
        let html = self.render_named(
            "not_found.html",
            context! { title => &title, message => message },
        )?;
        Ok(Document { title, html })
    }

    fn render_named(&self, name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(ctx))
            .map_err(|e| AppError::Render(format!("{name}: {e}")))
    }
}
