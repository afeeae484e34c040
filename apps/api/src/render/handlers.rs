//! Axum route handlers for rendered pages and exports.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::service::with_timeout;
use crate::models::portfolio::PortfolioDescriptor;
use crate::render::catalog::{resolve, Template, TEMPLATES};
use crate::render::export::{export_document, ExportArtifact};
use crate::render::renderer::{Document, PageContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub file_name: Option<String>,
}

/// Lookup → resolve → render, shared by the page and export routes.
async fn render_portfolio(
    state: &AppState,
    id: &str,
) -> Result<(PortfolioDescriptor, Document), AppError> {
    let descriptor = with_timeout(state.config.service_timeout, state.generator.get_by_id(id)).await?;
    let template = resolve(&descriptor.template_id)?;

    let content = match state.generator.snapshot(id).await {
        Some(snapshot) => PageContent::from_snapshot(&snapshot),
        None => {
            debug!("No captured profile for {id}; rendering demo content");
            PageContent::demo(template)
        }
    };

    let document = state.renderer.render(template, &descriptor, &content)?;
    Ok((descriptor, document))
}

/// GET /
pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.renderer.render_home()?.html))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [Template]> {
    Json(TEMPLATES)
}

/// GET /portfolio/:id
///
/// Unknown portfolios and unresolvable templates get the HTML not-found view.
pub async fn handle_portfolio_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match render_portfolio(&state, &id).await {
        Ok((_, document)) => {
            debug!("Rendered '{}'", document.title);
            Html(document.html).into_response()
        }
        Err(AppError::NotFound(message)) => match state.renderer.render_not_found(&message) {
            Ok(page) => (StatusCode::NOT_FOUND, Html(page.html)).into_response(),
            Err(e) => e.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

/// GET /portfolio/:id/export
///
/// Downloads the rendered page as `<file_name>.html`, defaulting to the
/// portfolio's name.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<ExportArtifact, AppError> {
    let (descriptor, document) = render_portfolio(&state, &id).await?;
    let suggested = query.file_name.unwrap_or(descriptor.name);
    let artifact = export_document(&document.html, &suggested)?;
    info!("Exporting portfolio {id} as {}", artifact.file_name);
    Ok(artifact)
}
