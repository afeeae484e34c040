//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::service::with_timeout;
use crate::models::portfolio::PortfolioDescriptor;
use crate::profile::intake::ProfileForm;
use crate::profile::validation::ensure_valid;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub portfolios: Vec<PortfolioDescriptor>,
}

/// POST /api/v1/portfolios/generate
///
/// Multipart profile in, three portfolio descriptors out. Invalid profiles
/// are rejected with per-field errors before the service is called.
pub async fn handle_generate(
    State(state): State<AppState>,
    ProfileForm(profile): ProfileForm,
) -> Result<Json<GenerateResponse>, AppError> {
    ensure_valid(&profile)?;

    let portfolios = with_timeout(
        state.config.service_timeout,
        state.generator.generate(&profile),
    )
    .await?;
    info!("Returning {} generated portfolios", portfolios.len());

    Ok(Json(GenerateResponse { portfolios }))
}

/// GET /api/v1/portfolios/:id
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PortfolioDescriptor>, AppError> {
    let descriptor = with_timeout(state.config.service_timeout, state.generator.get_by_id(&id)).await?;
    Ok(Json(descriptor))
}
