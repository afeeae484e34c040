//! Axum route handlers for wizard sessions.
//!
//! `submit` and `retry` answer `202 Accepted` as soon as the submission is
//! validated; the client polls `GET /api/v1/sessions/:id` until the state
//! leaves `submitting`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::intake::ProfileForm;
use crate::state::AppState;
use crate::wizard::controller::{PendingSubmission, Wizard, WizardView};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: WizardView,
}

fn spawn_finish(wizard: std::sync::Arc<Wizard>, pending: PendingSubmission) {
    tokio::spawn(async move {
        wizard.finish(pending).await;
    });
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, wizard) = state.sessions.create(Wizard::new(
        state.generator.clone(),
        state.config.service_timeout,
    ));
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            view: wizard.view(),
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let wizard = state.sessions.get(session_id)?;
    Ok(Json(SessionResponse {
        session_id,
        view: wizard.view(),
    }))
}

/// POST /api/v1/sessions/:id/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    ProfileForm(profile): ProfileForm,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let wizard = state.sessions.get(session_id)?;
    let pending = wizard.start(profile)?;
    spawn_finish(wizard.clone(), pending);

    Ok((
        StatusCode::ACCEPTED,
        Json(SessionResponse {
            session_id,
            view: wizard.view(),
        }),
    ))
}

/// POST /api/v1/sessions/:id/retry
pub async fn handle_retry(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let wizard = state.sessions.get(session_id)?;
    let pending = wizard.start_retry()?;
    spawn_finish(wizard.clone(), pending);

    Ok((
        StatusCode::ACCEPTED,
        Json(SessionResponse {
            session_id,
            view: wizard.view(),
        }),
    ))
}

/// POST /api/v1/sessions/:id/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let wizard = state.sessions.get(session_id)?;
    wizard.edit();
    Ok(Json(SessionResponse {
        session_id,
        view: wizard.view(),
    }))
}
