use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::profile::validation::FieldError;

/// What the user can do after a failure. Every error maps to at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Edit,
    Retry,
    GoBack,
    GoHome,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Service(_) => "SERVICE_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn actions(&self) -> &'static [NextAction] {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => &[NextAction::Edit],
            AppError::NotFound(_) => &[NextAction::GoHome],
            AppError::Service(_) => &[NextAction::Retry, NextAction::GoBack],
            AppError::Export(_) => &[NextAction::GoBack],
            AppError::Render(_) | AppError::Internal(_) => &[NextAction::GoHome],
        }
    }

    /// Message safe to show to the user. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Please fix the highlighted fields".to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Service(msg) => format!("{msg}. Please try again."),
            AppError::Export(msg) => format!("Could not export portfolio: {msg}"),
            AppError::Render(_) => "The portfolio could not be displayed".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Service(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(format!("Expected a multipart form: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Service(msg) => tracing::warn!("Service error: {msg}"),
            AppError::Export(msg) => tracing::error!("Export error: {msg}"),
            AppError::Render(msg) => tracing::error!("Render error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let mut error = json!({
            "code": self.code(),
            "message": self.user_message(),
            "actions": self.actions(),
        });
        if let AppError::Validation(fields) = &self {
            error["fields"] = json!(fields);
        }

        (self.status(), Json(json!({ "error": error }))).into_response()
    }
}
