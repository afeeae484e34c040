pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(render::handle_home))
        .route("/portfolio/:id", get(render::handle_portfolio_page))
        .route("/portfolio/:id/export", get(render::handle_export))
        // Portfolio API
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route(
            "/api/v1/portfolios/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/portfolios/:id", get(generation::handle_get_portfolio))
        // Wizard sessions
        .route("/api/v1/sessions", post(wizard::handle_create_session))
        .route("/api/v1/sessions/:id", get(wizard::handle_get_session))
        .route("/api/v1/sessions/:id/submit", post(wizard::handle_submit))
        .route("/api/v1/sessions/:id/retry", post(wizard::handle_retry))
        .route("/api/v1/sessions/:id/edit", post(wizard::handle_edit))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
