use std::sync::Arc;

use crate::config::Config;
use crate::generation::service::GenerationService;
use crate::render::renderer::TemplateRenderer;
use crate::wizard::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Mock by default; the remote client when GENERATION_BACKEND_URL is set.
    pub generator: Arc<dyn GenerationService>,
    pub renderer: Arc<TemplateRenderer>,
    pub sessions: SessionStore,
}
