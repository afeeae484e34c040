mod config;
mod errors;
mod generation;
mod models;
mod profile;
mod render;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::mock::MockGenerationService;
use crate::generation::remote::RemoteGenerationService;
use crate::generation::service::GenerationService;
use crate::render::renderer::TemplateRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::sessions::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config)?;
    info!("Generation backend: {}", generator.backend());

    // Templates are compiled once; a broken template fails startup
    let renderer = TemplateRenderer::new()?;
    info!("Template renderer initialized");

    let state = AppState {
        config: config.clone(),
        generator,
        renderer: Arc::new(renderer),
        sessions: SessionStore::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Remote backend when configured, otherwise the in-process mock.
fn build_generator(config: &Config) -> Result<Arc<dyn GenerationService>> {
    match &config.generation_backend_url {
        Some(url) => {
            info!("Forwarding generation to {url}");
            Ok(Arc::new(RemoteGenerationService::new(
                url,
                config.service_timeout,
            )?))
        }
        None => Ok(Arc::new(MockGenerationService::new(
            config.mock_generate_delay,
            config.mock_lookup_delay,
        ))),
    }
}
