//! HTTP client for a real generation backend.
//!
//! Endpoints (relative to `GENERATION_BACKEND_URL`):
//! - `POST /portfolios/generate`: multipart `name`, `bio`, `skills`, optional
//!   `resume`; responds `{ "portfolios": [...] }`
//! - `GET /portfolios/{id}`: one descriptor, 404 when unknown
//!
//! Lookups are retried on 5xx with backoff; generation is not, since a
//! repeated POST would create duplicates. A generate response must hold one
//! descriptor per catalog template or it is treated as a service error.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::generation::service::{is_well_formed_id, GenerationService};
use crate::models::portfolio::PortfolioDescriptor;
use crate::models::profile::UserProfile;
use crate::render::catalog::{resolve, TEMPLATES};

const MAX_LOOKUP_RETRIES: u32 = 3;

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    portfolios: Vec<PortfolioDescriptor>,
}

#[derive(Clone)]
pub struct RemoteGenerationService {
    client: Client,
    base_url: String,
    retry_base_delay: Duration,
}

impl RemoteGenerationService {
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_base_delay: Duration::from_millis(500),
        })
    }

    fn build_form(profile: &UserProfile) -> Result<Form, AppError> {
        let mut form = Form::new()
            .text("name", profile.name.clone())
            .text("bio", profile.bio.clone())
            .text("skills", profile.skills.clone());

        if let Some(resume) = &profile.resume {
            let mut part = Part::bytes(resume.bytes.to_vec()).file_name(resume.file_name.clone());
            if let Some(content_type) = &resume.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| AppError::BadRequest(format!("Invalid resume content type: {e}")))?;
            }
            form = form.part("resume", part);
        }
        Ok(form)
    }
}

/// One descriptor per catalog template, each template exactly once.
fn check_generated(portfolios: &[PortfolioDescriptor]) -> Result<(), AppError> {
    let mut seen = Vec::with_capacity(portfolios.len());
    for p in portfolios {
        if resolve(&p.template_id).is_err() || seen.contains(&p.template_id.as_str()) {
            warn!("Backend returned unusable template id {:?}", p.template_id);
            return Err(malformed_response());
        }
        seen.push(p.template_id.as_str());
    }
    if seen.len() != TEMPLATES.len() {
        warn!(
            "Backend returned {} portfolios, expected {}",
            seen.len(),
            TEMPLATES.len()
        );
        return Err(malformed_response());
    }
    Ok(())
}

fn malformed_response() -> AppError {
    AppError::Service("Unexpected response from portfolio service".to_string())
}

fn unreachable_error(e: reqwest::Error) -> AppError {
    warn!("Generation backend request failed: {e}");
    AppError::Service("The portfolio service is unreachable".to_string())
}

#[async_trait]
impl GenerationService for RemoteGenerationService {
    async fn generate(&self, profile: &UserProfile) -> Result<Vec<PortfolioDescriptor>, AppError> {
        let url = format!("{}/portfolios/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(Self::build_form(profile)?)
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation backend returned {status}: {body}");
            return Err(AppError::Service(format!(
                "Failed to generate portfolios (backend status {})",
                status.as_u16()
            )));
        }

        let body: GenerateResponseBody = response
            .json()
            .await
            .map_err(|e| AppError::Service(format!("Unexpected response from portfolio service: {e}")))?;
        check_generated(&body.portfolios)?;
        debug!("Backend generated {} portfolios", body.portfolios.len());
        Ok(body.portfolios)
    }

    async fn get_by_id(&self, id: &str) -> Result<PortfolioDescriptor, AppError> {
        if !is_well_formed_id(id) {
            return Err(AppError::NotFound("Portfolio not found".to_string()));
        }
        let url = format!("{}/portfolios/{id}", self.base_url);

        let mut last_error = None;
        for attempt in 0..MAX_LOOKUP_RETRIES {
            if attempt > 0 {
                let delay = self.retry_base_delay * (1 << (attempt - 1));
                warn!(
                    "Portfolio lookup attempt {attempt} failed, retrying after {}ms...",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(unreachable_error(e));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(format!("Portfolio {id} not found")));
            }
            if status.is_server_error() {
                last_error = Some(AppError::Service(format!(
                    "Failed to load portfolio (backend status {})",
                    status.as_u16()
                )));
                continue;
            }
            if !status.is_success() {
                return Err(AppError::Service(format!(
                    "Failed to load portfolio (backend status {})",
                    status.as_u16()
                )));
            }

            return response
                .json::<PortfolioDescriptor>()
                .await
                .map_err(|e| AppError::Service(format!("Unexpected response from portfolio service: {e}")));
        }

        Err(last_error
            .unwrap_or_else(|| AppError::Service("Failed to load portfolio".to_string())))
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
