//! The generation service contract.
//!
//! `AppState` holds an `Arc<dyn GenerationService>`: the in-process mock by
//! default, or the remote client when `GENERATION_BACKEND_URL` is set.
//! Callers validate profiles before calling `generate`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::portfolio::PortfolioDescriptor;
use crate::models::profile::{ProfileSnapshot, UserProfile};

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Returns one descriptor per template. Fails with `AppError::Service`.
    async fn generate(&self, profile: &UserProfile) -> Result<Vec<PortfolioDescriptor>, AppError>;

    /// Exact-match lookup. Fails with `AppError::NotFound` or `AppError::Service`.
    async fn get_by_id(&self, id: &str) -> Result<PortfolioDescriptor, AppError>;

    /// Profile content captured for a generated portfolio, if this backend keeps it.
    async fn snapshot(&self, _id: &str) -> Option<ProfileSnapshot> {
        None
    }

    /// Backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Bounds a service call; expiry is a retryable `ServiceError`.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(limit, call).await.map_err(|_| {
        AppError::Service(format!(
            "The portfolio service did not respond within {limit:?}"
        ))
    })?
}

/// Ids are opaque but must be non-empty, short, and URL-safe.
pub fn is_well_formed_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
