//! In-process generation service.
//!
//! Generates one portfolio per catalog template, keeps them in an
//! exact-match registry, and simulates backend latency with configurable
//! delays. Seeded with the demo portfolios `p1`, `p2` and `p3`, which never
//! expire; generated portfolios are dropped once idle for `PORTFOLIO_IDLE_TTL`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::service::{is_well_formed_id, GenerationService};
use crate::models::portfolio::{portfolio_url, PortfolioDescriptor};
use crate::models::profile::{ProfileSnapshot, UserProfile};
use crate::profile::resume::extract_highlights;
use crate::render::catalog::TEMPLATES;

const DEMO_DESCRIPTION: &str = "This is a sample portfolio generated for demonstration.";

/// Generated portfolios not looked up for this long are forgotten.
pub const PORTFOLIO_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone)]
struct RegistryEntry {
    descriptor: PortfolioDescriptor,
    snapshot: Option<ProfileSnapshot>,
    /// `None` pins the entry.
    last_seen: Option<Instant>,
}

impl RegistryEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.last_seen
            .is_some_and(|seen| now.duration_since(seen) >= ttl)
    }
}

/// Generated portfolios keyed by exact id.
#[derive(Debug, Clone)]
pub struct PortfolioRegistry {
    entries: Arc<RwLock<HashMap<String, RegistryEntry>>>,
    idle_ttl: Duration,
}

impl PortfolioRegistry {
    pub fn with_demo_portfolios(idle_ttl: Duration) -> Self {
        let registry = PortfolioRegistry {
            entries: Arc::default(),
            idle_ttl,
        };
        let mut entries = registry.entries.write().unwrap_or_else(|e| e.into_inner());
        for (index, template) in TEMPLATES.iter().enumerate() {
            let id = format!("p{}", index + 1);
            let descriptor = PortfolioDescriptor {
                portfolio_url: portfolio_url(&id),
                id: id.clone(),
                template_id: template.id.to_string(),
                name: template.name.to_string(),
                preview_image: Some(template.preview_image.to_string()),
                description: DEMO_DESCRIPTION.to_string(),
            };
            entries.insert(
                id,
                RegistryEntry {
                    descriptor,
                    snapshot: None,
                    last_seen: None,
                },
            );
        }
        drop(entries);
        registry
    }

    /// Adds freshly generated portfolios, sweeping out idle ones first.
    fn insert_generated(&self, descriptors: &[PortfolioDescriptor], snapshot: &ProfileSnapshot) {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, self.idle_ttl));
        if entries.len() < before {
            debug!("Evicted {} idle portfolios", before - entries.len());
        }
        for descriptor in descriptors {
            entries.insert(
                descriptor.id.clone(),
                RegistryEntry {
                    descriptor: descriptor.clone(),
                    snapshot: Some(snapshot.clone()),
                    last_seen: Some(now),
                },
            );
        }
    }

    /// Looks up a live entry and marks it as seen. Expired entries are
    /// removed on the way.
    fn touch(&self, id: &str) -> Option<RegistryEntry> {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get_mut(id)?;
        if entry.is_expired(now, self.idle_ttl) {
            entries.remove(id);
            debug!("Portfolio {id} expired");
            return None;
        }
        if entry.last_seen.is_some() {
            entry.last_seen = Some(now);
        }
        Some(entry.clone())
    }

    pub fn get(&self, id: &str) -> Option<PortfolioDescriptor> {
        self.touch(id).map(|e| e.descriptor)
    }

    pub fn snapshot(&self, id: &str) -> Option<ProfileSnapshot> {
        self.touch(id).and_then(|e| e.snapshot)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

pub struct MockGenerationService {
    registry: PortfolioRegistry,
    generate_delay: Duration,
    lookup_delay: Duration,
}

impl MockGenerationService {
    pub fn new(generate_delay: Duration, lookup_delay: Duration) -> Self {
        MockGenerationService {
            registry: PortfolioRegistry::with_demo_portfolios(PORTFOLIO_IDLE_TTL),
            generate_delay,
            lookup_delay,
        }
    }

    /// No simulated latency.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn generate(&self, profile: &UserProfile) -> Result<Vec<PortfolioDescriptor>, AppError> {
        tokio::time::sleep(self.generate_delay).await;

        let highlights = match &profile.resume {
            Some(resume) => extract_highlights(resume).await,
            None => Vec::new(),
        };
        let snapshot = ProfileSnapshot::capture(profile, highlights);

        let portfolios: Vec<PortfolioDescriptor> = TEMPLATES
            .iter()
            .map(|template| {
                let id = Uuid::new_v4().to_string();
                PortfolioDescriptor {
                    portfolio_url: portfolio_url(&id),
                    id,
                    template_id: template.id.to_string(),
                    name: template.name.to_string(),
                    preview_image: Some(template.preview_image.to_string()),
                    description: template.describe(profile),
                }
            })
            .collect();

        self.registry.insert_generated(&portfolios, &snapshot);

        info!(
            "Generated {} portfolios for '{}' ({} resume highlights)",
            portfolios.len(),
            snapshot.name,
            snapshot.highlights.len()
        );
        Ok(portfolios)
    }

    async fn get_by_id(&self, id: &str) -> Result<PortfolioDescriptor, AppError> {
        tokio::time::sleep(self.lookup_delay).await;

        if !is_well_formed_id(id) {
            debug!("Rejected malformed portfolio id {id:?}");
            return Err(AppError::NotFound("Portfolio not found".to_string()));
        }
        self.registry
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))
    }

    async fn snapshot(&self, id: &str) -> Option<ProfileSnapshot> {
        self.registry.snapshot(id)
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
