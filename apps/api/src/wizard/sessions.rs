use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::wizard::controller::Wizard;

/// Sessions untouched for this long are gone.
const SESSION_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

struct SessionEntry {
    wizard: Arc<Wizard>,
    last_seen: Instant,
}

/// In-memory wizard sessions. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub fn create(&self, wizard: Wizard) -> (Uuid, Arc<Wizard>) {
        let id = Uuid::new_v4();
        let wizard = Arc::new(wizard);
        let now = Instant::now();

        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < SESSION_IDLE_TTL);
        if sessions.len() < before {
            debug!("Evicted {} idle wizard sessions", before - sessions.len());
        }
        sessions.insert(
            id,
            SessionEntry {
                wizard: wizard.clone(),
                last_seen: now,
            },
        );
        (id, wizard)
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Wizard>, AppError> {
        let now = Instant::now();
        let not_found = || AppError::NotFound(format!("Session {id} not found"));

        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = sessions.get_mut(&id).ok_or_else(not_found)?;
        if now.duration_since(entry.last_seen) >= SESSION_IDLE_TTL {
            sessions.remove(&id);
            debug!("Wizard session {id} expired");
            return Err(not_found());
        }
        entry.last_seen = now;
        Ok(entry.wizard.clone())
    }
}
