//! Drives a `ViewModel` against a `GenerationService`.
//!
//! Submission is split in two so the HTTP layer can answer immediately:
//! `start` validates and moves to `Submitting` synchronously, `finish` awaits
//! the service and applies the result unless a newer submission has started.
//! The view-model lock is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::service::{with_timeout, GenerationService};
use crate::models::profile::UserProfile;
use crate::profile::validation::validate_profile;
use crate::wizard::view_model::{Completion, Ticket, ViewModel, ViewState};

/// A validated submission waiting to be sent.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: Ticket,
    profile: UserProfile,
}

/// What the client polls for.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub current: ViewState,
    pub has_draft: bool,
    pub updated_at: DateTime<Utc>,
}

pub struct Wizard {
    service: Arc<dyn GenerationService>,
    timeout: Duration,
    model: Mutex<ViewModel>,
}

impl Wizard {
    pub fn new(service: Arc<dyn GenerationService>, timeout: Duration) -> Self {
        Wizard {
            service,
            timeout,
            model: Mutex::new(ViewModel::new()),
        }
    }

    fn model(&self) -> MutexGuard<'_, ViewModel> {
        self.model.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn view(&self) -> WizardView {
        let model = self.model();
        WizardView {
            current: model.state().clone(),
            has_draft: model.draft().is_some(),
            updated_at: model.updated_at(),
        }
    }

    /// Validates and, if valid, enters `Submitting`. Invalid input is shown
    /// inline and never reaches the service.
    pub fn start(&self, profile: UserProfile) -> Result<PendingSubmission, AppError> {
        let errors = validate_profile(&profile);
        let mut model = self.model();
        if !errors.is_empty() {
            model.reject(errors.clone());
            return Err(AppError::Validation(errors));
        }
        let ticket = model.begin(profile.clone());
        debug!("Submission {ticket} started");
        Ok(PendingSubmission { ticket, profile })
    }

    /// Resubmits the retained draft after a failure.
    pub fn start_retry(&self) -> Result<PendingSubmission, AppError> {
        let draft = self
            .model()
            .draft()
            .cloned()
            .ok_or_else(|| AppError::BadRequest("There is no submission to retry".to_string()))?;
        self.start(draft)
    }

    pub async fn finish(&self, pending: PendingSubmission) -> Completion {
        let result = with_timeout(self.timeout, self.service.generate(&pending.profile)).await;
        let outcome = self.model().complete(pending.ticket, result);
        if outcome == Completion::Stale {
            info!("Discarded stale result for submission {}", pending.ticket);
        }
        outcome
    }

    pub fn edit(&self) {
        self.model().edit();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::generation::mock::MockGenerationService;
    use crate::models::portfolio::{portfolio_url, PortfolioDescriptor};

    /// Answers after a per-name delay, echoing the name in the descriptor.
    struct ScriptedService {
        calls: AtomicUsize,
        fail: bool,
    }

    impl ScriptedService {
        fn new(fail: bool) -> Self {
            ScriptedService {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn generate(
            &self,
            profile: &UserProfile,
        ) -> Result<Vec<PortfolioDescriptor>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = match profile.name.as_str() {
                "First" => Duration::from_millis(2000),
                _ => Duration::from_millis(1500),
            };
            tokio::time::sleep(delay).await;
            if self.fail {
                return Err(AppError::Service("backend unavailable".to_string()));
            }
            Ok(vec![PortfolioDescriptor {
                id: profile.name.clone(),
                template_id: "1".to_string(),
                name: "Minimalist Portfolio".to_string(),
                preview_image: None,
                description: format!("for {}", profile.name),
                portfolio_url: portfolio_url(&profile.name),
            }])
        }

        async fn get_by_id(&self, id: &str) -> Result<PortfolioDescriptor, AppError> {
            Err(AppError::NotFound(id.to_string()))
        }

        fn backend(&self) -> &'static str {
            "scripted"
        }
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            bio: "Short bio text here".to_string(),
            skills: "Go, Rust".to_string(),
            resume: None,
        }
    }

    async fn submit(wizard: &Wizard, profile: UserProfile) -> Result<Completion, AppError> {
        let pending = wizard.start(profile)?;
        Ok(wizard.finish(pending).await)
    }

    fn shown_ids(view: &WizardView) -> Vec<String> {
        match &view.current {
            ViewState::ShowingResults { portfolios } => {
                portfolios.iter().map(|p| p.id.clone()).collect()
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_submission_wins_over_slower_earlier_one() {
        let wizard = Arc::new(Wizard::new(
            Arc::new(ScriptedService::new(false)),
            Duration::from_secs(30),
        ));

        let w1 = wizard.clone();
        let first = tokio::spawn(async move { submit(&w1, profile("First")).await });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let w2 = wizard.clone();
        let second = tokio::spawn(async move { submit(&w2, profile("Second")).await });

        // Second resolves at t=1600ms, first at t=2000ms
        assert_eq!(second.await.unwrap().unwrap(), Completion::Applied);
        assert_eq!(shown_ids(&wizard.view()), vec!["Second"]);

        assert_eq!(first.await.unwrap().unwrap(), Completion::Stale);
        assert_eq!(shown_ids(&wizard.view()), vec!["Second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_profile_never_calls_service() {
        let service = Arc::new(ScriptedService::new(false));
        let wizard = Wizard::new(service.clone(), Duration::from_secs(30));

        let result = submit(&wizard, profile("A")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        match wizard.view().current {
            ViewState::Editing { errors } => assert_eq!(errors[0].field, "name"),
            other => panic!("expected editing, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_retry_reuses_draft() {
        let failing = Wizard::new(Arc::new(ScriptedService::new(true)), Duration::from_secs(30));
        submit(&failing, profile("Al")).await.unwrap();
        let view = failing.view();
        assert!(matches!(view.current, ViewState::ShowingError { .. }));
        assert!(view.has_draft);

        let pending = failing.start_retry().unwrap();
        assert_eq!(pending.profile.name, "Al");
        assert!(matches!(failing.view().current, ViewState::Submitting));
    }

    #[tokio::test]
    async fn test_retry_without_draft_is_rejected() {
        let wizard = Wizard::new(Arc::new(MockGenerationService::instant()), Duration::from_secs(30));
        assert!(matches!(wizard.start_retry(), Err(AppError::BadRequest(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_service_times_out_into_error_state() {
        let wizard = Wizard::new(
            Arc::new(ScriptedService::new(false)),
            Duration::from_millis(500),
        );
        submit(&wizard, profile("Al")).await.unwrap();
        match wizard.view().current {
            ViewState::ShowingError { code, .. } => assert_eq!(code, "SERVICE_ERROR"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_during_submission_discards_result() {
        let wizard = Arc::new(Wizard::new(
            Arc::new(ScriptedService::new(false)),
            Duration::from_secs(30),
        ));
        let pending = wizard.start(profile("Al")).unwrap();
        wizard.edit();
        assert_eq!(wizard.finish(pending).await, Completion::Stale);
        assert!(matches!(wizard.view().current, ViewState::Editing { .. }));
    }

    #[tokio::test]
    async fn test_mock_backed_wizard_shows_three_results() {
        let wizard = Wizard::new(Arc::new(MockGenerationService::instant()), Duration::from_secs(30));
        assert_eq!(
            submit(&wizard, profile("Al")).await.unwrap(),
            Completion::Applied
        );
        assert_eq!(shown_ids(&wizard.view()).len(), 3);
    }
}
