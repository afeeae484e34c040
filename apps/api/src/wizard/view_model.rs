//! The two-step wizard as an explicit state machine.
//!
//! ```text
//!   Editing ──begin──▶ Submitting ──complete(ok)──▶ ShowingResults
//!      ▲  ◀──reject──┘     │                              │
//!      │                   └──complete(err)──▶ ShowingError
//!      └────────────────── edit ◀─────────────────────────┘
//! ```
//!
//! Every `begin` issues a new ticket. `complete` only applies when its
//! ticket is the latest one issued; `reject` and `edit` also supersede any
//! request in flight. The last submitted profile is kept as the draft so a
//! failed submission can be retried without re-entering data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{AppError, NextAction};
use crate::models::portfolio::PortfolioDescriptor;
use crate::models::profile::UserProfile;
use crate::profile::validation::FieldError;

pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Editing {
        errors: Vec<FieldError>,
    },
    Submitting,
    ShowingResults {
        portfolios: Vec<PortfolioDescriptor>,
    },
    ShowingError {
        code: &'static str,
        message: String,
        actions: Vec<NextAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was started (or abandoned) after this one.
    Stale,
}

#[derive(Debug)]
pub struct ViewModel {
    state: ViewState,
    draft: Option<UserProfile>,
    latest: Ticket,
    updated_at: DateTime<Utc>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        ViewModel {
            state: ViewState::Editing { errors: vec![] },
            draft: None,
            latest: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn transition(&mut self, state: ViewState) {
        self.state = state;
        self.updated_at = Utc::now();
    }

    /// A submission that failed validation. Nothing is sent.
    pub fn reject(&mut self, errors: Vec<FieldError>) {
        self.latest += 1;
        self.transition(ViewState::Editing { errors });
    }

    /// A valid submission is about to be sent.
    pub fn begin(&mut self, profile: UserProfile) -> Ticket {
        self.latest += 1;
        self.draft = Some(profile);
        self.transition(ViewState::Submitting);
        self.latest
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<PortfolioDescriptor>, AppError>,
    ) -> Completion {
        if ticket != self.latest {
            return Completion::Stale;
        }
        let next = match result {
            Ok(portfolios) => ViewState::ShowingResults { portfolios },
            Err(e) => ViewState::ShowingError {
                code: e.code(),
                message: e.user_message(),
                actions: e.actions().to_vec(),
            },
        };
        self.transition(next);
        Completion::Applied
    }

    /// Back to the form: dismisses an error, leaves the results, or abandons
    /// a pending request. The draft is kept.
    pub fn edit(&mut self) {
        self.latest += 1;
        self.transition(ViewState::Editing { errors: vec![] });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::portfolio_url;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            bio: "Short bio text here".to_string(),
            skills: "Go, Rust".to_string(),
            resume: None,
        }
    }

    fn results(tag: &str) -> Vec<PortfolioDescriptor> {
        vec![PortfolioDescriptor {
            id: tag.to_string(),
            template_id: "1".to_string(),
            name: "Minimalist Portfolio".to_string(),
            preview_image: None,
            description: tag.to_string(),
            portfolio_url: portfolio_url(tag),
        }]
    }

    #[test]
    fn test_starts_editing_without_errors() {
        let vm = ViewModel::new();
        assert_eq!(vm.state(), &ViewState::Editing { errors: vec![] });
        assert!(vm.draft().is_none());
    }

    #[test]
    fn test_success_shows_results() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin(profile("Al"));
        assert_eq!(vm.state(), &ViewState::Submitting);
        assert_eq!(vm.complete(ticket, Ok(results("a"))), Completion::Applied);
        assert_eq!(
            vm.state(),
            &ViewState::ShowingResults {
                portfolios: results("a")
            }
        );
    }

    #[test]
    fn test_failure_keeps_draft_and_offers_retry() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin(profile("Al"));
        vm.complete(ticket, Err(AppError::Service("backend down".into())));
        match vm.state() {
            ViewState::ShowingError { code, actions, .. } => {
                assert_eq!(*code, "SERVICE_ERROR");
                assert!(actions.contains(&NextAction::Retry));
            }
            other => panic!("expected error state, got {other:?}"),
        }
        assert_eq!(vm.draft().unwrap().name, "Al");
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut vm = ViewModel::new();
        let first = vm.begin(profile("First"));
        let second = vm.begin(profile("Second"));
        assert_eq!(vm.complete(second, Ok(results("second"))), Completion::Applied);
        assert_eq!(vm.complete(first, Ok(results("first"))), Completion::Stale);
        assert_eq!(
            vm.state(),
            &ViewState::ShowingResults {
                portfolios: results("second")
            }
        );
    }

    #[test]
    fn test_stale_error_does_not_replace_pending_state() {
        let mut vm = ViewModel::new();
        let first = vm.begin(profile("First"));
        vm.begin(profile("Second"));
        let outcome = vm.complete(first, Err(AppError::Service("timeout".into())));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(vm.state(), &ViewState::Submitting);
    }

    #[test]
    fn test_reject_supersedes_pending_request() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin(profile("Al"));
        let errors = vec![FieldError {
            field: "bio".into(),
            message: "Bio should be at least 10 characters".into(),
        }];
        vm.reject(errors.clone());
        assert_eq!(vm.complete(ticket, Ok(results("a"))), Completion::Stale);
        assert_eq!(vm.state(), &ViewState::Editing { errors });
        // The last valid draft survives the rejected edit
        assert_eq!(vm.draft().unwrap().name, "Al");
    }

    #[test]
    fn test_edit_returns_to_form_with_draft() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin(profile("Al"));
        vm.complete(ticket, Ok(results("a")));
        vm.edit();
        assert_eq!(vm.state(), &ViewState::Editing { errors: vec![] });
        assert_eq!(vm.draft().unwrap().name, "Al");
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let value = serde_json::to_value(ViewState::Submitting).unwrap();
        assert_eq!(value["state"], "submitting");
    }
}
