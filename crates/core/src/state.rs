//! The root state tree and its transitions.
//!
//! [`RootState::dispatch`] is the single mutation surface. The web crate
//! persists the tree after every dispatch.

use serde::{Deserialize, Serialize};

use crate::auth::AuthState;
use crate::navigation::NavCommand;
use crate::onboarding::{OnboardingState, StepData};
use crate::types::Step;
use crate::validation::FieldErrors;

/// The whole application state for one browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    auth: AuthState,
    onboarding: OnboardingState,
}

/// Every transition the application can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sign in as `username` (credentials were checked by the caller).
    Login { username: String },
    /// Sign out and reset onboarding.
    Logout,
    /// Position the UI on `step` (mounting a step page).
    SetCurrentStep(Step),
    /// Next / back / skip from a step page.
    Navigate(NavCommand),
    /// Validate and store a step's data.
    CommitStep(StepData),
    /// Finish onboarding.
    Complete,
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::SetCurrentStep(_) => "set_current_step",
            Self::Navigate(_) => "navigate",
            Self::CommitStep(_) => "commit_step",
            Self::Complete => "complete",
        }
    }
}

impl RootState {
    #[must_use]
    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    #[must_use]
    pub const fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    /// Apply `action`.
    ///
    /// Only [`Action::CommitStep`] can fail; a failed commit leaves the state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns the field errors of a rejected step commit.
    pub fn dispatch(&mut self, action: Action) -> Result<(), FieldErrors> {
        match action {
            Action::Login { username } => self.auth.login(username),
            Action::Logout => {
                self.auth.logout();
                self.onboarding.reset();
            }
            Action::SetCurrentStep(step) => self.onboarding.skip_to(step),
            Action::Navigate(command) => self.onboarding.navigate(command),
            Action::CommitStep(data) => {
                self.onboarding.commit_step(data)?;
            }
            Action::Complete => self.onboarding.complete(),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::onboarding::PaymentInformationData;

    #[test]
    fn test_login_then_logout_resets_everything() {
        let mut state = RootState::default();
        state
            .dispatch(Action::Login {
                username: "user123".to_string(),
            })
            .unwrap();
        state.dispatch(Action::Navigate(NavCommand::Next)).unwrap();
        state.dispatch(Action::Complete).unwrap();
        assert!(state.auth().is_authenticated());
        assert!(state.onboarding().is_completed());

        state.dispatch(Action::Logout).unwrap();
        assert_eq!(state, RootState::default());
    }

    #[test]
    fn test_rejected_commit_leaves_state() {
        let mut state = RootState::default();
        let before = state.clone();
        let result = state.dispatch(Action::CommitStep(StepData::Payment(
            PaymentInformationData::default(),
        )));
        assert!(result.is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_set_current_step() {
        let mut state = RootState::default();
        state.dispatch(Action::SetCurrentStep(Step::Payment)).unwrap();
        assert_eq!(state.onboarding().current_step(), Step::Payment);
    }

    #[test]
    fn test_json_roundtrip_keeps_shape() {
        let mut state = RootState::default();
        state
            .dispatch(Action::Login {
                username: "user123".to_string(),
            })
            .unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""auth":{"isAuthenticated":true,"username":"user123"}"#));
        let back: RootState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
