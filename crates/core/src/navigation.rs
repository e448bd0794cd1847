//! Navigation decisions: where a visitor belongs given their state.

use crate::state::RootState;
use crate::types::Step;

/// Navigation commands offered by the step pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Go to the following step.
    Next,
    /// Go to the preceding step.
    Back,
    /// Jump to the step's skip target.
    Skip,
}

impl NavCommand {
    /// Parse a command from its form value (`next`, `back`, `skip`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "next" => Some(Self::Next),
            "back" => Some(Self::Back),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// A page a visitor should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login page.
    Login,
    /// The onboarding flow at the given step.
    Onboarding(Step),
    /// The authenticated home area.
    Home,
}

impl Destination {
    /// Where the root dispatcher (and the login page) sends a visitor.
    #[must_use]
    pub fn for_visitor(state: &RootState) -> Self {
        if !state.auth().is_authenticated() {
            Self::Login
        } else if state.onboarding().is_completed() {
            Self::Home
        } else {
            Self::Onboarding(state.onboarding().resume_step())
        }
    }

    /// Guard for pages that need a signed-in visitor who finished onboarding.
    ///
    /// # Errors
    ///
    /// Returns the redirect target when the visitor may not see the page.
    pub fn guard_onboarded(state: &RootState) -> Result<(), Self> {
        match Self::for_visitor(state) {
            Self::Home => Ok(()),
            other => Err(other),
        }
    }

    /// Guard for the onboarding flow: signed in, not finished yet.
    ///
    /// # Errors
    ///
    /// Returns [`Destination::Login`] for anonymous visitors and
    /// [`Destination::Home`] once onboarding is complete.
    pub fn guard_onboarding(state: &RootState) -> Result<(), Self> {
        match Self::for_visitor(state) {
            Self::Onboarding(_) => Ok(()),
            other => Err(other),
        }
    }

    /// Guard for pages that only need a signed-in visitor.
    ///
    /// # Errors
    ///
    /// Returns [`Destination::Login`] for anonymous visitors.
    pub fn guard_authenticated(state: &RootState) -> Result<(), Self> {
        if state.auth().is_authenticated() {
            Ok(())
        } else {
            Err(Self::Login)
        }
    }

    /// URL path of the destination.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Onboarding(step) => step.path(),
            Self::Home => "/home".to_string(),
        }
    }
}
