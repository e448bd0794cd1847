//! Per-request state container.
//!
//! [`StateHandle`] hydrates the browser's `RootState` from its session and is
//! the only way handlers change it: every successful dispatch is saved back
//! before the handler returns.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use clarity_core::{Action, FieldErrors, RootState};
use tower_sessions::Session;

use crate::models::session_keys;
use crate::services::PersistenceAdapter;

/// The browser's state tree plus the session it came from.
pub struct StateHandle {
    session: Session,
    state: RootState,
}

impl StateHandle {
    /// Hydrate from `session`, falling back to defaults when there is no
    /// readable record.
    pub async fn load(session: Session) -> Self {
        let state = PersistenceAdapter::new(&session)
            .load()
            .await
            .unwrap_or_default();
        Self { session, state }
    }

    #[must_use]
    pub const fn state(&self) -> &RootState {
        &self.state
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Apply `action` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns the field errors of a rejected step commit; nothing is saved
    /// in that case.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), FieldErrors> {
        let name = action.name();
        if let Err(errors) = self.state.dispatch(action) {
            tracing::debug!(action = name, errors = %errors, "Transition rejected");
            return Err(errors);
        }

        tracing::debug!(action = name, "State transition");
        PersistenceAdapter::new(&self.session)
            .save(&self.state)
            .await;
        Ok(())
    }

    /// Remove the persisted record and the drafts kept beside it.
    pub async fn purge(&self) {
        PersistenceAdapter::new(&self.session).clear().await;
        for key in [session_keys::SONGS_DRAFT, session_keys::SUCCESS_COUNTDOWN] {
            if let Err(e) = self.session.remove_value(key).await {
                tracing::warn!(key, error = %e, "Failed to remove session value");
            }
        }
    }
}

impl<S> FromRequestParts<S> for StateHandle
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self::load(session).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use clarity_core::onboarding::PaymentInformationData;
    use clarity_core::{Countdown, StepData};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_dispatch_persists() {
        let session = session();
        let mut handle = StateHandle::load(session.clone()).await;
        handle
            .dispatch(Action::Login {
                username: "user123".to_string(),
            })
            .await
            .unwrap();

        let reloaded = StateHandle::load(session).await;
        assert!(reloaded.state().auth().is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_dispatch_saves_nothing() {
        let session = session();
        let mut handle = StateHandle::load(session.clone()).await;
        let result = handle
            .dispatch(Action::CommitStep(StepData::Payment(
                PaymentInformationData::default(),
            )))
            .await;

        assert!(result.is_err());
        assert!(PersistenceAdapter::new(&session).load().await.is_none());
    }

    #[tokio::test]
    async fn test_purge_removes_record_and_drafts() {
        let session = session();
        let mut handle = StateHandle::load(session.clone()).await;
        handle.dispatch(Action::Complete).await.unwrap();
        session
            .insert(session_keys::SUCCESS_COUNTDOWN, Countdown::new())
            .await
            .unwrap();

        handle.purge().await;

        assert!(PersistenceAdapter::new(&session).load().await.is_none());
        assert!(
            session
                .get::<Countdown>(session_keys::SUCCESS_COUNTDOWN)
                .await
                .unwrap()
                .is_none()
        );
    }
}
