//! Persistence of the state tree in the browser's session record.
//!
//! The whole `RootState` is kept as one JSON string under
//! [`session_keys::APP_STATE`]. Failures are logged and swallowed: the request
//! carries on with its in-memory state.

use clarity_core::RootState;
use tower_sessions::Session;

use crate::models::session_keys;

/// Reads and writes the persisted state record.
pub struct PersistenceAdapter<'a> {
    session: &'a Session,
}

impl<'a> PersistenceAdapter<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Serialize `state` into the record.
    pub async fn save(&self, state: &RootState) {
        let serialized = match serde_json::to_string(state) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize app state");
                return;
            }
        };

        if let Err(e) = self
            .session
            .insert(session_keys::APP_STATE, serialized)
            .await
        {
            tracing::error!(error = %e, "Failed to save app state");
        }
    }

    /// The persisted state, or `None` when there is no readable record.
    ///
    /// A record whose auth flag and username disagree counts as unreadable.
    pub async fn load(&self) -> Option<RootState> {
        let serialized = match self.session.get::<String>(session_keys::APP_STATE).await {
            Ok(Some(serialized)) => serialized,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read app state");
                return None;
            }
        };

        let state: RootState = match serde_json::from_str(&serialized) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable app state");
                return None;
            }
        };

        if !state.auth().is_consistent() {
            tracing::warn!(
                authenticated = state.auth().is_authenticated(),
                "Discarding app state with mismatched auth flag and username"
            );
            return None;
        }

        Some(state)
    }

    /// Remove the record.
    pub async fn clear(&self) {
        if let Err(e) = self.session.remove_value(session_keys::APP_STATE).await {
            tracing::error!(error = %e, "Failed to clear app state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use clarity_core::onboarding::{
        FavoriteSong, FavoriteSongsData, PaymentInformationData, PersonalProfileData,
    };
    use clarity_core::{Action, SongId, Step, StepData};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn sample_state() -> RootState {
        let mut state = RootState::default();
        state
            .dispatch(Action::Login {
                username: "user123".to_string(),
            })
            .unwrap();
        state
            .dispatch(Action::CommitStep(StepData::Profile(PersonalProfileData {
                name: "Alex Thompson".to_string(),
                age: "24".to_string(),
                email: "alex@example.com".to_string(),
                ..PersonalProfileData::default()
            })))
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_load_without_record_is_absent() {
        let session = session();
        assert!(PersistenceAdapter::new(&session).load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrips() {
        let session = session();
        let adapter = PersistenceAdapter::new(&session);
        let state = sample_state();

        adapter.save(&state).await;

        assert_eq!(adapter.load().await, Some(state));
    }

    /// Every step committed, a picture, a non-default position, and finished.
    fn finished_state() -> RootState {
        let mut state = sample_state();
        state
            .dispatch(Action::CommitStep(StepData::Profile(PersonalProfileData {
                name: "Alex Thompson".to_string(),
                age: "24".to_string(),
                email: "alex@example.com".to_string(),
                location: "Lisbon, PT".to_string(),
                profile_picture: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            })))
            .unwrap();
        state
            .dispatch(Action::CommitStep(StepData::Songs(FavoriteSongsData {
                songs: vec![
                    FavoriteSong {
                        id: SongId::from_sequence(1_700_000_000_000),
                        title: "Clair de Lune".to_string(),
                        artist: "Debussy".to_string(),
                    },
                    FavoriteSong {
                        id: SongId::from_sequence(1_700_000_000_001),
                        title: "Blue in Green".to_string(),
                        artist: "Miles Davis".to_string(),
                    },
                ],
            })))
            .unwrap();
        state
            .dispatch(Action::CommitStep(StepData::Payment(PaymentInformationData {
                card_number: "4111111111111111".to_string(),
                expiry_date: "12/29".to_string(),
                cvv: "123".to_string(),
                cardholder_name: "Alex Thompson".to_string(),
            })))
            .unwrap();
        state.dispatch(Action::SetCurrentStep(Step::Success)).unwrap();
        state.dispatch(Action::Complete).unwrap();
        state
    }

    #[tokio::test]
    async fn test_finished_state_roundtrips() {
        let session = session();
        let adapter = PersistenceAdapter::new(&session);
        let state = finished_state();
        assert!(state.onboarding().is_completed());
        assert_eq!(state.onboarding().current_step(), Step::Success);

        adapter.save(&state).await;

        assert_eq!(adapter.load().await, Some(state));
    }

    #[tokio::test]
    async fn test_signed_in_record_without_username_loads_as_absent() {
        let session = session();
        let adapter = PersistenceAdapter::new(&session);
        adapter.save(&sample_state()).await;

        let raw: String = session
            .get(session_keys::APP_STATE)
            .await
            .unwrap()
            .unwrap();
        let tampered = raw.replace(r#""username":"user123""#, r#""username":null"#);
        assert_ne!(raw, tampered);
        session
            .insert(session_keys::APP_STATE, tampered)
            .await
            .unwrap();

        assert!(adapter.load().await.is_none());
    }

    #[tokio::test]
    async fn test_record_is_a_single_json_string() {
        let session = session();
        PersistenceAdapter::new(&session)
            .save(&sample_state())
            .await;

        let raw: String = session
            .get(session_keys::APP_STATE)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.contains(r#""completedSteps":[1]"#));
    }

    #[tokio::test]
    async fn test_unreadable_record_loads_as_absent() {
        let session = session();
        session
            .insert(session_keys::APP_STATE, "{not json")
            .await
            .unwrap();
        assert!(PersistenceAdapter::new(&session).load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let session = session();
        let adapter = PersistenceAdapter::new(&session);
        adapter.save(&sample_state()).await;

        adapter.clear().await;

        assert!(adapter.load().await.is_none());
    }
}
