//! Authentication state.

use serde::{Deserialize, Serialize};

/// Whether the visitor is signed in, and as whom.
///
/// `username` is `Some` exactly when `is_authenticated` is true; the fields
/// are private so only [`AuthState::login`] and [`AuthState::logout`] can
/// change them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    is_authenticated: bool,
    username: Option<String>,
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Mark the visitor as signed in.
    pub fn login(&mut self, username: impl Into<String>) {
        self.is_authenticated = true;
        self.username = Some(username.into());
    }

    /// Forget the signed-in visitor.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Whether the flag/username pairing holds.
    ///
    /// Stored records are checked with this when they are loaded.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.is_authenticated == self.username.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut auth = AuthState::default();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.username(), None);

        auth.login("user123");
        assert!(auth.is_authenticated());
        assert_eq!(auth.username(), Some("user123"));
        assert!(auth.is_consistent());

        auth.logout();
        assert_eq!(auth, AuthState::default());
        assert!(auth.is_consistent());
    }

    #[test]
    fn test_serialized_shape() {
        let mut auth = AuthState::default();
        auth.login("user123");
        let json = serde_json::to_value(&auth).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"isAuthenticated": true, "username": "user123"})
        );
    }

    #[test]
    fn test_inconsistent_record_detected() {
        let auth: AuthState =
            serde_json::from_str(r#"{"isAuthenticated":true,"username":null}"#)
                .unwrap_or_default();
        assert!(!auth.is_consistent());
    }
}
