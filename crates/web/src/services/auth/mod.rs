//! Mock authentication.
//!
//! One configured credential pair, checked after a simulated network delay.

mod error;

pub use error::LoginError;

use std::time::Duration;

use clarity_core::validation::validate_login;

use crate::config::CredentialsConfig;

/// Checks login attempts against the configured credentials.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: CredentialsConfig,
    delay: Duration,
}

impl Authenticator {
    #[must_use]
    pub const fn new(credentials: CredentialsConfig, delay: Duration) -> Self {
        Self { credentials, delay }
    }

    /// Validate the form, wait out the delay, then compare credentials.
    ///
    /// Returns the signed-in username.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::Invalid` if the form fails its format checks and
    /// `LoginError::InvalidCredentials` if the pair does not match.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, LoginError> {
        validate_login(username, password).map_err(LoginError::Invalid)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.credentials.matches(username, password) {
            Ok(username.to_string())
        } else {
            tracing::info!(username, "Rejected login attempt");
            Err(LoginError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clarity_core::validation::fields;

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(CredentialsConfig::default(), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_correct_credentials() {
        let username = authenticator()
            .authenticate("user123", "password123")
            .await
            .unwrap();
        assert_eq!(username, "user123");
    }

    #[tokio::test]
    async fn test_wrong_password_is_generic() {
        let err = authenticator()
            .authenticate("user123", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_form_checks_run_first() {
        let err = authenticator().authenticate("ab", "123").await.unwrap_err();
        let LoginError::Invalid(errors) = err else {
            panic!("expected form errors");
        };
        assert!(errors.has(fields::USERNAME));
        assert!(errors.has(fields::PASSWORD));
    }
}
