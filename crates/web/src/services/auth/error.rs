//! Login error types.

use clarity_core::FieldErrors;
use thiserror::Error;

/// Errors that can occur while signing in.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The form failed its format checks.
    #[error("invalid login form: {0}")]
    Invalid(FieldErrors),

    /// Username or password does not match.
    #[error("Invalid username or password")]
    InvalidCredentials,
}
