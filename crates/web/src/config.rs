//! Web server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CLARITY_HOST` - Bind address (default: 127.0.0.1)
//! - `CLARITY_PORT` - Listen port (default: 3000)
//! - `CLARITY_BASE_URL` - Public URL (default: `http://localhost:3000`); session
//!   cookies are marked `Secure` when it is https
//! - `CLARITY_USERNAME` - The one accepted login username (default: user123)
//! - `CLARITY_PASSWORD` - The one accepted login password (default: password123)
//! - `CLARITY_LOGIN_DELAY_MS` - Simulated network delay on login (default: 500)
//! - `CLARITY_DATABASE_URL` - `SQLite` URL for session storage; sessions are kept
//!   in memory when unset
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Default login username.
pub const DEFAULT_USERNAME: &str = "user123";

/// Default login password.
pub const DEFAULT_PASSWORD: &str = "password123";

/// Default simulated login delay.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(500);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct ClarityConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// The single accepted credential pair
    pub credentials: CredentialsConfig,
    /// Simulated network delay before login resolves
    pub login_delay: Duration,
    /// `SQLite` URL for the session store (contains a path, kept secret)
    pub database_url: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Mock login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: SecretString::from(DEFAULT_PASSWORD),
        }
    }
}

impl CredentialsConfig {
    /// Whether `username`/`password` match the configured pair.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            credentials: CredentialsConfig::default(),
            login_delay: DEFAULT_LOGIN_DELAY,
            database_url: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ClarityConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = get_optional_env("CLARITY_HOST")
            .map(|v| parse_env::<IpAddr>("CLARITY_HOST", &v))
            .transpose()?
            .unwrap_or(defaults.host);
        let port = get_optional_env("CLARITY_PORT")
            .map(|v| parse_env::<u16>("CLARITY_PORT", &v))
            .transpose()?
            .unwrap_or(defaults.port);
        let base_url = get_env_or_default("CLARITY_BASE_URL", &defaults.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "CLARITY_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let credentials = CredentialsConfig {
            username: get_env_or_default("CLARITY_USERNAME", DEFAULT_USERNAME),
            password: SecretString::from(get_env_or_default("CLARITY_PASSWORD", DEFAULT_PASSWORD)),
        };
        if credentials.username.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CLARITY_USERNAME".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let login_delay = get_optional_env("CLARITY_LOGIN_DELAY_MS")
            .map(|v| parse_env::<u64>("CLARITY_LOGIN_DELAY_MS", &v))
            .transpose()?
            .map_or(defaults.login_delay, Duration::from_millis);

        Ok(Self {
            host,
            port,
            base_url,
            credentials,
            login_delay,
            database_url: get_optional_env("CLARITY_DATABASE_URL").map(SecretString::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable value.
fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClarityConfig::default();
        assert_eq!(config.credentials.username, "user123");
        assert_eq!(config.login_delay, Duration::from_millis(500));
        assert!(config.database_url.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_socket_addr() {
        let config = ClarityConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..ClarityConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_credentials_match() {
        let credentials = CredentialsConfig::default();
        assert!(credentials.matches("user123", "password123"));
        assert!(!credentials.matches("user123", "password124"));
        assert!(!credentials.matches("User123", "password123"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = CredentialsConfig {
            username: "demo".to_string(),
            password: SecretString::from("super_secret_password"),
        };

        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("demo"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }

    #[test]
    fn test_parse_env_reports_key() {
        let err = parse_env::<u16>("CLARITY_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("CLARITY_PORT"));
    }

    #[test]
    fn test_https_is_secure() {
        let config = ClarityConfig {
            base_url: "https://clarity.example.com".to_string(),
            ..ClarityConfig::default()
        };
        assert!(config.is_secure());
    }
}
