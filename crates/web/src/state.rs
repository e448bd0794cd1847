//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ClarityConfig;
use crate::services::Authenticator;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Per-browser state is not kept here; it lives
/// in each browser's session record.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClarityConfig,
    authenticator: Authenticator,
}

impl AppState {
    #[must_use]
    pub fn new(config: ClarityConfig) -> Self {
        let authenticator = Authenticator::new(config.credentials.clone(), config.login_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                authenticator,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ClarityConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }
}
