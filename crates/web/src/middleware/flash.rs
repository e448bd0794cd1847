//! One-shot toast messages carried across a redirect.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{Flash, session_keys};

/// Queue a toast for the next rendered page.
pub async fn push_flash(session: &Session, flash: Flash) {
    let mut pending: Vec<Flash> = session
        .get(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(flash);

    if let Err(e) = session.insert(session_keys::FLASH, pending).await {
        tracing::warn!(error = %e, "Failed to queue flash message");
    }
}

/// Extractor that takes the pending toasts out of the session.
///
/// Only full-page handlers should use it; a fragment response would swallow
/// the toasts.
pub struct Flashes(pub Vec<Flash>);

impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flashes = match parts.extensions.get::<Session>() {
            Some(session) => session
                .remove::<Vec<Flash>>(session_keys::FLASH)
                .await
                .ok()
                .flatten()
                .unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(Self(flashes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flashes_accumulate_in_order() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push_flash(&session, Flash::success("Saved")).await;
        push_flash(&session, Flash::info("Heads up")).await;

        let pending: Vec<Flash> = session.get(session_keys::FLASH).await.unwrap().unwrap();
        assert_eq!(pending, vec![Flash::success("Saved"), Flash::info("Heads up")]);
    }
}
