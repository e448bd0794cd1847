//! Route guards.
//!
//! Extractors that hydrate the state tree and reject visitors who may not see
//! a page, redirecting them to where they belong instead.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use clarity_core::{Destination, RootState};

use super::state::StateHandle;

/// Header HTMX sets on its requests.
const HX_REQUEST: &str = "hx-request";

/// Error returned when a guard turns a visitor away.
#[derive(Debug)]
pub enum GuardRejection {
    /// Redirect a full-page request.
    Redirect(Destination),
    /// Ask HTMX to navigate instead of swapping a fragment.
    HtmxRedirect(Destination),
    /// The session layer is missing or failed.
    NoSession,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(&to.path()).into_response(),
            Self::HtmxRedirect(to) => {
                (AppendHeaders([("HX-Redirect", to.path())]), StatusCode::OK).into_response()
            }
            Self::NoSession => {
                tracing::error!("Session unavailable in guarded route");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Load the state and apply `guard`.
async fn guarded<S>(
    parts: &mut Parts,
    state: &S,
    guard: fn(&RootState) -> Result<(), Destination>,
) -> Result<StateHandle, GuardRejection>
where
    S: Send + Sync,
{
    let handle = StateHandle::from_request_parts(parts, state)
        .await
        .map_err(|_| GuardRejection::NoSession)?;

    match guard(handle.state()) {
        Ok(()) => Ok(handle),
        Err(to) => {
            tracing::debug!(path = %parts.uri.path(), redirect = %to.path(), "Guard redirect");
            if parts.headers.contains_key(HX_REQUEST) {
                Err(GuardRejection::HtmxRedirect(to))
            } else {
                Err(GuardRejection::Redirect(to))
            }
        }
    }
}

/// Extractor that requires a signed-in visitor.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Authenticated(handle): Authenticated) -> impl IntoResponse {
///     format!("Hello, {}!", handle.state().auth().username().unwrap_or_default())
/// }
/// ```
pub struct Authenticated(pub StateHandle);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        guarded(parts, state, Destination::guard_authenticated)
            .await
            .map(Self)
    }
}

/// Extractor for the onboarding flow: signed in and not finished yet.
///
/// Visitors who completed onboarding are sent home.
pub struct InOnboarding(pub StateHandle);

impl<S> FromRequestParts<S> for InOnboarding
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        guarded(parts, state, Destination::guard_onboarding)
            .await
            .map(Self)
    }
}

/// Extractor for the app pages: signed in and onboarded.
///
/// Incomplete visitors are sent to the flow at their resume step.
pub struct Onboarded(pub StateHandle);

impl<S> FromRequestParts<S> for Onboarded
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        guarded(parts, state, Destination::guard_onboarded)
            .await
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;
    use clarity_core::Step;

    use super::*;

    #[test]
    fn test_redirect_rejection() {
        let response = GuardRejection::Redirect(Destination::Login).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[test]
    fn test_htmx_rejection_uses_header() {
        let response =
            GuardRejection::HtmxRedirect(Destination::Onboarding(Step::Songs)).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["HX-Redirect"],
            "/onboarding/favorite-songs"
        );
    }
}
