//! Authentication route handlers.
//!
//! Mock login against the configured credential pair, and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use clarity_core::{Action, Destination, FieldErrors};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{Flashes, StateHandle, push_flash};
use crate::models::Flash;
use crate::services::LoginError;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub errors: FieldErrors,
    /// Form-level message for rejected credentials.
    pub error: Option<String>,
    pub flashes: Vec<Flash>,
}

/// Where an already signed-in visitor of the login page goes.
fn signed_in_redirect(handle: &StateHandle) -> Option<Redirect> {
    let auth = handle.state().auth();
    if !auth.is_authenticated() {
        return None;
    }
    if handle.state().onboarding().is_completed() {
        Some(Redirect::to("/home"))
    } else {
        Some(Redirect::to("/onboarding"))
    }
}

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(handle: StateHandle, Flashes(flashes): Flashes) -> Response {
    if let Some(redirect) = signed_in_redirect(&handle) {
        return redirect.into_response();
    }

    LoginTemplate {
        username: String::new(),
        errors: FieldErrors::new(),
        error: None,
        flashes,
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    mut handle: StateHandle,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if let Some(redirect) = signed_in_redirect(&handle) {
        return Ok(redirect.into_response());
    }

    match state
        .authenticator()
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(username) => {
            handle
                .dispatch(Action::Login {
                    username: username.clone(),
                })
                .await?;
            set_sentry_user(&username);
            tracing::info!(username, "Signed in");

            push_flash(
                handle.session(),
                Flash::success(format!("Welcome back, {username}!")),
            )
            .await;

            let to = Destination::for_visitor(handle.state());
            Ok(Redirect::to(&to.path()).into_response())
        }
        Err(LoginError::Invalid(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginTemplate {
                username: form.username,
                errors,
                error: None,
                flashes: Vec::new(),
            },
        )
            .into_response()),
        Err(err @ LoginError::InvalidCredentials) => Ok((
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                username: form.username,
                errors: FieldErrors::new(),
                error: Some(err.to_string()),
                flashes: vec![Flash::error(err.to_string())],
            },
        )
            .into_response()),
    }
}

/// Handle logout.
///
/// Resets auth and onboarding, removes the persisted record, then destroys
/// the session so the next visit starts under a fresh id.
#[instrument(skip_all)]
pub async fn logout(mut handle: StateHandle) -> Result<Redirect> {
    handle.dispatch(Action::Logout).await?;
    handle.purge().await;
    clear_sentry_user();

    if let Err(e) = handle.session().flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    push_flash(
        handle.session(),
        Flash::info("You have been logged out successfully"),
    )
    .await;

    Ok(Redirect::to("/login"))
}
