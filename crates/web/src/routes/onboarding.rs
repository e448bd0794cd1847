//! Onboarding flow: mounting, step pages, navigation and the success
//! countdown.
//!
//! The form steps commit through their own modules (`profile`, `songs`,
//! `payment`); this module decides which step page to show and moves the
//! step pointer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Path,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use clarity_core::{Action, Countdown, CountdownEvent, NavCommand, Step};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{payment, profile, songs};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{Flashes, InOnboarding, StateHandle};
use crate::models::{Flash, session_keys};

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub command: String,
}

/// Success page template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/success.html")]
pub struct SuccessTemplate {
    pub countdown: Countdown,
    pub flashes: Vec<Flash>,
}

/// Countdown fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/countdown.html")]
pub struct CountdownTemplate {
    pub countdown: Countdown,
}

/// `GET /onboarding`: position the flow at the resume step.
#[instrument(skip_all)]
pub async fn mount(InOnboarding(mut handle): InOnboarding) -> Result<Redirect> {
    let step = handle.state().onboarding().resume_step();
    handle.dispatch(Action::SetCurrentStep(step)).await?;
    tracing::debug!(step = step.number(), "Resuming onboarding");
    Ok(Redirect::to(&step.path()))
}

/// Position the flow on `step` and render its page.
async fn enter_step(mut handle: StateHandle, step: Step, flashes: Vec<Flash>) -> Result<Response> {
    handle.dispatch(Action::SetCurrentStep(step)).await?;

    Ok(match step {
        Step::Profile => profile::step_page(&handle, flashes),
        Step::Songs => songs::step_page(&handle, flashes).await,
        Step::Payment => payment::step_page(&handle, flashes),
        Step::Success => success_page(&handle, flashes).await,
    })
}

/// `GET /onboarding/personal-profile`.
#[instrument(skip_all)]
pub async fn personal_profile(
    InOnboarding(handle): InOnboarding,
    Flashes(flashes): Flashes,
) -> Result<Response> {
    enter_step(handle, Step::Profile, flashes).await
}

/// `GET /onboarding/favorite-songs`.
#[instrument(skip_all)]
pub async fn favorite_songs(
    InOnboarding(handle): InOnboarding,
    Flashes(flashes): Flashes,
) -> Result<Response> {
    enter_step(handle, Step::Songs, flashes).await
}

/// `GET /onboarding/payment-information`.
#[instrument(skip_all)]
pub async fn payment_information(
    InOnboarding(handle): InOnboarding,
    Flashes(flashes): Flashes,
) -> Result<Response> {
    enter_step(handle, Step::Payment, flashes).await
}

/// `GET /onboarding/success`.
#[instrument(skip_all)]
pub async fn success(
    InOnboarding(handle): InOnboarding,
    Flashes(flashes): Flashes,
) -> Result<Response> {
    enter_step(handle, Step::Success, flashes).await
}

/// `GET /onboarding/{slug}` for slugs that name no step.
#[instrument(skip_all, fields(slug = %slug))]
pub async fn unknown_step(Path(slug): Path<String>) -> AppError {
    AppError::NotFound(format!("onboarding step {slug}"))
}

/// `POST /onboarding/navigate`: next, back or skip.
#[instrument(skip_all, fields(command = %form.command))]
pub async fn navigate(
    InOnboarding(mut handle): InOnboarding,
    Form(form): Form<NavigateForm>,
) -> Result<Redirect> {
    let command = NavCommand::parse(&form.command)
        .ok_or_else(|| AppError::BadRequest(format!("unknown command: {}", form.command)))?;
    handle.dispatch(Action::Navigate(command)).await?;
    Ok(Redirect::to(&handle.state().onboarding().current_step().path()))
}

// =============================================================================
// Success Countdown
// =============================================================================

/// Render the Success page and re-arm its countdown.
async fn success_page(handle: &StateHandle, flashes: Vec<Flash>) -> Response {
    let countdown = Countdown::new();
    store_countdown(handle.session(), countdown).await;
    SuccessTemplate { countdown, flashes }.into_response()
}

async fn store_countdown(session: &Session, countdown: Countdown) {
    if let Err(e) = session
        .insert(session_keys::SUCCESS_COUNTDOWN, countdown)
        .await
    {
        tracing::warn!(error = %e, "Failed to save countdown");
    }
}

/// The resume page for a visitor who is not on the Success step.
///
/// Onboarding can only be finished from Success.
fn off_success(handle: &StateHandle) -> Option<String> {
    let onboarding = handle.state().onboarding();
    if onboarding.current_step() == Step::Success {
        return None;
    }
    tracing::debug!(
        step = onboarding.current_step().number(),
        "Completion attempted before the success step"
    );
    Some(onboarding.resume_step().path())
}

/// Finish onboarding and drop the countdown.
async fn finish(handle: &mut StateHandle) -> Result<()> {
    handle.dispatch(Action::Complete).await?;
    handle
        .session()
        .remove_value(session_keys::SUCCESS_COUNTDOWN)
        .await?;
    tracing::info!("Onboarding completed");
    Ok(())
}

/// `POST /onboarding/success/tick`: advance the countdown (HTMX poll).
#[instrument(skip_all)]
pub async fn tick(InOnboarding(mut handle): InOnboarding) -> Result<Response> {
    if let Some(path) = off_success(&handle) {
        return Ok(AppendHeaders([("HX-Redirect", path)]).into_response());
    }

    let mut countdown = handle
        .session()
        .get::<Countdown>(session_keys::SUCCESS_COUNTDOWN)
        .await?
        .unwrap_or_default();

    match countdown.tick() {
        CountdownEvent::Remaining(_) => {
            store_countdown(handle.session(), countdown).await;
            Ok(CountdownTemplate { countdown }.into_response())
        }
        CountdownEvent::Finished => {
            finish(&mut handle).await?;
            Ok(AppendHeaders([("HX-Redirect", "/home")]).into_response())
        }
    }
}

/// `POST /onboarding/complete`: "Enter Workspace".
#[instrument(skip_all)]
pub async fn complete(InOnboarding(mut handle): InOnboarding) -> Result<Redirect> {
    if let Some(path) = off_success(&handle) {
        return Ok(Redirect::to(&path));
    }

    finish(&mut handle).await?;
    Ok(Redirect::to("/home"))
}
