//! Personal profile: onboarding step 1 and the `/profile` page.
//!
//! The form is multipart because of the optional photo. A photo is read to
//! completion and converted to a data-URI before the draft can be committed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use clarity_core::photo::{MAX_PHOTO_BYTES, to_data_uri};
use clarity_core::validation::fields;
use clarity_core::{Action, FieldErrors, PhotoError, ProfileDraft, Step, StepData};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{Flashes, InOnboarding, Onboarded, StateHandle, push_flash};
use crate::models::Flash;
use crate::models::views::{ProfileForm, StepIndicator};

/// Request body limit for profile submissions.
pub const PROFILE_BODY_LIMIT: usize = MAX_PHOTO_BYTES + 256 * 1024;

/// Onboarding step 1 template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/personal_profile.html")]
pub struct ProfileStepTemplate {
    pub indicator: StepIndicator,
    pub form: ProfileForm,
    pub errors: FieldErrors,
    pub flashes: Vec<Flash>,
}

/// `/profile` page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfilePageTemplate {
    pub active_page: &'static str,
    pub form: ProfileForm,
    pub errors: FieldErrors,
    pub flashes: Vec<Flash>,
}

/// Outcome of a profile submission.
enum Submission {
    Saved,
    Rejected(ProfileForm, FieldErrors),
}

/// Render step 1 from the committed profile.
pub fn step_page(handle: &StateHandle, flashes: Vec<Flash>) -> Response {
    let onboarding = handle.state().onboarding();
    ProfileStepTemplate {
        indicator: StepIndicator::new(onboarding, Step::Profile),
        form: ProfileForm::from_data(onboarding.personal_profile()),
        errors: FieldErrors::new(),
        flashes,
    }
    .into_response()
}

/// Read the multipart fields into `draft`.
///
/// An empty file part keeps the current picture. Returns the photo
/// conversion error, if any.
async fn read_profile_form(
    mut multipart: Multipart,
    draft: &mut ProfileDraft,
) -> Result<Option<PhotoError>> {
    let mut photo_error = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => draft.name = field.text().await?,
            "age" => draft.age = field.text().await?,
            "email" => draft.email = field.text().await?,
            "location" => {
                let location = field.text().await?;
                if !location.trim().is_empty() {
                    draft.location = location.trim().to_string();
                }
            }
            "photo" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    continue;
                }

                draft.begin_photo_upload();
                let outcome = to_data_uri(&content_type, &bytes);
                if let Err(err) = draft.finish_photo_upload(outcome) {
                    tracing::debug!(error = %err, content_type, "Rejected photo upload");
                    photo_error = Some(err);
                }
            }
            _ => {}
        }
    }

    Ok(photo_error)
}

/// Validate a submission and commit it on success.
async fn submit(handle: &mut StateHandle, multipart: Multipart) -> Result<Submission> {
    let mut draft = ProfileDraft::from_data(handle.state().onboarding().personal_profile());
    let photo_error = read_profile_form(multipart, &mut draft).await?;
    let form = ProfileForm::from_draft(&draft);

    let mut errors = match draft.into_data() {
        Ok(data) if photo_error.is_none() => {
            return Ok(
                match handle
                    .dispatch(Action::CommitStep(StepData::Profile(data)))
                    .await
                {
                    Ok(()) => Submission::Saved,
                    Err(errors) => Submission::Rejected(form, errors),
                },
            );
        }
        Ok(_) => FieldErrors::new(),
        Err(errors) => errors,
    };

    if let Some(err) = photo_error {
        errors.insert(fields::PROFILE_PICTURE, err.to_string());
    }
    Ok(Submission::Rejected(form, errors))
}

/// `POST /onboarding/personal-profile`.
#[instrument(skip_all)]
pub async fn commit_step(
    InOnboarding(mut handle): InOnboarding,
    multipart: Multipart,
) -> Result<Response> {
    match submit(&mut handle, multipart).await? {
        Submission::Saved => {
            let next = Step::Profile.next();
            handle.dispatch(Action::SetCurrentStep(next)).await?;
            push_flash(handle.session(), Flash::success("Profile saved successfully!")).await;
            Ok(Redirect::to(&next.path()).into_response())
        }
        Submission::Rejected(form, errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            ProfileStepTemplate {
                indicator: StepIndicator::new(handle.state().onboarding(), Step::Profile),
                form,
                errors,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}

/// `GET /profile`.
#[instrument(skip_all)]
pub async fn page(Onboarded(handle): Onboarded, Flashes(flashes): Flashes) -> impl IntoResponse {
    ProfilePageTemplate {
        active_page: "profile",
        form: ProfileForm::from_data(handle.state().onboarding().personal_profile()),
        errors: FieldErrors::new(),
        flashes,
    }
}

/// `POST /profile`.
#[instrument(skip_all)]
pub async fn save(Onboarded(mut handle): Onboarded, multipart: Multipart) -> Result<Response> {
    match submit(&mut handle, multipart).await? {
        Submission::Saved => {
            push_flash(handle.session(), Flash::success("Profile saved successfully!")).await;
            Ok(Redirect::to("/profile").into_response())
        }
        Submission::Rejected(form, errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            ProfilePageTemplate {
                active_page: "profile",
                form,
                errors,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}
