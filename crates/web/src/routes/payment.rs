//! Payment information: onboarding step 3 and the `/payments` page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use clarity_core::onboarding::PaymentInformationData;
use clarity_core::payment::{format_expiry_input, sanitize_card_number, sanitize_cvv};
use clarity_core::{Action, FieldErrors, Step, StepData};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{Authenticated, Flashes, InOnboarding, Onboarded, StateHandle, push_flash};
use crate::models::Flash;
use crate::models::views::{PaymentForm, StepIndicator};

/// Payment form data, as typed.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentFormInput {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub cardholder_name: String,
}

impl PaymentFormInput {
    /// Apply the input sanitation of the payment fields.
    ///
    /// A card number that is not all digits or too long is kept as typed so
    /// validation reports it.
    #[must_use]
    pub fn into_data(self) -> PaymentInformationData {
        PaymentInformationData {
            card_number: sanitize_card_number(&self.card_number)
                .unwrap_or_else(|| self.card_number.trim().to_string()),
            expiry_date: format_expiry_input(&self.expiry_date),
            cvv: sanitize_cvv(&self.cvv),
            cardholder_name: self.cardholder_name.trim().to_string(),
        }
    }
}

/// Onboarding step 3 template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/payment_information.html")]
pub struct PaymentStepTemplate {
    pub indicator: StepIndicator,
    pub form: PaymentForm,
    pub errors: FieldErrors,
    pub flashes: Vec<Flash>,
}

/// `/payments` page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/payments.html")]
pub struct PaymentsPageTemplate {
    pub active_page: &'static str,
    pub form: PaymentForm,
    pub errors: FieldErrors,
    pub flashes: Vec<Flash>,
}

/// Live card preview fragment (for HTMX), with the expiry input reformatted
/// out of band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/payment_preview.html")]
pub struct PaymentPreviewTemplate {
    pub form: PaymentForm,
}

impl PaymentPreviewTemplate {
    #[must_use]
    pub fn new(input: PaymentFormInput) -> Self {
        Self {
            form: PaymentForm::from_data(&input.into_data()),
        }
    }
}

/// Render step 3 from the committed data.
pub fn step_page(handle: &StateHandle, flashes: Vec<Flash>) -> Response {
    let onboarding = handle.state().onboarding();
    PaymentStepTemplate {
        indicator: StepIndicator::new(onboarding, Step::Payment),
        form: PaymentForm::for_mount(onboarding),
        errors: FieldErrors::new(),
        flashes,
    }
    .into_response()
}

/// Validate and commit; on rejection returns the form to re-render.
async fn submit(
    handle: &mut StateHandle,
    input: PaymentFormInput,
) -> std::result::Result<(), (PaymentForm, FieldErrors)> {
    let data = input.into_data();
    let form = PaymentForm::from_data(&data);
    handle
        .dispatch(Action::CommitStep(StepData::Payment(data)))
        .await
        .map_err(|errors| (form, errors))
}

/// `POST /onboarding/payment-information`.
#[instrument(skip_all)]
pub async fn commit_step(
    InOnboarding(mut handle): InOnboarding,
    Form(input): Form<PaymentFormInput>,
) -> Result<Response> {
    match submit(&mut handle, input).await {
        Ok(()) => {
            let next = Step::Payment.next();
            handle.dispatch(Action::SetCurrentStep(next)).await?;
            push_flash(
                handle.session(),
                Flash::success("Payment information saved securely!"),
            )
            .await;
            Ok(Redirect::to(&next.path()).into_response())
        }
        Err((form, errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            PaymentStepTemplate {
                indicator: StepIndicator::new(handle.state().onboarding(), Step::Payment),
                form,
                errors,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}

/// `POST /onboarding/payment-information/preview`.
///
/// Serves both the onboarding step and `/payments`; nothing is committed.
#[instrument(skip_all)]
pub async fn preview(
    Authenticated(_handle): Authenticated,
    Form(input): Form<PaymentFormInput>,
) -> impl IntoResponse {
    PaymentPreviewTemplate::new(input)
}

/// `GET /payments`.
#[instrument(skip_all)]
pub async fn page(Onboarded(handle): Onboarded, Flashes(flashes): Flashes) -> impl IntoResponse {
    PaymentsPageTemplate {
        active_page: "payments",
        form: PaymentForm::for_mount(handle.state().onboarding()),
        errors: FieldErrors::new(),
        flashes,
    }
}

/// `POST /payments`.
#[instrument(skip_all)]
pub async fn save(
    Onboarded(mut handle): Onboarded,
    Form(input): Form<PaymentFormInput>,
) -> Result<Response> {
    match submit(&mut handle, input).await {
        Ok(()) => {
            push_flash(
                handle.session(),
                Flash::success("Payment information saved securely!"),
            )
            .await;
            Ok(Redirect::to("/payments").into_response())
        }
        Err((form, errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            PaymentsPageTemplate {
                active_page: "payments",
                form,
                errors,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}
