//! Offline validation checks.
//!
//! Values go through the same input sanitation as the web forms before
//! validation, so `clarity-cli check payment --expiry 1228` sees `12/28`.

use clarity_core::FieldErrors;
use clarity_core::onboarding::{PaymentInformationData, PersonalProfileData};
use clarity_core::payment::{format_expiry_input, mask_card_number, sanitize_card_number, sanitize_cvv};
use clarity_core::validation::{validate_payment, validate_profile};

/// Some fields failed validation; holds how many.
#[derive(Debug, thiserror::Error)]
#[error("{0} field(s) failed validation")]
pub struct CheckFailed(pub usize);

/// Validate payment details.
///
/// # Errors
///
/// Returns [`CheckFailed`] if any field is invalid.
pub fn payment(card: &str, expiry: &str, cvv: &str, name: &str) -> Result<(), CheckFailed> {
    let data = PaymentInformationData {
        card_number: sanitize_card_number(card).unwrap_or_else(|| card.trim().to_string()),
        expiry_date: format_expiry_input(expiry),
        cvv: sanitize_cvv(cvv),
        cardholder_name: name.trim().to_string(),
    };

    report(validate_payment(&data), || {
        format!(
            "Payment OK: {} exp {}",
            mask_card_number(&data.card_number),
            data.expiry_date
        )
    })
}

/// Validate a personal profile.
///
/// # Errors
///
/// Returns [`CheckFailed`] if any field is invalid.
pub fn profile(
    name: String,
    age: String,
    email: String,
    location: Option<String>,
) -> Result<(), CheckFailed> {
    let mut data = PersonalProfileData {
        name,
        age,
        email,
        ..PersonalProfileData::default()
    };
    if let Some(location) = location {
        data.location = location;
    }

    report(validate_profile(&data), || {
        format!("Profile OK: {} ({})", data.name.trim(), data.location)
    })
}

#[allow(clippy::print_stdout)]
fn report(
    result: Result<(), FieldErrors>,
    summary: impl FnOnce() -> String,
) -> Result<(), CheckFailed> {
    match result {
        Ok(()) => {
            println!("{}", summary());
            Ok(())
        }
        Err(errors) => {
            for (field, message) in errors.iter() {
                println!("{field}: {message}");
            }
            Err(CheckFailed(errors.len()))
        }
    }
}
