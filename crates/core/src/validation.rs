//! Field validation for the wizard's forms.
//!
//! Every validator is a pure function returning `Ok(())` or a [`FieldErrors`]
//! map with one human-readable message per invalid field, in form order.
//! Only the first failing rule of a field is reported.

use std::sync::LazyLock;

use regex::Regex;

use crate::onboarding::{FavoriteSongsData, PaymentInformationData, PersonalProfileData};
use crate::types::Email;

/// Form field names used as keys in [`FieldErrors`].
pub mod fields {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const EMAIL: &str = "email";
    pub const PROFILE_PICTURE: &str = "profilePicture";
    pub const SONGS: &str = "songs";
    pub const CARDHOLDER_NAME: &str = "cardholderName";
    pub const CARD_NUMBER: &str = "cardNumber";
    pub const EXPIRY_DATE: &str = "expiryDate";
    pub const CVV: &str = "cvv";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
}

/// Minimum age accepted on the profile step.
pub const MIN_AGE: f64 = 1.0;

/// Maximum age accepted on the profile step.
pub const MAX_AGE: f64 = 120.0;

static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name regex"));
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._]+$").expect("valid username regex"));
static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("valid card regex"));
static EXPIRY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})$").expect("valid expiry regex"));
static CVV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvv regex"));

/// Field-level validation errors, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    /// An empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// An error map with a single entry.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an error for `field`. The first message recorded for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    /// The message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// Whether `field` has an error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the map itself when it holds at least one error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Profile
// =============================================================================

/// Validate the personal profile step.
///
/// # Errors
///
/// Returns a [`FieldErrors`] entry for each of `name`, `age` and `email`
/// that is invalid.
pub fn validate_profile(profile: &PersonalProfileData) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(message) = person_name_error(&profile.name, "Name") {
        errors.insert(fields::NAME, message);
    }
    if let Some(message) = age_error(&profile.age) {
        errors.insert(fields::AGE, message);
    }
    if let Some(message) = email_error(&profile.email) {
        errors.insert(fields::EMAIL, message);
    }

    errors.into_result()
}

fn person_name_error(name: &str, label: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(format!("{label} is required"));
    }
    if name.chars().count() < 2 {
        return Some(format!("{label} must be at least 2 characters"));
    }
    if !PERSON_NAME.is_match(name) {
        return Some(format!("{label} can only contain letters and spaces"));
    }
    None
}

fn age_error(age: &str) -> Option<String> {
    let age = age.trim();
    if age.is_empty() {
        return Some("Age is required".to_string());
    }
    let Some(value) = age.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        return Some("Age must be a number".to_string());
    };
    if value < MIN_AGE {
        return Some("Age must be at least 1".to_string());
    }
    if value > MAX_AGE {
        return Some("Age must be less than 120".to_string());
    }
    None
}

fn email_error(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    Email::parse(email.trim())
        .err()
        .map(|_| "Invalid email address".to_string())
}

// =============================================================================
// Favorite songs
// =============================================================================

/// Validate the favorite songs step: at least one track is required.
///
/// # Errors
///
/// Returns an error on the `songs` field when the list is empty.
pub fn validate_songs(songs: &FavoriteSongsData) -> Result<(), FieldErrors> {
    if songs.songs.is_empty() {
        return Err(FieldErrors::single(
            fields::SONGS,
            "Please add at least one favorite track",
        ));
    }
    Ok(())
}

// =============================================================================
// Payment
// =============================================================================

/// Validate the payment information step.
///
/// Format checks only: there is no Luhn check and no issuer lookup.
///
/// # Errors
///
/// Returns a [`FieldErrors`] entry for each invalid payment field.
pub fn validate_payment(payment: &PaymentInformationData) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let holder = payment.cardholder_name.trim();
    if holder.is_empty() {
        errors.insert(fields::CARDHOLDER_NAME, "Cardholder name is required");
    } else if holder.chars().count() < 2 {
        errors.insert(
            fields::CARDHOLDER_NAME,
            "Name must be at least 2 characters",
        );
    }

    if payment.card_number.is_empty() {
        errors.insert(fields::CARD_NUMBER, "Card number is required");
    } else if !CARD_NUMBER.is_match(&payment.card_number) {
        errors.insert(fields::CARD_NUMBER, "Card number must be 16 digits");
    }

    if let Some(message) = expiry_error(&payment.expiry_date) {
        errors.insert(fields::EXPIRY_DATE, message);
    }

    if payment.cvv.is_empty() {
        errors.insert(fields::CVV, "CVV is required");
    } else if !CVV.is_match(&payment.cvv) {
        errors.insert(fields::CVV, "CVV must be 3 or 4 digits");
    }

    errors.into_result()
}

fn expiry_error(expiry: &str) -> Option<&'static str> {
    if expiry.is_empty() {
        return Some("Expiry date is required");
    }
    let Some(captures) = EXPIRY_SHAPE.captures(expiry) else {
        return Some("Format must be MM/YY");
    };
    let month: u8 = captures.get(1)?.as_str().parse().ok()?;
    if !(1..=12).contains(&month) {
        return Some("Expiry month must be between 01 and 12");
    }
    None
}

// =============================================================================
// Login
// =============================================================================

/// Validate the shape of login input before credentials are compared.
///
/// # Errors
///
/// Returns a [`FieldErrors`] entry for `username` and/or `password`.
pub fn validate_login(username: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if username.is_empty() {
        errors.insert(fields::USERNAME, "Username is required");
    } else if username.chars().count() < 3 {
        errors.insert(fields::USERNAME, "Username must be at least 3 characters");
    } else if !USERNAME.is_match(username) {
        errors.insert(
            fields::USERNAME,
            "Username can only contain letters, numbers, dots, and underscores",
        );
    }

    if password.is_empty() {
        errors.insert(fields::PASSWORD, "Password is required");
    } else if password.chars().count() < 6 {
        errors.insert(fields::PASSWORD, "Password must be at least 6 characters");
    }

    errors.into_result()
}
