//! Onboarding step identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when converting a number into a [`Step`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The number is outside `1..=4`.
    #[error("step must be between 1 and 4 (got {0})")]
    OutOfRange(u8),
}

/// One stage of the onboarding sequence.
///
/// Steps serialize as their number (`1..=4`) so the persisted record keeps
/// the numeric shape of `currentStep` and `completedSteps`.
///
/// ```
/// use clarity_core::Step;
///
/// assert_eq!(Step::Profile.next(), Step::Songs);
/// assert_eq!(Step::Success.next(), Step::Success);
/// assert_eq!(Step::try_from(3), Ok(Step::Payment));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    /// Personal profile form.
    #[default]
    Profile = 1,
    /// Favorite songs list.
    Songs = 2,
    /// Payment information form.
    Payment = 3,
    /// Confirmation with auto-advance countdown.
    Success = 4,
}

impl Step {
    /// Steps shown in the progress indicator (Success is not).
    pub const INDICATED: [Self; 3] = [Self::Profile, Self::Songs, Self::Payment];

    /// Returns the 1-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the step with the given number, if any.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Profile),
            2 => Some(Self::Songs),
            3 => Some(Self::Payment),
            4 => Some(Self::Success),
            _ => None,
        }
    }

    /// The following step, staying on [`Step::Success`].
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Profile => Self::Songs,
            Self::Songs => Self::Payment,
            Self::Payment | Self::Success => Self::Success,
        }
    }

    /// The preceding step, staying on [`Step::Profile`].
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Profile | Self::Songs => Self::Profile,
            Self::Payment => Self::Songs,
            Self::Success => Self::Payment,
        }
    }

    /// Where the "Skip" link of this step leads.
    ///
    /// Profile skips to Songs, Songs skips past itself to Payment and Payment
    /// skips to Success.
    #[must_use]
    pub const fn skip_target(self) -> Self {
        match self {
            Self::Profile => Self::Songs,
            Self::Songs => Self::Payment,
            Self::Payment | Self::Success => Self::Success,
        }
    }

    /// Human-readable step title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Profile => "Personal Profile",
            Self::Songs => "Favorite Songs",
            Self::Payment => "Payment Information",
            Self::Success => "Success",
        }
    }

    /// Short description shown under the title.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Profile => "Tell us about yourself",
            Self::Songs => "Share your favorite music",
            Self::Payment => "Add your payment details",
            Self::Success => "All set!",
        }
    }

    /// URL slug of the step page.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Profile => "personal-profile",
            Self::Songs => "favorite-songs",
            Self::Payment => "payment-information",
            Self::Success => "success",
        }
    }

    /// Path of the step page.
    #[must_use]
    pub fn path(self) -> String {
        format!("/onboarding/{}", self.slug())
    }
}

impl TryFrom<u8> for Step {
    type Error = StepError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or(StepError::OutOfRange(n))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
