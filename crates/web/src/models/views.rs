//! Display data for templates.

use clarity_core::onboarding::{OnboardingState, PaymentInformationData, PersonalProfileData};
use clarity_core::payment::{format_card_number, mask_card_number};
use clarity_core::{ProfileDraft, Step};

/// One entry of the step indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorItem {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    /// `done`, `current` or `upcoming`.
    pub state: &'static str,
}

/// The 1-2-3 progress indicator shown above the form steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIndicator {
    pub items: Vec<IndicatorItem>,
}

impl StepIndicator {
    #[must_use]
    pub fn new(onboarding: &OnboardingState, current: Step) -> Self {
        let items = Step::INDICATED
            .into_iter()
            .map(|step| IndicatorItem {
                number: step.number(),
                title: step.title(),
                description: step.description(),
                state: if step == current {
                    "current"
                } else if onboarding.is_step_completed(step) {
                    "done"
                } else {
                    "upcoming"
                },
            })
            .collect();
        Self { items }
    }
}

/// Profile form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub email: String,
    pub location: String,
    pub photo: Option<String>,
    pub initial: Option<char>,
}

impl ProfileForm {
    #[must_use]
    pub fn from_data(data: &PersonalProfileData) -> Self {
        Self::from_draft(&ProfileDraft::from_data(data))
    }

    #[must_use]
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            name: draft.name.clone(),
            age: draft.age.clone(),
            email: draft.email.clone(),
            location: draft.location.clone(),
            photo: draft.photo_preview().map(str::to_owned),
            initial: draft.name.trim().chars().next().map(|c| c.to_ascii_uppercase()),
        }
    }
}

/// Payment form values plus the card preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    /// Digits grouped in fours.
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub preview_number: String,
    pub preview_name: String,
    pub preview_expiry: String,
}

impl PaymentForm {
    #[must_use]
    pub fn from_data(data: &PaymentInformationData) -> Self {
        let preview_name = if data.cardholder_name.trim().is_empty() {
            "YOUR NAME".to_string()
        } else {
            data.cardholder_name.to_uppercase()
        };
        let preview_expiry = if data.expiry_date.is_empty() {
            "MM/YY".to_string()
        } else {
            data.expiry_date.clone()
        };
        Self {
            card_number: format_card_number(&data.card_number),
            expiry_date: data.expiry_date.clone(),
            cvv: data.cvv.clone(),
            cardholder_name: data.cardholder_name.clone(),
            preview_number: mask_card_number(&data.card_number),
            preview_name,
            preview_expiry,
        }
    }

    /// Form values for a page mount: the committed data, with the cardholder
    /// pre-filled from the profile when nothing was entered yet.
    #[must_use]
    pub fn for_mount(onboarding: &OnboardingState) -> Self {
        let mut data = onboarding.payment_information().clone();
        if data.cardholder_name.trim().is_empty() {
            data.cardholder_name = onboarding.personal_profile().name.clone();
        }
        Self::from_data(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_marks_current_and_done() {
        let onboarding = OnboardingState::default();
        let indicator = StepIndicator::new(&onboarding, Step::Songs);
        let states: Vec<_> = indicator.items.iter().map(|item| item.state).collect();
        assert_eq!(states, ["upcoming", "current", "upcoming"]);
        assert_eq!(indicator.items.len(), 3);
        let descriptions: Vec<_> = indicator.items.iter().map(|item| item.description).collect();
        assert_eq!(
            descriptions,
            [
                "Tell us about yourself",
                "Share your favorite music",
                "Add your payment details"
            ]
        );
    }

    #[test]
    fn test_payment_preview_masks_missing_digits() {
        let form = PaymentForm::from_data(&PaymentInformationData {
            card_number: "41111111".to_string(),
            ..PaymentInformationData::default()
        });
        assert_eq!(form.card_number, "4111 1111");
        assert_eq!(form.preview_number, "4111 1111 •••• ••••");
        assert_eq!(form.preview_name, "YOUR NAME");
        assert_eq!(form.preview_expiry, "MM/YY");
    }

    #[test]
    fn test_profile_form_initial() {
        let form = ProfileForm::from_data(&PersonalProfileData {
            name: "alex".to_string(),
            ..PersonalProfileData::default()
        });
        assert_eq!(form.initial, Some('A'));
        assert_eq!(form.location, "New York, US");
    }
}
