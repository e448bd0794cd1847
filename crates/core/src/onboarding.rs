//! The onboarding state machine.
//!
//! `Profile(1) → Songs(2) → Payment(3) → Success(4)`, with `is_completed` as
//! the terminal flag set once the Success step hands over to the app.
//!
//! Fields are private: the only way to change an [`OnboardingState`] is
//! through its transition methods (normally reached via
//! [`crate::state::Action`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::navigation::NavCommand;
use crate::types::{SongId, Step};
use crate::validation::{self, FieldErrors};

/// Default profile location.
pub const DEFAULT_LOCATION: &str = "New York, US";

/// Personal profile data (step 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProfileData {
    pub name: String,
    /// Kept as entered; validated as a number in `1..=120`.
    pub age: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    /// Profile picture as a `data:` URI.
    pub profile_picture: Option<String>,
}

impl Default for PersonalProfileData {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            email: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            profile_picture: None,
        }
    }
}

impl PersonalProfileData {
    /// First word of the name, used in greetings.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }

    /// Uppercased first letter of the name, shown when there is no picture.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// One favorite track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSong {
    pub id: SongId,
    pub title: String,
    pub artist: String,
}

/// Favorite songs data (step 2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSongsData {
    pub songs: Vec<FavoriteSong>,
}

/// Payment information data (step 3).
///
/// Opaque strings validated by format only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInformationData {
    /// Raw digits, at most 16.
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Data committed by one of the form steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepData {
    Profile(PersonalProfileData),
    Songs(FavoriteSongsData),
    Payment(PaymentInformationData),
}

impl StepData {
    /// The step this data belongs to.
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::Profile(_) => Step::Profile,
            Self::Songs(_) => Step::Songs,
            Self::Payment(_) => Step::Payment,
        }
    }

    /// Validate the data against its step's rules.
    ///
    /// # Errors
    ///
    /// Returns the field errors of the step's validator.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::Profile(profile) => validation::validate_profile(profile),
            Self::Songs(songs) => validation::validate_songs(songs),
            Self::Payment(payment) => validation::validate_payment(payment),
        }
    }
}

/// Onboarding progress and collected data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    current_step: Step,
    completed_steps: BTreeSet<Step>,
    personal_profile: PersonalProfileData,
    favorite_songs: FavoriteSongsData,
    payment_information: PaymentInformationData,
    is_completed: bool,
}

impl OnboardingState {
    /// The step the UI is positioned on.
    ///
    /// Advisory only; [`OnboardingState::resume_step`] decides where a
    /// returning visitor lands.
    #[must_use]
    pub const fn current_step(&self) -> Step {
        self.current_step
    }

    /// Steps committed so far.
    #[must_use]
    pub const fn completed_steps(&self) -> &BTreeSet<Step> {
        &self.completed_steps
    }

    /// Whether `step` has been committed.
    #[must_use]
    pub fn is_step_completed(&self, step: Step) -> bool {
        self.completed_steps.contains(&step)
    }

    #[must_use]
    pub const fn personal_profile(&self) -> &PersonalProfileData {
        &self.personal_profile
    }

    #[must_use]
    pub const fn favorite_songs(&self) -> &FavoriteSongsData {
        &self.favorite_songs
    }

    #[must_use]
    pub const fn payment_information(&self) -> &PaymentInformationData {
        &self.payment_information
    }

    /// Whether the visitor finished the whole flow.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Validate and store a step's data.
    ///
    /// On success the step joins `completed_steps` (once, however often it is
    /// committed) and is returned. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the step's field errors when validation fails.
    pub fn commit_step(&mut self, data: StepData) -> Result<Step, FieldErrors> {
        data.validate()?;

        let step = data.step();
        match data {
            StepData::Profile(profile) => self.personal_profile = profile,
            StepData::Songs(songs) => self.favorite_songs = songs,
            StepData::Payment(payment) => self.payment_information = payment,
        }
        self.completed_steps.insert(step);

        Ok(step)
    }

    /// Move to the next step, staying on Success.
    pub const fn advance(&mut self) {
        self.current_step = self.current_step.next();
    }

    /// Move to the previous step, staying on Profile.
    pub const fn retreat(&mut self) {
        self.current_step = self.current_step.previous();
    }

    /// Jump to `step` unconditionally.
    pub const fn skip_to(&mut self, step: Step) {
        self.current_step = step;
    }

    /// Apply a navigation command from the step pages.
    pub const fn navigate(&mut self, command: NavCommand) {
        match command {
            NavCommand::Next => self.advance(),
            NavCommand::Back => self.retreat(),
            NavCommand::Skip => self.skip_to(self.current_step.skip_target()),
        }
    }

    /// Finish the flow.
    pub fn complete(&mut self) {
        self.is_completed = true;
        self.completed_steps.insert(Step::Success);
    }

    /// Where a returning visitor resumes, from the completed steps alone.
    ///
    /// Success if payment is done, else Payment if songs are done, else Songs
    /// if the profile is done, else Profile.
    #[must_use]
    pub fn resume_step(&self) -> Step {
        resume_step(&self.completed_steps)
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Resume position for a set of completed steps.
///
/// ```
/// use std::collections::BTreeSet;
/// use clarity_core::{Step, onboarding::resume_step};
///
/// let done: BTreeSet<Step> = [Step::Profile, Step::Songs].into();
/// assert_eq!(resume_step(&done), Step::Payment);
/// assert_eq!(resume_step(&BTreeSet::new()), Step::Profile);
/// ```
#[must_use]
pub fn resume_step(completed: &BTreeSet<Step>) -> Step {
    if completed.contains(&Step::Payment) {
        Step::Success
    } else if completed.contains(&Step::Songs) {
        Step::Payment
    } else if completed.contains(&Step::Profile) {
        Step::Songs
    } else {
        Step::Profile
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_profile() -> PersonalProfileData {
        PersonalProfileData {
            name: "Alex Thompson".to_string(),
            age: "24".to_string(),
            email: "alex@example.com".to_string(),
            ..PersonalProfileData::default()
        }
    }

    fn valid_songs() -> FavoriteSongsData {
        FavoriteSongsData {
            songs: vec![FavoriteSong {
                id: SongId::from_sequence(1),
                title: "Midnight City".to_string(),
                artist: "M83".to_string(),
            }],
        }
    }

    fn valid_payment() -> PaymentInformationData {
        PaymentInformationData {
            card_number: "4111111111111111".to_string(),
            expiry_date: "12/25".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let state = OnboardingState::default();
        assert_eq!(state.current_step(), Step::Profile);
        assert!(state.completed_steps().is_empty());
        assert!(!state.is_completed());
        assert_eq!(state.personal_profile().location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut state = OnboardingState::default();
        for data in [
            StepData::Profile(valid_profile()),
            StepData::Songs(valid_songs()),
            StepData::Payment(valid_payment()),
        ] {
            let step = data.step();
            state.commit_step(data.clone()).unwrap();
            state.commit_step(data).unwrap();
            assert_eq!(
                state.completed_steps().iter().filter(|s| **s == step).count(),
                1
            );
        }
        assert_eq!(state.completed_steps().len(), 3);
    }

    #[test]
    fn test_failed_commit_mutates_nothing() {
        let mut state = OnboardingState::default();
        let before = state.clone();

        let mut bad = valid_payment();
        bad.card_number = "123".to_string();
        let errors = state.commit_step(StepData::Payment(bad)).unwrap_err();

        assert!(errors.has(crate::validation::fields::CARD_NUMBER));
        assert_eq!(state, before);
    }

    #[test]
    fn test_commit_stores_data() {
        let mut state = OnboardingState::default();
        state.commit_step(StepData::Songs(valid_songs())).unwrap();
        assert_eq!(state.favorite_songs(), &valid_songs());
        assert!(state.is_step_completed(Step::Songs));
        assert!(!state.is_step_completed(Step::Profile));
    }

    #[test]
    fn test_advance_and_retreat_are_bounded() {
        let mut state = OnboardingState::default();
        state.retreat();
        assert_eq!(state.current_step(), Step::Profile);
        for _ in 0..10 {
            state.advance();
        }
        assert_eq!(state.current_step(), Step::Success);
    }

    #[test]
    fn test_navigate_skip_follows_step_wiring() {
        let mut state = OnboardingState::default();
        state.skip_to(Step::Songs);
        state.navigate(NavCommand::Skip);
        assert_eq!(state.current_step(), Step::Payment);
        state.navigate(NavCommand::Skip);
        assert_eq!(state.current_step(), Step::Success);
        state.navigate(NavCommand::Back);
        assert_eq!(state.current_step(), Step::Payment);
    }

    #[test]
    fn test_skip_does_not_complete_steps() {
        let mut state = OnboardingState::default();
        state.skip_to(Step::Payment);
        assert!(state.completed_steps().is_empty());
        assert_eq!(state.resume_step(), Step::Profile);
    }

    #[test]
    fn test_resume_step() {
        let set = |steps: &[Step]| steps.iter().copied().collect::<BTreeSet<_>>();
        assert_eq!(resume_step(&set(&[])), Step::Profile);
        assert_eq!(resume_step(&set(&[Step::Profile])), Step::Songs);
        assert_eq!(
            resume_step(&set(&[Step::Profile, Step::Songs])),
            Step::Payment
        );
        assert_eq!(
            resume_step(&set(&[Step::Profile, Step::Songs, Step::Payment])),
            Step::Success
        );
        // Only the furthest completed step matters.
        assert_eq!(resume_step(&set(&[Step::Payment])), Step::Success);
    }

    #[test]
    fn test_complete_marks_success() {
        let mut state = OnboardingState::default();
        state.complete();
        assert!(state.is_completed());
        assert!(state.is_step_completed(Step::Success));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = OnboardingState::default();
        state.commit_step(StepData::Profile(valid_profile())).unwrap();
        state.advance();
        state.complete();
        state.reset();
        assert_eq!(state, OnboardingState::default());
    }

    #[test]
    fn test_serialized_shape() {
        let mut state = OnboardingState::default();
        state.commit_step(StepData::Profile(valid_profile())).unwrap();
        state.advance();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentStep"], 2);
        assert_eq!(json["completedSteps"], serde_json::json!([1]));
        assert_eq!(json["personalProfile"]["name"], "Alex Thompson");
        assert_eq!(json["personalProfile"]["profilePicture"], serde_json::Value::Null);
        assert_eq!(json["paymentInformation"]["cardNumber"], "");
        assert_eq!(json["isCompleted"], false);
    }

    #[test]
    fn test_profile_helpers() {
        let profile = valid_profile();
        assert_eq!(profile.first_name(), Some("Alex"));
        assert_eq!(profile.initial(), Some('A'));
        assert_eq!(PersonalProfileData::default().first_name(), None);
    }
}
