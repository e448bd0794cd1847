//! Premium Clarity Core - Onboarding domain library.
//!
//! This crate holds everything about the onboarding wizard that can be
//! expressed without I/O:
//!
//! - [`types`] - Step enum, email address, favorite song ids
//! - [`auth`] - Authentication flag and username
//! - [`onboarding`] - The onboarding state machine and per-step data
//! - [`state`] - The root state tree and the [`Action`] dispatch surface
//! - [`validation`] - Pure field validators returning [`FieldErrors`]
//! - [`songs`] - The favorite-songs draft list
//! - [`payment`] - Card number / expiry input formatting
//! - [`photo`] - Profile photo data-URIs and the upload slot
//! - [`countdown`] - The success-step countdown
//! - [`navigation`] - Where a visitor belongs given their state
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no HTTP, no
//! sessions, no clocks except the one used to mint song ids. The web crate
//! hydrates a [`RootState`] per request, dispatches [`Action`]s and persists
//! the result.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod countdown;
pub mod navigation;
pub mod onboarding;
pub mod payment;
pub mod photo;
pub mod songs;
pub mod state;
pub mod types;
pub mod validation;

pub use auth::AuthState;
pub use countdown::{Countdown, CountdownEvent};
pub use navigation::{Destination, NavCommand};
pub use onboarding::{
    FavoriteSong, FavoriteSongsData, OnboardingState, PaymentInformationData,
    PersonalProfileData, StepData,
};
pub use photo::{PhotoError, PhotoSlot, ProfileDraft};
pub use songs::{SongDraft, SongDraftError};
pub use state::{Action, RootState};
pub use types::*;
pub use validation::FieldErrors;
