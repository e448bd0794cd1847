//! Core types for the onboarding wizard.
//!
//! This module provides type-safe wrappers for the wizard's small vocabulary.

pub mod email;
pub mod id;
pub mod step;

pub use email::{Email, EmailError};
pub use id::SongId;
pub use step::{Step, StepError};
