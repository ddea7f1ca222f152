//! Onboarding — first-launch questionnaire and concern selection.
//!
//! The flow walks a welcome screen, the seven skin questions, and a concern
//! picker. Finalizing it stores the profile, appends a morning and an
//! evening routine, and flips the completion flag.

pub mod flow;
pub mod state;

pub use flow::{OnboardingFlow, OnboardingOutcome, reset_onboarding};
pub use state::{OnboardingStage, TOTAL_STEPS};
