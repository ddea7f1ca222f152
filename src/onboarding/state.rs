//! Onboarding stages — which screen a given step index corresponds to.

use serde::{Deserialize, Serialize};

use crate::profile::QUESTION_COUNT;

/// Step count shown by progress indicators: one per question, plus concern
/// selection and completion. Step indices run from 0 (welcome) to
/// `TOTAL_STEPS - 1` (concern selection).
pub const TOTAL_STEPS: usize = QUESTION_COUNT + 2;

/// The screens of the onboarding flow.
///
/// Progresses linearly: Welcome → Question(1..=7) → ConcernSelection →
/// Complete. `Complete` is only entered by finalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "number", rename_all = "snake_case")]
pub enum OnboardingStage {
    Welcome,
    /// 1-based question number.
    Question(usize),
    ConcernSelection,
    Complete,
}

impl OnboardingStage {
    /// Map a step index to its stage. Indices past the concern screen map to `Complete`.
    pub fn from_step(step: usize) -> Self {
        match step {
            0 => Self::Welcome,
            n if n <= QUESTION_COUNT => Self::Question(n),
            n if n == QUESTION_COUNT + 1 => Self::ConcernSelection,
            _ => Self::Complete,
        }
    }

    /// Zero-based answer slot for a question stage.
    pub fn answer_slot(&self) -> Option<usize> {
        match self {
            Self::Question(n) => Some(n - 1),
            _ => None,
        }
    }

    /// Whether this stage is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for OnboardingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Question(n) => write!(f, "question {n}/{QUESTION_COUNT}"),
            Self::ConcernSelection => write!(f, "concern_selection"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
