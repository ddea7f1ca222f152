//! OnboardingFlow — walks the questionnaire and concern selection, then
//! builds the profile and the first pair of routines.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::StorageError;
use crate::profile::classifier::MAX_ANSWER;
use crate::profile::{
    QUESTION_COUNT, QUESTIONS, SkinConcern, SkinType, UserProfile, classify, parse_allergies,
};
use crate::routine::{Routine, TimeOfDay, generate};
use crate::store::SkinStore;

use super::state::{OnboardingStage, TOTAL_STEPS};

/// What `finalize()` produced and persisted.
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    pub profile: UserProfile,
    /// The morning and evening routines appended to storage. Empty when no
    /// skin type could be determined.
    pub routines: Vec<Routine>,
}

/// Controller for one pass through onboarding.
pub struct OnboardingFlow {
    store: SkinStore,
    clock: Arc<dyn Clock>,
    current_step: usize,
    answers: Vec<u8>,
    selected_concerns: BTreeSet<SkinConcern>,
    allergies: String,
    skin_type: Option<SkinType>,
    completed: bool,
}

impl OnboardingFlow {
    pub fn new(store: SkinStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            current_step: 0,
            answers: Vec::with_capacity(QUESTION_COUNT),
            selected_concerns: BTreeSet::new(),
            allergies: String::new(),
            skin_type: None,
            completed: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        TOTAL_STEPS
    }

    pub fn stage(&self) -> OnboardingStage {
        if self.completed {
            OnboardingStage::Complete
        } else {
            OnboardingStage::from_step(self.current_step)
        }
    }

    /// Prompt for the question currently shown, if any.
    pub fn current_question(&self) -> Option<&'static str> {
        self.stage().answer_slot().map(|slot| QUESTIONS[slot])
    }

    /// Answer recorded for the question currently shown, if any.
    pub fn current_answer(&self) -> Option<u8> {
        self.stage()
            .answer_slot()
            .and_then(|slot| self.answers.get(slot).copied())
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    /// Whether the current screen has what it needs to move on: a question
    /// must be answered first, other screens are always passable.
    pub fn can_advance(&self) -> bool {
        match self.stage().answer_slot() {
            Some(slot) => slot < self.answers.len(),
            None => self.current_step < TOTAL_STEPS - 1,
        }
    }

    /// Move forward one step. Saturates at the concern selection screen.
    ///
    /// Leaving the last question classifies the answers so the result can be
    /// shown before completing. A type is computed at most once per pass.
    pub fn advance(&mut self) {
        if self.current_step >= TOTAL_STEPS - 1 {
            return;
        }
        if self.current_step == QUESTION_COUNT {
            self.classify_once();
        }
        self.current_step += 1;
    }

    /// Move back one step. Saturates at the welcome screen.
    pub fn retreat(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
        }
    }

    /// Record `value` for the question currently shown.
    ///
    /// Rejected (returns `false`) when no question is shown, when `value` is
    /// off the 0..=4 scale, or when earlier questions are still unanswered.
    /// Answering a question again overwrites the earlier answer.
    pub fn record_answer(&mut self, value: u8) -> bool {
        let Some(slot) = self.stage().answer_slot() else {
            tracing::debug!(step = self.current_step, "Answer ignored: not on a question");
            return false;
        };
        if value > MAX_ANSWER {
            tracing::debug!(value, "Answer ignored: off the scale");
            return false;
        }

        if slot < self.answers.len() {
            self.answers[slot] = value;
        } else if slot == self.answers.len() {
            self.answers.push(value);
        } else {
            tracing::debug!(slot, filled = self.answers.len(), "Answer ignored: out of order");
            return false;
        }
        true
    }

    /// Toggle a concern. Returns whether it is now selected.
    pub fn toggle_concern(&mut self, concern: SkinConcern) -> bool {
        if self.selected_concerns.remove(&concern) {
            false
        } else {
            self.selected_concerns.insert(concern);
            true
        }
    }

    pub fn set_concerns(&mut self, concerns: impl IntoIterator<Item = SkinConcern>) {
        self.selected_concerns = concerns.into_iter().collect();
    }

    pub fn selected_concerns(&self) -> &BTreeSet<SkinConcern> {
        &self.selected_concerns
    }

    /// Free-text, comma-separated allergies.
    pub fn set_allergies(&mut self, text: impl Into<String>) {
        self.allergies = text.into();
    }

    /// Replace the classified skin type with one chosen by the user.
    pub fn override_skin_type(&mut self, skin_type: SkinType) {
        self.skin_type = Some(skin_type);
    }

    pub fn skin_type(&self) -> Option<SkinType> {
        self.skin_type
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn classify_once(&mut self) {
        if self.skin_type.is_some() {
            return;
        }
        self.skin_type = classify(&self.answers);
        if let Some(skin_type) = self.skin_type {
            tracing::debug!(%skin_type, "Skin type classified");
        }
    }

    /// Build and persist the profile, append a morning and an evening
    /// routine to the stored collection, and mark onboarding complete.
    pub async fn finalize(&mut self) -> Result<OnboardingOutcome, StorageError> {
        self.classify_once();

        let now = self.clock.now();
        let mut profile = UserProfile::new(now);
        profile.skin_type = self.skin_type;
        profile.skin_concerns = self.selected_concerns.clone();
        profile.allergies = parse_allergies(&self.allergies);

        // Read the existing collection before writing anything, so a store
        // that can't be read leaves every document as it was.
        let generated = match self.skin_type {
            Some(skin_type) => {
                let stored = self.store.load_routines().await?;
                let generated: Vec<Routine> = [TimeOfDay::Morning, TimeOfDay::Evening]
                    .into_iter()
                    .map(|time_of_day| {
                        let concerns = &profile.skin_concerns;
                        generate(skin_type, time_of_day, concerns, self.clock.as_ref())
                    })
                    .collect();
                Some((stored, generated))
            }
            None => None,
        };

        self.store.save_profile(&profile).await?;

        let routines = match generated {
            Some((mut stored, generated)) => {
                stored.extend(generated.iter().cloned());
                self.store.save_routines(&stored).await?;
                generated
            }
            None => {
                tracing::warn!(
                    answered = self.answers.len(),
                    "No skin type determined, skipping routine generation"
                );
                Vec::new()
            }
        };

        self.store.set_onboarding_complete(true).await?;
        self.completed = true;

        tracing::info!(
            profile_id = %profile.id,
            skin_type = ?profile.skin_type,
            concerns = profile.skin_concerns.len(),
            routines = routines.len(),
            "Onboarding complete"
        );

        Ok(OnboardingOutcome { profile, routines })
    }
}

/// Send the user back through onboarding on next launch.
///
/// Only the completion flag is cleared; the stored profile, routines, and
/// diary stay until the next `finalize()` overwrites or extends them.
pub async fn reset_onboarding(store: &SkinStore) -> Result<(), StorageError> {
    store.set_onboarding_complete(false).await?;
    tracing::info!("Onboarding reset");
    Ok(())
}
