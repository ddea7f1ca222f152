//! Skin-type classification from questionnaire answers.
//!
//! Each answer sits on a 0..=4 scale running from "very dry / tight" to
//! "irritated / red". Answers 0-1 count toward dry, 2-3 toward oily, and a 4
//! anywhere flags sensitivity once the dry/oily split is close.

use super::model::SkinType;

/// Number of questions in the skin-type questionnaire.
pub const QUESTION_COUNT: usize = 7;

/// Highest value an answer may take.
pub const MAX_ANSWER: u8 = 4;

/// Questionnaire prompts, in answer order.
pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "How does your skin look 2-3 hours after washing, with no cream applied?",
    "How do your pores look?",
    "How often do you get inflammation or breakouts?",
    "How does your skin react to sun exposure?",
    "How does your skin look by the middle of the day?",
    "How does your skin feel right after washing?",
    "How often do you feel tightness?",
];

/// Labels for the answer scale, indexed by answer value.
pub const ANSWER_SCALE: [&str; MAX_ANSWER as usize + 1] = [
    "Very dry, tight",
    "Dry",
    "Normal",
    "Oily, shiny",
    "Irritated, red",
];

/// Classify a full set of answers.
///
/// Returns `None` unless exactly [`QUESTION_COUNT`] answers are given, each
/// within `0..=MAX_ANSWER`.
pub fn classify(answers: &[u8]) -> Option<SkinType> {
    if answers.len() != QUESTION_COUNT || answers.iter().any(|&a| a > MAX_ANSWER) {
        return None;
    }

    let dry = answers.iter().filter(|&&a| a <= 1).count();
    let oily = answers.iter().filter(|&&a| a == 2 || a == 3).count();

    // Rule order matters: sensitivity is only checked once dry and oily are
    // within one of each other, and wins over the dry == oily tie.
    let skin_type = if dry > oily + 1 {
        SkinType::Dry
    } else if oily > dry + 1 {
        SkinType::Oily
    } else if answers.contains(&MAX_ANSWER) {
        SkinType::Sensitive
    } else if dry == oily {
        SkinType::Combination
    } else {
        SkinType::Normal
    };

    Some(skin_type)
}
