//! Skin profile data model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classified skin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Dry,
    Oily,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        Self::Dry,
        Self::Oily,
        Self::Combination,
        Self::Normal,
        Self::Sensitive,
    ];
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Dry => "Dry",
            Self::Oily => "Oily",
            Self::Combination => "Combination",
            Self::Normal => "Normal",
            Self::Sensitive => "Sensitive",
        };
        write!(f, "{s}")
    }
}

/// A self-reported skin issue that switches routine steps on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkinConcern {
    Acne,
    Wrinkles,
    Pigmentation,
    Redness,
    Dehydration,
    #[serde(rename = "Enlarged Pores")]
    EnlargedPores,
}

impl SkinConcern {
    pub const ALL: [SkinConcern; 6] = [
        Self::Acne,
        Self::Wrinkles,
        Self::Pigmentation,
        Self::Redness,
        Self::Dehydration,
        Self::EnlargedPores,
    ];
}

impl std::fmt::Display for SkinConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Acne => "Acne",
            Self::Wrinkles => "Wrinkles",
            Self::Pigmentation => "Pigmentation",
            Self::Redness => "Redness",
            Self::Dehydration => "Dehydration",
            Self::EnlargedPores => "Enlarged Pores",
        };
        write!(f, "{s}")
    }
}

/// Profile produced by onboarding.
///
/// Stored as JSON under [`crate::store::keys::USER_PROFILE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub skin_concerns: BTreeSet<SkinConcern>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile stamped with `created_at`.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            skin_type: None,
            skin_concerns: BTreeSet::new(),
            allergies: Vec::new(),
            created_at,
        }
    }
}

/// Split free-text allergies on commas, trimming each entry.
///
/// Blank entries are dropped, so empty input yields an empty list.
pub fn parse_allergies(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
