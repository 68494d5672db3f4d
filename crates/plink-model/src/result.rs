//! Match results produced by the similarity scorer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Confidence band derived from a 0-100 match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Badge text shown next to a candidate row.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High match",
            Self::Medium => "Medium match",
            Self::Low => "Low match",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ModelError::InvalidConfidenceLevel(s.to_string())),
        }
    }
}

/// Per-field detail for a fuzzy-compared name field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NameMatch {
    /// Display flag only; does not feed the score.
    pub matched: bool,
    /// Normalized edit-distance similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Per-field detail for an exact-compared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExactMatch {
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchFields {
    pub first_name: NameMatch,
    pub last_name: NameMatch,
    pub middle_name: NameMatch,
    pub sex: ExactMatch,
    pub birth_date: ExactMatch,
}

impl MatchFields {
    /// Every field unmatched with similarity 0.
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn matched_count(&self) -> usize {
        [
            self.first_name.matched,
            self.last_name.matched,
            self.middle_name.matched,
            self.sex.matched,
            self.birth_date.matched,
        ]
        .into_iter()
        .filter(|matched| *matched)
        .count()
    }
}

/// Outcome of comparing a source record with one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted score in `0..=100`.
    pub score: u8,
    pub level: ConfidenceLevel,
    pub fields: MatchFields,
}

impl MatchResult {
    /// Result used when there is nothing to compare against yet.
    pub fn empty() -> Self {
        Self {
            score: 0,
            level: ConfidenceLevel::Low,
            fields: MatchFields::unmatched(),
        }
    }

    /// Compact badge text, e.g. `97% High match`.
    pub fn badge(&self) -> String {
        format!("{}% {}", self.score, self.level.label())
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::empty()
    }
}
