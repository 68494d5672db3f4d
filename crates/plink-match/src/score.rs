//! Weighted identity match scoring.
//!
//! Name fields contribute their edit-distance similarity, sex and birth date
//! contribute all or nothing. The weighted sum is rounded to a 0-100 score
//! and banded into a confidence level. The score is an operator aid; linking
//! always requires a human decision.

use std::fmt;

use plink_model::{ExactMatch, IdentityRecord, MatchFields, MatchResult, NameMatch};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ScoringConfig;
use crate::error::ConfigError;
use crate::similarity::{birth_date_matches, sex_matches, similarity};

/// Identity fields that contribute to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    FirstName,
    LastName,
    MiddleName,
    Sex,
    BirthDate,
}

impl MatchField {
    pub const ALL: [MatchField; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::Sex,
        Self::BirthDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::MiddleName => "middle_name",
            Self::Sex => "sex",
            Self::BirthDate => "birth_date",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field's share of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub field: MatchField,
    pub weight: u32,
    /// Similarity for name fields, 1.0 or 0.0 for exact fields.
    pub value: f64,
    /// `weight * value`, before rounding.
    pub contribution: f64,
}

/// Score breakdown for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub result: MatchResult,
    pub components: Vec<ScoreComponent>,
}

impl Explanation {
    /// Human-readable breakdown, one `field: contribution/weight` per component.
    pub fn summary(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("{}: {:.1}/{}", c.field, c.contribution, c.weight))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A candidate with its score, remembering its position in the input list.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate<'a> {
    pub index: usize,
    pub candidate: &'a IdentityRecord,
    pub result: MatchResult,
}

/// Scores candidate records against a source record.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    /// Create a scorer without validating the configuration.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Create a scorer, rejecting inconsistent weights or thresholds.
    pub fn try_new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compare `candidate` against `source`.
    ///
    /// A missing source (nothing selected yet) yields [`MatchResult::empty`].
    pub fn compute(
        &self,
        source: Option<&IdentityRecord>,
        candidate: &IdentityRecord,
    ) -> MatchResult {
        self.explain(source, candidate).result
    }

    /// Compare two records and keep the per-field contributions.
    pub fn explain(
        &self,
        source: Option<&IdentityRecord>,
        candidate: &IdentityRecord,
    ) -> Explanation {
        let Some(source) = source else {
            return Explanation {
                result: MatchResult::empty(),
                components: self.components(&[0.0; 5]),
            };
        };

        let first = similarity(&source.first_name, &candidate.first_name);
        let last = similarity(&source.last_name, &candidate.last_name);
        let middle = similarity(source.middle_name_or_empty(), candidate.middle_name_or_empty());
        let sex = sex_matches(&source.sex, &candidate.sex);
        let birth_date = birth_date_matches(&source.birth_date, &candidate.birth_date);

        let components = self.components(&[
            first,
            last,
            middle,
            indicator(sex),
            indicator(birth_date),
        ]);
        let total: f64 = components.iter().map(|c| c.contribution).sum();
        let score = round_score(total);
        let level = self.config.thresholds.classify(score);

        let fields = MatchFields {
            first_name: self.name_match(first),
            last_name: self.name_match(last),
            middle_name: self.name_match(middle),
            sex: ExactMatch { matched: sex },
            birth_date: ExactMatch {
                matched: birth_date,
            },
        };

        debug!(
            score,
            level = %level,
            matched_fields = fields.matched_count(),
            "scored identity candidate"
        );

        Explanation {
            result: MatchResult {
                score,
                level,
                fields,
            },
            components,
        }
    }

    /// Score every candidate and order them best first.
    ///
    /// Candidates with equal scores keep their input order.
    pub fn rank<'a>(
        &self,
        source: Option<&IdentityRecord>,
        candidates: &'a [IdentityRecord],
    ) -> Vec<RankedCandidate<'a>> {
        trace!(candidates = candidates.len(), "ranking identity candidates");
        let mut ranked: Vec<RankedCandidate<'a>> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| RankedCandidate {
                index,
                candidate,
                result: self.compute(source, candidate),
            })
            .collect();
        ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        ranked
    }

    fn name_match(&self, similarity: f64) -> NameMatch {
        NameMatch {
            matched: similarity >= self.config.name_match_threshold,
            similarity,
        }
    }

    /// Values are in [`MatchField::ALL`] order.
    fn components(&self, values: &[f64; 5]) -> Vec<ScoreComponent> {
        let weights = &self.config.weights;
        MatchField::ALL
            .iter()
            .zip(values)
            .map(|(&field, &value)| {
                let weight = match field {
                    MatchField::FirstName => weights.first_name,
                    MatchField::LastName => weights.last_name,
                    MatchField::MiddleName => weights.middle_name,
                    MatchField::Sex => weights.sex,
                    MatchField::BirthDate => weights.birth_date,
                };
                ScoreComponent {
                    field,
                    weight,
                    value,
                    contribution: f64::from(weight) * value,
                }
            })
            .collect()
    }
}

fn indicator(matched: bool) -> f64 {
    if matched { 1.0 } else { 0.0 }
}

/// Round half up and clamp into `0..=100`.
fn round_score(total: f64) -> u8 {
    // Values are non-negative, where `round` (half away from zero) is half up.
    total.round().clamp(0.0, 100.0) as u8
}
