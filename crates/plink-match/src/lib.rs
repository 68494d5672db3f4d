//! Patient identity match scoring.
//!
//! Compares a manually entered patient profile with candidate records
//! returned by a hospital information system search and produces an
//! explainable 0-100 confidence score.
//!
//! # Example
//!
//! ```
//! use plink_match::compute_match;
//! use plink_model::{ConfidenceLevel, IdentityRecord};
//!
//! let source = IdentityRecord::new("Juan", "Dela Cruz")
//!     .with_sex("M")
//!     .with_birth_date("1990-01-01");
//! let result = compute_match(Some(&source), &source);
//! assert_eq!(result.score, 100);
//! assert_eq!(result.level, ConfidenceLevel::High);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod score;
pub mod similarity;

pub use config::{ConfidenceThresholds, FieldWeights, ScoringConfig};
pub use error::ConfigError;
pub use score::{Explanation, MatchField, MatchScorer, RankedCandidate, ScoreComponent};
pub use similarity::{birth_date_matches, normalize, sex_matches, similarity};

use plink_model::{IdentityRecord, MatchResult};

/// Score `candidate` against `source` with the default weights and thresholds.
pub fn compute_match(source: Option<&IdentityRecord>, candidate: &IdentityRecord) -> MatchResult {
    MatchScorer::default().compute(source, candidate)
}
