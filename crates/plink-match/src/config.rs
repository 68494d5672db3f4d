//! Scoring weights and confidence thresholds.
//!
//! The defaults are hand-tuned and have not been validated against labeled
//! link decisions, so every value can be overridden from a config file.

use plink_model::ConfidenceLevel;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Contribution of each field to the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub first_name: u32,
    pub last_name: u32,
    pub middle_name: u32,
    pub sex: u32,
    pub birth_date: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            first_name: 25,
            last_name: 30,
            middle_name: 10,
            sex: 15,
            birth_date: 20,
        }
    }
}

impl FieldWeights {
    /// Sum of all weights, widened so oversized values cannot wrap.
    pub fn total(&self) -> u64 {
        [
            self.first_name,
            self.last_name,
            self.middle_name,
            self.sex,
            self.birth_date,
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }
}

/// Lower bounds (inclusive) of the high and medium bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 85,
            medium: 60,
        }
    }
}

impl ConfidenceThresholds {
    pub fn classify(&self, score: u8) -> ConfidenceLevel {
        if score >= self.high {
            ConfidenceLevel::High
        } else if score >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Complete scorer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: FieldWeights,
    pub thresholds: ConfidenceThresholds,
    /// Similarity at or above which a name field is flagged as matched.
    pub name_match_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            thresholds: ConfidenceThresholds::default(),
            name_match_threshold: 0.9,
        }
    }
}

impl ScoringConfig {
    /// Check that weights sum to 100 and thresholds are ordered and in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.weights.total();
        if total != 100 {
            return Err(ConfigError::WeightsTotal { total });
        }
        let ConfidenceThresholds { high, medium } = self.thresholds;
        if high > 100 {
            return Err(ConfigError::ThresholdRange { value: high });
        }
        if medium > high {
            return Err(ConfigError::ThresholdOrder { high, medium });
        }
        if !(0.0..=1.0).contains(&self.name_match_threshold) {
            return Err(ConfigError::NameThreshold {
                value: self.name_match_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert_eq!(config.weights.total(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classify_boundaries() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.classify(100), ConfidenceLevel::High);
        assert_eq!(thresholds.classify(85), ConfidenceLevel::High);
        assert_eq!(thresholds.classify(84), ConfidenceLevel::Medium);
        assert_eq!(thresholds.classify(60), ConfidenceLevel::Medium);
        assert_eq!(thresholds.classify(59), ConfidenceLevel::Low);
        assert_eq!(thresholds.classify(0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_rejects_bad_weight_total() {
        let mut config = ScoringConfig::default();
        config.weights.sex = 20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightsTotal { total: 105 })
        );
    }

    #[test]
    fn test_rejects_weights_that_would_overflow() {
        let config = ScoringConfig {
            weights: FieldWeights {
                first_name: u32::MAX,
                last_name: 101,
                ..FieldWeights::default()
            },
            ..ScoringConfig::default()
        };
        let expected = u64::from(u32::MAX) + 101 + 10 + 15 + 20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightsTotal { total: expected })
        );
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = ScoringConfig::default();
        config.thresholds.medium = 90;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOrder {
                high: 85,
                medium: 90
            })
        );

        config.thresholds = ConfidenceThresholds {
            high: 101,
            medium: 60,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdRange { value: 101 })
        );
    }

    #[test]
    fn test_rejects_name_threshold_out_of_range() {
        let config = ScoringConfig {
            name_match_threshold: 1.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NameThreshold { .. })
        ));
    }
}
