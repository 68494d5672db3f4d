//! Scoring configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("field weights must sum to 100, got {total}")]
    WeightsTotal { total: u64 },
    #[error("medium threshold ({medium}) must not exceed high threshold ({high})")]
    ThresholdOrder { high: u8, medium: u8 },
    #[error("confidence threshold {value} is outside 0..=100")]
    ThresholdRange { value: u8 },
    #[error("name match threshold {value} is outside 0.0..=1.0")]
    NameThreshold { value: f64 },
}
