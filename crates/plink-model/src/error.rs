use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid confidence level: {0}")]
    InvalidConfidenceLevel(String),
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
