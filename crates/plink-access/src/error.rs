//! Access control error types.

use chrono::{DateTime, Utc};
use plink_model::ModelError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// Operation requires an active session.
    #[error("no active session")]
    NotSignedIn,

    /// Refresh must move the expiry forward.
    #[error("session expiry {requested} does not extend current expiry {current}")]
    ExpiryNotExtended {
        current: DateTime<Utc>,
        requested: DateTime<Utc>,
    },

    /// Unknown CRUD action name.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, AccessError>;
