//! Data model shared by the patient-link crates.

#![deny(unsafe_code)]

pub mod error;
pub mod identity;
pub mod result;

pub use error::{ModelError, Result};
pub use identity::IdentityRecord;
pub use result::{ConfidenceLevel, ExactMatch, MatchFields, MatchResult, NameMatch};
