//! Patient identity records as entered by an operator or returned by a
//! hospital information system search.

use serde::{Deserialize, Serialize};

/// Identity fields compared when linking two patient records.
///
/// Every field defaults to empty when absent from the source payload, so a
/// partially filled record can always be scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityRecord {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Free-form sex code ("M", "F", "Male", ...).
    pub sex: String,
    /// Calendar date exactly as supplied by the data source.
    pub birth_date: String,
}

impl IdentityRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    #[must_use]
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = sex.into();
        self
    }

    #[must_use]
    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = birth_date.into();
        self
    }

    pub fn middle_name_or_empty(&self) -> &str {
        self.middle_name.as_deref().unwrap_or("")
    }

    /// Name rendered as "Last, First Middle" for listings.
    pub fn display_name(&self) -> String {
        let given = [self.first_name.trim(), self.middle_name_or_empty().trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let last = self.last_name.trim();
        match (last.is_empty(), given.is_empty()) {
            (true, _) => given,
            (false, true) => last.to_string(),
            (false, false) => format!("{last}, {given}"),
        }
    }
}
