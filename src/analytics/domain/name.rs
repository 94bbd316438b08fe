//! Registry key naming an analytics driver.

use super::AnalyticsDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest name the `analytics.driver` column stores.
const MAX_NAME_LENGTH: usize = 100;

/// Normalised key under which a driver is registered and stored.
///
/// Configuration rows persist this key in their `driver` column and the
/// registry resolves it back to a driver instance on every load, so two
/// spellings of one key must compare equal. Construction therefore trims
/// surrounding whitespace and folds ASCII case: `" Google "` and `"google"`
/// name the same driver.
///
/// [`DriverRegistry::load`](crate::analytics::services::DriverRegistry::load)
/// accepts raw user input and goes through [`DriverName::new`]; input that
/// cannot become a driver name is reported there as an unknown driver
/// rather than as a naming error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverName(String);

impl DriverName {
    /// Normalises `value` into a registry key.
    ///
    /// After trimming and lowercasing, the key may hold only `[a-z0-9_]`,
    /// which keeps it usable as a form value and a column value alike.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptyDriverName`] for blank input,
    /// [`AnalyticsDomainError::DriverNameTooLong`] when the key does not fit
    /// the `driver` column, and [`AnalyticsDomainError::InvalidDriverName`]
    /// for any other character. The last two carry the input as given.
    pub fn new(value: impl Into<String>) -> Result<Self, AnalyticsDomainError> {
        let raw = value.into();
        let key = raw.trim().to_ascii_lowercase();

        if key.is_empty() {
            Err(AnalyticsDomainError::EmptyDriverName)
        } else if key.len() > MAX_NAME_LENGTH {
            Err(AnalyticsDomainError::DriverNameTooLong(raw))
        } else if !key.chars().all(is_key_char) {
            Err(AnalyticsDomainError::InvalidDriverName(raw))
        } else {
            Ok(Self(key))
        }
    }

    /// Returns the normalised key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

impl AsRef<str> for DriverName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
