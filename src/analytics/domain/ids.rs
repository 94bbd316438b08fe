//! Identifier types for the analytics domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository-assigned identifier for a driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(i64);

impl ConfigurationId {
    /// Creates a configuration identifier from a stored row key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the wrapped row key.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl From<i64> for ConfigurationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
