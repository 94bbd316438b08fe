//! Error types for analytics domain validation.

use super::SchemaTag;
use thiserror::Error;

/// Errors returned while constructing analytics domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyticsDomainError {
    /// The driver name is empty after trimming.
    #[error("driver name must not be empty")]
    EmptyDriverName,

    /// The driver name contains characters outside `[a-z0-9_]`.
    #[error(
        "driver name '{0}' contains invalid characters (only lowercase alphanumeric and underscores allowed)"
    )]
    InvalidDriverName(String),

    /// The driver name exceeds the 100-character storage limit.
    #[error("driver name exceeds 100 character limit: {0}")]
    DriverNameTooLong(String),

    /// Options failed shape validation against the driver schema.
    #[error(transparent)]
    InvalidOptions(#[from] OptionsSchemaError),
}

/// Shape mismatches between a [`super::DriverOptions`] value and the
/// [`super::OptionsSchema`] it is checked against.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionsSchemaError {
    /// The options were produced by a different schema.
    #[error("options belong to schema '{found}', expected '{expected}'")]
    SchemaMismatch {
        /// Tag declared by the schema.
        expected: SchemaTag,
        /// Tag carried by the options.
        found: SchemaTag,
    },

    /// The options carry a field the schema does not declare.
    #[error("unknown option field '{0}'")]
    UnknownField(String),

    /// A required field has no value.
    #[error("option field '{0}' is required")]
    MissingRequiredField(String),

    /// A field value has the wrong kind.
    #[error("option field '{field}' expects a {expected} value")]
    KindMismatch {
        /// Field name.
        field: String,
        /// Expected kind in canonical string form.
        expected: &'static str,
    },

    /// A choice field holds a value outside its allowed set.
    #[error("option field '{field}' does not allow '{value}'")]
    InvalidChoice {
        /// Field name.
        field: String,
        /// Rejected value.
        value: String,
    },

    /// An email field holds a malformed address.
    #[error("option field '{field}' holds an invalid email address '{value}'")]
    InvalidEmail {
        /// Field name.
        field: String,
        /// Rejected value.
        value: String,
    },
}
