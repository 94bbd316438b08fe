//! Driver-defined options values.

use std::collections::BTreeMap;
use std::fmt;

/// Discriminator naming the options schema that produced a value.
///
/// Persisted alongside the option fields so stored payloads decode back
/// into the schema they were written with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaTag(String);

impl SchemaTag {
    /// Creates a schema tag.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a file held by the file-storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference {
    is_proxy: bool,
    path: String,
    client_name: String,
}

impl FileReference {
    /// Creates a reference to a stored file that is loaded lazily on demand.
    #[must_use]
    pub fn proxy(path: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            is_proxy: true,
            path: path.into(),
            client_name: client_name.into(),
        }
    }

    /// Creates a reference to a file whose contents were already resolved.
    #[must_use]
    pub fn resolved(path: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            is_proxy: false,
            path: path.into(),
            client_name: client_name.into(),
        }
    }

    /// Returns whether the reference is a lazy proxy.
    #[must_use]
    pub const fn is_proxy(&self) -> bool {
        self.is_proxy
    }

    /// Returns the storage path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file name supplied by the uploading client.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }
}

/// A single typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Free text, email addresses and choice selections.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Flag.
    Boolean(bool),
    /// Uploaded file.
    File(FileReference),
}

impl OptionValue {
    /// Returns the canonical kind name for error reporting.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::File(_) => "file",
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<FileReference> for OptionValue {
    fn from(value: FileReference) -> Self {
        Self::File(value)
    }
}

/// Options payload for one driver, tagged with the schema that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    schema: SchemaTag,
    values: BTreeMap<String, OptionValue>,
}

impl DriverOptions {
    /// Creates an empty options value for the given schema.
    #[must_use]
    pub const fn new(schema: SchemaTag) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Sets a field and returns the updated value.
    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Clears a field, returning its previous value.
    pub fn remove(&mut self, field: &str) -> Option<OptionValue> {
        self.values.remove(field)
    }

    /// Returns the schema tag.
    #[must_use]
    pub const fn schema(&self) -> &SchemaTag {
        &self.schema
    }

    /// Returns all field values ordered by field name.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, OptionValue> {
        &self.values
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&OptionValue> {
        self.values.get(field)
    }

    /// Returns a text field value.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(OptionValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns an integer field value.
    #[must_use]
    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.values.get(field) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a boolean field value.
    #[must_use]
    pub fn boolean(&self, field: &str) -> Option<bool> {
        match self.values.get(field) {
            Some(OptionValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a file field value.
    #[must_use]
    pub fn file(&self, field: &str) -> Option<&FileReference> {
        match self.values.get(field) {
            Some(OptionValue::File(value)) => Some(value),
            _ => None,
        }
    }
}
