//! Declared options shape for a driver.

use super::{DriverOptions, OptionValue, OptionsSchemaError, SchemaTag};

/// Kind of value an option field accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Free text.
    Text,
    /// Email address stored as text.
    Email,
    /// Whole number.
    Integer,
    /// Flag.
    Boolean,
    /// One of a fixed set of text values.
    Choice(Vec<String>),
    /// Uploaded file.
    File,
}

impl OptionKind {
    /// Returns the canonical kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Choice(_) => "choice",
            Self::File => "file",
        }
    }

    /// Returns whether values of this kind are stored as text, so a blank
    /// entry can stand for an unset field.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Choice(_))
    }
}

/// One field of an options schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionField {
    name: String,
    label: String,
    kind: OptionKind,
    required: bool,
    default: Option<OptionValue>,
}

impl OptionField {
    /// Creates an optional field of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value used by a fresh, empty options form.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the accepted kind.
    #[must_use]
    pub const fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Returns whether a value must be present on submit.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&OptionValue> {
        self.default.as_ref()
    }

    fn check(&self, value: &OptionValue) -> Result<(), OptionsSchemaError> {
        let kind_mismatch = || OptionsSchemaError::KindMismatch {
            field: self.name.clone(),
            expected: self.kind.as_str(),
        };

        match (&self.kind, value) {
            (OptionKind::Text, OptionValue::Text(_))
            | (OptionKind::Integer, OptionValue::Integer(_))
            | (OptionKind::Boolean, OptionValue::Boolean(_))
            | (OptionKind::File, OptionValue::File(_)) => Ok(()),
            (OptionKind::Email, OptionValue::Text(address)) => {
                if is_plausible_email(address) {
                    Ok(())
                } else {
                    Err(OptionsSchemaError::InvalidEmail {
                        field: self.name.clone(),
                        value: address.clone(),
                    })
                }
            }
            (OptionKind::Choice(allowed), OptionValue::Text(selected)) => {
                if allowed.iter().any(|choice| choice == selected) {
                    Ok(())
                } else {
                    Err(OptionsSchemaError::InvalidChoice {
                        field: self.name.clone(),
                        value: selected.clone(),
                    })
                }
            }
            _ => Err(kind_mismatch()),
        }
    }
}

fn is_blank(value: &OptionValue) -> bool {
    matches!(value, OptionValue::Text(text) if text.trim().is_empty())
}

fn is_plausible_email(address: &str) -> bool {
    address
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

/// The options shape a driver needs filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsSchema {
    tag: SchemaTag,
    fields: Vec<OptionField>,
}

impl OptionsSchema {
    /// Creates a schema with no fields.
    #[must_use]
    pub const fn new(tag: SchemaTag) -> Self {
        Self {
            tag,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: OptionField) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the schema discriminator.
    #[must_use]
    pub const fn tag(&self) -> &SchemaTag {
        &self.tag
    }

    /// Returns fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[OptionField] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&OptionField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Builds a fresh options value holding only declared defaults.
    #[must_use]
    pub fn empty_options(&self) -> DriverOptions {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .default_value()
                    .map(|value| (field.name(), value.clone()))
            })
            .fold(DriverOptions::new(self.tag.clone()), |options, (name, value)| {
                options.with_value(name, value)
            })
    }

    /// Checks that `options` has the shape this schema declares.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionsSchemaError`] found: a foreign schema tag,
    /// an undeclared field, a missing required field, or a value of the
    /// wrong kind. Blank text counts as unset only for textual kinds; on any
    /// other kind it is a kind mismatch.
    pub fn check(&self, options: &DriverOptions) -> Result<(), OptionsSchemaError> {
        if options.schema() != &self.tag {
            return Err(OptionsSchemaError::SchemaMismatch {
                expected: self.tag.clone(),
                found: options.schema().clone(),
            });
        }

        for (name, value) in options.values() {
            let field = self
                .field(name)
                .ok_or_else(|| OptionsSchemaError::UnknownField(name.clone()))?;
            if field.kind().is_textual() && is_blank(value) {
                continue;
            }
            field.check(value)?;
        }

        if let Some(missing) = self
            .fields
            .iter()
            .find(|field| field.is_required() && options.get(field.name()).is_none_or(is_blank))
        {
            return Err(OptionsSchemaError::MissingRequiredField(
                missing.name().to_owned(),
            ));
        }

        Ok(())
    }
}
