//! Persisted row shape for driver configurations.
//!
//! Options are stored as a JSON object holding every field plus a
//! `__class` discriminator naming the schema that produced them. File
//! fields become a nested reference object. Decoding resolves the
//! driver's schema through the registry and decodes each field by its
//! declared kind.

use crate::analytics::{
    domain::{
        ConfigurationId, DriverConfiguration, DriverName, DriverOptions, FileReference,
        OptionKind, OptionValue, OptionsSchema, PersistedConfigurationData,
    },
    ports::{ConfigurationRepositoryError, ConfigurationRepositoryResult},
    services::DriverRegistry,
};
use serde_json::{Map, Value};

/// Options key holding the schema discriminator.
pub const SCHEMA_TAG_FIELD: &str = "__class";
/// File reference key holding the lazy-proxy flag.
pub const FILE_PROXY_FIELD: &str = "__is_proxy";
/// File reference key holding the storage path.
pub const FILE_PATH_FIELD: &str = "__file_path";
/// File reference key holding the client-supplied file name.
pub const FILE_CLIENT_NAME_FIELD: &str = "__file_client_name";

/// One persisted configuration row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    /// Row key.
    pub id: i64,
    /// Driver name.
    pub driver: String,
    /// Encoded options document.
    pub options: Value,
}

/// Encodes an options value as a tagged JSON object.
#[must_use]
pub fn encode_options(options: &DriverOptions) -> Value {
    let mut document: Map<String, Value> = options
        .values()
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    document.insert(
        SCHEMA_TAG_FIELD.to_owned(),
        Value::String(options.schema().as_str().to_owned()),
    );
    Value::Object(document)
}

/// Encodes a configuration as a row under the given identifier.
#[must_use]
pub fn encode_configuration(
    id: ConfigurationId,
    configuration: &DriverConfiguration,
) -> ConfigurationRecord {
    ConfigurationRecord {
        id: id.into_inner(),
        driver: configuration.driver_name().as_str().to_owned(),
        options: encode_options(configuration.options()),
    }
}

/// Decodes a row back into a configuration.
///
/// # Errors
///
/// Returns [`ConfigurationRepositoryError::UnknownDriver`] when the stored
/// driver is not registered, or
/// [`ConfigurationRepositoryError::CorruptConfiguration`] when the driver
/// name, discriminator, or any field fails to decode.
pub fn decode_configuration(
    record: ConfigurationRecord,
    registry: &DriverRegistry,
) -> ConfigurationRepositoryResult<DriverConfiguration> {
    let ConfigurationRecord {
        id: raw_id,
        driver,
        options,
    } = record;
    let id = ConfigurationId::new(raw_id);

    let driver_name = DriverName::new(&driver)
        .map_err(|err| ConfigurationRepositoryError::corrupt(id, err.to_string()))?;
    let schema = registry
        .schema_for(&driver_name)
        .map_err(|_| ConfigurationRepositoryError::unknown_driver(id, &driver_name))?;
    let decoded_options = decode_options(id, &schema, options)?;

    Ok(DriverConfiguration::from_persisted(
        PersistedConfigurationData {
            id,
            driver_name,
            options: decoded_options,
        },
    ))
}

fn encode_value(value: &OptionValue) -> Value {
    match value {
        OptionValue::Text(text) => Value::String(text.clone()),
        OptionValue::Integer(number) => Value::from(*number),
        OptionValue::Boolean(flag) => Value::Bool(*flag),
        OptionValue::File(file) => {
            let mut reference = Map::new();
            reference.insert(FILE_PROXY_FIELD.to_owned(), Value::Bool(file.is_proxy()));
            reference.insert(
                FILE_PATH_FIELD.to_owned(),
                Value::String(file.path().to_owned()),
            );
            reference.insert(
                FILE_CLIENT_NAME_FIELD.to_owned(),
                Value::String(file.client_name().to_owned()),
            );
            Value::Object(reference)
        }
    }
}

fn decode_options(
    id: ConfigurationId,
    schema: &OptionsSchema,
    document: Value,
) -> ConfigurationRepositoryResult<DriverOptions> {
    let Value::Object(mut fields) = document else {
        return Err(ConfigurationRepositoryError::corrupt(
            id,
            "options are not a JSON object",
        ));
    };

    let stored_tag = match fields.remove(SCHEMA_TAG_FIELD) {
        Some(Value::String(tag)) => tag,
        _ => {
            return Err(ConfigurationRepositoryError::corrupt(
                id,
                "options carry no schema discriminator",
            ));
        }
    };
    if stored_tag != schema.tag().as_str() {
        return Err(ConfigurationRepositoryError::corrupt(
            id,
            format!(
                "options discriminator '{stored_tag}' does not match driver schema '{}'",
                schema.tag()
            ),
        ));
    }

    let mut options = DriverOptions::new(schema.tag().clone());
    for (name, raw) in fields {
        if raw.is_null() {
            continue;
        }
        let field = schema.field(&name).ok_or_else(|| {
            ConfigurationRepositoryError::corrupt(id, format!("unknown option field '{name}'"))
        })?;
        let value = decode_value(field.kind(), &raw).ok_or_else(|| {
            ConfigurationRepositoryError::corrupt(
                id,
                format!(
                    "option field '{name}' does not hold a {} value",
                    field.kind().as_str()
                ),
            )
        })?;
        options.set(name, value);
    }
    Ok(options)
}

fn decode_value(kind: &OptionKind, raw: &Value) -> Option<OptionValue> {
    match kind {
        OptionKind::Text | OptionKind::Email | OptionKind::Choice(_) => {
            raw.as_str().map(|text| OptionValue::Text(text.to_owned()))
        }
        OptionKind::Integer => raw.as_i64().map(OptionValue::Integer),
        OptionKind::Boolean => raw.as_bool().map(OptionValue::Boolean),
        OptionKind::File => decode_file(raw).map(OptionValue::File),
    }
}

fn decode_file(raw: &Value) -> Option<FileReference> {
    let reference = raw.as_object()?;
    let path = reference.get(FILE_PATH_FIELD)?.as_str()?;
    let client_name = reference.get(FILE_CLIENT_NAME_FIELD)?.as_str()?;
    let is_proxy = reference.get(FILE_PROXY_FIELD)?.as_bool()?;
    Some(if is_proxy {
        FileReference::proxy(path, client_name)
    } else {
        FileReference::resolved(path, client_name)
    })
}
