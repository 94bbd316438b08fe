//! Diesel row models for analytics driver configuration persistence.

use super::schema::analytics;
use crate::analytics::adapters::record::ConfigurationRecord;
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for configuration records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = analytics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalyticsConfigurationRow {
    /// Configuration identifier.
    pub id: i64,
    /// Selected driver name.
    pub driver: String,
    /// Options JSON payload.
    pub options: Value,
}

impl From<AnalyticsConfigurationRow> for ConfigurationRecord {
    fn from(row: AnalyticsConfigurationRow) -> Self {
        Self {
            id: row.id,
            driver: row.driver,
            options: row.options,
        }
    }
}

/// Insert model for configurations without an identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = analytics)]
pub struct NewAnalyticsConfigurationRow {
    /// Selected driver name.
    pub driver: String,
    /// Options JSON payload.
    pub options: Value,
}

/// Insert model for configurations with a known identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = analytics)]
pub struct KeyedAnalyticsConfigurationRow {
    /// Configuration identifier.
    pub id: i64,
    /// Selected driver name.
    pub driver: String,
    /// Options JSON payload.
    pub options: Value,
}

impl From<ConfigurationRecord> for KeyedAnalyticsConfigurationRow {
    fn from(record: ConfigurationRecord) -> Self {
        Self {
            id: record.id,
            driver: record.driver,
            options: record.options,
        }
    }
}
