//! Repository port for driver configuration persistence.

use crate::analytics::domain::{ConfigurationId, DriverConfiguration, DriverName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration repository operations.
pub type ConfigurationRepositoryResult<T> = Result<T, ConfigurationRepositoryError>;

/// Driver configuration persistence contract.
///
/// Implementations store the options payload together with its schema
/// tag and cross-check that tag against the driver on load.
#[async_trait]
pub trait DriverConfigurationRepository: Send + Sync {
    /// Returns every stored configuration in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationRepositoryError::CorruptConfiguration`] or
    /// [`ConfigurationRepositoryError::UnknownDriver`] when a row cannot be
    /// decoded, or persistence errors.
    async fn get_all(&self) -> ConfigurationRepositoryResult<Vec<DriverConfiguration>>;

    /// Returns the identifiers of every stored row in ascending order.
    ///
    /// Rows are not decoded, so a row that would fail to load is still
    /// listed.
    ///
    /// # Errors
    ///
    /// Returns persistence errors.
    async fn list_ids(&self) -> ConfigurationRepositoryResult<Vec<ConfigurationId>>;

    /// Loads a configuration by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationRepositoryError::NotFound`] when no row has the
    /// identifier, decoding errors, or persistence errors.
    async fn get(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<DriverConfiguration>;

    /// Inserts a new configuration or replaces an existing one.
    ///
    /// A configuration without an identifier receives one, which is written
    /// back into `configuration` and returned.
    ///
    /// # Errors
    ///
    /// Returns persistence errors.
    async fn save(
        &self,
        configuration: &mut DriverConfiguration,
    ) -> ConfigurationRepositoryResult<ConfigurationId>;

    /// Deletes a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationRepositoryError::NotFound`] when no row has the
    /// identifier, or persistence errors.
    async fn remove(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<()>;
}

/// Errors returned by configuration repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationRepositoryError {
    /// No configuration has the identifier.
    #[error("analytics configuration not found: {0}")]
    NotFound(ConfigurationId),

    /// A stored row does not match the schema of its driver.
    #[error("analytics configuration {id} is corrupt: {reason}")]
    CorruptConfiguration {
        /// Row key.
        id: ConfigurationId,
        /// What failed to decode.
        reason: String,
    },

    /// A stored row names a driver that is not registered.
    #[error("analytics configuration {id} uses unknown driver '{driver}'")]
    UnknownDriver {
        /// Row key.
        id: ConfigurationId,
        /// Stored driver name.
        driver: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigurationRepositoryError {
    /// Builds a corrupt-row error.
    pub fn corrupt(id: ConfigurationId, reason: impl Into<String>) -> Self {
        Self::CorruptConfiguration {
            id,
            reason: reason.into(),
        }
    }

    /// Builds an unknown-driver error from a stored driver name.
    pub fn unknown_driver(id: ConfigurationId, driver: &DriverName) -> Self {
        Self::UnknownDriver {
            id,
            driver: driver.as_str().to_owned(),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
