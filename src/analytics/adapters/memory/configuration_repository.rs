//! In-memory repository for driver configurations.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::analytics::{
    adapters::record::{ConfigurationRecord, decode_configuration, encode_configuration},
    domain::{ConfigurationId, DriverConfiguration},
    ports::{
        ConfigurationRepositoryError, ConfigurationRepositoryResult, DriverConfigurationRepository,
    },
    services::DriverRegistry,
};

/// Thread-safe in-memory configuration repository.
///
/// Rows are held in their encoded form, so loads go through the same
/// discriminator checks as the `PostgreSQL` adapter.
#[derive(Debug, Clone)]
pub struct InMemoryDriverConfigurationRepository {
    registry: Arc<DriverRegistry>,
    state: Arc<RwLock<InMemoryRepositoryState>>,
}

#[derive(Debug)]
struct InMemoryRepositoryState {
    rows: BTreeMap<i64, ConfigurationRecord>,
    // `None` once an identifier at `i64::MAX` has been stored.
    next_id: Option<i64>,
}

impl Default for InMemoryRepositoryState {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl InMemoryRepositoryState {
    fn reserve_past(&mut self, id: i64) {
        let following = id.checked_add(1);
        self.next_id = self.next_id.zip(following).map(|(next, after)| next.max(after));
    }

    fn allocate(&mut self) -> ConfigurationRepositoryResult<ConfigurationId> {
        let id = self.next_id.ok_or_else(|| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(
                "configuration identifiers exhausted",
            ))
        })?;
        self.next_id = id.checked_add(1);
        Ok(ConfigurationId::new(id))
    }
}

impl InMemoryDriverConfigurationRepository {
    /// Creates an empty repository decoding rows through `registry`.
    #[must_use]
    pub fn new(registry: Arc<DriverRegistry>) -> Self {
        Self {
            registry,
            state: Arc::new(RwLock::new(InMemoryRepositoryState::default())),
        }
    }

    /// Returns the stored rows ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn records(&self) -> ConfigurationRepositoryResult<Vec<ConfigurationRecord>> {
        let state = self.state.read().map_err(|err| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.rows.values().cloned().collect())
    }

    /// Writes a raw row, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn insert_record(&self, record: ConfigurationRecord) -> ConfigurationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.reserve_past(record.id);
        state.rows.insert(record.id, record);
        Ok(())
    }
}

#[async_trait]
impl DriverConfigurationRepository for InMemoryDriverConfigurationRepository {
    async fn get_all(&self) -> ConfigurationRepositoryResult<Vec<DriverConfiguration>> {
        let rows = self.records()?;
        rows.into_iter()
            .map(|row| decode_configuration(row, &self.registry))
            .collect()
    }

    async fn list_ids(&self) -> ConfigurationRepositoryResult<Vec<ConfigurationId>> {
        let state = self.state.read().map_err(|err| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.rows.keys().copied().map(ConfigurationId::new).collect())
    }

    async fn get(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<DriverConfiguration> {
        let row = {
            let state = self.state.read().map_err(|err| {
                ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            state
                .rows
                .get(&id.into_inner())
                .cloned()
                .ok_or(ConfigurationRepositoryError::NotFound(id))?
        };
        decode_configuration(row, &self.registry)
    }

    async fn save(
        &self,
        configuration: &mut DriverConfiguration,
    ) -> ConfigurationRepositoryResult<ConfigurationId> {
        let mut state = self.state.write().map_err(|err| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let id = match configuration.id() {
            Some(existing) => {
                state.reserve_past(existing.into_inner());
                existing
            }
            None => state.allocate()?,
        };

        state
            .rows
            .insert(id.into_inner(), encode_configuration(id, configuration));
        configuration.assign_id(id);
        Ok(id)
    }

    async fn remove(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConfigurationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .rows
            .remove(&id.into_inner())
            .map(|_| ())
            .ok_or(ConfigurationRepositoryError::NotFound(id))
    }
}
