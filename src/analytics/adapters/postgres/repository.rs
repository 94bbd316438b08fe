//! `PostgreSQL` repository implementation for driver configurations.

use super::{
    models::{
        AnalyticsConfigurationRow, KeyedAnalyticsConfigurationRow, NewAnalyticsConfigurationRow,
    },
    schema::analytics,
};
use crate::analytics::{
    adapters::record::{
        ConfigurationRecord, decode_configuration, encode_configuration, encode_options,
    },
    domain::{ConfigurationId, DriverConfiguration},
    ports::{
        ConfigurationRepositoryError, ConfigurationRepositoryResult, DriverConfigurationRepository,
    },
    services::DriverRegistry,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;
use std::sync::Arc;
use tracing::debug;

/// `PostgreSQL` connection pool type used by analytics adapters.
pub type AnalyticsPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed driver configuration repository.
#[derive(Debug, Clone)]
pub struct PostgresDriverConfigurationRepository {
    pool: AnalyticsPgPool,
    registry: Arc<DriverRegistry>,
}

impl PostgresDriverConfigurationRepository {
    /// Creates a repository from a connection pool and the registry used to
    /// decode stored options.
    #[must_use]
    pub const fn new(pool: AnalyticsPgPool, registry: Arc<DriverRegistry>) -> Self {
        Self { pool, registry }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ConfigurationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ConfigurationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(ConfigurationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ConfigurationRepositoryError::persistence)?
    }
}

#[async_trait]
impl DriverConfigurationRepository for PostgresDriverConfigurationRepository {
    async fn get_all(&self) -> ConfigurationRepositoryResult<Vec<DriverConfiguration>> {
        let rows = self
            .run_blocking(move |connection| {
                analytics::table
                    .order(analytics::id)
                    .select(AnalyticsConfigurationRow::as_select())
                    .load::<AnalyticsConfigurationRow>(connection)
                    .map_err(ConfigurationRepositoryError::persistence)
            })
            .await?;
        rows.into_iter()
            .map(|row| decode_configuration(ConfigurationRecord::from(row), &self.registry))
            .collect()
    }

    async fn list_ids(&self) -> ConfigurationRepositoryResult<Vec<ConfigurationId>> {
        let ids = self
            .run_blocking(move |connection| {
                analytics::table
                    .order(analytics::id)
                    .select(analytics::id)
                    .load::<i64>(connection)
                    .map_err(ConfigurationRepositoryError::persistence)
            })
            .await?;
        Ok(ids.into_iter().map(ConfigurationId::new).collect())
    }

    async fn get(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<DriverConfiguration> {
        let row = self
            .run_blocking(move |connection| {
                analytics::table
                    .filter(analytics::id.eq(id.into_inner()))
                    .select(AnalyticsConfigurationRow::as_select())
                    .first::<AnalyticsConfigurationRow>(connection)
                    .optional()
                    .map_err(ConfigurationRepositoryError::persistence)
            })
            .await?
            .ok_or(ConfigurationRepositoryError::NotFound(id))?;
        decode_configuration(ConfigurationRecord::from(row), &self.registry)
    }

    async fn save(
        &self,
        configuration: &mut DriverConfiguration,
    ) -> ConfigurationRepositoryResult<ConfigurationId> {
        let id = match configuration.id() {
            Some(existing) => {
                let row = KeyedAnalyticsConfigurationRow::from(encode_configuration(
                    existing,
                    configuration,
                ));
                self.run_blocking(move |connection| {
                    diesel::insert_into(analytics::table)
                        .values(&row)
                        .on_conflict(analytics::id)
                        .do_update()
                        .set((
                            analytics::driver.eq(excluded(analytics::driver)),
                            analytics::options.eq(excluded(analytics::options)),
                        ))
                        .execute(connection)
                        .map_err(ConfigurationRepositoryError::persistence)?;
                    Ok(())
                })
                .await?;
                existing
            }
            None => {
                let row = NewAnalyticsConfigurationRow {
                    driver: configuration.driver_name().as_str().to_owned(),
                    options: encode_options(configuration.options()),
                };
                let raw_id = self
                    .run_blocking(move |connection| {
                        diesel::insert_into(analytics::table)
                            .values(&row)
                            .returning(analytics::id)
                            .get_result::<i64>(connection)
                            .map_err(ConfigurationRepositoryError::persistence)
                    })
                    .await?;
                ConfigurationId::new(raw_id)
            }
        };

        debug!(configuration_id = %id, "stored analytics configuration row");
        configuration.assign_id(id);
        Ok(id)
    }

    async fn remove(&self, id: ConfigurationId) -> ConfigurationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(analytics::table.filter(analytics::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ConfigurationRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ConfigurationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}
