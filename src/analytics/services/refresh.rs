//! Manual refresh of analytics data through write-only caches.
//!
//! Each stored configuration is refreshed with its driver's cache wrapped
//! in a [`WriteOnlyCache`], so every lookup recomputes from the provider
//! while the results still warm the real cache. One configuration
//! failing, or one row failing to load, does not stop the others.

use super::{ConfiguredDriverError, DriverRegistry, with_temporary_cache};
use crate::analytics::{
    adapters::cache::WriteOnlyCache,
    domain::{ConfigurationId, DriverConfiguration, DriverName},
    ports::{
        CacheHandle, ConfigurationRepositoryError, ConfigurationRepositoryResult, DriverError,
        DriverConfigurationRepository, WidgetRegistrar,
    },
};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A configuration that could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    /// Configuration that failed.
    pub configuration_id: ConfigurationId,
    /// Driver the stored row names, when it could be read.
    pub driver_name: Option<DriverName>,
    /// Rendered failure cause.
    pub reason: String,
}

/// Outcome of a refresh run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    refreshed: Vec<ConfigurationId>,
    failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    /// Returns the configurations refreshed successfully.
    #[must_use]
    pub fn refreshed(&self) -> &[ConfigurationId] {
        &self.refreshed
    }

    /// Returns the configurations that failed.
    #[must_use]
    pub fn failures(&self) -> &[RefreshFailure] {
        &self.failures
    }

    /// Returns whether every configuration refreshed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(
        &mut self,
        configuration_id: ConfigurationId,
        driver_name: Option<DriverName>,
        err: &impl Display,
    ) {
        warn!(
            configuration_id = %configuration_id,
            driver = driver_name.as_ref().map_or("<unreadable>", DriverName::as_str),
            error = %err,
            "analytics refresh failed"
        );
        self.failures.push(RefreshFailure {
            configuration_id,
            driver_name,
            reason: err.to_string(),
        });
    }
}

/// Refreshes every stored configuration and registers its widgets.
///
/// Rows are loaded one at a time. A row that cannot be decoded, including
/// one naming a driver that is no longer registered, is reported as a
/// failure and the remaining rows are still refreshed. Rows removed while
/// the refresh runs are skipped.
///
/// # Errors
///
/// Returns repository errors only when the stored identifiers cannot be
/// listed.
pub async fn refresh_configurations(
    registry: &DriverRegistry,
    repository: &dyn DriverConfigurationRepository,
    registrar: &dyn WidgetRegistrar,
) -> ConfigurationRepositoryResult<RefreshReport> {
    let mut report = RefreshReport::default();
    for id in repository.list_ids().await? {
        let configuration = match repository.get(id).await {
            Ok(configuration) => configuration,
            Err(ConfigurationRepositoryError::NotFound(_)) => {
                debug!(configuration_id = %id, "configuration removed during refresh");
                continue;
            }
            Err(err) => {
                report.record_failure(id, stored_driver_name(&err), &err);
                continue;
            }
        };
        match refresh_configuration(registry, &configuration, registrar).await {
            Ok(widgets) => {
                debug!(configuration_id = %id, widgets, "refreshed analytics data");
                report.refreshed.push(id);
            }
            Err(err) => {
                report.record_failure(id, Some(configuration.driver_name().clone()), &err);
            }
        }
    }
    info!(
        refreshed = report.refreshed.len(),
        failed = report.failures.len(),
        "analytics refresh completed"
    );
    Ok(report)
}

fn stored_driver_name(err: &ConfigurationRepositoryError) -> Option<DriverName> {
    match err {
        ConfigurationRepositoryError::UnknownDriver { driver, .. } => DriverName::new(driver).ok(),
        _ => None,
    }
}

async fn refresh_configuration(
    registry: &DriverRegistry,
    configuration: &DriverConfiguration,
    registrar: &dyn WidgetRegistrar,
) -> Result<usize, ConfiguredDriverError> {
    let driver = configuration.driver(registry)?;
    let registered = with_temporary_cache(
        driver.as_ref(),
        |original| -> CacheHandle { Arc::new(WriteOnlyCache::new(original)) },
        || async {
            let data = driver.analytics_data(configuration.options()).await?;
            Ok::<_, DriverError>(registrar.register_data_set(data))
        },
    )
    .await?;
    Ok(registered)
}
