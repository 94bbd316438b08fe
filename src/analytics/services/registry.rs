//! Driver registry mapping driver names to driver instances.
//!
//! Provides [`DriverRegistry`], which resolves drivers by name and lists
//! the available drivers with their labels, together with the
//! [`DriverConfiguration`] façade that delegates to the resolved driver.

use crate::analytics::{
    domain::{AnalyticsDataSet, DriverConfiguration, DriverName, OptionsSchema},
    ports::{AnalyticsDriver, DriverError},
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Produces a driver instance for a registered name.
pub type DriverLoader = Arc<dyn Fn() -> Arc<dyn AnalyticsDriver> + Send + Sync>;

/// Errors returned by driver registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverRegistryError {
    /// No driver is registered under the name.
    #[error("unknown analytics driver: {0}")]
    UnknownDriver(String),

    /// A driver is already registered under the name.
    #[error("analytics driver already registered: {0}")]
    DuplicateDriver(DriverName),
}

/// Registry of available analytics drivers.
///
/// Populated during application start-up, then shared immutably behind
/// `Arc`.
#[derive(Clone, Default)]
pub struct DriverRegistry {
    loaders: BTreeMap<DriverName, DriverLoader>,
}

impl DriverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loader invoked on every [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::DuplicateDriver`] when `name` is taken.
    pub fn register<F>(&mut self, name: DriverName, loader: F) -> Result<(), DriverRegistryError>
    where
        F: Fn() -> Arc<dyn AnalyticsDriver> + Send + Sync + 'static,
    {
        if self.loaders.contains_key(&name) {
            return Err(DriverRegistryError::DuplicateDriver(name));
        }
        self.loaders.insert(name, Arc::new(loader));
        Ok(())
    }

    /// Registers a single shared driver instance.
    ///
    /// Every load returns the same instance, so cache swaps made through
    /// one handle are seen by all.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::DuplicateDriver`] when `name` is taken.
    pub fn register_instance(
        &mut self,
        name: DriverName,
        driver: Arc<dyn AnalyticsDriver>,
    ) -> Result<(), DriverRegistryError> {
        self.register(name, move || Arc::clone(&driver))
    }

    /// Resolves a driver by its raw name.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::UnknownDriver`] when the name is not
    /// registered (including names that are not valid driver names).
    pub fn load(&self, name: &str) -> Result<Arc<dyn AnalyticsDriver>, DriverRegistryError> {
        let driver_name = DriverName::new(name)
            .map_err(|_| DriverRegistryError::UnknownDriver(name.to_owned()))?;
        self.load_named(&driver_name)
    }

    /// Resolves a driver by validated name.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::UnknownDriver`] when the name is not
    /// registered.
    pub fn load_named(
        &self,
        name: &DriverName,
    ) -> Result<Arc<dyn AnalyticsDriver>, DriverRegistryError> {
        self.loaders
            .get(name)
            .map(|loader| loader())
            .ok_or_else(|| DriverRegistryError::UnknownDriver(name.as_str().to_owned()))
    }

    /// Returns whether a driver is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &DriverName) -> bool {
        self.loaders.contains_key(name)
    }

    /// Returns registered driver names in sorted order.
    pub fn driver_names(&self) -> impl Iterator<Item = &DriverName> {
        self.loaders.keys()
    }

    /// Lists every registered driver with its display label.
    #[must_use]
    pub fn driver_options(&self) -> BTreeMap<DriverName, String> {
        self.loaders
            .iter()
            .map(|(name, loader)| (name.clone(), loader().label()))
            .collect()
    }

    /// Returns the options schema declared by the named driver.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::UnknownDriver`] when the name is not
    /// registered.
    pub fn schema_for(&self, name: &DriverName) -> Result<OptionsSchema, DriverRegistryError> {
        Ok(self.load_named(name)?.options_schema())
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Errors returned by the [`DriverConfiguration`] driver façade.
#[derive(Debug, Clone, Error)]
pub enum ConfiguredDriverError {
    /// The stored driver name is no longer registered.
    #[error(transparent)]
    Registry(#[from] DriverRegistryError),
    /// The driver failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl DriverConfiguration {
    /// Resolves the configured driver.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::UnknownDriver`] when the stored driver
    /// name is not registered.
    pub fn driver(
        &self,
        registry: &DriverRegistry,
    ) -> Result<Arc<dyn AnalyticsDriver>, DriverRegistryError> {
        registry.load_named(self.driver_name())
    }

    /// Fetches analytics data through the configured driver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfiguredDriverError`] when the driver cannot be resolved
    /// or fails.
    pub async fn analytics_data(
        &self,
        registry: &DriverRegistry,
    ) -> Result<AnalyticsDataSet, ConfiguredDriverError> {
        let driver = self.driver(registry)?;
        Ok(driver.analytics_data(self.options()).await?)
    }

    /// Renders the embed snippet through the configured driver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfiguredDriverError`] when the driver cannot be resolved
    /// or fails.
    pub fn generate_embed_code(
        &self,
        registry: &DriverRegistry,
    ) -> Result<String, ConfiguredDriverError> {
        let driver = self.driver(registry)?;
        Ok(driver.embed_code(self.options())?)
    }
}
