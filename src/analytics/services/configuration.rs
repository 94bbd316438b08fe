//! Orchestration of analytics driver configuration.
//!
//! Provides [`AnalyticsConfigService`], which resolves the options form
//! for a selected driver, gates submissions on the driver's own
//! validation, persists accepted configurations, and runs the manual
//! refresh action.

use super::{
    AnalyticsModuleConfig, ConfiguredDriverError, DriverRegistry, DriverRegistryError,
    RefreshReport, refresh_configurations,
};
use crate::analytics::{
    domain::{
        AnalyticsDomainError, ConfigurationId, DriverConfiguration, DriverName, DriverOptions,
        OptionValue, OptionsSchema, Permission, resolve_starting_options,
    },
    ports::{
        AnalyticsDriver, Authorizer, ConfigurationRepositoryError, DriverConfigurationRepository,
        WidgetRegistrar,
    },
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for analytics configuration operations.
#[derive(Debug, Clone, Error)]
pub enum AnalyticsConfigServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AnalyticsDomainError),
    /// Driver resolution failed.
    #[error(transparent)]
    Registry(#[from] DriverRegistryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ConfigurationRepositoryError),
    /// The configured driver failed.
    #[error(transparent)]
    Driver(#[from] ConfiguredDriverError),
    /// The driver rejected the submitted options.
    #[error("analytics options rejected by driver: {message}")]
    ValidationFailure {
        /// Translation key for the rejection.
        message_key: String,
        /// Rejection text.
        message: String,
    },
    /// The current user lacks the permission for the action.
    #[error("permission denied: {0}")]
    PermissionDenied(Permission),
}

impl AnalyticsConfigServiceError {
    /// Renders the error as text suitable for the administrator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationFailure { message, .. } => message.clone(),
            Self::Registry(DriverRegistryError::UnknownDriver(name))
            | Self::Driver(ConfiguredDriverError::Registry(DriverRegistryError::UnknownDriver(
                name,
            ))) => format!("The analytics driver '{name}' is not available."),
            Self::Repository(ConfigurationRepositoryError::NotFound(id)) => {
                format!("Analytics configuration {id} was not found.")
            }
            Self::Repository(ConfigurationRepositoryError::CorruptConfiguration { id, .. }) => {
                format!("Analytics configuration {id} could not be read.")
            }
            Self::Domain(AnalyticsDomainError::InvalidOptions(err)) => {
                format!("The analytics options are invalid: {err}.")
            }
            Self::PermissionDenied(permission) => {
                format!("You do not have permission to {permission} analytics configurations.")
            }
            other => other.to_string(),
        }
    }
}

/// Result type for analytics configuration service operations.
pub type AnalyticsConfigServiceResult<T> = Result<T, AnalyticsConfigServiceError>;

/// One row of the configuration listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSummary {
    /// Configuration identifier.
    pub id: ConfigurationId,
    /// Selected driver name.
    pub driver_name: DriverName,
    /// Display label of the selected driver.
    pub label: String,
}

/// Options form resolved for one driver selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsForm {
    driver_name: DriverName,
    label: String,
    installation_instructions: String,
    schema: OptionsSchema,
    options: DriverOptions,
}

impl OptionsForm {
    /// Returns the selected driver name.
    #[must_use]
    pub const fn driver_name(&self) -> &DriverName {
        &self.driver_name
    }

    /// Returns the selected driver's display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the read-only setup guidance.
    #[must_use]
    pub fn installation_instructions(&self) -> &str {
        &self.installation_instructions
    }

    /// Returns the schema the options must satisfy.
    #[must_use]
    pub const fn schema(&self) -> &OptionsSchema {
        &self.schema
    }

    /// Returns the options being edited.
    #[must_use]
    pub const fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Returns the options being edited for in-place changes.
    pub const fn options_mut(&mut self) -> &mut DriverOptions {
        &mut self.options
    }

    /// Sets one option value.
    pub fn set_option(&mut self, field: impl Into<String>, value: impl Into<OptionValue>) {
        self.options.set(field, value);
    }
}

/// An in-progress create or edit.
///
/// The draft remembers the stored entity it started from, so changing
/// the driver selection always re-resolves against that entity and never
/// against an intermediate selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDraft {
    original: Option<DriverConfiguration>,
    form: OptionsForm,
}

impl ConfigurationDraft {
    /// Returns the stored entity being edited, if any.
    #[must_use]
    pub const fn original(&self) -> Option<&DriverConfiguration> {
        self.original.as_ref()
    }

    /// Returns whether the draft creates a new configuration.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.original.is_none()
    }

    /// Returns the current options form.
    #[must_use]
    pub const fn form(&self) -> &OptionsForm {
        &self.form
    }

    /// Returns the current options form for editing.
    pub const fn form_mut(&mut self) -> &mut OptionsForm {
        &mut self.form
    }
}

/// Analytics configuration orchestration service.
#[derive(Clone)]
pub struct AnalyticsConfigService<R, A>
where
    R: DriverConfigurationRepository,
    A: Authorizer,
{
    repository: Arc<R>,
    authorizer: Arc<A>,
    registry: Arc<DriverRegistry>,
    config: AnalyticsModuleConfig,
}

impl<R, A> AnalyticsConfigService<R, A>
where
    R: DriverConfigurationRepository,
    A: Authorizer,
{
    /// Creates a service with default module settings.
    #[must_use]
    pub fn new(repository: Arc<R>, authorizer: Arc<A>, registry: Arc<DriverRegistry>) -> Self {
        Self {
            repository,
            authorizer,
            registry,
            config: AnalyticsModuleConfig::default(),
        }
    }

    /// Replaces the module settings.
    #[must_use]
    pub fn with_config(mut self, config: AnalyticsModuleConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the module settings.
    #[must_use]
    pub const fn config(&self) -> &AnalyticsModuleConfig {
        &self.config
    }

    /// Returns the driver registry.
    #[must_use]
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Lists every registered driver with its label for selection.
    #[must_use]
    pub fn driver_choices(&self) -> BTreeMap<DriverName, String> {
        self.registry.driver_options()
    }

    /// Returns the label of the driver a configuration uses.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::Registry`] when the driver is
    /// not registered.
    pub fn label_for(&self, configuration: &DriverConfiguration) -> AnalyticsConfigServiceResult<String> {
        Ok(self.registry.load_named(configuration.driver_name())?.label())
    }

    /// Lists stored configurations.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// view permission, or repository and registry errors.
    pub async fn list(&self) -> AnalyticsConfigServiceResult<Vec<ConfigurationSummary>> {
        self.require(Permission::View)?;
        let configurations = self.repository.get_all().await?;
        configurations
            .iter()
            .filter_map(|configuration| {
                let id = configuration.id()?;
                Some(self.label_for(configuration).map(|label| ConfigurationSummary {
                    id,
                    driver_name: configuration.driver_name().clone(),
                    label,
                }))
            })
            .collect()
    }

    /// Loads one configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// view permission, or repository errors such as
    /// [`ConfigurationRepositoryError::NotFound`].
    pub async fn get(&self, id: ConfigurationId) -> AnalyticsConfigServiceResult<DriverConfiguration> {
        self.require(Permission::View)?;
        Ok(self.repository.get(id).await?)
    }

    /// Starts a new configuration for the named driver.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// create permission, or [`DriverRegistryError::UnknownDriver`].
    pub fn begin_create(&self, driver_name: &str) -> AnalyticsConfigServiceResult<ConfigurationDraft> {
        self.require(Permission::Create)?;
        let selected = self.registered_name(driver_name)?;
        let form = self.resolve_form(None, &selected)?;
        Ok(ConfigurationDraft {
            original: None,
            form,
        })
    }

    /// Starts editing a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// edit permission, repository errors, or registry errors when the
    /// stored driver is no longer registered.
    pub async fn begin_edit(
        &self,
        id: ConfigurationId,
    ) -> AnalyticsConfigServiceResult<ConfigurationDraft> {
        self.require(Permission::Edit)?;
        let original = self.repository.get(id).await?;
        let form = self.resolve_form(Some(&original), original.driver_name())?;
        Ok(ConfigurationDraft {
            original: Some(original),
            form,
        })
    }

    /// Changes the driver selected in a draft.
    ///
    /// Selecting the stored driver restores its stored options; any other
    /// driver starts from its empty options.
    ///
    /// # Errors
    ///
    /// Returns [`DriverRegistryError::UnknownDriver`]; the draft is left
    /// unchanged.
    pub fn select_driver(
        &self,
        draft: &mut ConfigurationDraft,
        driver_name: &str,
    ) -> AnalyticsConfigServiceResult<()> {
        let selected = self.registered_name(driver_name)?;
        draft.form = self.resolve_form(draft.original.as_ref(), &selected)?;
        Ok(())
    }

    /// Validates and persists a draft.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// create or edit permission,
    /// [`AnalyticsDomainError::InvalidOptions`] when the options do not fit
    /// the schema, [`AnalyticsConfigServiceError::ValidationFailure`] when
    /// the driver rejects them, or repository errors. Nothing is persisted
    /// on failure.
    pub async fn submit(
        &self,
        draft: ConfigurationDraft,
    ) -> AnalyticsConfigServiceResult<DriverConfiguration> {
        let ConfigurationDraft { original, form } = draft;
        self.require(if original.is_some() {
            Permission::Edit
        } else {
            Permission::Create
        })?;
        self.persist_validated(original, form.driver_name, form.options)
            .await
    }

    /// Creates a configuration from complete options.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::submit`].
    pub async fn create(
        &self,
        driver_name: &str,
        options: DriverOptions,
    ) -> AnalyticsConfigServiceResult<DriverConfiguration> {
        self.require(Permission::Create)?;
        let selected = self.registered_name(driver_name)?;
        self.persist_validated(None, selected, options).await
    }

    /// Replaces a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns repository errors such as
    /// [`ConfigurationRepositoryError::NotFound`], or the same errors as
    /// [`Self::submit`].
    pub async fn update(
        &self,
        id: ConfigurationId,
        driver_name: &str,
        options: DriverOptions,
    ) -> AnalyticsConfigServiceResult<DriverConfiguration> {
        self.require(Permission::Edit)?;
        let original = self.repository.get(id).await?;
        let selected = self.registered_name(driver_name)?;
        self.persist_validated(Some(original), selected, options)
            .await
    }

    /// Removes a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// remove permission, or repository errors such as
    /// [`ConfigurationRepositoryError::NotFound`].
    pub async fn remove(&self, id: ConfigurationId) -> AnalyticsConfigServiceResult<()> {
        self.require(Permission::Remove)?;
        self.repository.remove(id).await?;
        info!(configuration_id = %id, "removed analytics configuration");
        Ok(())
    }

    /// Renders the embed snippet of a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// view permission, repository errors, or driver errors.
    pub async fn embed_code(&self, id: ConfigurationId) -> AnalyticsConfigServiceResult<String> {
        self.require(Permission::View)?;
        let configuration = self.repository.get(id).await?;
        Ok(configuration.generate_embed_code(&self.registry)?)
    }

    /// Registers dashboard widgets for every stored configuration.
    ///
    /// Drivers answer from their caches where possible. Returns the number
    /// of widgets registered.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// view permission, repository errors, or the first driver error.
    pub async fn register_widgets(
        &self,
        registrar: &dyn WidgetRegistrar,
    ) -> AnalyticsConfigServiceResult<usize> {
        self.require(Permission::View)?;
        let mut registered = 0;
        for configuration in self.repository.get_all().await? {
            let data = configuration.analytics_data(&self.registry).await?;
            registered += registrar.register_data_set(data);
        }
        Ok(registered)
    }

    /// Recomputes analytics data for every stored configuration.
    ///
    /// Reads bypass each driver's cache while writes still reach it. A
    /// configuration that fails to load or refresh is recorded in the
    /// report and the rest are still refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigServiceError::PermissionDenied`] without
    /// view permission, or repository errors when listing identifiers.
    pub async fn refresh_analytics_data(
        &self,
        registrar: &dyn WidgetRegistrar,
    ) -> AnalyticsConfigServiceResult<RefreshReport> {
        self.require(Permission::View)?;
        Ok(refresh_configurations(&self.registry, self.repository.as_ref(), registrar).await?)
    }

    fn require(&self, permission: Permission) -> AnalyticsConfigServiceResult<()> {
        if self.authorizer.is_authorized(permission) {
            Ok(())
        } else {
            Err(AnalyticsConfigServiceError::PermissionDenied(permission))
        }
    }

    fn registered_name(&self, driver_name: &str) -> AnalyticsConfigServiceResult<DriverName> {
        let unknown = || DriverRegistryError::UnknownDriver(driver_name.to_owned());
        let name = DriverName::new(driver_name).map_err(|_| unknown())?;
        if !self.registry.contains(&name) {
            return Err(unknown().into());
        }
        Ok(name)
    }

    fn resolve_form(
        &self,
        original: Option<&DriverConfiguration>,
        selected: &DriverName,
    ) -> AnalyticsConfigServiceResult<OptionsForm> {
        let driver = self.registry.load_named(selected)?;
        let options = resolve_starting_options(original, selected, || driver.empty_options());
        debug!(
            driver = %selected,
            reused = original.is_some_and(|stored| stored.driver_name() == selected),
            "resolved analytics options form"
        );
        Ok(OptionsForm {
            driver_name: selected.clone(),
            label: driver.label(),
            installation_instructions: driver.installation_instructions(),
            schema: driver.options_schema(),
            options,
        })
    }

    async fn persist_validated(
        &self,
        original: Option<DriverConfiguration>,
        driver_name: DriverName,
        options: DriverOptions,
    ) -> AnalyticsConfigServiceResult<DriverConfiguration> {
        let driver = self.registry.load_named(&driver_name)?;
        driver
            .options_schema()
            .check(&options)
            .map_err(AnalyticsDomainError::from)?;

        if !self.validate_within_timeout(driver.as_ref(), &options).await {
            warn!(driver = %driver_name, "analytics options rejected by driver validation");
            return Err(AnalyticsConfigServiceError::ValidationFailure {
                message_key: self.config.validation_failure_message_key().to_owned(),
                message: self.config.validation_failure_message().to_owned(),
            });
        }

        let mut configuration = match original {
            Some(mut stored) => {
                stored.replace(driver_name, options);
                stored
            }
            None => DriverConfiguration::new(driver_name, options),
        };
        let id = self.repository.save(&mut configuration).await?;
        info!(
            configuration_id = %id,
            driver = %configuration.driver_name(),
            "saved analytics configuration"
        );
        Ok(configuration)
    }

    async fn validate_within_timeout(
        &self,
        driver: &dyn AnalyticsDriver,
        options: &DriverOptions,
    ) -> bool {
        let timeout = self.config.validation_timeout();
        tokio::time::timeout(timeout, driver.validate(options))
            .await
            .unwrap_or_else(|_| {
                warn!(?timeout, "analytics driver validation timed out");
                false
            })
    }
}
