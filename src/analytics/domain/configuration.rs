//! Driver configuration aggregate root.

use super::{ConfigurationId, DriverName, DriverOptions};

/// The selected analytics driver and its options.
///
/// A configuration carries no identifier until a repository persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfiguration {
    id: Option<ConfigurationId>,
    driver_name: DriverName,
    options: DriverOptions,
}

/// Parameter object for reconstructing a persisted driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConfigurationData {
    /// Persisted row key.
    pub id: ConfigurationId,
    /// Persisted driver name.
    pub driver_name: DriverName,
    /// Decoded options payload.
    pub options: DriverOptions,
}

impl DriverConfiguration {
    /// Creates an unsaved configuration.
    #[must_use]
    pub const fn new(driver_name: DriverName, options: DriverOptions) -> Self {
        Self {
            id: None,
            driver_name,
            options,
        }
    }

    /// Reconstructs a configuration from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedConfigurationData) -> Self {
        Self {
            id: Some(data.id),
            driver_name: data.driver_name,
            options: data.options,
        }
    }

    /// Returns the identifier, or `None` before the first save.
    #[must_use]
    pub const fn id(&self) -> Option<ConfigurationId> {
        self.id
    }

    /// Returns the selected driver name.
    #[must_use]
    pub const fn driver_name(&self) -> &DriverName {
        &self.driver_name
    }

    /// Returns the options payload.
    #[must_use]
    pub const fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Records the identifier chosen by the repository on first save.
    pub const fn assign_id(&mut self, id: ConfigurationId) {
        self.id = Some(id);
    }

    /// Replaces both the driver selection and its options.
    pub fn replace(&mut self, driver_name: DriverName, options: DriverOptions) {
        self.driver_name = driver_name;
        self.options = options;
    }
}

/// Chooses the options an edit form starts from.
///
/// Options stored for `previous` are reused only when it names the same
/// driver as `selected`; any other selection starts from `fresh()`, so
/// fields from a different driver never carry over.
pub fn resolve_starting_options(
    previous: Option<&DriverConfiguration>,
    selected: &DriverName,
    fresh: impl FnOnce() -> DriverOptions,
) -> DriverOptions {
    match previous {
        Some(stored) if stored.driver_name() == selected => stored.options().clone(),
        _ => fresh(),
    }
}
