//! Shared world state for analytics configuration BDD scenarios.

use std::sync::Arc;

use analytics_config::analytics::{
    adapters::{
        drivers::{GOOGLE_DRIVER_NAME, GoogleAnalyticsDriver, NULL_DRIVER_NAME, NullDriver},
        memory::{InMemoryDriverConfigurationRepository, InMemoryReportingApi, StaticAuthorizer},
        storage::InMemoryFileStorage,
    },
    domain::{DriverConfiguration, DriverName},
    services::{
        AnalyticsConfigService, AnalyticsConfigServiceError, ConfigurationDraft, DriverRegistry,
        RefreshReport,
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestConfigService =
    AnalyticsConfigService<InMemoryDriverConfigurationRepository, StaticAuthorizer>;

/// Scenario world for analytics configuration behaviour tests.
pub struct AnalyticsWorld {
    /// The configuration service under test.
    pub service: TestConfigService,
    /// Reporting API behind the Google driver.
    pub reporting: InMemoryReportingApi,
    /// Storage for uploaded keys.
    pub files: InMemoryFileStorage,
    /// Configuration stored by a given step.
    pub stored: Option<DriverConfiguration>,
    /// Draft being edited.
    pub draft: Option<ConfigurationDraft>,
    /// Error from the last driver selection.
    pub last_selection_error: Option<AnalyticsConfigServiceError>,
    /// Report from the last refresh.
    pub last_refresh: Option<RefreshReport>,
}

impl AnalyticsWorld {
    /// Creates a world with the Google and null drivers registered.
    #[must_use]
    pub fn new() -> Self {
        let reporting = InMemoryReportingApi::new();
        let files = InMemoryFileStorage::new();
        let google =
            GoogleAnalyticsDriver::new(Arc::new(reporting.clone()), Arc::new(files.clone()));

        let mut registry = DriverRegistry::new();
        registry
            .register_instance(name(GOOGLE_DRIVER_NAME), Arc::new(google))
            .expect("google registration should succeed");
        registry
            .register_instance(name(NULL_DRIVER_NAME), Arc::new(NullDriver::new()))
            .expect("null registration should succeed");
        let registry = Arc::new(registry);

        let service = AnalyticsConfigService::new(
            Arc::new(InMemoryDriverConfigurationRepository::new(Arc::clone(
                &registry,
            ))),
            Arc::new(StaticAuthorizer::allow_all()),
            registry,
        );
        Self {
            service,
            reporting,
            files,
            stored: None,
            draft: None,
            last_selection_error: None,
            last_refresh: None,
        }
    }
}

impl Default for AnalyticsWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn name(value: &str) -> DriverName {
    DriverName::new(value).expect("valid driver name")
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AnalyticsWorld {
    AnalyticsWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
