//! Shared test helpers for in-memory analytics integration tests.

use std::sync::Arc;

use analytics_config::analytics::{
    adapters::{
        drivers::{
            GOOGLE_DRIVER_NAME, GoogleAnalyticsDriver, GoogleAnalyticsSettings, NULL_DRIVER_NAME,
            NullDriver,
            google::{PRIVATE_KEY_DATA, SCHEMA_TAG, SERVICE_ACCOUNT_EMAIL, TRACKING_CODE, VIEW_ID},
        },
        memory::{InMemoryDriverConfigurationRepository, InMemoryReportingApi, StaticAuthorizer},
        storage::InMemoryFileStorage,
    },
    domain::{DriverName, DriverOptions, FileReference, SchemaTag},
    ports::FileStorage,
    services::{AnalyticsConfigService, DriverRegistry},
};
use rstest::fixture;

/// Service type used by the integration tests.
pub type TestService =
    AnalyticsConfigService<InMemoryDriverConfigurationRepository, StaticAuthorizer>;

/// Service-account email granted access in the reporting API.
pub const ACCOUNT_EMAIL: &str = "reporter@example.iam.gserviceaccount.com";

/// Reporting view used throughout the tests.
pub const VIEW: i64 = 123_456;

/// Tracking code used throughout the tests.
pub const TRACKING: &str = "UA-XXXXXX-Y";

/// Service wired to in-memory collaborators, with handles to inspect them.
pub struct Harness {
    /// Deterministic reporting API behind the Google driver.
    pub reporting: InMemoryReportingApi,
    /// Storage holding uploaded keys.
    pub files: Arc<dyn FileStorage>,
    /// Repository behind the service.
    pub repository: Arc<InMemoryDriverConfigurationRepository>,
    /// Service under test.
    pub service: TestService,
}

impl Harness {
    /// Builds a harness whose Google driver uses `files` and `settings`.
    #[must_use]
    pub fn with(files: Arc<dyn FileStorage>, settings: GoogleAnalyticsSettings) -> Self {
        let reporting = InMemoryReportingApi::new();
        let google = GoogleAnalyticsDriver::new(Arc::new(reporting.clone()), Arc::clone(&files))
            .with_settings(settings);

        let mut registry = DriverRegistry::new();
        registry
            .register_instance(driver_name(GOOGLE_DRIVER_NAME), Arc::new(google))
            .expect("google registration should succeed");
        registry
            .register_instance(driver_name(NULL_DRIVER_NAME), Arc::new(NullDriver::new()))
            .expect("null registration should succeed");
        let registry = Arc::new(registry);

        let repository = Arc::new(InMemoryDriverConfigurationRepository::new(Arc::clone(
            &registry,
        )));
        let service = AnalyticsConfigService::new(
            Arc::clone(&repository),
            Arc::new(StaticAuthorizer::allow_all()),
            registry,
        );
        Self {
            reporting,
            files,
            repository,
            service,
        }
    }

    /// Grants the test account access and uploads its key.
    #[must_use]
    pub fn credentials(&self) -> FileReference {
        self.reporting
            .grant(ACCOUNT_EMAIL, VIEW)
            .expect("grant should succeed");
        self.files
            .store("service-key.p12", b"-----PRIVATE KEY-----")
            .expect("key upload should succeed")
    }

    /// Returns the number of reports served so far.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.reporting.fetch_count().expect("count should read")
    }
}

/// Provides a harness with in-memory file storage and default settings.
#[fixture]
pub fn harness() -> Harness {
    Harness::with(
        Arc::new(InMemoryFileStorage::new()),
        GoogleAnalyticsSettings::default(),
    )
}

/// Parses a driver name.
#[must_use]
pub fn driver_name(value: &str) -> DriverName {
    DriverName::new(value).expect("valid driver name")
}

/// Builds tracking-only Google options.
#[must_use]
pub fn google_options(view_id: i64, tracking_code: &str) -> DriverOptions {
    DriverOptions::new(SchemaTag::new(SCHEMA_TAG))
        .with_value(VIEW_ID, view_id)
        .with_value(TRACKING_CODE, tracking_code)
}

/// Builds Google options carrying service-account credentials.
#[must_use]
pub fn credentialed_options(key: FileReference) -> DriverOptions {
    google_options(VIEW, TRACKING)
        .with_value(SERVICE_ACCOUNT_EMAIL, ACCOUNT_EMAIL)
        .with_value(PRIVATE_KEY_DATA, key)
}

/// Builds options for the null driver.
#[must_use]
pub fn null_options() -> DriverOptions {
    DriverOptions::new(SchemaTag::new("null_options"))
}
