//! Google Analytics driver.
//!
//! Reads session reports through a [`ReportingApi`] using service-account
//! credentials whose private key is held by the file-storage
//! collaborator. Without credentials the driver runs in tracking-only
//! mode: the embed snippet is available but no reports are fetched.

use super::CacheSlot;
use crate::analytics::{
    adapters::cache::InMemoryAnalyticsCache,
    domain::{
        AnalyticsDataSet, AnalyticsWidget, DataPoint, DriverOptions, OptionField, OptionKind,
        OptionsSchema, SchemaTag, WidgetKind,
    },
    ports::{
        AnalyticsDriver, CacheHandle, DriverError, DriverResult, FileStorage, ReportDimension,
        ReportQuery, ReportingApi, ServiceAccountCredentials,
    },
};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use mockable::{Clock, DefaultClock};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Registry key conventionally used for [`GoogleAnalyticsDriver`].
pub const GOOGLE_DRIVER_NAME: &str = "google";

/// Schema discriminator written with Google Analytics options.
pub const SCHEMA_TAG: &str = "google_analytics_options";

/// Option field: service-account email.
pub const SERVICE_ACCOUNT_EMAIL: &str = "service_account_email";
/// Option field: uploaded service-account private key.
pub const PRIVATE_KEY_DATA: &str = "private_key_data";
/// Option field: reporting view identifier.
pub const VIEW_ID: &str = "view_id";
/// Option field: breakdown used by the location chart.
pub const LOCATION_CHART_MODE: &str = "location_chart_mode";
/// Option field: country shown by regional location charts.
pub const MAP_COUNTRY: &str = "map_country";
/// Option field: property tracking code for the embed snippet.
pub const TRACKING_CODE: &str = "tracking_code";

const CHART_MODE_COUNTRY: &str = "country";
const CHART_MODE_CONTINENT: &str = "continent";
const CHART_MODE_SUB_CONTINENT: &str = "sub_continent";
const CHART_MODE_REGION: &str = "region";

const INSTALLATION_INSTRUCTIONS: &str = "<ol>\
<li>Create a service account in the Google API console and download its P12 key.</li>\
<li>Enable the Analytics Reporting API for the project.</li>\
<li>Add the service-account email as a user of your Analytics view with read access.</li>\
<li>Enter the view ID and the property tracking code (e.g. <code>UA-XXXXXX-Y</code>).</li>\
</ol>";

const EMBED_TEMPLATE: &str = r"<script async src='https://www.googletagmanager.com/gtag/js?id={{ tracking_code }}'></script>
<script>
  window.dataLayer = window.dataLayer || [];
  function gtag(){dataLayer.push(arguments);}
  gtag('js', new Date());
  gtag('config', '{{ tracking_code }}');
</script>";

/// Tunables for [`GoogleAnalyticsDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleAnalyticsSettings {
    /// How long fetched reports stay cached.
    pub cache_ttl: Duration,
    /// Number of days, ending today, covered by reports.
    pub report_days: u32,
}

impl Default for GoogleAnalyticsSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60 * 60),
            report_days: 30,
        }
    }
}

impl GoogleAnalyticsSettings {
    /// Sets the report cache lifetime.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the reporting window length in days.
    #[must_use]
    pub const fn with_report_days(mut self, days: u32) -> Self {
        self.report_days = days;
        self
    }
}

/// Google Analytics driver backed by a reporting API.
pub struct GoogleAnalyticsDriver<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    api: Arc<dyn ReportingApi>,
    files: Arc<dyn FileStorage>,
    clock: Arc<C>,
    settings: GoogleAnalyticsSettings,
    cache: CacheSlot,
}

impl GoogleAnalyticsDriver<DefaultClock> {
    /// Creates the driver on the system clock with a private in-memory
    /// cache.
    #[must_use]
    pub fn new(api: Arc<dyn ReportingApi>, files: Arc<dyn FileStorage>) -> Self {
        Self::with_clock(api, files, Arc::new(DefaultClock))
    }
}

impl<C> GoogleAnalyticsDriver<C>
where
    C: Clock + Send + Sync,
{
    /// Creates the driver on the given clock with a private in-memory cache.
    #[must_use]
    pub fn with_clock(
        api: Arc<dyn ReportingApi>,
        files: Arc<dyn FileStorage>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            api,
            files,
            clock,
            settings: GoogleAnalyticsSettings::default(),
            cache: CacheSlot::new(Arc::new(InMemoryAnalyticsCache::new())),
        }
    }

    /// Replaces the tunables.
    #[must_use]
    pub fn with_settings(mut self, settings: GoogleAnalyticsSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Installs `cache` as the initial cache.
    #[must_use]
    pub fn with_cache(self, cache: CacheHandle) -> Self {
        self.cache.replace(cache);
        self
    }

    fn credentials(
        &self,
        options: &DriverOptions,
    ) -> DriverResult<Option<ServiceAccountCredentials>> {
        let email = options
            .text(SERVICE_ACCOUNT_EMAIL)
            .filter(|value| !value.trim().is_empty());
        let key_file = options.file(PRIVATE_KEY_DATA);

        match (email, key_file) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(DriverError::MissingOption(PRIVATE_KEY_DATA.to_owned())),
            (None, Some(_)) => Err(DriverError::MissingOption(SERVICE_ACCOUNT_EMAIL.to_owned())),
            (Some(address), Some(file)) => {
                let key = self.files.read(file).map_err(DriverError::upstream)?;
                Ok(Some(ServiceAccountCredentials::new(address, key)))
            }
        }
    }

    fn report_window(&self) -> (NaiveDate, NaiveDate) {
        let end = self.clock.utc().date_naive();
        let span = u64::from(self.settings.report_days.saturating_sub(1));
        let start = end.checked_sub_days(Days::new(span)).unwrap_or(end);
        (start, end)
    }

    async fn cached_report(
        &self,
        credentials: &ServiceAccountCredentials,
        query: &ReportQuery,
    ) -> DriverResult<Vec<DataPoint>> {
        let key = cache_key(query);
        let cache = self.cache.get();

        match cache.get(&key) {
            Ok(Some(document)) => match serde_json::from_value::<Vec<DataPoint>>(document) {
                Ok(points) => return Ok(points),
                Err(err) => warn!(cache_key = %key, error = %err, "discarding undecodable report cache entry"),
            },
            Ok(None) => debug!(cache_key = %key, dimension = query.dimension.as_str(), "report cache miss"),
            Err(err) => warn!(cache_key = %key, error = %err, "report cache read failed"),
        }

        let points = self
            .api
            .fetch_report(credentials, query)
            .await
            .map_err(DriverError::upstream)?;

        match serde_json::to_value(&points) {
            Ok(document) => {
                if let Err(err) = cache.set(&key, document, Some(self.settings.cache_ttl)) {
                    warn!(cache_key = %key, error = %err, "report cache write failed");
                }
            }
            Err(err) => warn!(cache_key = %key, error = %err, "report could not be encoded for caching"),
        }
        Ok(points)
    }
}

#[async_trait]
impl<C> AnalyticsDriver for GoogleAnalyticsDriver<C>
where
    C: Clock + Send + Sync,
{
    fn label(&self) -> String {
        "Google Analytics".to_owned()
    }

    fn installation_instructions(&self) -> String {
        INSTALLATION_INSTRUCTIONS.to_owned()
    }

    fn options_schema(&self) -> OptionsSchema {
        OptionsSchema::new(SchemaTag::new(SCHEMA_TAG))
            .with_field(OptionField::new(
                SERVICE_ACCOUNT_EMAIL,
                "Service Account Email",
                OptionKind::Email,
            ))
            .with_field(OptionField::new(
                PRIVATE_KEY_DATA,
                "Private Key (P12)",
                OptionKind::File,
            ))
            .with_field(OptionField::new(VIEW_ID, "View ID", OptionKind::Integer).required())
            .with_field(
                OptionField::new(
                    LOCATION_CHART_MODE,
                    "Location Chart Mode",
                    OptionKind::Choice(vec![
                        CHART_MODE_COUNTRY.to_owned(),
                        CHART_MODE_CONTINENT.to_owned(),
                        CHART_MODE_SUB_CONTINENT.to_owned(),
                        CHART_MODE_REGION.to_owned(),
                    ]),
                )
                .with_default(CHART_MODE_COUNTRY),
            )
            .with_field(OptionField::new(MAP_COUNTRY, "Map Country", OptionKind::Text))
            .with_field(
                OptionField::new(TRACKING_CODE, "Tracking Code", OptionKind::Text).required(),
            )
    }

    async fn validate(&self, options: &DriverOptions) -> bool {
        if let Err(err) = self.options_schema().check(options) {
            debug!(error = %err, "google analytics options failed schema check");
            return false;
        }
        if tracking_code(options).is_err() {
            return false;
        }
        let Some(view_id) = options.integer(VIEW_ID) else {
            return false;
        };

        match self.credentials(options) {
            Ok(None) => true,
            Ok(Some(credentials)) => match self.api.verify_access(&credentials, view_id).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(view_id, error = %err, "google analytics rejected credentials");
                    false
                }
            },
            Err(err) => {
                warn!(view_id, error = %err, "google analytics credentials unavailable");
                false
            }
        }
    }

    fn cache(&self) -> CacheHandle {
        self.cache.get()
    }

    fn set_cache(&self, cache: CacheHandle) {
        self.cache.replace(cache);
    }

    fn cache_swap_lock(&self) -> &tokio::sync::Mutex<()> {
        self.cache.swap_lock()
    }

    async fn analytics_data(&self, options: &DriverOptions) -> DriverResult<AnalyticsDataSet> {
        let view_id = options
            .integer(VIEW_ID)
            .ok_or_else(|| DriverError::MissingOption(VIEW_ID.to_owned()))?;
        let Some(credentials) = self.credentials(options)? else {
            return Ok(AnalyticsDataSet::empty());
        };

        let (start_date, end_date) = self.report_window();
        let location_dimension = location_dimension(options);
        let country = match location_dimension {
            ReportDimension::Region => Some(
                options
                    .text(MAP_COUNTRY)
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| DriverError::MissingOption(MAP_COUNTRY.to_owned()))?
                    .to_owned(),
            ),
            _ => None,
        };

        let sessions_query = ReportQuery {
            view_id,
            dimension: ReportDimension::Date,
            country: None,
            start_date,
            end_date,
        };
        let location_query = ReportQuery {
            view_id,
            dimension: location_dimension,
            country,
            start_date,
            end_date,
        };

        let sessions = self.cached_report(&credentials, &sessions_query).await?;
        let locations = self.cached_report(&credentials, &location_query).await?;

        Ok(AnalyticsDataSet::new(vec![
            AnalyticsWidget::new(
                "sessions_over_time",
                "Sessions",
                WidgetKind::LineChart,
                sessions,
            ),
            AnalyticsWidget::new(
                "visitors_by_location",
                format!("Visitors by {}", location_dimension.as_str().replace('_', "-")),
                WidgetKind::GeoChart,
                locations,
            ),
        ]))
    }

    fn embed_code(&self, options: &DriverOptions) -> DriverResult<String> {
        let code = tracking_code(options)?;
        minijinja::Environment::new()
            .render_str(
                EMBED_TEMPLATE,
                minijinja::context! { tracking_code => code },
            )
            .map_err(|err| DriverError::Template(err.to_string()))
    }
}

fn tracking_code(options: &DriverOptions) -> DriverResult<&str> {
    options
        .text(TRACKING_CODE)
        .map(str::trim)
        .filter(|code| {
            !code.is_empty()
                && code
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .ok_or_else(|| DriverError::MissingOption(TRACKING_CODE.to_owned()))
}

fn location_dimension(options: &DriverOptions) -> ReportDimension {
    match options.text(LOCATION_CHART_MODE) {
        Some(CHART_MODE_CONTINENT) => ReportDimension::Continent,
        Some(CHART_MODE_SUB_CONTINENT) => ReportDimension::SubContinent,
        Some(CHART_MODE_REGION) => ReportDimension::Region,
        _ => ReportDimension::Country,
    }
}

fn cache_key(query: &ReportQuery) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.view_id.to_string());
    hasher.update(b":");
    hasher.update(query.dimension.as_str());
    hasher.update(b":");
    hasher.update(query.country.as_deref().unwrap_or_default());
    hasher.update(b":");
    hasher.update(query.start_date.to_string());
    hasher.update(b":");
    hasher.update(query.end_date.to_string());
    format!("google_analytics.{:x}", hasher.finalize())
}
