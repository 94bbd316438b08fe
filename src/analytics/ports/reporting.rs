//! Upstream reporting API port used by provider-backed drivers.

use crate::analytics::domain::DataPoint;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reporting API calls.
pub type ReportingApiResult<T> = Result<T, ReportingApiError>;

/// Service-account credentials presented to the reporting API.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountCredentials {
    email: String,
    private_key: Vec<u8>,
}

impl ServiceAccountCredentials {
    /// Creates credentials from an account email and raw key bytes.
    #[must_use]
    pub fn new(email: impl Into<String>, private_key: Vec<u8>) -> Self {
        Self {
            email: email.into(),
            private_key,
        }
    }

    /// Returns the service-account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the raw private key.
    #[must_use]
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("email", &self.email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Dimension a report is broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportDimension {
    /// One row per day.
    Date,
    /// One row per country.
    Country,
    /// One row per continent.
    Continent,
    /// One row per sub-continent region.
    SubContinent,
    /// One row per region within `map_country`.
    Region,
}

impl ReportDimension {
    /// Returns the canonical dimension name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Country => "country",
            Self::Continent => "continent",
            Self::SubContinent => "sub_continent",
            Self::Region => "region",
        }
    }
}

/// Sessions report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Reporting view (property profile) identifier.
    pub view_id: i64,
    /// Row breakdown.
    pub dimension: ReportDimension,
    /// Optional country filter for regional breakdowns.
    pub country: Option<String>,
    /// First day included.
    pub start_date: NaiveDate,
    /// Last day included.
    pub end_date: NaiveDate,
}

/// Remote analytics reporting API.
#[async_trait]
pub trait ReportingApi: Send + Sync {
    /// Checks that `credentials` may read reports for `view_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError`] when authentication or authorization
    /// fails or the API is unreachable.
    async fn verify_access(
        &self,
        credentials: &ServiceAccountCredentials,
        view_id: i64,
    ) -> ReportingApiResult<()>;

    /// Runs a sessions report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError`] when the request fails.
    async fn fetch_report(
        &self,
        credentials: &ServiceAccountCredentials,
        query: &ReportQuery,
    ) -> ReportingApiResult<Vec<DataPoint>>;
}

/// Errors returned by reporting API adapters.
#[derive(Debug, Clone, Error)]
pub enum ReportingApiError {
    /// Credentials were rejected.
    #[error("reporting API rejected credentials for {0}")]
    Unauthorized(String),

    /// The view does not exist or is not visible to the account.
    #[error("reporting view {0} is not accessible")]
    ViewNotAccessible(i64),

    /// Transport or server failure.
    #[error("reporting API request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReportingApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
