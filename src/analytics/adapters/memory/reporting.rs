//! In-memory reporting API adapter for deterministic driver tests.

use crate::analytics::{
    domain::DataPoint,
    ports::{
        ReportDimension, ReportQuery, ReportingApi, ReportingApiError, ReportingApiResult,
        ServiceAccountCredentials,
    },
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// In-memory reporting API.
///
/// Access is granted per `(account email, view)` pair. Reports are canned
/// rows per `(view, dimension)`, and every served report is counted so
/// tests can tell cache hits from upstream fetches.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportingApi {
    state: Arc<RwLock<InMemoryReportingState>>,
}

#[derive(Debug, Default)]
struct InMemoryReportingState {
    grants: HashSet<(String, i64)>,
    reports: HashMap<(i64, ReportDimension), Vec<DataPoint>>,
    failing_views: HashSet<i64>,
    fetch_count: usize,
}

impl InMemoryReportingApi {
    /// Creates an API with no grants and no reports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `email` read access to `view_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError::Transport`] when lock acquisition fails.
    pub fn grant(&self, email: impl Into<String>, view_id: i64) -> ReportingApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.grants.insert((email.into(), view_id));
        Ok(())
    }

    /// Sets the rows served for a view and dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError::Transport`] when lock acquisition fails.
    pub fn set_report(
        &self,
        view_id: i64,
        dimension: ReportDimension,
        rows: Vec<DataPoint>,
    ) -> ReportingApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.reports.insert((view_id, dimension), rows);
        Ok(())
    }

    /// Makes every report request for `view_id` fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError::Transport`] when lock acquisition fails.
    pub fn fail_reports_for(&self, view_id: i64) -> ReportingApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_views.insert(view_id);
        Ok(())
    }

    /// Returns how many reports have been served.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingApiError::Transport`] when lock acquisition fails.
    pub fn fetch_count(&self) -> ReportingApiResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.fetch_count)
    }

    fn check_access(
        state: &InMemoryReportingState,
        credentials: &ServiceAccountCredentials,
        view_id: i64,
    ) -> ReportingApiResult<()> {
        if credentials.private_key().is_empty() {
            return Err(ReportingApiError::Unauthorized(
                credentials.email().to_owned(),
            ));
        }
        if !state
            .grants
            .contains(&(credentials.email().to_owned(), view_id))
        {
            return Err(ReportingApiError::ViewNotAccessible(view_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportingApi for InMemoryReportingApi {
    async fn verify_access(
        &self,
        credentials: &ServiceAccountCredentials,
        view_id: i64,
    ) -> ReportingApiResult<()> {
        let state = self.state.read().map_err(lock_error)?;
        Self::check_access(&state, credentials, view_id)
    }

    async fn fetch_report(
        &self,
        credentials: &ServiceAccountCredentials,
        query: &ReportQuery,
    ) -> ReportingApiResult<Vec<DataPoint>> {
        let mut state = self.state.write().map_err(lock_error)?;
        Self::check_access(&state, credentials, query.view_id)?;
        if state.failing_views.contains(&query.view_id) {
            return Err(ReportingApiError::transport(std::io::Error::other(
                "reporting backend unavailable",
            )));
        }
        state.fetch_count += 1;
        Ok(state
            .reports
            .get(&(query.view_id, query.dimension))
            .cloned()
            .unwrap_or_default())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> ReportingApiError {
    ReportingApiError::transport(std::io::Error::other(err.to_string()))
}
