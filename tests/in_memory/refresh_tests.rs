//! Dashboard loads, manual refresh, and report caching.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{
    Harness, TRACKING, VIEW, credentialed_options, driver_name, google_options, harness,
    null_options,
};
use analytics_config::analytics::{
    adapters::{
        drivers::GoogleAnalyticsSettings, memory::CollectingWidgetRegistrar,
        storage::InMemoryFileStorage,
    },
    domain::{DataPoint, WidgetKind},
    ports::ReportDimension,
};
use rstest::rstest;

fn seed_reports(harness: &Harness) {
    harness
        .reporting
        .set_report(
            VIEW,
            ReportDimension::Date,
            vec![
                DataPoint::new("2026-10-16", 3),
                DataPoint::new("2026-10-17", 5),
            ],
        )
        .expect("report should be stored");
    harness
        .reporting
        .set_report(
            VIEW,
            ReportDimension::Country,
            vec![DataPoint::new("France", 8)],
        )
        .expect("report should be stored");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_refetches_while_dashboard_reads_stay_cached(harness: Harness) {
    seed_reports(&harness);
    let key = harness.credentials();
    harness
        .service
        .create("google", credentialed_options(key))
        .await
        .expect("create should succeed");

    let registrar = CollectingWidgetRegistrar::new();
    let registered = harness
        .service
        .register_widgets(&registrar)
        .await
        .expect("dashboard should load");
    assert_eq!(registered, 2);
    assert_eq!(harness.fetches(), 2);

    let report = harness
        .service
        .refresh_analytics_data(&CollectingWidgetRegistrar::new())
        .await
        .expect("refresh should run");
    assert!(report.is_complete());
    assert_eq!(report.refreshed().len(), 1);
    assert_eq!(harness.fetches(), 4);

    harness
        .service
        .register_widgets(&CollectingWidgetRegistrar::new())
        .await
        .expect("dashboard should load");
    assert_eq!(harness.fetches(), 4);

    let widgets = registrar.widgets();
    let kinds: Vec<WidgetKind> = widgets.iter().map(|widget| widget.kind()).collect();
    assert_eq!(kinds, vec![WidgetKind::LineChart, WidgetKind::GeoChart]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_reports_are_fetched_again() {
    let harness = Harness::with(
        Arc::new(InMemoryFileStorage::new()),
        GoogleAnalyticsSettings::default().with_cache_ttl(Duration::ZERO),
    );
    seed_reports(&harness);
    let key = harness.credentials();
    harness
        .service
        .create("google", credentialed_options(key))
        .await
        .expect("create should succeed");

    for _ in 0..2 {
        harness
            .service
            .register_widgets(&CollectingWidgetRegistrar::new())
            .await
            .expect("dashboard should load");
    }

    assert_eq!(harness.fetches(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_provider_does_not_stop_other_configurations(harness: Harness) {
    let key = harness.credentials();
    harness
        .service
        .create("google", credentialed_options(key))
        .await
        .expect("create should succeed");
    harness
        .service
        .create("google", google_options(VIEW, TRACKING))
        .await
        .expect("create should succeed");
    harness
        .service
        .create("null", null_options())
        .await
        .expect("create should succeed");
    harness
        .reporting
        .fail_reports_for(VIEW)
        .expect("failure should be configured");

    let report = harness
        .service
        .refresh_analytics_data(&CollectingWidgetRegistrar::new())
        .await
        .expect("refresh should run");

    assert_eq!(report.refreshed().len(), 2);
    assert_eq!(report.failures().len(), 1);
    let failure = report.failures().first().expect("one failure");
    assert_eq!(failure.driver_name, Some(driver_name("google")));
    assert!(failure.reason.contains("analytics provider error"));
}
