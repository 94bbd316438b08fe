//! Create, edit, list, and remove flows through the configuration service.

use super::helpers::{
    Harness, TRACKING, VIEW, credentialed_options, google_options, harness, null_options,
};
use analytics_config::analytics::{
    adapters::{
        drivers::google::{MAP_COUNTRY, PRIVATE_KEY_DATA, TRACKING_CODE, VIEW_ID},
        record::ConfigurationRecord,
    },
    domain::{AnalyticsDomainError, ConfigurationId, OptionsSchemaError},
    ports::{ConfigurationRepositoryError, DriverConfigurationRepository, FileStorage},
    services::AnalyticsConfigServiceError,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configuration_lifecycle(harness: Harness) {
    let service = &harness.service;

    let created = service
        .create("google", google_options(VIEW, TRACKING))
        .await
        .expect("create should succeed");
    let id = created.id().expect("created configuration should have an id");
    assert_eq!(id, ConfigurationId::new(1));

    let listed = service.list().await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|row| row.label.as_str()), Some("Google Analytics"));

    let updated = service
        .update(id, "google", google_options(654_321, "G-ABC123"))
        .await
        .expect("update should succeed");
    assert_eq!(updated.options().integer(VIEW_ID), Some(654_321));
    assert_eq!(
        service
            .get(id)
            .await
            .expect("get should succeed")
            .options()
            .text(TRACKING_CODE),
        Some("G-ABC123")
    );

    service.remove(id).await.expect("remove should succeed");
    assert!(service.list().await.expect("list should succeed").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_rows_carry_the_schema_discriminator(harness: Harness) {
    harness
        .service
        .create("google", google_options(VIEW, TRACKING))
        .await
        .expect("create should succeed");

    let records = harness.repository.records().expect("records should read");

    let record = records.first().expect("one stored row");
    assert_eq!(record.driver, "google");
    assert_eq!(
        record.options.get("__class"),
        Some(&json!("google_analytics_options"))
    );
    assert_eq!(record.options.get("view_id"), Some(&json!(VIEW)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_key_reference_survives_persistence(harness: Harness) {
    let key = harness.credentials();

    let created = harness
        .service
        .create("google", credentialed_options(key.clone()))
        .await
        .expect("create should succeed");
    let loaded = harness
        .repository
        .get(created.id().expect("created configuration should have an id"))
        .await
        .expect("get should succeed");

    let stored_key = loaded.options().file(PRIVATE_KEY_DATA).expect("key reference");
    assert_eq!(stored_key, &key);
    assert!(stored_key.is_proxy());
    assert_eq!(stored_key.client_name(), "service-key.p12");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credentials_without_access_are_rejected(harness: Harness) {
    let key = harness
        .files
        .store("other-key.p12", b"-----OTHER KEY-----")
        .expect("key upload should succeed");

    let err = harness
        .service
        .create("google", credentialed_options(key))
        .await
        .expect_err("create should be rejected");

    assert!(matches!(
        err,
        AnalyticsConfigServiceError::ValidationFailure { .. }
    ));
    assert!(harness.repository.records().expect("records should read").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_a_null_configuration_into_google(harness: Harness) {
    let service = &harness.service;
    let created = service
        .create("null", null_options())
        .await
        .expect("create should succeed");
    let id = created.id().expect("created configuration should have an id");

    let mut draft = service.begin_edit(id).await.expect("edit should begin");
    service
        .select_driver(&mut draft, "google")
        .expect("google should be selectable");
    draft.form_mut().set_option(VIEW_ID, VIEW);
    draft.form_mut().set_option(TRACKING_CODE, TRACKING);
    service.submit(draft).await.expect("submit should succeed");

    let loaded = service.get(id).await.expect("get should succeed");
    assert_eq!(loaded.driver_name().as_str(), "google");
    assert_eq!(loaded.options().integer(VIEW_ID), Some(VIEW));
    assert_eq!(service.list().await.expect("list should succeed").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_twice_reports_not_found(harness: Harness) {
    let service = &harness.service;
    let id = service
        .create("null", null_options())
        .await
        .expect("create should succeed")
        .id()
        .expect("created configuration should have an id");
    service.remove(id).await.expect("first remove should succeed");

    let err = service.remove(id).await.expect_err("second remove should fail");

    assert!(matches!(
        err,
        AnalyticsConfigServiceError::Repository(ConfigurationRepositoryError::NotFound(missing))
            if missing == id
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_key_upload_is_rejected_before_persisting(harness: Harness) {
    let service = &harness.service;
    let mut draft = service.begin_create("google").expect("create should begin");
    draft.form_mut().set_option(VIEW_ID, VIEW);
    draft.form_mut().set_option(TRACKING_CODE, TRACKING);
    draft.form_mut().set_option(PRIVATE_KEY_DATA, "");

    let err = service.submit(draft).await.expect_err("submit should be rejected");

    assert!(matches!(
        err,
        AnalyticsConfigServiceError::Domain(AnalyticsDomainError::InvalidOptions(
            OptionsSchemaError::KindMismatch { ref field, expected: "file" }
        )) if field == PRIVATE_KEY_DATA
    ));
    assert!(harness.repository.records().expect("records should read").is_empty());
    assert!(service.list().await.expect("list should succeed").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_optional_text_reloads_after_submit(harness: Harness) {
    let service = &harness.service;
    let mut draft = service.begin_create("google").expect("create should begin");
    draft.form_mut().set_option(VIEW_ID, VIEW);
    draft.form_mut().set_option(TRACKING_CODE, TRACKING);
    draft.form_mut().set_option(MAP_COUNTRY, "");

    let created = service.submit(draft).await.expect("submit should succeed");
    let id = created.id().expect("created configuration should have an id");

    let loaded = service.get(id).await.expect("get should succeed");
    assert_eq!(loaded.options().text(MAP_COUNTRY), Some(""));
    assert_eq!(service.list().await.expect("list should succeed").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_identifiers_fail_without_overwriting(harness: Harness) {
    harness
        .repository
        .insert_record(ConfigurationRecord {
            id: i64::MAX,
            driver: "null".to_owned(),
            options: json!({ "__class": "null_options" }),
        })
        .expect("raw row should be written");

    let err = harness
        .service
        .create("null", null_options())
        .await
        .expect_err("create should fail");

    assert!(matches!(
        err,
        AnalyticsConfigServiceError::Repository(ConfigurationRepositoryError::Persistence(_))
    ));
    let records = harness.repository.records().expect("records should read");
    assert_eq!(records.len(), 1);
    assert_eq!(
        harness
            .service
            .get(ConfigurationId::new(i64::MAX))
            .await
            .expect("stored row should still load")
            .driver_name()
            .as_str(),
        "null"
    );
}
