//! Service-account keys kept in a directory-confined file store.

use std::sync::Arc;

use super::helpers::{ACCOUNT_EMAIL, Harness, VIEW, credentialed_options};
use analytics_config::analytics::{
    adapters::{drivers::GoogleAnalyticsSettings, storage::CapStdFileStorage},
    ports::FileStorage,
};
use camino::Utf8Path;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn key_stored_on_disk_validates_credentials() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = Utf8Path::from_path(temp.path()).expect("temp dir should be UTF-8");
    let storage = CapStdFileStorage::open(root).expect("storage should open");
    let harness = Harness::with(Arc::new(storage), GoogleAnalyticsSettings::default());

    let key = harness.credentials();
    let created = harness
        .service
        .create("google", credentialed_options(key.clone()))
        .await
        .expect("create should succeed");

    assert!(root.join(key.path()).is_file());
    assert_eq!(
        harness.files.read(&key).expect("key should read"),
        b"-----PRIVATE KEY-----".to_vec()
    );
    assert_eq!(
        created.options().text("service_account_email"),
        Some(ACCOUNT_EMAIL)
    );
    assert!(created.id().is_some());
    assert_eq!(created.options().integer("view_id"), Some(VIEW));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_key_file_rejects_the_submission() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = Utf8Path::from_path(temp.path()).expect("temp dir should be UTF-8");
    let harness = Harness::with(
        Arc::new(CapStdFileStorage::open(root).expect("storage should open")),
        GoogleAnalyticsSettings::default(),
    );
    let key = harness.credentials();
    std::fs::remove_file(root.join(key.path())).expect("key should be removed");

    let result = harness
        .service
        .create("google", credentialed_options(key))
        .await;

    assert!(result.is_err());
    assert!(harness.repository.records().expect("records should read").is_empty());
}
