//! Given steps for analytics configuration BDD scenarios.

use super::world::{AnalyticsWorld, run_async};
use analytics_config::analytics::{
    adapters::drivers::google::{
        PRIVATE_KEY_DATA, SCHEMA_TAG, SERVICE_ACCOUNT_EMAIL, TRACKING_CODE, VIEW_ID,
    },
    domain::{DataPoint, DriverOptions, SchemaTag},
    ports::{FileStorage, ReportDimension},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

const ACCOUNT_EMAIL: &str = "reporter@example.iam.gserviceaccount.com";
const REPORTING_VIEW: i64 = 42;

#[given(r#"a stored configuration using the "{driver}" driver"#)]
fn stored_configuration(world: &mut AnalyticsWorld, driver: String) -> Result<(), eyre::Report> {
    let options = world
        .service
        .registry()
        .load(&driver)
        .wrap_err("resolve driver for stored configuration")?
        .empty_options();
    let created = run_async(world.service.create(&driver, options))
        .wrap_err("store configuration for scenario")?;
    world.stored = Some(created);
    Ok(())
}

#[given(r#"a stored Google configuration with view id {view_id:i64} and tracking code "{code}""#)]
fn stored_google_configuration(
    world: &mut AnalyticsWorld,
    view_id: i64,
    code: String,
) -> Result<(), eyre::Report> {
    let options = DriverOptions::new(SchemaTag::new(SCHEMA_TAG))
        .with_value(VIEW_ID, view_id)
        .with_value(TRACKING_CODE, code);
    let created = run_async(world.service.create("google", options))
        .wrap_err("store google configuration for scenario")?;
    world.stored = Some(created);
    Ok(())
}

#[given("a stored Google configuration with reporting access")]
fn stored_reporting_configuration(world: &mut AnalyticsWorld) -> Result<(), eyre::Report> {
    world.reporting.grant(ACCOUNT_EMAIL, REPORTING_VIEW)?;
    world.reporting.set_report(
        REPORTING_VIEW,
        ReportDimension::Date,
        vec![DataPoint::new("2026-10-18", 11)],
    )?;
    let key = world
        .files
        .store("service-key.p12", b"-----PRIVATE KEY-----")?;
    let options = DriverOptions::new(SchemaTag::new(SCHEMA_TAG))
        .with_value(VIEW_ID, REPORTING_VIEW)
        .with_value(TRACKING_CODE, "UA-42-1")
        .with_value(SERVICE_ACCOUNT_EMAIL, ACCOUNT_EMAIL)
        .with_value(PRIVATE_KEY_DATA, key);
    let created = run_async(world.service.create("google", options))
        .wrap_err("store credentialed google configuration for scenario")?;
    world.stored = Some(created);
    Ok(())
}
