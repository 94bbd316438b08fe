//! Then steps for analytics configuration BDD scenarios.

use super::world::{AnalyticsWorld, run_async};
use analytics_config::analytics::{
    adapters::drivers::google::VIEW_ID,
    services::{AnalyticsConfigServiceError, DriverRegistryError},
};
use rstest_bdd_macros::then;

#[then(r#"the options form holds the "{driver}" defaults"#)]
fn form_holds_defaults(world: &AnalyticsWorld, driver: String) -> Result<(), eyre::Report> {
    let draft = world
        .draft
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no draft in scenario world"))?;
    let defaults = world
        .service
        .registry()
        .load(&driver)
        .map_err(|err| eyre::eyre!("driver lookup failed: {err}"))?
        .empty_options();
    if draft.form().options() != &defaults {
        return Err(eyre::eyre!(
            "expected {driver} defaults, found {:?}",
            draft.form().options()
        ));
    }
    Ok(())
}

#[then("the options form holds the stored options")]
fn form_holds_stored_options(world: &AnalyticsWorld) -> Result<(), eyre::Report> {
    let draft = world
        .draft
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no draft in scenario world"))?;
    let stored = world
        .stored
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no stored configuration in scenario world"))?;
    if draft.form().options() != stored.options() {
        return Err(eyre::eyre!(
            "expected stored options {:?}, found {:?}",
            stored.options(),
            draft.form().options()
        ));
    }
    Ok(())
}

#[then(r#"the stored configuration uses the "{driver}" driver with view id {view_id:i64}"#)]
fn stored_configuration_uses(
    world: &AnalyticsWorld,
    driver: String,
    view_id: i64,
) -> Result<(), eyre::Report> {
    let id = world
        .stored
        .as_ref()
        .and_then(|stored| stored.id())
        .ok_or_else(|| eyre::eyre!("no stored configuration in scenario world"))?;
    let loaded = run_async(world.service.get(id))
        .map_err(|err| eyre::eyre!("get failed: {err}"))?;
    if loaded.driver_name().as_str() != driver {
        return Err(eyre::eyre!(
            "expected driver '{driver}', found '{}'",
            loaded.driver_name()
        ));
    }
    if loaded.options().integer(VIEW_ID) != Some(view_id) {
        return Err(eyre::eyre!(
            "expected view id {view_id}, found {:?}",
            loaded.options().integer(VIEW_ID)
        ));
    }
    Ok(())
}

#[then(r#"the selection fails because "{driver}" is not available"#)]
fn selection_fails(world: &AnalyticsWorld, driver: String) -> Result<(), eyre::Report> {
    let err = world
        .last_selection_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the selection to fail"))?;
    if !matches!(
        err,
        AnalyticsConfigServiceError::Registry(DriverRegistryError::UnknownDriver(name))
            if *name == driver
    ) {
        return Err(eyre::eyre!("expected unknown driver error, got {err:?}"));
    }
    Ok(())
}

#[then("the reporting API has served {count:usize} reports")]
fn reports_served(world: &AnalyticsWorld, count: usize) -> Result<(), eyre::Report> {
    let served = world.reporting.fetch_count()?;
    if served != count {
        return Err(eyre::eyre!("expected {count} reports, found {served}"));
    }
    Ok(())
}

#[then("the refresh completes without failures")]
fn refresh_complete(world: &AnalyticsWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_refresh
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no refresh report in scenario world"))?;
    if !report.is_complete() {
        return Err(eyre::eyre!(
            "expected a complete refresh, got failures {:?}",
            report.failures()
        ));
    }
    Ok(())
}
