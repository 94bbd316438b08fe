//! When steps for analytics configuration BDD scenarios.

use super::world::{AnalyticsWorld, run_async};
use analytics_config::analytics::{
    adapters::{
        drivers::google::{TRACKING_CODE, VIEW_ID},
        memory::CollectingWidgetRegistrar,
    },
    services::ConfigurationDraft,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn draft_mut(world: &mut AnalyticsWorld) -> Result<&mut ConfigurationDraft, eyre::Report> {
    if world.draft.is_none() {
        let id = world
            .stored
            .as_ref()
            .and_then(|stored| stored.id())
            .ok_or_else(|| eyre::eyre!("no stored configuration in scenario world"))?;
        let draft = run_async(world.service.begin_edit(id)).wrap_err("begin edit")?;
        world.draft = Some(draft);
    }
    world
        .draft
        .as_mut()
        .ok_or_else(|| eyre::eyre!("no draft in scenario world"))
}

#[when(r#"the administrator selects the "{driver}" driver"#)]
fn select_driver(world: &mut AnalyticsWorld, driver: String) -> Result<(), eyre::Report> {
    draft_mut(world)?;
    let AnalyticsWorld {
        service,
        draft,
        last_selection_error,
        ..
    } = world;
    let draft = draft
        .as_mut()
        .ok_or_else(|| eyre::eyre!("no draft in scenario world"))?;
    if let Err(err) = service.select_driver(draft, &driver) {
        *last_selection_error = Some(err);
    }
    Ok(())
}

#[when(r#"the administrator enters view id {view_id:i64} and tracking code "{code}""#)]
fn enter_google_options(
    world: &mut AnalyticsWorld,
    view_id: i64,
    code: String,
) -> Result<(), eyre::Report> {
    let form = draft_mut(world)?.form_mut();
    form.set_option(VIEW_ID, view_id);
    form.set_option(TRACKING_CODE, code);
    Ok(())
}

#[when("the configuration is submitted")]
fn submit_configuration(world: &mut AnalyticsWorld) -> Result<(), eyre::Report> {
    let draft = world
        .draft
        .take()
        .ok_or_else(|| eyre::eyre!("no draft in scenario world"))?;
    let saved = run_async(world.service.submit(draft)).wrap_err("submit configuration")?;
    world.stored = Some(saved);
    Ok(())
}

#[when("the dashboard is loaded {count:usize} times")]
fn load_dashboard(world: &mut AnalyticsWorld, count: usize) -> Result<(), eyre::Report> {
    for _ in 0..count {
        run_async(world.service.register_widgets(&CollectingWidgetRegistrar::new()))
            .wrap_err("load dashboard widgets")?;
    }
    Ok(())
}

#[when("analytics data is refreshed")]
fn refresh_analytics(world: &mut AnalyticsWorld) -> Result<(), eyre::Report> {
    let report = run_async(
        world
            .service
            .refresh_analytics_data(&CollectingWidgetRegistrar::new()),
    )
    .wrap_err("refresh analytics data")?;
    world.last_refresh = Some(report);
    Ok(())
}
