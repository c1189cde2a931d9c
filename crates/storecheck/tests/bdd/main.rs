//! Gherkin runner for the storefront features.
//!
//! `@api` scenarios always run, against `API_BASE_URL` when it is set and an
//! in-process stand-in of the demo API otherwise. `@ui` scenarios need a
//! browser and run only with `STORECHECK_UI=1`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod api_steps;
mod ui_steps;
mod world;

use cucumber::event::ScenarioFinished;
use cucumber::{gherkin, World as _};
use futures::FutureExt as _;
use storecheck::{BrowserSession, ScreenshotStore};

use world::StoreWorld;

const UI_ENV: &str = "STORECHECK_UI";

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t.trim_start_matches('@') == tag)
}

fn is_ui(feature: &gherkin::Feature, scenario: &gherkin::Scenario) -> bool {
    has_tag(&feature.tags, "ui") || has_tag(&scenario.tags, "ui")
}

#[tokio::main]
async fn main() {
    storecheck::logging::init("info");
    let ui_enabled = std::env::var(UI_ENV).is_ok_and(|v| v == "1");
    if !ui_enabled {
        tracing::info!("{UI_ENV} is not 1, skipping @ui scenarios");
    }

    StoreWorld::cucumber()
        .after(|_feature, _rule, scenario, finished, world| {
            async move {
                let Some(world) = world else { return };
                let Some(session) = world.session.take() else {
                    return;
                };
                world.store = None;
                if matches!(finished, ScenarioFinished::StepFailed(..)) {
                    match ScreenshotStore::default()
                        .capture(session.as_ref(), &scenario.name)
                        .await
                    {
                        Ok(path) => tracing::warn!(
                            scenario = %scenario.name,
                            path = %path.display(),
                            "scenario failed, screenshot saved"
                        ),
                        Err(e) => tracing::error!(
                            scenario = %scenario.name,
                            "could not save failure screenshot: {e}"
                        ),
                    }
                }
                if let Err(e) = session.quit().await {
                    tracing::warn!("browser session did not close cleanly: {e}");
                }
            }
            .boxed_local()
        })
        .filter_run_and_exit(
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/features"),
            move |feature, _rule, scenario| ui_enabled || !is_ui(feature, scenario),
        )
        .await;
}
