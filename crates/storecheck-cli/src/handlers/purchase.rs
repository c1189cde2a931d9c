//! Purchase command handler

use std::sync::Arc;

use storecheck::{
    BrowserSession, ScreenshotStore, SessionPlan, ShippingDetails, Storefront, SuiteConfig,
};

use crate::{CliError, CliResult, PurchaseArgs};

/// Execute the purchase command
///
/// On failure a screenshot is saved before the session is closed.
pub async fn execute_purchase(config: &SuiteConfig, args: &PurchaseArgs) -> CliResult<()> {
    let plan = SessionPlan::from_env(config)?;
    let session = Arc::new(plan.connect(config).await?);
    let store = Storefront::new(Arc::clone(&session), config);

    let outcome = store
        .purchase(
            (args.username.as_str(), args.password.as_str()),
            &args.product,
            &ShippingDetails::default(),
        )
        .await;

    if outcome.is_err() {
        match ScreenshotStore::new(&args.screenshots)
            .capture(session.as_ref(), "purchase")
            .await
        {
            Ok(path) => eprintln!("Screenshot saved to {}", path.display()),
            Err(e) => tracing::warn!("could not save failure screenshot: {e}"),
        }
    }
    if let Err(e) = session.quit().await {
        tracing::warn!("browser session did not close cleanly: {e}");
    }

    let message = outcome?;
    if message != storecheck::pages::ORDER_PLACED_MESSAGE {
        return Err(CliError::check_failed(format!(
            "unexpected confirmation message '{message}'"
        )));
    }
    println!("{}: {message}", args.product);
    Ok(())
}
