//! Signin command handler

use storecheck::{ApiResponse, StoreClient, SuiteConfig};

use super::with_api_override;
use crate::{CliResult, SigninArgs};

/// Execute the signin command
///
/// A rejected sign-in is reported, not treated as an error.
pub async fn execute_signin(config: SuiteConfig, args: &SigninArgs) -> CliResult<()> {
    let config = with_api_override(config, args.api_base_url.as_deref());
    let client = StoreClient::from_config(&config)?;
    let response = client.sign_in(&args.username, &args.password).await?;
    println!("{}", render_signin(&response));
    Ok(())
}

/// Status line, outcome and raw body
#[must_use]
pub fn render_signin(response: &ApiResponse) -> String {
    let outcome = if response.is_success() {
        "signed in".to_string()
    } else {
        response
            .error_message()
            .map_or_else(|| "rejected".to_string(), |m| format!("rejected: {m}"))
    };
    format!("status: {} ({outcome})\n{}", response.status, response.body)
}
