//! Catalog command handler

use std::fmt::Write as _;

use storecheck::{Product, StoreClient, SuiteConfig};

use super::with_api_override;
use crate::{CatalogArgs, CliError, CliResult};

/// Execute the catalog command
pub async fn execute_catalog(config: SuiteConfig, args: &CatalogArgs) -> CliResult<()> {
    let config = with_api_override(config, args.api_base_url.as_deref());
    let client = StoreClient::from_config(&config)?;
    let response = client.list_products().await?;
    if !response.is_success() {
        return Err(CliError::check_failed(format!(
            "catalog request returned HTTP {}",
            response.status
        )));
    }
    let products = response.products()?;
    print!("{}", render_catalog(&products));

    if args.strict {
        let incomplete = products
            .iter()
            .filter(|p| !p.missing_fields().is_empty())
            .count();
        if products.is_empty() || incomplete > 0 {
            return Err(CliError::check_failed(format!(
                "{incomplete} of {} products are missing required fields",
                products.len()
            )));
        }
    }
    Ok(())
}

/// Product count followed by one line per product
#[must_use]
pub fn render_catalog(products: &[Product]) -> String {
    let mut out = format!("{} products\n", products.len());
    for product in products {
        let title = product.title.as_deref().unwrap_or("<untitled>");
        let price = product
            .price
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let currency = product.currency_format.as_deref().unwrap_or("");
        let _ = write!(out, "  {title} ({currency}{price})");
        let missing = product.missing_fields();
        if !missing.is_empty() {
            let _ = write!(out, " missing: {}", missing.join(", "));
        }
        out.push('\n');
    }
    out
}
