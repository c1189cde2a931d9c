//! Page objects for the demo storefront.
//!
//! Each page owns an [`InteractionController`] logging under the page's name
//! and exposes business operations only. Locators are associated constants or
//! small builder functions on the page.

mod cart;
mod checkout;
mod confirmation;
mod login;
mod product;

use std::sync::Arc;

pub use cart::CartPage;
pub use checkout::{summary_price, CheckoutPage};
pub use confirmation::{ConfirmationPage, ORDER_PLACED_MESSAGE};
pub use login::LoginPage;
pub use product::ProductPage;

use crate::config::SuiteConfig;
use crate::controller::InteractionController;
use crate::logging::ComponentLogger;
use crate::result::{StoreError, StoreResult};
use crate::session::BrowserSession;

/// A page or component of the storefront
pub trait PageObject {
    type Session: BrowserSession;

    /// Name used as the page's log component
    const NAME: &'static str;

    fn controller(&self) -> &InteractionController<Self::Session>;

    fn logger(&self) -> &ComponentLogger {
        self.controller().logger()
    }
}

/// Controller logging as `name`, sharing `base`'s session and policies
pub(crate) fn page_controller<S: BrowserSession>(
    base: &InteractionController<S>,
    name: &str,
) -> InteractionController<S> {
    base.for_component(ComponentLogger::new(name))
}

/// Parse a displayed price such as `"$ 799.00"`, `"$799"` or `"1,099.00"`
pub fn parse_price(text: &str) -> StoreResult<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| StoreError::assertion(format!("cannot parse price from '{text}'")))
}

/// Whether two money amounts are equal to the cent
#[must_use]
pub fn same_amount(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}

/// Every page of the storefront over one session
#[derive(Debug)]
pub struct Storefront<S: BrowserSession> {
    pub login: LoginPage<S>,
    pub product: ProductPage<S>,
    pub cart: CartPage<S>,
    pub checkout: CheckoutPage<S>,
    pub confirmation: ConfirmationPage<S>,
    base_url: String,
}

impl<S: BrowserSession> Storefront<S> {
    /// Pages over `session` using the configured base URL and wait policy
    pub fn new(session: Arc<S>, config: &SuiteConfig) -> Self {
        let base = InteractionController::new(session, ComponentLogger::new("Storefront"))
            .with_policy(config.wait_policy());
        Self::from_controller(&base, config.base_url())
    }

    /// Pages sharing `base`'s session and policies
    pub fn from_controller(base: &InteractionController<S>, base_url: &str) -> Self {
        Self {
            login: LoginPage::new(base),
            product: ProductPage::new(base),
            cart: CartPage::new(base),
            checkout: CheckoutPage::new(base),
            confirmation: ConfirmationPage::new(base),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open the homepage
    pub async fn open_home(&self) -> StoreResult<()> {
        self.login.open_home(&self.base_url).await
    }

    /// Full purchase flow: sign in, add `product`, check out with the shipping
    /// details and return the confirmation message
    pub async fn purchase(
        &self,
        credentials: (&str, &str),
        product: &str,
        shipping: &ShippingDetails,
    ) -> StoreResult<String> {
        self.open_home().await?;
        self.login.open_login_panel().await?;
        self.login
            .login_with_valid_credentials(credentials.0, credentials.1)
            .await?;
        self.product.add_product_to_cart(product, &self.cart).await?;
        self.cart.validate_subtotal().await?;
        self.cart.proceed_to_checkout().await?;
        if !self.checkout.verify_checkout_page().await? {
            return Err(StoreError::assertion("Checkout page was not loaded"));
        }
        self.checkout.fill_checkout_form(shipping).await?;
        self.checkout.place_order().await?;
        self.confirmation.get_confirmation_message().await
    }
}

/// Shipping form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub state_or_province: String,
    pub postcode: String,
}

impl Default for ShippingDetails {
    fn default() -> Self {
        Self {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main Street".to_string(),
            state_or_province: "Ontario".to_string(),
            postcode: "K1A0B1".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_support {
    use super::*;
    use crate::mock::MockSession;
    use crate::wait::WaitPolicy;

    pub fn base(session: &MockSession) -> InteractionController<MockSession> {
        InteractionController::new(Arc::new(session.clone()), ComponentLogger::new("test"))
            .with_policy(WaitPolicy::from_millis(150, 10))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_variants() {
        assert!(same_amount(parse_price("$ 799.00").unwrap(), 799.0));
        assert!(same_amount(parse_price("$799").unwrap(), 799.0));
        assert!(same_amount(parse_price(" 1,099.50 ").unwrap(), 1099.5));
    }

    #[test]
    fn test_parse_price_rejects_text() {
        let err = parse_price("Free").unwrap_err();
        assert!(err.to_string().contains("Free"));
    }

    #[test]
    fn test_same_amount_tolerates_float_noise() {
        assert!(same_amount(0.1 + 0.2, 0.3));
        assert!(!same_amount(799.0, 799.5));
    }
}
