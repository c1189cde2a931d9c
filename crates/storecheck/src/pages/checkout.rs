//! Checkout: shipping form and order summary.

use super::{page_controller, parse_price, same_amount, PageObject, ShippingDetails};
use crate::controller::InteractionController;
use crate::locator::Locator;
use crate::result::{StoreError, StoreResult};
use crate::session::BrowserSession;

#[derive(Debug)]
pub struct CheckoutPage<S> {
    ctl: InteractionController<S>,
}

impl<S: BrowserSession> PageObject for CheckoutPage<S> {
    type Session = S;
    const NAME: &'static str = "CheckoutPage";

    fn controller(&self) -> &InteractionController<S> {
        &self.ctl
    }
}

/// Order summary prices drop the space and a trailing `.00` (`"$ 799.00"` → `"$799"`)
#[must_use]
pub fn summary_price(display: &str) -> String {
    display.replace(' ', "").replace(".00", "")
}

impl<S: BrowserSession> CheckoutPage<S> {
    pub fn new(base: &InteractionController<S>) -> Self {
        Self {
            ctl: page_controller(base, Self::NAME),
        }
    }

    pub fn shipping_heading() -> Locator {
        Locator::xpath("//div/legend[@data-test='shipping-address-heading']")
    }

    pub fn first_name_field() -> Locator {
        Locator::id("firstNameInput")
    }

    pub fn last_name_field() -> Locator {
        Locator::id("lastNameInput")
    }

    pub fn address_field() -> Locator {
        Locator::id("addressLine1Input")
    }

    pub fn state_field() -> Locator {
        Locator::id("provinceInput")
    }

    pub fn postcode_field() -> Locator {
        Locator::id("postCodeInput")
    }

    pub fn submit_button() -> Locator {
        Locator::id("checkout-shipping-continue")
    }

    pub fn total_amount() -> Locator {
        Locator::xpath("//span[@class='cart-priceItem-value']")
    }

    pub fn summary_items() -> Locator {
        Locator::css("section.cart-section ul li.productList-item")
    }

    /// Price of the `index`th (1-based) order summary item
    pub fn summary_item_price(index: usize) -> Locator {
        Locator::css(format!(
            "section.cart-section ul li.productList-item:nth-child({index}) .product-price"
        ))
    }

    pub fn summary_product_name(product: &str) -> Locator {
        Locator::xpath(format!("//h5[normalize-space()='{product}']"))
    }

    pub fn summary_product_price(product: &str) -> Locator {
        Locator::xpath(format!(
            "//h5[normalize-space()='{product}']/parent::div/following-sibling::div/div"
        ))
    }

    /// Whether the shipping address heading is shown
    pub async fn verify_checkout_page(&self) -> StoreResult<bool> {
        Ok(self.ctl.element_visible(&Self::shipping_heading()).await?)
    }

    /// Check the order summary lists `product` at `price` (cart display form)
    pub async fn verify_product_in_order_summary(
        &self,
        product: &str,
        price: &str,
    ) -> StoreResult<()> {
        let actual_name = self.ctl.get_text(&Self::summary_product_name(product)).await?;
        if actual_name != product {
            return Err(StoreError::assertion(format!(
                "Expected product name '{product}' but got '{actual_name}'"
            )));
        }
        let expected = summary_price(price);
        let actual_price = self
            .ctl
            .get_text(&Self::summary_product_price(product))
            .await?;
        if actual_price != expected {
            return Err(StoreError::assertion(format!(
                "Expected product price '{expected}' but got '{actual_price}'"
            )));
        }
        self.logger().info(format_args!(
            "Product '{product}' with price '{expected}' found in order summary"
        ));
        Ok(())
    }

    pub async fn fill_checkout_form(&self, details: &ShippingDetails) -> StoreResult<()> {
        self.ctl
            .type_text(&Self::first_name_field(), &details.first_name)
            .await?;
        self.ctl
            .type_text(&Self::last_name_field(), &details.last_name)
            .await?;
        self.ctl
            .type_text(&Self::address_field(), &details.address)
            .await?;
        self.ctl
            .type_text(&Self::state_field(), &details.state_or_province)
            .await?;
        self.ctl
            .type_text(&Self::postcode_field(), &details.postcode)
            .await?;
        Ok(())
    }

    pub async fn place_order(&self) -> StoreResult<()> {
        self.ctl.click(&Self::submit_button()).await?;
        Ok(())
    }

    /// Check the item prices add up to the displayed total; returns it
    pub async fn check_order_summary_total(&self) -> StoreResult<f64> {
        let count = self.ctl.find_elements(&Self::summary_items()).await?.len();
        let mut total = 0.0;
        for index in 1..=count {
            let price = parse_price(&self.ctl.get_text(&Self::summary_item_price(index)).await?)?;
            self.logger()
                .info(format_args!("Item {index} price: {price}"));
            total += price;
        }
        let displayed = parse_price(&self.ctl.get_text(&Self::total_amount()).await?)?;
        self.logger()
            .info(format_args!("Displayed total: {displayed}"));
        if !same_amount(total, displayed) {
            return Err(StoreError::assertion(format!(
                "Total mismatch: expected {total}, got {displayed}"
            )));
        }
        self.logger()
            .info(format_args!("Order summary total validated: ${total}"));
        Ok(total)
    }
}
