//! Floating side cart.

use super::{page_controller, parse_price, same_amount, PageObject};
use crate::controller::InteractionController;
use crate::locator::Locator;
use crate::result::{StoreError, StoreResult};
use crate::session::{BrowserSession, SessionElement};

const SHELF: &str = "//div[@class='float-cart__shelf-container']";

#[derive(Debug)]
pub struct CartPage<S> {
    ctl: InteractionController<S>,
}

impl<S: BrowserSession> PageObject for CartPage<S> {
    type Session = S;
    const NAME: &'static str = "CartPage";

    fn controller(&self) -> &InteractionController<S> {
        &self.ctl
    }
}

impl<S: BrowserSession> CartPage<S> {
    pub fn new(base: &InteractionController<S>) -> Self {
        Self {
            ctl: page_controller(base, Self::NAME),
        }
    }

    pub fn side_cart_button() -> Locator {
        Locator::css(".bag--float-cart-closed")
    }

    pub fn checkout_button() -> Locator {
        Locator::xpath("//div[text()='Checkout']")
    }

    pub fn continue_shopping_button() -> Locator {
        Locator::xpath("//div[text()='Continue Shopping']")
    }

    pub fn close_button() -> Locator {
        Locator::css("div[class='float-cart__close-btn']")
    }

    pub fn subtotal() -> Locator {
        Locator::css(".float-cart__footer .sub-price__val")
    }

    pub fn item_name(product: &str) -> Locator {
        Locator::xpath(format!("{SHELF}//p[text()='{product}']"))
    }

    pub fn item_price(product: &str) -> Locator {
        Locator::xpath(format!(
            "{SHELF}//p[text()='{product}']/../following-sibling::div[@class='shelf-item__price']/p"
        ))
    }

    pub fn all_item_prices() -> Locator {
        Locator::xpath(format!(
            "{SHELF}//p/../following-sibling::div[@class='shelf-item__price']/p"
        ))
    }

    /// Check the side cart lists `product` at exactly `price` (display text)
    pub async fn validate_side_cart(&self, product: &str, price: &str) -> StoreResult<()> {
        self.ctl.element_visible(&Self::close_button()).await?;

        let actual_name = self.ctl.get_text(&Self::item_name(product)).await?;
        if actual_name != product {
            return Err(StoreError::assertion(format!(
                "Expected product name '{product}' but got '{actual_name}'"
            )));
        }
        let actual_price = self.ctl.get_text(&Self::item_price(product)).await?;
        if actual_price != price {
            return Err(StoreError::assertion(format!(
                "Expected product price '{price}' but got '{actual_price}'"
            )));
        }
        self.logger()
            .info(format_args!("Side cart opened with {product} and {price}"));
        Ok(())
    }

    /// Check the item prices add up to the displayed subtotal; returns it
    pub async fn validate_subtotal(&self) -> StoreResult<f64> {
        let mut calculated = 0.0;
        for element in self.ctl.find_elements(&Self::all_item_prices()).await? {
            calculated += parse_price(&element.text().await?)?;
        }
        let displayed = parse_price(&self.ctl.get_text(&Self::subtotal()).await?)?;
        if !same_amount(calculated, displayed) {
            return Err(StoreError::assertion(format!(
                "Calculated total ${calculated:.2} doesn't match displayed ${displayed:.2}"
            )));
        }
        self.logger()
            .info(format_args!("Subtotal validation passed: ${calculated:.2}"));
        Ok(calculated)
    }

    pub async fn proceed_to_checkout(&self) -> StoreResult<()> {
        self.ctl.click(&Self::checkout_button()).await?;
        self.logger().info("Proceeding to checkout");
        Ok(())
    }

    pub async fn navigate_to_side_cart_without_adding_items(&self) -> StoreResult<()> {
        self.ctl.click(&Self::side_cart_button()).await?;
        self.logger()
            .info("Navigated to side cart without adding items");
        Ok(())
    }

    pub async fn check_presence_of_continue_shopping_button(&self) -> StoreResult<bool> {
        Ok(self
            .ctl
            .element_visible(&Self::continue_shopping_button())
            .await?)
    }

    /// Whether the side cart is closed
    pub async fn check_absence_of_side_cart_close_btn(&self) -> StoreResult<bool> {
        Ok(!self.ctl.element_visible(&Self::close_button()).await?)
    }

    pub async fn close_side_cart(&self) -> StoreResult<()> {
        self.ctl.click(&Self::close_button()).await?;
        self.logger().info("Side cart closed");
        Ok(())
    }
}
