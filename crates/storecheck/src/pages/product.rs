//! Product shelf.

use super::{page_controller, CartPage, PageObject};
use crate::controller::InteractionController;
use crate::locator::Locator;
use crate::result::{StoreError, StoreResult};
use crate::session::BrowserSession;

#[derive(Debug)]
pub struct ProductPage<S> {
    ctl: InteractionController<S>,
}

impl<S: BrowserSession> PageObject for ProductPage<S> {
    type Session = S;
    const NAME: &'static str = "ProductPage";

    fn controller(&self) -> &InteractionController<S> {
        &self.ctl
    }
}

impl<S: BrowserSession> ProductPage<S> {
    pub fn new(base: &InteractionController<S>) -> Self {
        Self {
            ctl: page_controller(base, Self::NAME),
        }
    }

    pub fn shelf_item() -> Locator {
        Locator::xpath("//div[@class='shelf-item']")
    }

    pub fn product_tile(product: &str) -> Locator {
        Locator::xpath(format!("//div[@class='shelf-item'][./p[text()='{product}']]"))
    }

    pub fn add_to_cart_button(product: &str) -> Locator {
        Locator::xpath(format!(
            "//div[@class='shelf-item']/p[text()='{product}']//following-sibling::div[text()='Add to cart']"
        ))
    }

    /// Fail unless at least one shelf item is shown
    pub async fn validate_product_listing_page(&self) -> StoreResult<()> {
        if self.ctl.element_visible(&Self::shelf_item()).await? {
            Ok(())
        } else {
            Err(StoreError::assertion("Product listing page is not open"))
        }
    }

    /// Add `product` to the cart, closing the side cart first if it is open
    pub async fn add_product_to_cart(&self, product: &str, cart: &CartPage<S>) -> StoreResult<()> {
        if !cart.check_absence_of_side_cart_close_btn().await? {
            cart.close_side_cart().await?;
        }
        self.ctl.click(&Self::product_tile(product)).await?;
        self.ctl.click(&Self::add_to_cart_button(product)).await?;
        self.logger().info(format_args!("Added {product} to cart"));
        Ok(())
    }
}
