//! Order confirmation.

use super::{page_controller, PageObject};
use crate::controller::InteractionController;
use crate::locator::Locator;
use crate::result::StoreResult;
use crate::session::BrowserSession;

/// Banner text after a successful order
pub const ORDER_PLACED_MESSAGE: &str = "Your Order has been successfully placed.";

#[derive(Debug)]
pub struct ConfirmationPage<S> {
    ctl: InteractionController<S>,
}

impl<S: BrowserSession> PageObject for ConfirmationPage<S> {
    type Session = S;
    const NAME: &'static str = "ConfirmationPage";

    fn controller(&self) -> &InteractionController<S> {
        &self.ctl
    }
}

impl<S: BrowserSession> ConfirmationPage<S> {
    pub fn new(base: &InteractionController<S>) -> Self {
        Self {
            ctl: page_controller(base, Self::NAME),
        }
    }

    pub fn confirmation_message() -> Locator {
        Locator::id("confirmation-message")
    }

    pub async fn get_confirmation_message(&self) -> StoreResult<String> {
        Ok(self.ctl.get_text(&Self::confirmation_message()).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockSession};
    use crate::pages::test_support::base;

    #[tokio::test]
    async fn test_reads_banner_once_rendered() {
        let session = MockSession::new();
        session.add_element(
            ConfirmationPage::<MockSession>::confirmation_message(),
            MockElement::new()
                .with_text(ORDER_PLACED_MESSAGE)
                .appearing_after(std::time::Duration::from_millis(30)),
        );
        let page = ConfirmationPage::new(&base(&session));
        assert_eq!(
            page.get_confirmation_message().await.unwrap(),
            ORDER_PLACED_MESSAGE
        );
        assert_eq!(page.logger().name(), "ConfirmationPage");
    }
}
