//! Sign-in panel and header.
//!
//! The demo store renders username and password as react-select dropdowns;
//! logging in means opening each dropdown and picking the option by text.

use super::{page_controller, PageObject};
use crate::controller::InteractionController;
use crate::locator::Locator;
use crate::result::StoreResult;
use crate::session::BrowserSession;

#[derive(Debug)]
pub struct LoginPage<S> {
    ctl: InteractionController<S>,
}

impl<S: BrowserSession> PageObject for LoginPage<S> {
    type Session = S;
    const NAME: &'static str = "LoginPage";

    fn controller(&self) -> &InteractionController<S> {
        &self.ctl
    }
}

impl<S: BrowserSession> LoginPage<S> {
    pub fn new(base: &InteractionController<S>) -> Self {
        Self {
            ctl: page_controller(base, Self::NAME),
        }
    }

    pub fn sign_in_button() -> Locator {
        Locator::id("signin")
    }

    pub fn logout_link() -> Locator {
        Locator::xpath("//span[contains(text(), 'Logout')]")
    }

    pub fn header_logo() -> Locator {
        Locator::xpath("//div[contains(@class,'justify-center')]")
    }

    pub fn username_dropdown() -> Locator {
        Locator::xpath("//div[contains(text(),'Select Username')]")
    }

    pub fn password_dropdown() -> Locator {
        Locator::xpath("//div[contains(text(),'Select Password')]")
    }

    pub fn username_option(username: &str) -> Locator {
        Locator::xpath(format!(
            "//div[@id='username']//div[contains(text(),'{username}')]"
        ))
    }

    pub fn password_option(password: &str) -> Locator {
        Locator::xpath(format!(
            "//div[@id='password']//div[contains(text(),'{password}')]"
        ))
    }

    pub fn login_button() -> Locator {
        Locator::id("login-btn")
    }

    pub fn error_message() -> Locator {
        Locator::css(".api-error")
    }

    pub fn user_greeting() -> Locator {
        Locator::css(".username")
    }

    pub async fn open_home(&self, base_url: &str) -> StoreResult<()> {
        Ok(self.ctl.open(base_url).await?)
    }

    pub async fn open_login_panel(&self) -> StoreResult<()> {
        self.ctl.click(&Self::sign_in_button()).await?;
        Ok(())
    }

    pub async fn select_logout(&self) -> StoreResult<()> {
        self.ctl.click(&Self::logout_link()).await?;
        Ok(())
    }

    pub async fn select_username(&self, username: &str) -> StoreResult<()> {
        self.ctl.click(&Self::username_dropdown()).await?;
        self.ctl.click(&Self::username_option(username)).await?;
        Ok(())
    }

    pub async fn select_password(&self, password: &str) -> StoreResult<()> {
        self.ctl.click(&Self::password_dropdown()).await?;
        self.ctl.click(&Self::password_option(password)).await?;
        Ok(())
    }

    pub async fn login_with_valid_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<()> {
        self.select_username(username).await?;
        self.select_password(password).await?;
        self.ctl.click(&Self::login_button()).await?;
        self.logger().info(format_args!("Logged in with {username}"));
        Ok(())
    }

    pub async fn login_without_credentials(&self) -> StoreResult<()> {
        self.ctl.click(&Self::login_button()).await?;
        Ok(())
    }

    pub async fn get_login_error_message(&self) -> StoreResult<String> {
        Ok(self.ctl.get_text(&Self::error_message()).await?)
    }

    pub async fn get_logged_in_username(&self) -> StoreResult<String> {
        Ok(self.ctl.get_text(&Self::user_greeting()).await?)
    }

    /// Whether the login button is still shown
    pub async fn verify_login_page(&self) -> StoreResult<bool> {
        Ok(self.ctl.element_visible(&Self::login_button()).await?)
    }

    /// Whether the logo, both selectors and the login button are visible
    pub async fn login_controls_present(&self) -> StoreResult<bool> {
        let mut results = Vec::with_capacity(4);
        for locator in [
            Self::header_logo(),
            Self::username_dropdown(),
            Self::password_dropdown(),
            Self::login_button(),
        ] {
            results.push(self.ctl.element_visible(&locator).await?);
        }
        self.logger()
            .info(format_args!("Login UI controls visibility: {results:?}"));
        Ok(results.iter().all(|visible| *visible))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockSession};
    use crate::pages::test_support::base;
    use crate::result::StoreError;

    type Page = LoginPage<MockSession>;

    fn login_panel(session: &MockSession) {
        session.add_element(Page::header_logo(), MockElement::new());
        session.add_element(Page::username_dropdown(), MockElement::new());
        session.add_element(Page::password_dropdown(), MockElement::new());
        session.add_element(Page::username_option("demouser"), MockElement::new());
        session.add_element(Page::password_option("testingisfun99"), MockElement::new());
    }

    #[tokio::test]
    async fn test_open_home_navigates() {
        let session = MockSession::new();
        let page = Page::new(&base(&session));
        page.open_home("https://bstackdemo.com").await.unwrap();
        assert!(session.was_called("navigate:https://bstackdemo.com"));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_shows_greeting() {
        let session = MockSession::new();
        login_panel(&session);
        session.add_element(
            Page::login_button(),
            MockElement::new().reveals_on_click(
                Page::user_greeting(),
                MockElement::new().with_text("demouser"),
            ),
        );
        let page = Page::new(&base(&session));

        page.login_with_valid_credentials("demouser", "testingisfun99")
            .await
            .unwrap();
        assert_eq!(page.get_logged_in_username().await.unwrap(), "demouser");

        let clicks: Vec<_> = session
            .history()
            .into_iter()
            .filter(|call| call.starts_with("click:"))
            .collect();
        assert_eq!(clicks.len(), 5);
        assert_eq!(clicks[4], "click:id=login-btn");
    }

    #[tokio::test]
    async fn test_login_without_credentials_shows_error() {
        let session = MockSession::new();
        session.add_element(
            Page::login_button(),
            MockElement::new().reveals_on_click(
                Page::error_message(),
                MockElement::new().with_text("Invalid Username"),
            ),
        );
        let page = Page::new(&base(&session));

        page.login_without_credentials().await.unwrap();
        assert_eq!(page.get_login_error_message().await.unwrap(), "Invalid Username");
        assert!(page.verify_login_page().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_option_is_interaction_error() {
        let session = MockSession::new();
        login_panel(&session);
        let page = Page::new(&base(&session));

        let err = page.select_username("nobody").await.unwrap_err();
        let StoreError::Interaction(inner) = err else {
            panic!("expected interaction error");
        };
        assert!(inner.is_timeout());
        assert!(inner.locator().contains("nobody"));
    }

    #[tokio::test]
    async fn test_login_controls_present() {
        let session = MockSession::new();
        login_panel(&session);
        let page = Page::new(&base(&session));
        assert!(!page.login_controls_present().await.unwrap());

        session.add_element(Page::login_button(), MockElement::new());
        assert!(page.login_controls_present().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clicks_link() {
        let session = MockSession::new();
        let link = MockElement::new();
        session.add_element(Page::logout_link(), link.clone());
        Page::new(&base(&session)).select_logout().await.unwrap();
        assert_eq!(link.clicks(), 1);
    }
}
