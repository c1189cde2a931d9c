//! W3C WebDriver session backed by fantoccini.
//!
//! Every fantoccini error is classified into a [`FailureKind`] here so the
//! controller never sees `CmdError`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};

use crate::locator::Locator;
use crate::result::{DriverError, DriverResult, FailureKind, StoreError, StoreResult};
use crate::session::{BrowserSession, SessionElement};

/// WebDriver capabilities map
pub type Capabilities = serde_json::Map<String, serde_json::Value>;

/// Classify a fantoccini command error
#[must_use]
pub fn classify(err: &CmdError) -> FailureKind {
    if err.is_no_such_element() {
        return FailureKind::NoSuchElement;
    }
    match err {
        CmdError::Standard(wd) => match wd.error {
            ErrorStatus::StaleElementReference => FailureKind::StaleElement,
            ErrorStatus::ElementClickIntercepted => FailureKind::ClickIntercepted,
            ErrorStatus::ElementNotInteractable | ErrorStatus::InvalidElementState => {
                FailureKind::NotInteractable
            }
            ErrorStatus::NoSuchElement => FailureKind::NoSuchElement,
            ErrorStatus::InvalidSelector => FailureKind::InvalidSelector,
            ErrorStatus::Timeout | ErrorStatus::ScriptTimeout => FailureKind::Timeout,
            ErrorStatus::InvalidSessionId | ErrorStatus::SessionNotCreated => {
                FailureKind::SessionLost
            }
            _ => FailureKind::Other,
        },
        CmdError::WaitTimeout => FailureKind::Timeout,
        CmdError::Lost(_) => FailureKind::SessionLost,
        _ => FailureKind::Other,
    }
}

fn driver_error(err: CmdError) -> DriverError {
    DriverError::new(classify(&err), err.to_string())
}

/// CSS selector matching a `name` attribute
fn name_selector(name: &str) -> String {
    format!("[name=\"{}\"]", name.replace('"', "\\\""))
}

/// A live WebDriver session
#[derive(Clone)]
pub struct WebDriverSession {
    client: Client,
    endpoint: String,
}

impl WebDriverSession {
    /// Start a session at `endpoint` with `capabilities`.
    ///
    /// `endpoint` is the display form of `url` with credentials removed. It
    /// replaces `url` in any error message.
    pub async fn connect(
        url: &str,
        endpoint: impl Into<String>,
        capabilities: Capabilities,
    ) -> StoreResult<Self> {
        let endpoint = endpoint.into();
        match ClientBuilder::native()
            .capabilities(capabilities)
            .connect(url)
            .await
        {
            Ok(client) => Ok(Self { client, endpoint }),
            Err(err) => {
                let message = err.to_string().replace(url, &endpoint);
                Err(StoreError::session_start(endpoint, message))
            }
        }
    }

    /// Wrap an existing fantoccini client
    #[must_use]
    pub fn from_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint this session was started against (credentials removed)
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Apply an implicit wait to element lookups
    pub async fn set_implicit_wait(&self, wait: Duration) -> DriverResult<()> {
        self.client
            .update_timeouts(TimeoutConfiguration::new(None, None, Some(wait)))
            .await
            .map_err(driver_error)
    }
}

impl fmt::Debug for WebDriverSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDriverSession")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    type Element = WebDriverElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.client.goto(url).await.map_err(driver_error)
    }

    async fn current_url(&self) -> DriverResult<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(driver_error)
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<WebDriverElement>> {
        let by_name;
        let target = match locator {
            Locator::Id(v) => fantoccini::Locator::Id(v),
            Locator::Css(v) | Locator::TagName(v) => fantoccini::Locator::Css(v),
            Locator::XPath(v) => fantoccini::Locator::XPath(v),
            Locator::LinkText(v) => fantoccini::Locator::LinkText(v),
            Locator::Name(v) => {
                by_name = name_selector(v);
                fantoccini::Locator::Css(&by_name)
            }
        };
        match self.client.find_all(target).await {
            Ok(elements) => Ok(elements.into_iter().map(WebDriverElement).collect()),
            Err(err) if err.is_no_such_element() => Ok(Vec::new()),
            Err(err) => Err(driver_error(err)),
        }
    }

    async fn screenshot(&self) -> DriverResult<Vec<u8>> {
        self.client.screenshot().await.map_err(driver_error)
    }

    async fn quit(&self) -> DriverResult<()> {
        self.client.clone().close().await.map_err(driver_error)
    }
}

/// Element handle of a [`WebDriverSession`]
#[derive(Clone)]
pub struct WebDriverElement(Element);

impl fmt::Debug for WebDriverElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDriverElement").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionElement for WebDriverElement {
    async fn click(&self) -> DriverResult<()> {
        self.0.click().await.map_err(driver_error)
    }

    async fn clear(&self) -> DriverResult<()> {
        self.0.clear().await.map_err(driver_error)
    }

    async fn send_keys(&self, text: &str) -> DriverResult<()> {
        self.0.send_keys(text).await.map_err(driver_error)
    }

    async fn text(&self) -> DriverResult<String> {
        self.0.text().await.map_err(driver_error)
    }

    /// DOM property first (live `value` of inputs), then the attribute
    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        match self.0.prop(name).await.map_err(driver_error)? {
            Some(value) => Ok(Some(value)),
            None => self.0.attr(name).await.map_err(driver_error),
        }
    }

    async fn is_displayed(&self) -> DriverResult<bool> {
        self.0.is_displayed().await.map_err(driver_error)
    }

    async fn is_enabled(&self) -> DriverResult<bool> {
        self.0.is_enabled().await.map_err(driver_error)
    }
}
