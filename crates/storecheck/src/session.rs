//! Browser session boundary.
//!
//! The interaction controller only ever talks to a browser through these two
//! traits. Backends classify their native errors into
//! [`FailureKind`](crate::FailureKind) before returning them, so nothing above
//! this layer matches on driver-specific error types.
//!
//! # Implementations
//!
//! - `WebDriverSession` - W3C WebDriver via fantoccini (feature `webdriver`)
//! - [`MockSession`](crate::mock::MockSession) - scripted, for unit tests

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::DriverResult;

/// A handle to one element of the current page
#[async_trait]
pub trait SessionElement: Clone + Send + Sync + 'static {
    /// Click the element
    async fn click(&self) -> DriverResult<()>;

    /// Clear an editable element
    async fn clear(&self) -> DriverResult<()>;

    /// Send keystrokes to the element
    async fn send_keys(&self, text: &str) -> DriverResult<()>;

    /// Rendered text of the element
    async fn text(&self) -> DriverResult<String>;

    /// Attribute (or same-named DOM property) of the element
    async fn attribute(&self, name: &str) -> DriverResult<Option<String>>;

    /// Whether the element is rendered and visible
    async fn is_displayed(&self) -> DriverResult<bool>;

    /// Whether the element accepts input
    async fn is_enabled(&self) -> DriverResult<bool>;
}

/// A live browser session.
///
/// A session is driven by one controller at a time; implementations do not
/// need to support concurrent commands.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Element handle type produced by this session
    type Element: SessionElement;

    /// Navigate to an absolute URL
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// URL of the current page
    async fn current_url(&self) -> DriverResult<String>;

    /// All elements currently matching `locator`, in document order.
    ///
    /// No match is an empty list, not an error.
    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Self::Element>>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> DriverResult<Vec<u8>>;

    /// End the session
    async fn quit(&self) -> DriverResult<()>;
}
