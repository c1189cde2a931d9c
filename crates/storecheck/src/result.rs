//! Result and error types for Storecheck.
//!
//! Three layers of failure are kept apart:
//!
//! - [`DriverError`]: a raw browser-driver failure, already classified into a
//!   [`FailureKind`] by the session backend.
//! - [`ElementInteractionError`]: the only error returned by the controller's
//!   click, type and read operations.
//! - [`StoreError`]: the crate-wide error used by page objects, configuration
//!   and session construction.

use std::fmt;

use thiserror::Error;

use crate::api::ApiError;
use crate::locator::Locator;

/// Result type for Storecheck operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for raw session calls
pub type DriverResult<T> = Result<T, DriverError>;

/// Result of a single controller interaction.
///
/// `Ok` carries the element handle (or the value read from it); `Err` carries
/// the operation, locator and classified cause.
pub type InteractionOutcome<T> = Result<T, ElementInteractionError>;

/// Classification of a browser-driver failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// An explicit wait expired before its condition held
    Timeout,
    /// The element reference no longer points at a node in the DOM
    StaleElement,
    /// Another element (overlay, spinner) received the click
    ClickIntercepted,
    /// The element exists but cannot currently receive input
    NotInteractable,
    /// No element matched the locator
    NoSuchElement,
    /// The locator itself is malformed
    InvalidSelector,
    /// The browser session or its transport is gone
    SessionLost,
    /// Anything the backend could not classify
    Other,
}

impl FailureKind {
    /// Stable name used in log lines and error messages
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::StaleElement => "StaleElementReference",
            Self::ClickIntercepted => "ElementClickIntercepted",
            Self::NotInteractable => "ElementNotInteractable",
            Self::NoSuchElement => "NoSuchElement",
            Self::InvalidSelector => "InvalidSelector",
            Self::SessionLost => "SessionLost",
            Self::Other => "WebDriverError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified failure reported by a browser session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DriverError {
    kind: FailureKind,
    message: String,
}

impl DriverError {
    /// Create a driver error of the given kind
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a wait timeout error
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    /// Classification of this failure
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Backend message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this failure is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.kind, FailureKind::Timeout)
    }
}

/// Controller operation that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `click`
    Click,
    /// `type_text`
    Type,
    /// `get_text`
    ReadText,
    /// `get_attribute`
    ReadAttribute(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => f.write_str("click"),
            Self::Type => f.write_str("type"),
            Self::ReadText => f.write_str("read text"),
            Self::ReadAttribute(name) => write!(f, "read attribute '{name}'"),
        }
    }
}

/// Why an interaction was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionCause {
    /// The element never reached the required state before the wait expired
    Timeout,
    /// Transient failures kept occurring after every allowed retry
    RetriesExhausted {
        /// Retry budget that was configured for the call
        retries: u32,
        /// Underlying attempts actually made (always `retries + 1`)
        attempts: u32,
        /// Kind of the last transient failure
        last: FailureKind,
    },
    /// A failure that is not retried for this operation
    Failed(FailureKind),
}

impl InteractionCause {
    /// Classification of the failure behind this cause
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout => FailureKind::Timeout,
            Self::RetriesExhausted { last, .. } => *last,
            Self::Failed(kind) => *kind,
        }
    }
}

/// The normalized failure surface of the interaction controller
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ElementInteractionError {
    operation: Operation,
    locator: String,
    cause: InteractionCause,
    message: String,
    #[source]
    source: DriverError,
}

impl ElementInteractionError {
    /// Wrap a driver failure that ends `operation` immediately
    #[must_use]
    pub fn new(operation: Operation, locator: &Locator, source: DriverError) -> Self {
        let cause = if source.is_timeout() {
            InteractionCause::Timeout
        } else {
            InteractionCause::Failed(source.kind())
        };
        let locator = locator.to_string();
        let message = match &operation {
            Operation::Click => format!("Failed to click element {locator}: {}", source.kind()),
            Operation::Type => format!("Failed to type into element {locator}: {}", source.kind()),
            Operation::ReadText => {
                format!("Failed to read text from element {locator}: {}", source.kind())
            }
            Operation::ReadAttribute(name) => format!(
                "Failed to read attribute '{name}' from element {locator}: {}",
                source.kind()
            ),
        };
        Self {
            operation,
            locator,
            cause,
            message,
            source,
        }
    }

    /// A click whose transient failures outlasted the retry budget
    #[must_use]
    pub fn retries_exhausted(
        locator: &Locator,
        retries: u32,
        attempts: u32,
        source: DriverError,
    ) -> Self {
        let locator = locator.to_string();
        let message = format!(
            "Failed to click element {locator} after {retries} retries: {}",
            source.kind()
        );
        Self {
            operation: Operation::Click,
            locator,
            cause: InteractionCause::RetriesExhausted {
                retries,
                attempts,
                last: source.kind(),
            },
            message,
            source,
        }
    }

    /// Operation that failed
    #[must_use]
    pub const fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Human-readable locator description (`strategy=value`)
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Classified cause
    #[must_use]
    pub const fn cause(&self) -> InteractionCause {
        self.cause
    }

    /// Underlying driver failure
    #[must_use]
    pub const fn driver_error(&self) -> &DriverError {
        &self.source
    }

    /// Whether the interaction gave up because its wait expired
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.cause, InteractionCause::Timeout)
    }
}

/// Errors that can occur in Storecheck
#[derive(Debug, Error)]
pub enum StoreError {
    /// Element interaction failed
    #[error(transparent)]
    Interaction(#[from] ElementInteractionError),

    /// Raw session failure (navigation, element lookup, screenshots)
    #[error("Browser session error: {0}")]
    Driver(#[from] DriverError),

    /// Page-level validation failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// WebDriver session could not be created
    #[error("Failed to start browser session at {endpoint}: {message}")]
    SessionStart {
        /// WebDriver endpoint with credentials removed
        endpoint: String,
        /// Error message
        message: String,
    },

    /// HTTP client error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl StoreError {
    /// Create a session start failure
    #[must_use]
    pub fn session_start(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SessionStart {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::error::Error as _;

    mod interaction_error_tests {
        use super::*;

        #[test]
        fn test_timeout_cause_from_timeout_source() {
            let err = ElementInteractionError::new(
                Operation::Click,
                &Locator::id("signin"),
                DriverError::timeout("clickability of id=signin after 5000ms"),
            );
            assert!(err.is_timeout());
            assert_eq!(err.cause(), InteractionCause::Timeout);
            assert_eq!(err.to_string(), "Failed to click element id=signin: Timeout");
        }

        #[test]
        fn test_failed_cause_keeps_kind() {
            let err = ElementInteractionError::new(
                Operation::Type,
                &Locator::css("#firstNameInput"),
                DriverError::new(FailureKind::StaleElement, "node detached"),
            );
            assert_eq!(err.cause(), InteractionCause::Failed(FailureKind::StaleElement));
            assert_eq!(
                err.to_string(),
                "Failed to type into element css selector=#firstNameInput: StaleElementReference"
            );
        }

        #[test]
        fn test_attribute_message_names_attribute() {
            let err = ElementInteractionError::new(
                Operation::ReadAttribute("value".into()),
                &Locator::id("postCodeInput"),
                DriverError::timeout("visibility"),
            );
            assert!(err.to_string().contains("'value'"));
            assert_eq!(err.locator(), "id=postCodeInput");
        }

        #[test]
        fn test_retries_exhausted_message_and_source() {
            let err = ElementInteractionError::retries_exhausted(
                &Locator::id("login-btn"),
                3,
                4,
                DriverError::new(FailureKind::ClickIntercepted, "overlay"),
            );
            assert_eq!(
                err.to_string(),
                "Failed to click element id=login-btn after 3 retries: ElementClickIntercepted"
            );
            assert_eq!(
                err.cause(),
                InteractionCause::RetriesExhausted {
                    retries: 3,
                    attempts: 4,
                    last: FailureKind::ClickIntercepted,
                }
            );
            let source = err.source().unwrap();
            assert!(source.to_string().contains("overlay"));
        }
    }

    mod store_error_tests {
        use super::*;

        #[test]
        fn test_assertion_error() {
            let err = StoreError::assertion("subtotal mismatch");
            assert!(err.to_string().contains("Assertion failed"));
        }

        #[test]
        fn test_interaction_is_transparent() {
            let inner = ElementInteractionError::new(
                Operation::ReadText,
                &Locator::id("confirmation-message"),
                DriverError::timeout("visibility"),
            );
            let err = StoreError::from(inner);
            assert_eq!(
                err.to_string(),
                "Failed to read text from element id=confirmation-message: Timeout"
            );
        }
    }
}
