//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A check ran but its expectation did not hold
    #[error("Check failed: {message}")]
    CheckFailed {
        /// Error message
        message: String,
    },

    /// Storecheck library error
    #[error(transparent)]
    Store(#[from] storecheck::StoreError),

    /// HTTP client error
    #[error("API error: {0}")]
    Api(#[from] storecheck::ApiError),

    /// Output rendering error
    #[error("Could not render output: {message}")]
    Render {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a failed-check error
    #[must_use]
    pub fn check_failed(message: impl Into<String>) -> Self {
        Self::CheckFailed {
            message: message.into(),
        }
    }

    /// Create a rendering error
    #[must_use]
    pub fn render(message: impl std::fmt::Display) -> Self {
        Self::Render {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_check_failed_error() {
        let err = CliError::check_failed("2 products missing a price");
        assert_eq!(err.to_string(), "Check failed: 2 products missing a price");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: CliError = storecheck::StoreError::assertion("Total mismatch").into();
        assert_eq!(err.to_string(), "Assertion failed: Total mismatch");
    }

    #[test]
    fn test_render_error() {
        let err = CliError::render("invalid utf-8");
        assert!(err.to_string().contains("render"));
    }
}
