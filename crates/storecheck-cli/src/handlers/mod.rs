//! Command handlers
//!
//! Each handler runs one subcommand. Rendering is split into pure functions
//! so the output can be tested without a network or browser.

pub mod catalog;
pub mod config;
#[cfg(feature = "webdriver")]
pub mod purchase;
pub mod signin;

use std::path::Path;

use storecheck::SuiteConfig;

use crate::CliResult;

pub use catalog::{execute_catalog, render_catalog};
pub use config::{execute_config, render_config, render_plan};
#[cfg(feature = "webdriver")]
pub use purchase::execute_purchase;
pub use signin::{execute_signin, render_signin};

/// Load the suite configuration from `path` (or the default location)
pub fn load_config(path: Option<&Path>) -> CliResult<SuiteConfig> {
    Ok(SuiteConfig::load(path)?)
}

/// Apply a per-command API base URL override
#[must_use]
pub fn with_api_override(config: SuiteConfig, api_base_url: Option<&str>) -> SuiteConfig {
    match api_base_url {
        Some(url) => config.with_api_base_url(url),
        None => config,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_api_override() {
        let config = SuiteConfig::default().with_api_base_url("https://a.example/api");
        let config = with_api_override(config, Some("http://127.0.0.1:9/api"));
        assert_eq!(config.api_base_url().unwrap(), "http://127.0.0.1:9/api");
        let config = with_api_override(config, None);
        assert_eq!(config.api_base_url().unwrap(), "http://127.0.0.1:9/api");
    }
}
