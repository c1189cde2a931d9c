//! Suite configuration.
//!
//! Loaded from YAML (`config/config.yaml` unless `STORECHECK_CONFIG` points
//! elsewhere), then overridden from the environment so CI can switch base URL,
//! browser and run mode without editing the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::{StoreError, StoreResult};
use crate::wait::{WaitPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "STORECHECK_CONFIG";

/// Default storefront
pub const DEFAULT_BASE_URL: &str = "https://bstackdemo.com";

/// Default local WebDriver endpoint (chromedriver / geckodriver / standalone)
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Where browser sessions are started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RunMode {
    /// A local driver endpoint
    #[default]
    Local,
    /// A Selenium Grid hub
    Grid,
    /// BrowserStack Automate
    BrowserStack,
}

impl RunMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Grid => "grid",
            Self::BrowserStack => "browserstack",
        }
    }
}

impl FromStr for RunMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "local" => Ok(Self::Local),
            "grid" => Ok(Self::Grid),
            "browserstack" => Ok(Self::BrowserStack),
            other => Err(StoreError::config(format!(
                "Unsupported run mode '{other}'. Use: local, grid, or browserstack."
            ))),
        }
    }
}

impl TryFrom<String> for RunMode {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RunMode> for String {
    fn from(mode: RunMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Chrome,
    Firefox,
}

/// Browser and display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BrowserChoice {
    #[default]
    Chrome,
    Firefox,
    ChromeHeadless,
    FirefoxHeadless,
}

impl BrowserChoice {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::ChromeHeadless => "chrome-headless",
            Self::FirefoxHeadless => "firefox-headless",
        }
    }

    #[must_use]
    pub const fn engine(&self) -> Engine {
        match self {
            Self::Chrome | Self::ChromeHeadless => Engine::Chrome,
            Self::Firefox | Self::FirefoxHeadless => Engine::Firefox,
        }
    }

    #[must_use]
    pub const fn is_headless(&self) -> bool {
        matches!(self, Self::ChromeHeadless | Self::FirefoxHeadless)
    }
}

impl FromStr for BrowserChoice {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            "chrome-headless" => Ok(Self::ChromeHeadless),
            "firefox-headless" => Ok(Self::FirefoxHeadless),
            other => Err(StoreError::config(format!(
                "Unsupported browser '{other}'. Use: chrome, firefox, chrome-headless, or firefox-headless."
            ))),
        }
    }
}

impl TryFrom<String> for BrowserChoice {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BrowserChoice> for String {
    fn from(choice: BrowserChoice) -> Self {
        choice.as_str().to_string()
    }
}

impl fmt::Display for BrowserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One BrowserStack platform/browser combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserStackTarget {
    pub browser_name: String,
    pub browser_version: String,
    pub os_name: String,
    pub os_version: String,
    pub session_name: String,
    pub build_name: String,
}

impl Default for BrowserStackTarget {
    fn default() -> Self {
        Self {
            browser_name: "chrome".to_string(),
            browser_version: "latest".to_string(),
            os_name: "Windows".to_string(),
            os_version: "10".to_string(),
            session_name: "Chrome on Win 10".to_string(),
            build_name: "storecheck BDD build".to_string(),
        }
    }
}

impl BrowserStackTarget {
    /// The stock platform matrix: Chrome on Windows 10, Firefox on macOS Ventura
    #[must_use]
    pub fn matrix() -> Vec<Self> {
        vec![
            Self::default(),
            Self {
                browser_name: "firefox".to_string(),
                os_name: "OS X".to_string(),
                os_version: "Ventura".to_string(),
                session_name: "Firefox on Mac".to_string(),
                ..Self::default()
            },
        ]
    }
}

/// Runtime configuration of the suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Storefront root opened by the UI flows
    pub base_url: String,
    /// Demo API root used by the HTTP client
    pub api_base_url: Option<String>,
    pub browser: BrowserChoice,
    pub run_mode: RunMode,
    /// Implicit wait applied to new sessions, in seconds
    pub implicit_wait: u64,
    /// Explicit wait timeout, in milliseconds
    pub wait_timeout_ms: u64,
    /// Explicit wait poll interval, in milliseconds
    pub poll_interval_ms: u64,
    pub grid_url: Option<String>,
    /// Driver endpoint for `local` runs
    pub webdriver_url: String,
    pub browserstack: BrowserStackTarget,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_base_url: None,
            browser: BrowserChoice::default(),
            run_mode: RunMode::default(),
            implicit_wait: 0,
            wait_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            grid_url: None,
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            browserstack: BrowserStackTarget::default(),
        }
    }
}

impl SuiteConfig {
    /// Parse YAML text
    pub fn from_yaml_str(yaml: &str) -> StoreResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoreError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Path the suite reads its configuration from
    #[must_use]
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Load the configuration file (if any) and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default path falls back to built-in
    /// defaults when the file is absent.
    pub fn load(path: Option<&Path>) -> StoreResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `BASE_URL`, `API_BASE_URL`, `BROWSER`, `RUN_MODE`, `GRID_URL`,
    /// `WEBDRIVER_URL` and `IMPLICIT_WAIT` from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BASE_URL") {
            self.base_url = value;
        }
        if let Some(value) = lookup("API_BASE_URL") {
            self.api_base_url = Some(value);
        }
        if let Some(value) = lookup("BROWSER") {
            self.browser = value.parse()?;
        }
        if let Some(value) = lookup("RUN_MODE") {
            self.run_mode = value.parse()?;
        }
        if let Some(value) = lookup("GRID_URL") {
            self.grid_url = Some(value);
        }
        if let Some(value) = lookup("WEBDRIVER_URL") {
            self.webdriver_url = value;
        }
        if let Some(value) = lookup("IMPLICIT_WAIT") {
            self.implicit_wait = value.trim().parse().map_err(|_| {
                StoreError::config(format!("IMPLICIT_WAIT must be an integer, got '{value}'"))
            })?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserChoice) -> Self {
        self.browser = browser;
        self
    }

    #[must_use]
    pub const fn with_run_mode(mut self, mode: RunMode) -> Self {
        self.run_mode = mode;
        self
    }

    #[must_use]
    pub fn with_grid_url(mut self, url: impl Into<String>) -> Self {
        self.grid_url = Some(url.into());
        self
    }

    /// API root with trailing slashes removed
    pub fn api_base_url(&self) -> StoreResult<String> {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| StoreError::config("api_base_url missing from configuration"))
    }

    /// Storefront root with trailing slashes removed
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Explicit wait policy for page objects
    #[must_use]
    pub const fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::from_millis(self.wait_timeout_ms, self.poll_interval_ms)
    }

    /// Implicit wait for new sessions
    #[must_use]
    pub const fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait)
    }
}
