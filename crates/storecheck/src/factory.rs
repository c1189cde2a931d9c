//! Session factory.
//!
//! [`SessionPlan::resolve`] turns a [`SuiteConfig`] plus environment into a
//! WebDriver endpoint and capabilities without touching the network, so every
//! configuration error surfaces before a browser is requested.
//! [`SessionPlan::connect`] then starts the session.

use serde_json::{json, Map, Value};

use crate::config::{BrowserChoice, BrowserStackTarget, Engine, RunMode, SuiteConfig};
use crate::result::{StoreError, StoreResult};

/// BrowserStack Automate hub
pub const BROWSERSTACK_HUB: &str = "hub-cloud.browserstack.com/wd/hub";

/// Arguments every Chrome session gets
const CHROME_STABILITY_ARGS: [&str; 6] = [
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-infobars",
    "--disable-popup-blocking",
    "--disable-blink-features=AutomationControlled",
];

/// Endpoint and capabilities for one session
#[derive(Clone, PartialEq)]
pub struct SessionPlan {
    run_mode: RunMode,
    url: String,
    display_endpoint: String,
    capabilities: Map<String, Value>,
}

impl std::fmt::Debug for SessionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPlan")
            .field("run_mode", &self.run_mode)
            .field("endpoint", &self.display_endpoint)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl SessionPlan {
    /// Resolve the plan for `config`, reading `GRID_URL`,
    /// `BROWSERSTACK_USERNAME` and `BROWSERSTACK_ACCESS_KEY` through `lookup`
    pub fn resolve<F>(config: &SuiteConfig, lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match config.run_mode {
            RunMode::Local => Ok(Self {
                run_mode: RunMode::Local,
                url: config.webdriver_url.clone(),
                display_endpoint: config.webdriver_url.clone(),
                capabilities: local_capabilities(config.browser),
            }),
            RunMode::Grid => {
                let grid_url = config
                    .grid_url
                    .clone()
                    .or_else(|| lookup("GRID_URL"))
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| {
                        StoreError::config(
                            "GRID_URL must be configured when run_mode is set to 'grid'.",
                        )
                    })?;
                Ok(Self {
                    run_mode: RunMode::Grid,
                    display_endpoint: grid_url.clone(),
                    url: grid_url,
                    capabilities: grid_capabilities(config.browser),
                })
            }
            RunMode::BrowserStack => {
                let credential = |key: &str| lookup(key).filter(|v| !v.is_empty());
                let (Some(user), Some(key)) = (
                    credential("BROWSERSTACK_USERNAME"),
                    credential("BROWSERSTACK_ACCESS_KEY"),
                ) else {
                    return Err(StoreError::config(
                        "BROWSERSTACK_USERNAME and BROWSERSTACK_ACCESS_KEY must be set to run tests in BrowserStack.",
                    ));
                };
                Ok(Self {
                    run_mode: RunMode::BrowserStack,
                    url: format!("https://{user}:{key}@{BROWSERSTACK_HUB}"),
                    display_endpoint: format!("https://{BROWSERSTACK_HUB}"),
                    capabilities: browserstack_capabilities(&config.browserstack),
                })
            }
        }
    }

    /// Resolve against the process environment
    pub fn from_env(config: &SuiteConfig) -> StoreResult<Self> {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    #[must_use]
    pub const fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// Endpoint safe to print (no credentials)
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.display_endpoint
    }

    #[must_use]
    pub const fn capabilities(&self) -> &Map<String, Value> {
        &self.capabilities
    }

    /// Start the session and apply the configured implicit wait
    #[cfg(feature = "webdriver")]
    pub async fn connect(
        &self,
        config: &SuiteConfig,
    ) -> StoreResult<crate::webdriver::WebDriverSession> {
        tracing::info!(
            run_mode = %self.run_mode,
            endpoint = %self.display_endpoint,
            "starting browser session"
        );
        let session = crate::webdriver::WebDriverSession::connect(
            &self.url,
            self.display_endpoint.clone(),
            self.capabilities.clone(),
        )
        .await?;
        session.set_implicit_wait(config.implicit_wait()).await?;
        Ok(session)
    }
}

fn chrome_options(headless: bool, extra: &[&str]) -> Value {
    let mut args: Vec<&str> = if headless {
        vec!["--headless=new", "--window-size=1600,1000"]
    } else {
        vec!["--start-maximized"]
    };
    args.extend_from_slice(extra);
    json!({ "args": args })
}

fn firefox_options(headless: bool) -> Value {
    let args: Vec<&str> = if headless {
        vec!["--headless", "--width=1600", "--height=1000"]
    } else {
        Vec::new()
    };
    json!({
        "args": args,
        "prefs": {
            "dom.disable_beforeunload": true,
            "dom.popup_maximum": 0,
            "privacy.trackingprotection.enabled": false,
        }
    })
}

fn local_capabilities(browser: BrowserChoice) -> Map<String, Value> {
    let mut caps = Map::new();
    match browser.engine() {
        Engine::Chrome => {
            caps.insert("browserName".into(), json!("chrome"));
            caps.insert(
                "goog:chromeOptions".into(),
                chrome_options(browser.is_headless(), &CHROME_STABILITY_ARGS),
            );
        }
        Engine::Firefox => {
            caps.insert("browserName".into(), json!("firefox"));
            caps.insert(
                "moz:firefoxOptions".into(),
                firefox_options(browser.is_headless()),
            );
        }
    }
    caps
}

fn grid_capabilities(browser: BrowserChoice) -> Map<String, Value> {
    let mut caps = Map::new();
    match browser.engine() {
        Engine::Chrome => {
            let mut args = vec!["--disable-dev-shm-usage", "--no-sandbox"];
            if browser.is_headless() {
                args.insert(0, "--headless=new");
            }
            caps.insert("browserName".into(), json!("chrome"));
            caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
        }
        Engine::Firefox => {
            let args: Vec<&str> = if browser.is_headless() {
                vec!["-headless"]
            } else {
                Vec::new()
            };
            caps.insert("browserName".into(), json!("firefox"));
            caps.insert("moz:firefoxOptions".into(), json!({ "args": args }));
        }
    }
    caps
}

fn browserstack_capabilities(target: &BrowserStackTarget) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert("browserName".into(), json!(target.browser_name));
    caps.insert("browserVersion".into(), json!(target.browser_version));
    caps.insert(
        "bstack:options".into(),
        json!({
            "os": target.os_name,
            "osVersion": target.os_version,
            "sessionName": target.session_name,
            "buildName": target.build_name,
        }),
    );
    caps
}
