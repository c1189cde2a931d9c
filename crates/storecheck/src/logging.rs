//! Named component loggers over `tracing`.
//!
//! Every controller, page object and HTTP client carries a [`ComponentLogger`]
//! whose name shows up as the `component` field of each event, so a run log
//! reads `component="LoginPage"` rather than a module path.

use std::fmt;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter
pub const LOG_ENV: &str = "STORECHECK_LOG";

/// A logger bound to a component name
#[derive(Clone, PartialEq, Eq)]
pub struct ComponentLogger {
    name: Arc<str>,
}

impl ComponentLogger {
    /// Logger for `name`
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
        }
    }

    /// Component name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(component = %self.name, "{message}");
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(component = %self.name, "{message}");
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(component = %self.name, "{message}");
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(component = %self.name, "{message}");
    }
}

impl fmt::Debug for ComponentLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentLogger").field(&self.name).finish()
    }
}

/// Install the global fmt subscriber.
///
/// The filter comes from `STORECHECK_LOG`, then `RUST_LOG`, then
/// `default_level`. Events go to stderr. Returns `false` when a subscriber
/// was already installed, which is normal when tests share a process.
pub fn init(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        let logger = ComponentLogger::new("CartPage");
        assert_eq!(logger.name(), "CartPage");
    }

    #[test]
    fn test_clones_share_name() {
        let logger = ComponentLogger::new("StoreClient");
        let clone = logger.clone();
        assert_eq!(logger, clone);
        assert_eq!(format!("{clone:?}"), "ComponentLogger(\"StoreClient\")");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let _ = init("info");
        assert!(!init("debug"));
        ComponentLogger::new("test").info("after init");
    }
}
