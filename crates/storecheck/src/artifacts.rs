//! Failure artifacts.
//!
//! Screenshots of failed UI scenarios are written as
//! `{dir}/{scenario}_{YYYYmmdd_HHMMSS}.png`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::result::StoreResult;
use crate::session::BrowserSession;

/// Default screenshot directory, relative to the working directory
pub const DEFAULT_SCREENSHOT_DIR: &str = "reports/screenshots";

/// Writes screenshots into one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl Default for ScreenshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENSHOT_DIR)
    }
}

impl ScreenshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a screenshot of `scenario` taken at `at`
    #[must_use]
    pub fn file_name<Tz: TimeZone>(scenario: &str, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let stem: String = scenario
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{stem}_{}.png", at.format("%Y%m%d_%H%M%S"))
    }

    /// Write `png` for `scenario`, creating the directory if needed
    pub fn save(&self, scenario: &str, png: &[u8]) -> StoreResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(scenario, &Local::now()));
        std::fs::write(&path, png)?;
        tracing::info!(path = %path.display(), "saved failure screenshot");
        Ok(path)
    }

    /// Take a screenshot from `session` and save it for `scenario`
    pub async fn capture<S: BrowserSession>(
        &self,
        session: &S,
        scenario: &str,
    ) -> StoreResult<PathBuf> {
        let png = session.screenshot().await?;
        self.save(scenario, &png)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockSession;
    use chrono::Utc;

    #[test]
    fn test_file_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            ScreenshotStore::file_name("Login with valid user", &at),
            "Login_with_valid_user_20240309_140507.png"
        );
        assert_eq!(
            ScreenshotStore::file_name("a/b", &at),
            "a_b_20240309_140507.png"
        );
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(dir.path().join("reports/screenshots"));
        let path = store.save("checkout", b"\x89PNG").unwrap();
        assert!(path.starts_with(store.dir()));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
    }

    #[tokio::test]
    async fn test_capture_from_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = MockSession::new();
        session.set_screenshot(vec![1, 2, 3]);
        let path = ScreenshotStore::new(dir.path())
            .capture(&session, "empty cart")
            .await
            .unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("empty_cart_"));
    }

    #[tokio::test]
    async fn test_capture_without_screenshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let session = MockSession::new();
        assert!(ScreenshotStore::new(dir.path())
            .capture(&session, "x")
            .await
            .is_err());
    }
}
