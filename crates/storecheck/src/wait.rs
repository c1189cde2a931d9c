//! Explicit waits.
//!
//! A [`Waiter`] polls a [`BrowserSession`] until a [`Condition`] holds for a
//! locator or the [`WaitPolicy`] timeout expires. The condition is always
//! evaluated at least once, so an element that is already in the required
//! state is returned without sleeping.
//!
//! An empty match list or a lookup miss means "not yet" and the waiter keeps
//! polling. Any other backend failure, including a stale reference raised
//! while a condition is being evaluated, ends the wait immediately with that
//! failure so the caller can classify it. A waiter built with
//! [`Waiter::tolerating_stale`] treats a stale reference as "not yet" too.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::locator::Locator;
use crate::result::{DriverError, DriverResult, FailureKind};
use crate::session::{BrowserSession, SessionElement};

/// Default timeout for explicit waits (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (200ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Timeout and poll interval for explicit waits.
///
/// Built once and handed to a controller; there are no setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitPolicy {
    /// Create a policy from a timeout and poll interval
    #[must_use]
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Create a policy from millisecond values
    #[must_use]
    pub const fn from_millis(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(poll_interval_ms),
        )
    }

    /// Replace the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Wait timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// Readiness condition for a located element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// At least one element is attached to the DOM
    Presence,
    /// The first match is displayed
    Visibility,
    /// The first match is displayed and enabled
    Clickability,
    /// At least one element is attached; all matches are returned
    PresenceOfAll,
}

impl Condition {
    /// Short description for log lines and timeout messages
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Visibility => "visibility",
            Self::Clickability => "clickability",
            Self::PresenceOfAll => "presence of all",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Polls a session until a condition holds
#[derive(Debug)]
pub struct Waiter<'a, S> {
    session: &'a S,
    policy: WaitPolicy,
    stale_is_pending: bool,
}

impl<'a, S: BrowserSession> Waiter<'a, S> {
    /// Create a waiter over `session`
    #[must_use]
    pub const fn new(session: &'a S, policy: WaitPolicy) -> Self {
        Self {
            session,
            policy,
            stale_is_pending: false,
        }
    }

    /// Keep polling when a match goes stale while it is being checked
    #[must_use]
    pub const fn tolerating_stale(mut self) -> Self {
        self.stale_is_pending = true;
        self
    }

    /// Wait until the first match for `locator` satisfies `condition`.
    ///
    /// [`Condition::PresenceOfAll`] behaves like [`Condition::Presence`] here;
    /// use [`Waiter::until_all`] to get every match.
    pub async fn until(&self, locator: &Locator, condition: Condition) -> DriverResult<S::Element> {
        let mut found = self
            .poll(locator, condition, |elements| async move {
                let Some(first) = elements.into_iter().next() else {
                    return Ok(None);
                };
                let ready = match condition {
                    Condition::Presence | Condition::PresenceOfAll => true,
                    Condition::Visibility => first.is_displayed().await?,
                    Condition::Clickability => {
                        first.is_displayed().await? && first.is_enabled().await?
                    }
                };
                Ok(ready.then(|| vec![first]))
            })
            .await?;
        found
            .pop()
            .ok_or_else(|| DriverError::new(FailureKind::NoSuchElement, locator.to_string()))
    }

    /// Wait until at least one element matches and return all matches
    pub async fn until_all(&self, locator: &Locator) -> DriverResult<Vec<S::Element>> {
        self.poll(locator, Condition::PresenceOfAll, |elements| async move {
            Ok((!elements.is_empty()).then_some(elements))
        })
        .await
    }

    async fn poll<F, Fut>(
        &self,
        locator: &Locator,
        condition: Condition,
        check: F,
    ) -> DriverResult<Vec<S::Element>>
    where
        F: Fn(Vec<S::Element>) -> Fut,
        Fut: std::future::Future<Output = DriverResult<Option<Vec<S::Element>>>>,
    {
        let start = Instant::now();
        loop {
            let outcome = match self.session.find_all(locator).await {
                Ok(elements) => check(elements).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(Some(elements)) => {
                    tracing::trace!(
                        %locator,
                        %condition,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "wait satisfied"
                    );
                    return Ok(elements);
                }
                Ok(None) => {}
                Err(err) if self.is_not_yet(&err) => {}
                Err(err) => return Err(err),
            }

            if start.elapsed() >= self.policy.timeout() {
                return Err(DriverError::timeout(format!(
                    "{condition} of {locator} not reached after {}ms",
                    self.policy.timeout().as_millis()
                )));
            }
            tokio::time::sleep(self.policy.poll_interval()).await;
        }
    }

    /// Failures that only mean the page has not settled yet
    fn is_not_yet(&self, err: &DriverError) -> bool {
        match err.kind() {
            FailureKind::NoSuchElement => true,
            FailureKind::StaleElement => self.stale_is_pending,
            _ => false,
        }
    }
}
