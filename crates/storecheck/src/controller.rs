//! Element interaction controller.
//!
//! The controller wraps a shared [`BrowserSession`] and turns its raw
//! primitives into bounded, classified interactions:
//!
//! - `click` waits for clickability and retries transient failures up to a
//!   budget. A wait timeout is never retried.
//! - `type_text`, `get_text` and `get_attribute` wait for visibility and fail
//!   on the first error.
//! - `element_visible` and `element_present` are probes: a timeout is `false`.
//! - `find_elements` returns every match once at least one is present; its
//!   timeout is the raw [`DriverError`].
//!
//! Click, type and read failures are always [`ElementInteractionError`].
//!
//! ## Click state machine
//!
//! ```text
//!   Waiting ──clickable──> Clickable ──click ok──> Clicked
//!      ^                       │
//!      └──transient, budget────┘
//!   Waiting ──timeout / exhausted / fail-fast──> Failed
//! ```

use std::sync::Arc;

use crate::locator::Locator;
use crate::logging::ComponentLogger;
use crate::result::{
    DriverResult, ElementInteractionError, InteractionOutcome, Operation,
};
use crate::retry::{RetryPolicy, RetryState};
use crate::session::{BrowserSession, SessionElement};
use crate::wait::{Condition, WaitPolicy, Waiter};

/// Retry budget used by [`InteractionController::click`]
pub const DEFAULT_CLICK_RETRIES: u32 = 3;

/// Waits, retries and classifies element interactions on one session
#[derive(Debug)]
pub struct InteractionController<S> {
    session: Arc<S>,
    wait: WaitPolicy,
    retry: RetryPolicy,
    logger: ComponentLogger,
}

impl<S> Clone for InteractionController<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            wait: self.wait,
            retry: self.retry.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S: BrowserSession> InteractionController<S> {
    /// Controller with the default wait and retry policies
    #[must_use]
    pub fn new(session: Arc<S>, logger: ComponentLogger) -> Self {
        Self {
            session,
            wait: WaitPolicy::default(),
            retry: RetryPolicy::default(),
            logger,
        }
    }

    /// Replace the wait policy
    #[must_use]
    pub fn with_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// Replace the retry rule table
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Same session and policies, logging under another component name
    #[must_use]
    pub fn for_component(&self, logger: ComponentLogger) -> Self {
        Self {
            logger,
            ..self.clone()
        }
    }

    /// Underlying session
    #[must_use]
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    /// Wait policy in effect
    #[must_use]
    pub const fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    /// Retry rule table in effect
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Component logger
    #[must_use]
    pub const fn logger(&self) -> &ComponentLogger {
        &self.logger
    }

    fn waiter(&self) -> Waiter<'_, S> {
        Waiter::new(self.session.as_ref(), self.wait)
    }

    /// Navigate to `url`
    pub async fn open(&self, url: &str) -> DriverResult<()> {
        self.logger.debug(format_args!("Opening {url}"));
        self.session.navigate(url).await
    }

    /// URL of the current page
    pub async fn current_url(&self) -> DriverResult<String> {
        self.session.current_url().await
    }

    /// Click with the default retry budget
    pub async fn click(&self, locator: &Locator) -> InteractionOutcome<S::Element> {
        self.click_with_retries(locator, DEFAULT_CLICK_RETRIES).await
    }

    /// Wait for `locator` to be clickable and click it.
    ///
    /// Failures the retry policy marks as transient re-enter the wait; the
    /// call makes at most `max_retries + 1` attempts. Timeouts end the call
    /// on the attempt they occur.
    pub async fn click_with_retries(
        &self,
        locator: &Locator,
        max_retries: u32,
    ) -> InteractionOutcome<S::Element> {
        let mut state = RetryState::new(max_retries);
        loop {
            let failure = match self.waiter().until(locator, Condition::Clickability).await {
                Ok(element) => match element.click().await {
                    Ok(()) => {
                        self.logger.debug(format_args!("Clicked {locator}"));
                        return Ok(element);
                    }
                    Err(err) => err,
                },
                Err(err) => err,
            };

            if failure.is_timeout() || !self.retry.is_retryable(failure.kind()) {
                return Err(self.fail(ElementInteractionError::new(
                    Operation::Click,
                    locator,
                    failure,
                )));
            }
            if !state.record_failure() {
                return Err(self.fail(ElementInteractionError::retries_exhausted(
                    locator,
                    max_retries,
                    state.failures(),
                    failure,
                )));
            }
            self.logger.warn(format_args!(
                "Retrying click for {locator} ({}), retry {}/{max_retries}",
                failure.kind(),
                state.failures()
            ));
        }
    }

    /// Wait for `locator` to be visible, clear it and type `text`
    pub async fn type_text(&self, locator: &Locator, text: &str) -> InteractionOutcome<()> {
        let result: DriverResult<()> = async {
            let element = self.waiter().until(locator, Condition::Visibility).await?;
            element.clear().await?;
            element.send_keys(text).await
        }
        .await;
        result.map_err(|err| self.fail(ElementInteractionError::new(Operation::Type, locator, err)))
    }

    /// Visible text of `locator`
    pub async fn get_text(&self, locator: &Locator) -> InteractionOutcome<String> {
        let result: DriverResult<String> = async {
            let element = self.waiter().until(locator, Condition::Visibility).await?;
            element.text().await
        }
        .await;
        result.map_err(|err| {
            self.fail(ElementInteractionError::new(
                Operation::ReadText,
                locator,
                err,
            ))
        })
    }

    /// Attribute `name` of `locator`; `None` when the attribute is absent
    pub async fn get_attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> InteractionOutcome<Option<String>> {
        let result: DriverResult<Option<String>> = async {
            let element = self.waiter().until(locator, Condition::Visibility).await?;
            element.attribute(name).await
        }
        .await;
        result.map_err(|err| {
            self.fail(ElementInteractionError::new(
                Operation::ReadAttribute(name.to_string()),
                locator,
                err,
            ))
        })
    }

    /// Whether `locator` becomes visible within the wait timeout
    pub async fn element_visible(&self, locator: &Locator) -> DriverResult<bool> {
        self.probe(locator, Condition::Visibility).await
    }

    /// Whether `locator` becomes present within the wait timeout
    pub async fn element_present(&self, locator: &Locator) -> DriverResult<bool> {
        self.probe(locator, Condition::Presence).await
    }

    /// Every match for `locator`, once at least one is present
    pub async fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<S::Element>> {
        self.waiter().until_all(locator).await
    }

    async fn probe(&self, locator: &Locator, condition: Condition) -> DriverResult<bool> {
        match self.waiter().tolerating_stale().until(locator, condition).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_timeout() => {
                self.logger
                    .debug(format_args!("{condition} of {locator} not reached"));
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn fail(&self, error: ElementInteractionError) -> ElementInteractionError {
        self.logger.error(&error);
        error
    }
}
