//! Retry classification for element interactions.
//!
//! A [`RetryPolicy`] is a table from [`FailureKind`] to [`Disposition`]. The
//! controller consults it after every failed click attempt; kinds without a
//! rule use the policy's fallback.

use std::collections::HashMap;

use crate::result::FailureKind;

/// What to do with a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Try the whole wait-then-act sequence again
    Retry,
    /// Stop and report the failure
    FailFast,
}

/// Table of failure kinds to dispositions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    rules: HashMap<FailureKind, Disposition>,
    fallback: Disposition,
}

impl Default for RetryPolicy {
    /// Stale references, intercepted clicks and non-interactable elements are
    /// transient; everything else (including wait timeouts) fails fast.
    fn default() -> Self {
        Self::new(Disposition::FailFast)
            .with_rule(FailureKind::StaleElement, Disposition::Retry)
            .with_rule(FailureKind::ClickIntercepted, Disposition::Retry)
            .with_rule(FailureKind::NotInteractable, Disposition::Retry)
            .with_rule(FailureKind::Timeout, Disposition::FailFast)
    }
}

impl RetryPolicy {
    /// Empty table with the given fallback
    #[must_use]
    pub fn new(fallback: Disposition) -> Self {
        Self {
            rules: HashMap::new(),
            fallback,
        }
    }

    /// Add or replace a rule
    #[must_use]
    pub fn with_rule(mut self, kind: FailureKind, disposition: Disposition) -> Self {
        self.rules.insert(kind, disposition);
        self
    }

    /// Disposition for a failure kind
    #[must_use]
    pub fn disposition(&self, kind: FailureKind) -> Disposition {
        self.rules.get(&kind).copied().unwrap_or(self.fallback)
    }

    /// Whether a failure kind is retried
    #[must_use]
    pub fn is_retryable(&self, kind: FailureKind) -> bool {
        self.disposition(kind) == Disposition::Retry
    }
}

/// Retry budget for a single interaction call.
///
/// With a budget of `R` retries the call makes at most `R + 1` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    failures: u32,
    max_retries: u32,
}

impl RetryState {
    /// Fresh budget
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            failures: 0,
            max_retries,
        }
    }

    /// Record a transient failure; returns whether another attempt is allowed
    pub fn record_failure(&mut self) -> bool {
        match self.failures.checked_add(1) {
            Some(failures) => {
                self.failures = failures;
                failures <= self.max_retries
            }
            None => false,
        }
    }

    /// Transient failures recorded so far
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }

    /// Configured retry budget
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
