//! Scripted in-memory browser session.
//!
//! [`MockSession`] and [`MockElement`] implement the session traits without a
//! browser. Elements are registered against a locator and can be scripted to
//! appear late, stay hidden, fail clicks with a sequence of failure kinds, or
//! reveal other elements when clicked. Every call is recorded so tests can
//! assert on what the controller actually did.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::{DriverError, DriverResult, FailureKind};
use crate::session::{BrowserSession, SessionElement};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct SessionState {
    elements: Vec<(Locator, MockElement)>,
    current_url: String,
    history: Vec<String>,
    find_calls: HashMap<Locator, usize>,
    lookup_failures: HashMap<Locator, FailureKind>,
    navigate_failure: Option<FailureKind>,
    screenshot: Option<Vec<u8>>,
    quit: bool,
}

/// In-memory [`BrowserSession`]
#[derive(Debug, Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<SessionState>>,
}

impl MockSession {
    /// Empty session on `about:blank`
    #[must_use]
    pub fn new() -> Self {
        let session = Self::default();
        lock(&session.state).current_url = "about:blank".to_string();
        session
    }

    /// Register an element under `locator`.
    ///
    /// Several elements may share a locator; lookups return them in
    /// registration order.
    pub fn add_element(&self, locator: Locator, element: MockElement) {
        element.attach(&locator, Arc::downgrade(&self.state));
        lock(&self.state).elements.push((locator, element));
    }

    /// Remove every element registered under `locator`
    pub fn remove_elements(&self, locator: &Locator) {
        lock(&self.state).elements.retain(|(l, _)| l != locator);
    }

    /// Make every lookup of `locator` fail with `kind`
    pub fn fail_lookups(&self, locator: Locator, kind: FailureKind) {
        lock(&self.state).lookup_failures.insert(locator, kind);
    }

    /// Make navigation fail with `kind`
    pub fn fail_navigation(&self, kind: FailureKind) {
        lock(&self.state).navigate_failure = Some(kind);
    }

    /// Set the bytes returned by `screenshot`
    pub fn set_screenshot(&self, png: Vec<u8>) {
        lock(&self.state).screenshot = Some(png);
    }

    /// Number of lookups performed for `locator`
    #[must_use]
    pub fn find_calls(&self, locator: &Locator) -> usize {
        lock(&self.state)
            .find_calls
            .get(locator)
            .copied()
            .unwrap_or(0)
    }

    /// Recorded calls, e.g. `navigate:https://...` or `click:id=signin`
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }

    /// Whether a call starting with `prefix` was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        lock(&self.state)
            .history
            .iter()
            .any(|call| call.starts_with(prefix))
    }

    /// Whether `quit` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock(&self.state).quit
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let mut state = lock(&self.state);
        state.history.push(format!("navigate:{url}"));
        if let Some(kind) = state.navigate_failure {
            return Err(DriverError::new(kind, format!("navigation to {url} failed")));
        }
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<String> {
        Ok(lock(&self.state).current_url.clone())
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<MockElement>> {
        let mut state = lock(&self.state);
        *state.find_calls.entry(locator.clone()).or_insert(0) += 1;
        if let Some(kind) = state.lookup_failures.get(locator) {
            return Err(DriverError::new(*kind, format!("lookup of {locator} failed")));
        }
        Ok(state
            .elements
            .iter()
            .filter(|(l, element)| l == locator && element.is_attached())
            .map(|(_, element)| element.clone())
            .collect())
    }

    async fn screenshot(&self) -> DriverResult<Vec<u8>> {
        let mut state = lock(&self.state);
        state.history.push("screenshot".to_string());
        state
            .screenshot
            .clone()
            .ok_or_else(|| DriverError::new(FailureKind::Other, "no mock screenshot set"))
    }

    async fn quit(&self) -> DriverResult<()> {
        let mut state = lock(&self.state);
        state.history.push("quit".to_string());
        state.quit = true;
        Ok(())
    }
}

#[derive(Debug)]
struct ElementState {
    label: String,
    text: String,
    attributes: HashMap<String, String>,
    value: String,
    displayed: bool,
    enabled: bool,
    attached_at: Instant,
    appear_delay: Duration,
    click_failures: VecDeque<FailureKind>,
    always_fail_click: Option<FailureKind>,
    read_failure: Option<FailureKind>,
    input_failure: Option<FailureKind>,
    stale_probes: usize,
    click_attempts: usize,
    clicks: usize,
    reveals: Vec<(Locator, MockElement)>,
    removes: Vec<Locator>,
    session: Weak<Mutex<SessionState>>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            label: String::new(),
            text: String::new(),
            attributes: HashMap::new(),
            value: String::new(),
            displayed: true,
            enabled: true,
            attached_at: Instant::now(),
            appear_delay: Duration::ZERO,
            click_failures: VecDeque::new(),
            always_fail_click: None,
            read_failure: None,
            input_failure: None,
            stale_probes: 0,
            click_attempts: 0,
            clicks: 0,
            reveals: Vec::new(),
            removes: Vec::new(),
            session: Weak::new(),
        }
    }
}

/// In-memory [`SessionElement`].
///
/// Clones share state, so a test can keep a handle and inspect it after the
/// controller has used it.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    state: Arc<Mutex<ElementState>>,
}

impl MockElement {
    /// Visible, enabled element with no text
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        lock(&self.state).text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        lock(&self.state).attributes.insert(name.into(), value.into());
        self
    }

    /// Attached but not displayed
    #[must_use]
    pub fn hidden(self) -> Self {
        lock(&self.state).displayed = false;
        self
    }

    /// Displayed but disabled
    #[must_use]
    pub fn disabled(self) -> Self {
        lock(&self.state).enabled = false;
        self
    }

    /// Only attach to the DOM `delay` after being added to a session
    #[must_use]
    pub fn appearing_after(self, delay: Duration) -> Self {
        lock(&self.state).appear_delay = delay;
        self
    }

    /// Fail the next clicks with these kinds, in order, then succeed
    #[must_use]
    pub fn fail_clicks(self, kinds: impl IntoIterator<Item = FailureKind>) -> Self {
        lock(&self.state).click_failures.extend(kinds);
        self
    }

    /// Fail every click with `kind`
    #[must_use]
    pub fn fail_clicks_always(self, kind: FailureKind) -> Self {
        lock(&self.state).always_fail_click = Some(kind);
        self
    }

    /// Fail text and attribute reads with `kind`
    #[must_use]
    pub fn fail_reads(self, kind: FailureKind) -> Self {
        lock(&self.state).read_failure = Some(kind);
        self
    }

    /// Fail `clear` and `send_keys` with `kind`
    #[must_use]
    pub fn fail_input(self, kind: FailureKind) -> Self {
        lock(&self.state).input_failure = Some(kind);
        self
    }

    /// Report a stale reference for the first `probes` visibility checks
    #[must_use]
    pub fn stale_for(self, probes: usize) -> Self {
        lock(&self.state).stale_probes = probes;
        self
    }

    /// Register `element` under `locator` when this element is clicked
    #[must_use]
    pub fn reveals_on_click(self, locator: Locator, element: Self) -> Self {
        lock(&self.state).reveals.push((locator, element));
        self
    }

    /// Remove elements under `locator` when this element is clicked
    #[must_use]
    pub fn removes_on_click(self, locator: Locator) -> Self {
        lock(&self.state).removes.push(locator);
        self
    }

    /// Set the displayed flag
    pub fn set_displayed(&self, displayed: bool) {
        lock(&self.state).displayed = displayed;
    }

    /// Replace the rendered text
    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.state).text = text.into();
    }

    /// Click calls received, successful or not
    #[must_use]
    pub fn click_attempts(&self) -> usize {
        lock(&self.state).click_attempts
    }

    /// Successful clicks
    #[must_use]
    pub fn clicks(&self) -> usize {
        lock(&self.state).clicks
    }

    /// Current input value
    #[must_use]
    pub fn value(&self) -> String {
        lock(&self.state).value.clone()
    }

    fn attach(&self, locator: &Locator, session: Weak<Mutex<SessionState>>) {
        let mut state = lock(&self.state);
        state.label = locator.to_string();
        state.attached_at = Instant::now();
        state.session = session;
    }

    fn is_attached(&self) -> bool {
        let state = lock(&self.state);
        state.attached_at.elapsed() >= state.appear_delay
    }

    fn record(state: &ElementState, call: String) {
        if let Some(session) = state.session.upgrade() {
            lock(&session).history.push(call);
        }
    }
}

#[async_trait]
impl SessionElement for MockElement {
    async fn click(&self) -> DriverResult<()> {
        let (reveals, removes, session) = {
            let mut state = lock(&self.state);
            state.click_attempts += 1;
            Self::record(&state, format!("click:{}", state.label));
            let failure = state
                .click_failures
                .pop_front()
                .or(state.always_fail_click);
            if let Some(kind) = failure {
                return Err(DriverError::new(
                    kind,
                    format!("click on {} failed", state.label),
                ));
            }
            state.clicks += 1;
            (
                std::mem::take(&mut state.reveals),
                std::mem::take(&mut state.removes),
                state.session.upgrade(),
            )
        };
        if let Some(session) = session {
            let handle = Arc::downgrade(&session);
            let mut session = lock(&session);
            session
                .elements
                .retain(|(locator, _)| !removes.contains(locator));
            for (locator, element) in reveals {
                element.attach(&locator, handle.clone());
                session.elements.push((locator, element));
            }
        }
        Ok(())
    }

    async fn clear(&self) -> DriverResult<()> {
        let mut state = lock(&self.state);
        Self::record(&state, format!("clear:{}", state.label));
        if let Some(kind) = state.input_failure {
            return Err(DriverError::new(kind, "clear failed"));
        }
        state.value.clear();
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> DriverResult<()> {
        let mut state = lock(&self.state);
        Self::record(&state, format!("send_keys:{}:{text}", state.label));
        if let Some(kind) = state.input_failure {
            return Err(DriverError::new(kind, "send_keys failed"));
        }
        state.value.push_str(text);
        Ok(())
    }

    async fn text(&self) -> DriverResult<String> {
        let state = lock(&self.state);
        if let Some(kind) = state.read_failure {
            return Err(DriverError::new(kind, "text read failed"));
        }
        Ok(if state.displayed {
            state.text.clone()
        } else {
            String::new()
        })
    }

    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        let state = lock(&self.state);
        if let Some(kind) = state.read_failure {
            return Err(DriverError::new(kind, "attribute read failed"));
        }
        if name == "value" && !state.attributes.contains_key("value") {
            return Ok(Some(state.value.clone()));
        }
        Ok(state.attributes.get(name).cloned())
    }

    async fn is_displayed(&self) -> DriverResult<bool> {
        let mut state = lock(&self.state);
        if state.stale_probes > 0 {
            state.stale_probes -= 1;
            return Err(DriverError::new(
                FailureKind::StaleElement,
                format!("{} is stale", state.label),
            ));
        }
        Ok(state.displayed)
    }

    async fn is_enabled(&self) -> DriverResult<bool> {
        Ok(lock(&self.state).enabled)
    }
}
