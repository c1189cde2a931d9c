//! Storecheck: UI and API end-to-end checks for the demo storefront.
//!
//! The UI side drives a browser through page objects built on one
//! [`InteractionController`], which waits for elements to become usable and
//! retries transient click failures. The API side is a small typed
//! [`StoreClient`] for the catalog and sign-in endpoints.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌───────────────────────┐
//! │ Feature      │   │ Page objects   │   │ InteractionController │
//! │ steps (BDD)  │──►│ (login, cart,  │──►│  wait + retry policy  │
//! │              │   │  checkout ...) │   └───────────┬───────────┘
//! └──────┬───────┘   └────────────────┘               │
//!        │                                  ┌─────────▼─────────┐
//!        │ StoreClient (reqwest)            │  BrowserSession   │
//!        ▼                                  │ (WebDriver, mock) │
//!   storefront API                          └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storecheck::{factory::SessionPlan, ShippingDetails, Storefront, SuiteConfig};
//!
//! # async fn run() -> storecheck::StoreResult<()> {
//! let config = SuiteConfig::load(None)?;
//! let session = Arc::new(SessionPlan::from_env(&config)?.connect(&config).await?);
//! let store = Storefront::new(session, &config);
//! let message = store
//!     .purchase(("demouser", "testingisfun99"), "iPhone 12", &ShippingDetails::default())
//!     .await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::large_stack_frames))]

pub mod api;
pub mod artifacts;
pub mod config;
pub mod controller;
pub mod factory;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod pages;
pub mod result;
pub mod retry;
pub mod session;
pub mod wait;
#[cfg(feature = "webdriver")]
pub mod webdriver;

pub use api::{ApiError, ApiResponse, Product, StoreClient};
pub use artifacts::ScreenshotStore;
pub use config::{BrowserChoice, BrowserStackTarget, RunMode, SuiteConfig};
pub use factory::SessionPlan;
pub use controller::{InteractionController, DEFAULT_CLICK_RETRIES};
pub use locator::Locator;
pub use logging::ComponentLogger;
pub use pages::{PageObject, ShippingDetails, Storefront};
pub use result::{
    DriverError, DriverResult, ElementInteractionError, FailureKind, InteractionCause,
    InteractionOutcome, Operation, StoreError, StoreResult,
};
pub use retry::{Disposition, RetryPolicy};
pub use session::{BrowserSession, SessionElement};
pub use wait::{Condition, WaitPolicy};
#[cfg(feature = "webdriver")]
pub use webdriver::WebDriverSession;
