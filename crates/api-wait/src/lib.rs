//! api-wait: wait for API responses in browser-driven tests
//!
//! Browser tests often need to hold until the page has talked to its backend:
//! a list finished loading, a form submission was accepted. [`wait_for_api`]
//! waits for a response whose URL contains an endpoint, with a given method
//! and status. If the response does not show up in time, the page is reloaded
//! and the wait retried, up to a bounded number of attempts.
//!
//! The crate does not drive a browser. The page is reached through the
//! [`Session`] trait, which any driver (or a test double) can implement.
//!
//! # Examples
//!
//! ## Waiting for a response
//!
//! ```ignore
//! use api_wait::{wait_for_api, ApiMatcher, HttpMethod, StatusCode};
//!
//! async fn locations_loaded(page: &impl api_wait::Session) -> api_wait::Result<()> {
//!     let matcher = ApiMatcher::new("/api/locations", StatusCode::Ok, HttpMethod::Get);
//!
//!     // 10s per attempt, 2 attempts, one reload in between
//!     let response = wait_for_api(page, &matcher, None).await?;
//!     assert!(response.ok());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom retry budget
//!
//! ```ignore
//! use api_wait::{wait_for_api, ApiMatcher, HttpMethod, StatusCode, WaitForApiOptions};
//! use std::time::Duration;
//!
//! let options = WaitForApiOptions::new()
//!     .timeout(Duration::from_secs(3))
//!     .max_attempts(4);
//! let matcher = ApiMatcher::new("/api/orders", StatusCode::Created, HttpMethod::Post);
//! let response = wait_for_api(&page, &matcher, Some(options)).await?;
//! ```
//!
//! ## Implementing a session on top of response events
//!
//! ```ignore
//! use api_wait::{HttpMethod, Response, ResponseFeed, ResponsePredicate, Session, SessionFuture};
//!
//! struct DriverPage {
//!     feed: ResponseFeed, // filled from the driver's "response" event
//! }
//!
//! impl Session for DriverPage {
//!     fn observe_response(&self, predicate: ResponsePredicate) -> SessionFuture<'_, Response> {
//!         self.feed.wait_for(predicate)
//!     }
//!
//!     fn reload(&self) -> SessionFuture<'_, ()> {
//!         Box::pin(async move { /* driver reload */ Ok(()) })
//!     }
//!
//!     fn direct_request<'a>(&'a self, url: &'a str, method: HttpMethod) -> SessionFuture<'a, Response> {
//!         Box::pin(async move { /* driver request */ Ok(Response::new(url, method.as_str(), 200)) })
//!     }
//! }
//! ```

pub mod api;
mod error;
mod feed;
pub mod protocol;
mod session;
mod wait_for_api;

/// Default per-attempt timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;

/// Default number of attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

// Re-export error types
pub use error::{Error, Result};

// Re-export the waiter and its tuning constants
pub use wait_for_api::{FAILURE_LOG_THRESHOLD, PROBE_UNAVAILABLE, wait_for_api};

// Re-export driver-facing types
pub use feed::{DEFAULT_FEED_CAPACITY, ResponseFeed};
pub use session::{Session, SessionFuture};

// Re-export matching types
pub use protocol::{ApiMatcher, HttpMethod, Response, ResponsePredicate, StatusCode};

// Re-export options
pub use api::WaitForApiOptions;
