// Browsing context - the capability surface the suite drives
//
// Everything the page objects do to the browser goes through this trait:
// navigation, element queries by selector, viewport, screenshots, network
// mocking and storage state. `PlaywrightContext` implements it over a real
// Playwright page; tests substitute an in-memory model of the application.

use crate::error::{Error, Result};
use crate::locator::Selector;
use crate::mock::MockResponse;
use crate::wait::{LoadState, POLL_INTERVAL, ReadyState, UrlMatch};
use async_trait::async_trait;
use playwright_rs::{StorageState, Viewport};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared handle on one browsing context (one tab/session).
pub type SharedContext = Arc<dyn BrowsingContext>;

/// One browser tab/session as seen by page objects.
///
/// Element operations take a compiled [`Selector`]; implementations evaluate
/// it against the live document on every call.
#[async_trait]
pub trait BrowsingContext: Send + Sync {
    /// Requests navigation to an absolute URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current URL of the page.
    fn url(&self) -> String;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &Selector) -> Result<usize>;

    async fn click(&self, selector: &Selector) -> Result<()>;

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()>;

    async fn text_content(&self, selector: &Selector) -> Result<Option<String>>;

    async fn input_value(&self, selector: &Selector) -> Result<String>;

    /// Whether `selector` matches a visible element right now. No waiting.
    async fn is_visible(&self, selector: &Selector) -> Result<bool>;

    /// `document.readyState` of the current page.
    async fn ready_state(&self) -> Result<ReadyState>;

    async fn set_viewport(&self, viewport: Viewport) -> Result<()>;

    /// PNG screenshot of the viewport.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Answers requests matching the glob `pattern` with `response`.
    async fn route(&self, pattern: &str, response: MockResponse) -> Result<()>;

    /// Cookies and local storage of the session.
    async fn storage_state(&self) -> Result<StorageState>;

    /// Blocks until the URL satisfies `matcher`.
    ///
    /// Fails with `Error::AssertionTimeout` when `timeout` elapses.
    async fn wait_for_url(&self, matcher: &UrlMatch, timeout: Duration) -> Result<()> {
        let start = Instant::now();

        loop {
            let url = self.url();
            if matcher.matches(&url) {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(Error::AssertionTimeout(format!(
                    "Expected {}, but URL was '{}' after {:?}",
                    matcher, url, timeout
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Blocks until the page reaches `state`.
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> Result<()> {
        let start = Instant::now();

        loop {
            let ready = self.ready_state().await?;
            if state.is_reached(ready) {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(Error::AssertionTimeout(format!(
                    "Expected load state {:?}, but document was {:?} after {:?}",
                    state, ready, timeout
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
