// PlaywrightContext - BrowsingContext over a live Playwright page
//
// Selectors are handed to `page.locator()` as rendered selector-engine
// strings. Driver errors are mapped onto the suite's action errors so the
// scenario boundary can classify them without knowing about the driver.

use crate::context::BrowsingContext;
use crate::error::{Error, Result};
use crate::locator::Selector;
use crate::mock::MockResponse;
use crate::wait::{ACTION_TIMEOUT, PAGE_LOAD_TIMEOUT, ReadyState};
use async_trait::async_trait;
use playwright_rs::{
    ClickOptions, FillOptions, FulfillOptions, GotoOptions, Locator, Page, Route, StorageState,
    Viewport, WaitUntil,
};
use std::time::Duration;

/// One Playwright page driven by the suite.
#[derive(Clone)]
pub struct PlaywrightContext {
    page: Page,
    action_timeout: Duration,
    navigation_timeout: Duration,
}

impl PlaywrightContext {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            action_timeout: ACTION_TIMEOUT,
            navigation_timeout: PAGE_LOAD_TIMEOUT,
        }
    }

    /// Sets the click/fill timeout.
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Sets the `goto` timeout.
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// The underlying page, for operations the suite does not wrap.
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn locator(&self, selector: &Selector) -> Locator {
        self.page.locator(&selector.to_string()).await
    }

    fn action_timeout_ms(&self) -> f64 {
        self.action_timeout.as_millis() as f64
    }
}

/// Maps driver failures for an element action onto suite errors.
fn action_error(selector: &Selector, error: playwright_rs::Error) -> Error {
    match error {
        playwright_rs::Error::ElementNotFound(_) => Error::ElementNotFound(selector.to_string()),
        playwright_rs::Error::Timeout(reason) => Error::NotActionable {
            selector: selector.to_string(),
            reason,
        },
        other => Error::Driver(other),
    }
}

#[async_trait]
impl BrowsingContext for PlaywrightContext {
    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "goto");
        let options = GotoOptions::new()
            .timeout(self.navigation_timeout)
            .wait_until(WaitUntil::Load);

        self.page
            .goto(url, Some(options))
            .await
            .map(|_| ())
            .map_err(|e| Error::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn url(&self) -> String {
        self.page.url()
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        let locator = self.locator(selector).await;
        locator.count().await.map_err(|e| action_error(selector, e))
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let options = ClickOptions::builder()
            .timeout(self.action_timeout_ms())
            .build();
        let locator = self.locator(selector).await;
        locator
            .click(Some(options))
            .await
            .map_err(|e| action_error(selector, e))
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
        let options = FillOptions::builder()
            .timeout(self.action_timeout_ms())
            .build();
        let locator = self.locator(selector).await;
        locator
            .fill(value, Some(options))
            .await
            .map_err(|e| action_error(selector, e))
    }

    async fn text_content(&self, selector: &Selector) -> Result<Option<String>> {
        let locator = self.locator(selector).await;
        locator
            .text_content()
            .await
            .map_err(|e| action_error(selector, e))
    }

    async fn input_value(&self, selector: &Selector) -> Result<String> {
        let locator = self.locator(selector).await;
        locator
            .input_value(None)
            .await
            .map_err(|e| action_error(selector, e))
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        let locator = self.locator(selector).await;
        locator
            .is_visible()
            .await
            .map_err(|e| action_error(selector, e))
    }

    async fn ready_state(&self) -> Result<ReadyState> {
        let raw = self.page.evaluate_value("document.readyState").await?;
        ReadyState::parse(&raw).ok_or_else(|| {
            Error::AssertionFailed(format!("unexpected document.readyState '{raw}'"))
        })
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        tracing::debug!(width = viewport.width, height = viewport.height, "set viewport");
        Ok(self.page.set_viewport_size(viewport).await?)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.page.screenshot(None).await?)
    }

    async fn route(&self, pattern: &str, response: MockResponse) -> Result<()> {
        self.page
            .route(pattern, move |route: Route| {
                let response = response.clone();
                async move {
                    let url = route.request().url().to_string();
                    tracing::debug!(%url, status = response.status, "fulfilling mocked route");
                    let options = FulfillOptions::builder()
                        .status(response.status)
                        .content_type(response.content_type)
                        .body_string(response.body)
                        .build();
                    let result = route.fulfill(Some(options)).await;
                    if let Err(e) = &result {
                        tracing::warn!(%url, error = %e, "failed to fulfill mocked route");
                    }
                    result
                }
            })
            .await?;
        Ok(())
    }

    async fn storage_state(&self) -> Result<StorageState> {
        let context = self.page.context()?;
        Ok(context.storage_state().await?)
    }
}

impl std::fmt::Debug for PlaywrightContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaywrightContext")
            .field("url", &self.page.url())
            .field("action_timeout", &self.action_timeout)
            .field("navigation_timeout", &self.navigation_timeout)
            .finish()
    }
}
