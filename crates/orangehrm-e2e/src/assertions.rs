// Assertions - Auto-retry assertions for element handles
//
// Provides an expect() API with auto-retry logic matching Playwright's
// assertions. Text assertions compare trimmed text exactly; `to_contain_text`
// exists for the few places where the UI decorates a message.

use crate::element::ElementHandle;
use crate::error::{Error, Result};
use crate::wait::{DEFAULT_TIMEOUT, POLL_INTERVAL};
use std::time::{Duration, Instant};

/// Creates an expectation for an element handle with auto-retry behavior.
///
/// Assertions will retry until they pass or timeout (default: 5 seconds).
///
/// # Example
///
/// ```ignore
/// use orangehrm_e2e::expect;
/// use std::time::Duration;
///
/// let alert = login.elements().get("errorAlert")?;
/// expect(alert.clone()).to_have_text("Invalid credentials").await?;
/// expect(alert.clone())
///     .with_timeout(Duration::from_secs(3))
///     .not()
///     .to_be_visible()
///     .await?;
/// ```
pub fn expect(handle: ElementHandle) -> Expectation {
    Expectation::new(handle)
}

/// Expectation wraps a handle and provides assertion methods with auto-retry.
pub struct Expectation {
    handle: ElementHandle,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* methods consume self, matching the expect API's chained style
#[allow(clippy::wrong_self_convention)]
impl Expectation {
    pub(crate) fn new(handle: ElementHandle) -> Self {
        Self {
            handle,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    ///
    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the element is visible.
    pub async fn to_be_visible(self) -> Result<()> {
        let start = Instant::now();
        let selector = self.handle.selector().to_string();

        loop {
            // A failed lookup means "not visible"
            let is_visible = self.handle.is_visible().await.unwrap_or(false);
            let matches = if self.negate { !is_visible } else { is_visible };

            if matches {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = if self.negate {
                    format!(
                        "Expected element '{}' NOT to be visible, but it was visible after {:?}",
                        selector, self.timeout
                    )
                } else {
                    format!(
                        "Expected element '{}' to be visible, but it was not visible after {:?}",
                        selector, self.timeout
                    )
                };
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Asserts that the element is hidden (not visible or detached).
    pub async fn to_be_hidden(self) -> Result<()> {
        let negated = Expectation {
            negate: !self.negate,
            ..self
        };
        negated.to_be_visible().await
    }

    /// Asserts that the element's trimmed text equals `expected`.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let expected = expected.trim().to_string();
        self.poll_text("to have text", &expected, |actual| actual == expected)
            .await
    }

    /// Asserts that the element's text contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        let wanted = expected.to_string();
        self.poll_text("to contain text", expected, |actual| actual.contains(&wanted))
            .await
    }

    /// Asserts that an input's value equals `expected`.
    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        let start = Instant::now();
        let selector = self.handle.selector().to_string();

        loop {
            let observed = self.handle.input_value().await;
            let actual = observed.as_deref().unwrap_or_default();
            let matches = (observed.is_ok() && actual == expected) != self.negate;

            if matches {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                return Err(Error::AssertionTimeout(format!(
                    "Expected element '{}' {}to have value '{}', but value was {} after {:?}",
                    selector,
                    if self.negate { "NOT " } else { "" },
                    expected,
                    describe(&observed.map(Some)),
                    self.timeout
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Asserts the number of matching elements.
    pub async fn to_have_count(self, expected: usize) -> Result<()> {
        let start = Instant::now();
        let selector = self.handle.selector().to_string();

        loop {
            let count = self.handle.count().await.unwrap_or(0);
            if (count == expected) != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                return Err(Error::AssertionTimeout(format!(
                    "Expected '{}' {}to match {} element(s), found {} after {:?}",
                    selector,
                    if self.negate { "NOT " } else { "" },
                    expected,
                    count,
                    self.timeout
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn poll_text<F>(self, verb: &str, expected: &str, check: F) -> Result<()>
    where
        F: Fn(&str) -> bool,
    {
        let start = Instant::now();
        let selector = self.handle.selector().to_string();

        loop {
            let observed = self
                .handle
                .text_content()
                .await
                .map(|t| t.map(|s| s.trim().to_string()));
            let hit = matches!(&observed, Ok(Some(text)) if check(text));

            if hit != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                return Err(Error::AssertionTimeout(format!(
                    "Expected element '{}' {}{} '{}', but text was {} after {:?}",
                    selector,
                    if self.negate { "NOT " } else { "" },
                    verb,
                    expected,
                    describe(&observed),
                    self.timeout
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn describe(observed: &Result<Option<String>>) -> String {
    match observed {
        Ok(Some(text)) => format!("'{text}'"),
        Ok(None) => "empty".to_string(),
        Err(e) => format!("unavailable ({e})"),
    }
}
