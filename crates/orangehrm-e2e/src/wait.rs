// Waits - timeout defaults, URL predicates and load states
//
// Every wait in the suite is a bounded poll. Short timeouts cover inline UI
// feedback, the default covers ordinary checks and assertions, and the long
// one covers full page loads against the remote demo.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

/// Inline feedback: validation text, menus opening.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default timeout for checks and assertions (matches Playwright's expect).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Full page loads and navigations.
pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for click/fill actions (Playwright's action default).
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default polling interval (100ms)
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// URL predicate. Only "contains" and "does not contain" exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMatch {
    Contains(String),
    NotContains(String),
}

impl UrlMatch {
    pub fn contains(fragment: impl Into<String>) -> Self {
        UrlMatch::Contains(fragment.into())
    }

    pub fn not_contains(fragment: impl Into<String>) -> Self {
        UrlMatch::NotContains(fragment.into())
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlMatch::Contains(fragment) => url.contains(fragment.as_str()),
            UrlMatch::NotContains(fragment) => !url.contains(fragment.as_str()),
        }
    }

    /// The inverted predicate.
    pub fn negate(&self) -> UrlMatch {
        match self {
            UrlMatch::Contains(f) => UrlMatch::NotContains(f.clone()),
            UrlMatch::NotContains(f) => UrlMatch::Contains(f.clone()),
        }
    }
}

impl fmt::Display for UrlMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlMatch::Contains(fragment) => write!(f, "URL containing '{fragment}'"),
            UrlMatch::NotContains(fragment) => write!(f, "URL not containing '{fragment}'"),
        }
    }
}

/// `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim_matches('"') {
            "loading" => Some(ReadyState::Loading),
            "interactive" => Some(ReadyState::Interactive),
            "complete" => Some(ReadyState::Complete),
            _ => None,
        }
    }
}

/// Load states that can be awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// `DOMContentLoaded` has fired
    DomContentLoaded,
    /// `load` has fired
    Load,
}

impl LoadState {
    pub fn is_reached(&self, ready: ReadyState) -> bool {
        match self {
            LoadState::DomContentLoaded => ready >= ReadyState::Interactive,
            LoadState::Load => ready == ReadyState::Complete,
        }
    }
}

/// Polls `probe` until it yields `true` or `timeout` elapses.
///
/// Returns `Ok(false)` on timeout. A probe error aborts the poll.
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> crate::Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = crate::Result<bool>>,
{
    let start = Instant::now();
    loop {
        if probe().await? {
            return Ok(true);
        }
        if start.elapsed() >= timeout {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}
