// ElementHandle - lazy, live reference to whatever a selector matches
//
// Handles are not snapshots: every call re-evaluates the selector against the
// current document. They own nothing but the shared context and the selector,
// so cloning is cheap and overlapping handles never interfere.

use crate::context::SharedContext;
use crate::error::Result;
use crate::locator::{self, LocatorDescriptor, Selector};
use crate::wait::{self, POLL_INTERVAL};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct ElementHandle {
    context: SharedContext,
    selector: Selector,
}

impl ElementHandle {
    pub(crate) fn new(context: SharedContext, selector: Selector) -> Self {
        Self { context, selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Handle on the Nth match (0-indexed). Out-of-range indices fail at action time.
    pub fn nth(&self, index: usize) -> ElementHandle {
        ElementHandle::new(Arc::clone(&self.context), self.selector.nth(index))
    }

    pub fn first(&self) -> ElementHandle {
        ElementHandle::new(Arc::clone(&self.context), self.selector.first())
    }

    pub fn last(&self) -> ElementHandle {
        ElementHandle::new(Arc::clone(&self.context), self.selector.last())
    }

    /// Resolves `descriptor` inside this handle's matches.
    pub fn within(&self, descriptor: &LocatorDescriptor) -> ElementHandle {
        let child = locator::compile(descriptor);
        ElementHandle::new(Arc::clone(&self.context), self.selector.then(&child))
    }

    pub async fn count(&self) -> Result<usize> {
        self.context.count(&self.selector).await
    }

    pub async fn click(&self) -> Result<()> {
        tracing::debug!(selector = %self.selector, "click");
        self.context.click(&self.selector).await
    }

    pub async fn fill(&self, value: &str) -> Result<()> {
        tracing::debug!(selector = %self.selector, "fill");
        self.context.fill(&self.selector, value).await
    }

    /// Clears an input.
    pub async fn clear(&self) -> Result<()> {
        self.fill("").await
    }

    pub async fn text_content(&self) -> Result<Option<String>> {
        self.context.text_content(&self.selector).await
    }

    pub async fn input_value(&self) -> Result<String> {
        self.context.input_value(&self.selector).await
    }

    /// Immediate visibility. A selector matching nothing is simply not visible.
    pub async fn is_visible(&self) -> Result<bool> {
        self.context.is_visible(&self.selector).await
    }

    /// Polls until visible. Returns `false` on timeout; lookup errors count
    /// as "not visible yet".
    pub async fn is_visible_within(&self, timeout: Duration) -> bool {
        self.probe_visibility(timeout, true).await
    }

    /// Polls until hidden (or detached). Returns `false` on timeout.
    pub async fn is_hidden_within(&self, timeout: Duration) -> bool {
        self.probe_visibility(timeout, false).await
    }

    async fn probe_visibility(&self, timeout: Duration, want_visible: bool) -> bool {
        let context = &self.context;
        let selector = &self.selector;
        let outcome = wait::poll_until(timeout, POLL_INTERVAL, move || async move {
            match context.is_visible(selector).await {
                Ok(visible) => Ok(visible == want_visible),
                Err(e) => {
                    tracing::trace!(selector = %selector, error = %e, "visibility probe failed");
                    Ok(!want_visible)
                }
            }
        })
        .await;

        let satisfied = outcome.unwrap_or(false);
        if !satisfied {
            tracing::debug!(
                selector = %self.selector,
                want_visible,
                ?timeout,
                "visibility check timed out"
            );
        }
        satisfied
    }
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("selector", &self.selector.to_string())
            .finish()
    }
}
