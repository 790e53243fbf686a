// Session snapshots - authenticated storage state saved between runs
//
// The setup project logs in once and writes the browser's cookies and local
// storage to disk; later projects inject the file into fresh contexts so
// their scenarios start already logged in.

use crate::context::BrowsingContext;
use crate::error::{Error, Result};
use playwright_rs::StorageState;
use std::path::Path;

/// Cookies and per-origin local storage of a logged-in session.
///
/// Serialized in Playwright's storage-state format:
/// `{"cookies": [...], "origins": [...]}`.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    state: StorageState,
}

impl SessionSnapshot {
    pub fn new(state: StorageState) -> Self {
        Self { state }
    }

    /// Reads the current session out of a browsing context.
    pub async fn capture(context: &dyn BrowsingContext) -> Result<Self> {
        let state = context.storage_state().await?;
        tracing::debug!(
            cookies = state.cookies.len(),
            origins = state.origins.len(),
            "captured session"
        );
        Ok(Self { state })
    }

    /// Writes the snapshot, creating parent directories as needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(&self.state)?;
        tokio::fs::write(path, json).await?;
        tracing::info!(path = %path.display(), "saved session snapshot");
        Ok(())
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        let state: StorageState = serde_json::from_slice(&bytes)
            .map_err(|e| Error::from(e).context(format!("parsing {}", path.display())))?;
        Ok(Self { state })
    }

    /// True when no cookie is present (nothing to authenticate with).
    pub fn is_empty(&self) -> bool {
        self.state.cookies.is_empty()
    }

    pub fn state(&self) -> &StorageState {
        &self.state
    }

    pub fn into_state(self) -> StorageState {
        self.state
    }
}
