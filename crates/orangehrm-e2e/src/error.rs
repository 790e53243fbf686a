// Error types for the OrangeHRM suite

use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// How a failure should be treated at the scenario boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A test-authoring defect (malformed locator table). Never retried.
    InvalidLocator,
    /// A click, fill or navigation command failed.
    Action,
    /// An expected state did not hold within its timeout.
    Assertion,
    /// Configuration, filesystem or serialization problem outside the UI.
    Environment,
}

/// Errors that can occur while driving OrangeHRM pages
#[derive(Debug, Error)]
pub enum Error {
    /// Locator descriptor does not match any known shape
    ///
    /// Carries the offending descriptor (as JSON text) for diagnostics.
    #[error("Invalid locator {descriptor}: {reason}")]
    InvalidLocator { descriptor: String, reason: String },

    /// A page object was asked for a name its locator table does not declare
    #[error("Unknown element '{name}' on {page}")]
    UnknownElement { page: String, name: String },

    /// Element not found by selector
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// Element matched but could not receive the action
    #[error("Element '{selector}' is not actionable: {reason}")]
    NotActionable { selector: String, reason: String },

    /// Navigation request failed
    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// Error reported by the browser automation driver
    #[error("Driver error: {0}")]
    Driver(#[from] playwright_rs::Error),

    /// Assertion timeout (expect API, URL waits)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// Observed UI state contradicts the expected outcome
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Invalid or missing configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Builds an `InvalidLocator` error from the offending JSON value.
    pub(crate) fn invalid_locator(descriptor: &serde_json::Value, reason: impl Into<String>) -> Self {
        Error::InvalidLocator {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }

    /// Classifies the error for the scenario boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLocator { .. } | Error::UnknownElement { .. } => ErrorKind::InvalidLocator,
            Error::ElementNotFound(_)
            | Error::NotActionable { .. }
            | Error::NavigationFailed { .. }
            | Error::Driver(_) => ErrorKind::Action,
            Error::AssertionTimeout(_) | Error::AssertionFailed(_) => ErrorKind::Assertion,
            Error::Config(_) | Error::Url(_) | Error::Io(_) | Error::Json(_) => {
                ErrorKind::Environment
            }
            Error::Context(_, inner) => inner.kind(),
        }
    }

    /// Returns true when the runner may re-run the scenario.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Action | ErrorKind::Assertion)
    }
}
