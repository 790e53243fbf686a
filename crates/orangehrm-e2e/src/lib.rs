//! orangehrm-e2e: Page-object end-to-end suite for the OrangeHRM web application
//!
//! Pages are built from declarative locator tables. Each table entry is a
//! [`LocatorDescriptor`] (raw selector, role+name, text, label, placeholder,
//! alt text, title or test id, optionally narrowed to the Nth match) that the
//! resolver binds to a live [`BrowsingContext`] as a lazy [`ElementHandle`].
//!
//! # Examples
//!
//! ## Logging in
//!
//! ```ignore
//! use orangehrm_e2e::{Credentials, LoginOutcome, ScenarioFactory};
//!
//! #[tokio::main]
//! async fn main() -> orangehrm_e2e::Result<()> {
//!     let factory = ScenarioFactory::from_env()?;
//!     let scenario = factory.launch("setup").await?;
//!
//!     let login = scenario.login_page()?;
//!     login.navigate_to_login().await?;
//!     let outcome = login.submit(&Credentials::new("Admin", "admin123")).await?;
//!     assert_eq!(outcome, LoginOutcome::LoggedIn);
//!
//!     scenario.close().await
//! }
//! ```
//!
//! ## Resolving a descriptor from JSON
//!
//! ```ignore
//! use orangehrm_e2e::locator::{self, LocatorDescriptor};
//! use serde_json::json;
//!
//! let descriptor = LocatorDescriptor::try_from(json!(["button", {"name": "Save"}]))?;
//! assert_eq!(
//!     locator::compile(&descriptor).to_string(),
//!     r#"internal:role=button[name="Save"i]"#
//! );
//! ```

mod assertions;
pub mod config;
pub mod context;
pub mod credentials;
mod element;
mod error;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod password_policy;
pub mod playwright_context;
pub mod scenario;
pub mod session;
pub mod wait;

// Re-export error types
pub use error::{Error, ErrorKind, Result};

// Re-export assertions API
pub use assertions::{Expectation, expect};

// Re-export the browsing context seam and element handles
pub use context::{BrowsingContext, SharedContext};
pub use element::ElementHandle;
pub use locator::{LocatorDescriptor, LocatorTable, RoleOptions, Selector};

// Re-export configuration and scenario entry points
pub use config::{BrowserKind, Credentials, Project, SuiteConfig, Timeouts};
pub use scenario::{Scenario, ScenarioFactory};
pub use session::SessionSnapshot;

// Re-export page objects
pub use pages::{
    BasePage, ChangePasswordPage, ChangePasswordState, LoginOutcome, LoginPage, PageObject,
    RejectionReason, ViewportPreset,
};
pub use password_policy::{PasswordPolicy, PolicyCase, PolicyCheck, PolicyRule};
pub use mock::{MockResponse, mock_disabled_user_response};
