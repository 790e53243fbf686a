// LoginPage - credentials form, inline validation and the error alert

use super::{BasePage, PageObject, paths, tables};
use crate::config::Credentials;
use crate::element::ElementHandle;
use crate::error::{Error, Result};
use crate::locator::Elements;
use crate::session::SessionSnapshot;
use crate::wait::POLL_INTERVAL;
use std::path::Path;
use std::time::Instant;

/// What the application showed after a login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Landed on the dashboard
    LoggedIn,
    /// Error alert with its text, e.g. `Invalid credentials`
    Rejected(String),
    /// Inline messages under the fields (`Required`)
    FieldErrors {
        username: Option<String>,
        password: Option<String>,
    },
}

pub struct LoginPage {
    base: BasePage,
    elements: Elements,
}

impl LoginPage {
    pub fn new(base: BasePage) -> Result<Self> {
        let elements = tables::login_page()?.resolve(base.context());
        Ok(Self { base, elements })
    }

    pub async fn navigate_to_login(&self) -> Result<()> {
        self.base.navigate(paths::LOGIN).await
    }

    pub async fn enter_username(&self, username: &str) -> Result<()> {
        self.elements.get("username")?.fill(username).await
    }

    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.elements.get("password")?.fill(password).await
    }

    pub async fn click_login_button(&self) -> Result<()> {
        self.elements.get("loginButton")?.click().await
    }

    /// Fills both fields and submits. Does not wait for the result.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        tracing::info!(username, "logging in");
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login_button().await
    }

    /// Submits `credentials` and waits for the first recognisable outcome.
    ///
    /// Fails with `Error::AssertionTimeout` when neither the dashboard, the
    /// alert nor a field message shows up within the page-load timeout.
    pub async fn submit(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        self.login(&credentials.username, &credentials.password)
            .await?;

        let timeout = self.base.config().timeouts().page_load;
        let start = Instant::now();
        loop {
            if let Some(outcome) = self.observe_outcome().await {
                tracing::debug!(?outcome, "login outcome");
                return Ok(outcome);
            }

            if start.elapsed() >= timeout {
                return Err(Error::AssertionTimeout(format!(
                    "No login outcome after {:?} (URL '{}')",
                    timeout,
                    self.base.current_url()
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn observe_outcome(&self) -> Option<LoginOutcome> {
        if self.base.current_url().contains(paths::DASHBOARD) {
            return Some(LoginOutcome::LoggedIn);
        }

        if self.handle_visible_now("errorAlert").await {
            let text = self.error_alert_text().await.ok().flatten();
            return Some(LoginOutcome::Rejected(text.unwrap_or_default()));
        }

        let username = self.message_now("usernameValidationMessage").await;
        let password = self.message_now("passwordValidationMessage").await;
        if username.is_some() || password.is_some() {
            return Some(LoginOutcome::FieldErrors { username, password });
        }
        None
    }

    /// Error alert visible within 5 seconds.
    pub async fn error_alert_is_shown(&self) -> bool {
        self.visible_within_default("errorAlert").await
    }

    /// Trimmed text of the error alert.
    pub async fn error_alert_text(&self) -> Result<Option<String>> {
        let text = self.elements.get("errorAlertText")?.text_content().await?;
        Ok(text.map(|t| t.trim().to_string()))
    }

    /// Message under the username field, if shown within the short timeout.
    pub async fn username_validation_message(&self) -> Option<String> {
        self.message_within_short("usernameValidationMessage").await
    }

    /// Message under the password field, if shown within the short timeout.
    pub async fn password_validation_message(&self) -> Option<String> {
        self.message_within_short("passwordValidationMessage").await
    }

    /// "Login" heading visible within 5 seconds.
    pub async fn is_title_visible(&self) -> bool {
        self.visible_within_default("title").await
    }

    /// Checks that the session is on the dashboard and writes it to `path`.
    pub async fn save_session(&self, path: impl AsRef<Path>) -> Result<SessionSnapshot> {
        self.base.wait_for_navigation_to(paths::DASHBOARD).await?;
        if !self.base.is_navbar_text_visible("Dashboard").await {
            return Err(Error::AssertionFailed(
                "navbar does not show 'Dashboard' after login".into(),
            ));
        }

        let snapshot = SessionSnapshot::capture(self.base.context().as_ref()).await?;
        snapshot.save(path).await?;
        Ok(snapshot)
    }

    /// The setup project: log in with the configured credentials and write
    /// the session to the configured storage-state path.
    pub async fn setup_session(&self) -> Result<SessionSnapshot> {
        let config = self.base.config().clone();
        self.navigate_to_login().await?;

        match self.submit(config.credentials()).await? {
            LoginOutcome::LoggedIn => self.save_session(config.storage_state_path()).await,
            other => Err(Error::AssertionFailed(format!(
                "setup login for '{}' did not reach the dashboard: {:?}",
                config.credentials().username,
                other
            ))),
        }
    }

    async fn handle_visible_now(&self, name: &str) -> bool {
        match self.elements.get(name) {
            Ok(handle) => handle.is_visible().await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn message_now(&self, name: &str) -> Option<String> {
        let handle = self.elements.get(name).ok()?;
        if !handle.is_visible().await.unwrap_or(false) {
            return None;
        }
        read_trimmed(handle).await
    }

    async fn message_within_short(&self, name: &str) -> Option<String> {
        let handle = self.elements.get(name).ok()?;
        if !handle
            .is_visible_within(self.base.config().timeouts().short)
            .await
        {
            return None;
        }
        read_trimmed(handle).await
    }

    async fn visible_within_default(&self, name: &str) -> bool {
        match self.elements.get(name) {
            Ok(handle) => {
                handle
                    .is_visible_within(self.base.config().timeouts().default)
                    .await
            }
            Err(_) => false,
        }
    }
}

async fn read_trimmed(handle: &ElementHandle) -> Option<String> {
    handle
        .text_content()
        .await
        .ok()
        .flatten()
        .map(|t| t.trim().to_string())
}

impl PageObject for LoginPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn elements(&self) -> &Elements {
        &self.elements
    }
}

impl std::fmt::Debug for LoginPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginPage")
            .field("elements", &self.elements)
            .finish()
    }
}
