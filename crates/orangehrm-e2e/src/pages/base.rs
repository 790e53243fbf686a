// BasePage - operations available on every authenticated OrangeHRM page
//
// Check operations (`is_*`, `ensure_on_dashboard`) poll within a bounded
// timeout and degrade to `false`. Act operations propagate the underlying
// click/fill/navigation failure unchanged.

use super::{PageObject, paths, tables};
use crate::assertions::expect;
use crate::config::SuiteConfig;
use crate::context::SharedContext;
use crate::element::ElementHandle;
use crate::error::Result;
use crate::locator::{Elements, LocatorDescriptor, RoleOptions};
use crate::wait::UrlMatch;
use playwright_rs::Viewport;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Viewport sizes the menu tests switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportPreset {
    /// 1280x720
    Desktop,
    /// 375x667, side panel collapses behind the hamburger
    Mobile,
}

impl ViewportPreset {
    pub fn viewport(&self) -> Viewport {
        let (width, height) = match self {
            ViewportPreset::Desktop => (1280, 720),
            ViewportPreset::Mobile => (375, 667),
        };
        Viewport { width, height }
    }
}

pub struct BasePage {
    context: SharedContext,
    config: Arc<SuiteConfig>,
    elements: Elements,
}

impl BasePage {
    /// Resolves the base locator table against `context`.
    pub fn new(context: SharedContext, config: Arc<SuiteConfig>) -> Result<Self> {
        let elements = tables::base_page()?.resolve(&context);
        Ok(Self {
            context,
            config,
            elements,
        })
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    pub fn config(&self) -> &Arc<SuiteConfig> {
        &self.config
    }

    /// Requests navigation. Relative paths are joined onto the base URL.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let target = self.config.url(url)?;
        tracing::debug!(url = %target, "navigate");
        self.context.goto(&target).await
    }

    pub fn current_url(&self) -> String {
        self.context.url()
    }

    /// Polls visibility of a base-table element for up to 5 seconds.
    ///
    /// Fails only when `name` is not declared in the table.
    pub async fn is_element_visible(&self, name: &str) -> Result<bool> {
        self.is_element_visible_within(name, self.config.timeouts().default)
            .await
    }

    pub async fn is_element_visible_within(&self, name: &str, timeout: Duration) -> Result<bool> {
        let handle = self.elements.get(name)?;
        Ok(handle.is_visible_within(timeout).await)
    }

    /// Side panel visible within 5 seconds.
    pub async fn is_sidebar_visible(&self) -> bool {
        self.probe("sidebar", self.config.timeouts().default).await
    }

    /// A top-bar heading containing `text` is visible within 5 seconds.
    pub async fn is_navbar_text_visible(&self, text: &str) -> bool {
        let Ok(navbar) = self.elements.get("navbar") else {
            return false;
        };
        navbar
            .within(&LocatorDescriptor::role("heading", RoleOptions::named(text)))
            .is_visible_within(self.config.timeouts().default)
            .await
    }

    pub async fn open_profile_menu(&self) -> Result<()> {
        self.elements.get("profileDropdown")?.click().await
    }

    /// Logs out through the profile menu and waits for the login page.
    pub async fn logout(&self) -> Result<()> {
        self.open_profile_menu().await?;
        self.elements.get("logoutButton")?.click().await?;
        self.wait_for_navigation_to(paths::LOGIN).await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Opens the About dialog and waits for it to appear.
    pub async fn open_about(&self) -> Result<()> {
        self.open_profile_menu().await?;
        self.elements.get("aboutButton")?.click().await?;
        expect(self.elements.get("popup")?.clone())
            .with_timeout(self.config.timeouts().short)
            .to_be_visible()
            .await
    }

    /// Title and the four information rows of the About dialog are visible.
    pub async fn check_about_popup_information(&self) -> bool {
        let timeout = self.config.timeouts().default;
        for name in [
            "popupTitle",
            "popupCompanyName",
            "popupVersion",
            "popupActiveEmployees",
            "popupEmployeesTerminated",
        ] {
            if !self.probe(name, timeout).await {
                tracing::warn!(element = name, "about popup row missing");
                return false;
            }
        }
        true
    }

    /// Closes the dialog and waits for it to disappear.
    pub async fn close_popup(&self) -> Result<()> {
        self.elements.get("closePopupButton")?.click().await?;
        expect(self.elements.get("popup")?.clone())
            .with_timeout(self.config.timeouts().short)
            .to_be_hidden()
            .await
    }

    /// Opens the Change Password form through the profile menu.
    pub async fn access_change_password(&self) -> Result<()> {
        self.open_profile_menu().await?;
        self.elements.get("changePasswordButton")?.click().await?;
        self.wait_for_navigation_to(paths::CHANGE_PASSWORD).await
    }

    /// Blocks until the URL no longer contains `fragment`.
    pub async fn wait_for_navigation_away(&self, fragment: &str) -> Result<()> {
        self.context
            .wait_for_url(&UrlMatch::not_contains(fragment), self.config.timeouts().page_load)
            .await
    }

    /// Blocks until the URL contains `fragment`.
    pub async fn wait_for_navigation_to(&self, fragment: &str) -> Result<()> {
        self.context
            .wait_for_url(&UrlMatch::contains(fragment), self.config.timeouts().page_load)
            .await
    }

    /// Makes sure `landmark` is on screen, navigating to the dashboard once
    /// if it is not visible within the short timeout.
    pub async fn ensure_on_dashboard(&self, landmark: &ElementHandle) -> bool {
        let timeouts = self.config.timeouts();
        if landmark.is_visible_within(timeouts.short).await {
            return true;
        }

        tracing::info!(url = %self.current_url(), "landmark missing, navigating to dashboard");
        if let Err(e) = self.navigate(paths::DASHBOARD).await {
            tracing::warn!(error = %e, "dashboard navigation failed");
            return false;
        }
        landmark.is_visible_within(timeouts.page_load).await
    }

    /// `ensure_on_dashboard` with the "Dashboard" heading as landmark.
    pub async fn go_to_dashboard(&self) -> bool {
        match self.elements.get("path") {
            Ok(heading) => self.ensure_on_dashboard(heading).await,
            Err(_) => false,
        }
    }

    pub async fn set_viewport(&self, preset: ViewportPreset) -> Result<()> {
        self.context.set_viewport(preset.viewport()).await
    }

    /// Clicks the hamburger that collapses or expands the side panel.
    pub async fn toggle_side_menu(&self) -> Result<()> {
        self.elements.get("hamburger")?.click().await
    }

    /// Waits for the loading spinner to go away. `false` if it is still shown.
    pub async fn wait_for_spinner_hidden(&self) -> bool {
        match self.elements.get("spinner") {
            Ok(spinner) => spinner
                .is_hidden_within(self.config.timeouts().page_load)
                .await,
            Err(_) => false,
        }
    }

    /// Writes a PNG of the viewport to `<reports_dir>/<name>.png`.
    pub async fn capture_screenshot(&self, name: &str) -> Result<PathBuf> {
        let dir = self.config.reports_dir();
        tokio::fs::create_dir_all(dir).await?;

        let file_name: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let path = dir.join(format!("{file_name}.png"));

        let bytes = self.context.screenshot().await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), "captured screenshot");
        Ok(path)
    }

    async fn probe(&self, name: &str, timeout: Duration) -> bool {
        match self.elements.get(name) {
            Ok(handle) => handle.is_visible_within(timeout).await,
            Err(e) => {
                tracing::warn!(error = %e, "visibility check on undeclared element");
                false
            }
        }
    }
}

impl PageObject for BasePage {
    fn base(&self) -> &BasePage {
        self
    }

    fn elements(&self) -> &Elements {
        &self.elements
    }
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("url", &self.context.url())
            .field("elements", &self.elements)
            .finish()
    }
}
