// Scenario factory - fresh browsing contexts and page objects per scenario
//
// The factory owns the suite configuration and hands it to every page it
// builds. A scenario launched against Playwright owns its browser and must
// be closed; a scenario attached to an existing context owns nothing.

use crate::config::{BrowserKind, Project, SuiteConfig};
use crate::context::SharedContext;
use crate::error::{Error, Result};
use crate::pages::{BasePage, ChangePasswordPage, LoginPage, ViewportPreset};
use crate::playwright_context::PlaywrightContext;
use crate::session::SessionSnapshot;
use playwright_rs::{Browser, BrowserContextOptions, LaunchOptions, Playwright};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ScenarioFactory {
    config: Arc<SuiteConfig>,
}

impl ScenarioFactory {
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Factory over `SuiteConfig::from_env()`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SuiteConfig::from_env()?))
    }

    pub fn config(&self) -> &Arc<SuiteConfig> {
        &self.config
    }

    /// Launches the browser of the named project and opens one page.
    ///
    /// Authenticated projects start from the saved session snapshot; a
    /// missing snapshot is a configuration error (run `setup` first).
    pub async fn launch(&self, project: &str) -> Result<Scenario> {
        let project = self.config.project(project)?.clone();
        self.launch_project(&project).await
    }

    /// Launches the configured browser without a saved session.
    pub async fn launch_default(&self) -> Result<Scenario> {
        let browser = self.config.browser();
        self.launch_project(&Project::new(browser.name(), browser))
            .await
    }

    async fn launch_project(&self, project: &Project) -> Result<Scenario> {
        tracing::info!(
            project = %project.name,
            browser = project.browser.name(),
            headless = self.config.headless(),
            "launching scenario"
        );

        let playwright = Playwright::launch().await?;
        let browser_type = match project.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };
        let browser = browser_type
            .launch_with_options(LaunchOptions::new().headless(self.config.headless()))
            .await?;

        let options = self.context_options(project).await?;
        let context = browser.new_context_with_options(options).await?;
        let page = context.new_page().await?;

        let timeouts = self.config.timeouts();
        let driver = PlaywrightContext::new(page)
            .with_action_timeout(timeouts.action)
            .with_navigation_timeout(timeouts.page_load);

        Ok(Scenario {
            context: Arc::new(driver),
            config: Arc::clone(&self.config),
            runtime: Some(Runtime {
                playwright,
                browser,
            }),
        })
    }

    /// Wraps an existing browsing context.
    pub fn attach(&self, context: SharedContext) -> Scenario {
        Scenario {
            context,
            config: Arc::clone(&self.config),
            runtime: None,
        }
    }

    async fn context_options(&self, project: &Project) -> Result<BrowserContextOptions> {
        let mut builder = BrowserContextOptions::builder()
            .viewport(ViewportPreset::Desktop.viewport())
            .base_url(self.config.base_url().to_string());

        if project.use_session {
            let path = self.config.storage_state_path();
            let snapshot = SessionSnapshot::load(path).await.map_err(|e| {
                Error::Config(format!(
                    "project '{}' needs a session snapshot at {} ({e})",
                    project.name,
                    path.display()
                ))
            })?;
            builder = builder.storage_state(snapshot.into_state());
        }
        Ok(builder.build())
    }
}

struct Runtime {
    playwright: Playwright,
    browser: Browser,
}

/// One scenario: a browsing context plus the configuration its pages use.
pub struct Scenario {
    context: SharedContext,
    config: Arc<SuiteConfig>,
    runtime: Option<Runtime>,
}

impl Scenario {
    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    pub fn config(&self) -> &Arc<SuiteConfig> {
        &self.config
    }

    pub fn base_page(&self) -> Result<BasePage> {
        BasePage::new(Arc::clone(&self.context), Arc::clone(&self.config))
    }

    pub fn login_page(&self) -> Result<LoginPage> {
        LoginPage::new(self.base_page()?)
    }

    pub fn change_password_page(&self) -> Result<ChangePasswordPage> {
        ChangePasswordPage::new(self.base_page()?)
    }

    /// Closes the browser and stops the driver, if this scenario launched them.
    pub async fn close(self) -> Result<()> {
        if let Some(runtime) = self.runtime {
            runtime.browser.close().await?;
            runtime.playwright.shutdown().await?;
            tracing::info!("scenario closed");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("url", &self.context.url())
            .field("launched", &self.runtime.is_some())
            .finish()
    }
}
