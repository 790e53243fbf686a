// Suite configuration
//
// All environment reads happen here, once, in `SuiteConfig::from_env`.
// Scenarios receive the resulting value explicitly through the scenario
// factory; nothing else in the crate looks at the environment.

use crate::error::{Error, Result};
use crate::wait::{ACTION_TIMEOUT, DEFAULT_TIMEOUT, PAGE_LOAD_TIMEOUT, SHORT_TIMEOUT};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Public OrangeHRM demo instance.
pub const DEFAULT_BASE_URL: &str = "https://opensource-demo.orangehrmlive.com";

/// Where the authenticated session snapshot is written and read.
pub const DEFAULT_STORAGE_STATE: &str = "playwright/.auth/user.json";

pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Login credentials. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The demo's built-in administrator.
    pub fn demo_admin() -> Self {
        Self::new("Admin", "admin123")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Timeout defaults, by operation criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Inline UI feedback (3s)
    pub short: Duration,
    /// Checks and assertions (5s)
    pub default: Duration,
    /// Page loads and navigations (60s)
    pub page_load: Duration,
    /// Click/fill actionability (30s)
    pub action: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            short: SHORT_TIMEOUT,
            default: DEFAULT_TIMEOUT,
            page_load: PAGE_LOAD_TIMEOUT,
            action: ACTION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!("unknown browser '{other}'"))),
        }
    }
}

/// A runner project: a browser plus whether it starts from the saved session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub browser: BrowserKind,
    /// Inject the session snapshot into new contexts
    pub use_session: bool,
    /// Projects that must run first
    pub dependencies: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, browser: BrowserKind) -> Self {
        Self {
            name: name.into(),
            browser,
            use_session: false,
            dependencies: Vec::new(),
        }
    }

    /// Starts from the session written by `setup`.
    pub fn authenticated(mut self) -> Self {
        self.use_session = true;
        self.dependencies.push("setup".to_string());
        self
    }
}

/// `setup` writes the session; `chromium` and `firefox` reuse it.
pub fn default_projects() -> Vec<Project> {
    vec![
        Project::new("setup", BrowserKind::Chromium),
        Project::new("chromium", BrowserKind::Chromium).authenticated(),
        Project::new("firefox", BrowserKind::Firefox).authenticated(),
    ]
}

/// Effective configuration for one test run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    base_url: Url,
    credentials: Credentials,
    timeouts: Timeouts,
    browser: BrowserKind,
    headless: bool,
    storage_state_path: PathBuf,
    reports_dir: PathBuf,
    retries: u32,
    workers: usize,
    projects: Vec<Project>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfigBuilder::default().build_unchecked()
    }
}

impl SuiteConfig {
    pub fn builder() -> SuiteConfigBuilder {
        SuiteConfigBuilder::default()
    }

    /// Reads the process environment.
    ///
    /// | Variable | Meaning | Default |
    /// |---|---|---|
    /// | `HRM_BASE_URL` | application root | public demo |
    /// | `ADMIN_USERNAME` / `ADMIN_PASSWORD` | login | `Admin` / `admin123` |
    /// | `HRM_BROWSER` | `chromium`, `firefox` or `webkit` | `chromium` |
    /// | `HRM_HEADLESS` | `false`/`0` shows the browser | `true` |
    /// | `HRM_STORAGE_STATE` | session snapshot path | `playwright/.auth/user.json` |
    /// | `HRM_REPORTS_DIR` | screenshots | `reports` |
    /// | `CI` | 2 retries, 1 worker | 0 retries, 4 workers |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Credentials::demo_admin();
        let mut builder = SuiteConfig::builder().credentials(Credentials::new(
            var("ADMIN_USERNAME").unwrap_or(defaults.username),
            var("ADMIN_PASSWORD").unwrap_or(defaults.password),
        ));

        if let Some(url) = var("HRM_BASE_URL") {
            builder = builder.base_url(&url)?;
        }
        if let Some(browser) = var("HRM_BROWSER") {
            builder = builder.browser(browser.parse()?);
        }
        if let Some(headless) = var("HRM_HEADLESS") {
            builder = builder.headless(parse_bool(&headless)?);
        }
        if let Some(path) = var("HRM_STORAGE_STATE") {
            builder = builder.storage_state_path(path);
        }
        if let Some(dir) = var("HRM_REPORTS_DIR") {
            builder = builder.reports_dir(dir);
        }
        if var("CI").is_some() {
            builder = builder.retries(2).workers(1);
        }

        builder.build()
    }

    /// Resolves `path` against the base URL; absolute URLs pass through.
    pub fn url(&self, path: &str) -> Result<String> {
        Ok(self.base_url.join(path)?.to_string())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Browser used when no project is named.
    pub fn browser(&self) -> BrowserKind {
        self.browser
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn storage_state_path(&self) -> &PathBuf {
        &self.storage_state_path
    }

    pub fn reports_dir(&self) -> &PathBuf {
        &self.reports_dir
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, name: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::Config(format!("unknown project '{name}'")))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("expected a boolean, got '{other}'"))),
    }
}

/// Builder for SuiteConfig
#[derive(Debug, Clone)]
pub struct SuiteConfigBuilder {
    base_url: Option<Url>,
    credentials: Credentials,
    timeouts: Timeouts,
    browser: BrowserKind,
    headless: bool,
    storage_state_path: PathBuf,
    reports_dir: PathBuf,
    retries: u32,
    workers: usize,
    projects: Vec<Project>,
}

impl Default for SuiteConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: Credentials::demo_admin(),
            timeouts: Timeouts::default(),
            browser: BrowserKind::Chromium,
            headless: true,
            storage_state_path: PathBuf::from(DEFAULT_STORAGE_STATE),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            retries: 0,
            workers: 4,
            projects: default_projects(),
        }
    }
}

impl SuiteConfigBuilder {
    /// Sets the application root (must be an absolute http(s) URL)
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!("base URL must be http(s): {url}")));
        }
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn storage_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_state_path = path.into();
        self
    }

    pub fn reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn build(self) -> Result<SuiteConfig> {
        if self.credentials.username.is_empty() {
            return Err(Error::Config("username must not be empty".into()));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".into()));
        }
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> SuiteConfig {
        let base_url = self.base_url.unwrap_or_else(default_base_url);
        SuiteConfig {
            base_url,
            credentials: self.credentials,
            timeouts: self.timeouts,
            browser: self.browser,
            headless: self.headless,
            storage_state_path: self.storage_state_path,
            reports_dir: self.reports_dir,
            retries: self.retries,
            workers: self.workers,
            projects: self.projects,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}
