// FakeHrm - in-memory model of the OrangeHRM screens the suite drives
//
// Each query rebuilds a small element tree from the current application
// state and evaluates the selector chain against it: query segments search
// descendants of the previous match set, position segments keep one match.
// Element actions follow Playwright's strictness (exactly one match, visible).

#![allow(dead_code)]

use async_trait::async_trait;
use orangehrm_e2e::context::BrowsingContext;
use orangehrm_e2e::locator::{Position, Segment, Selector, Strategy};
use orangehrm_e2e::mock::MockResponse;
use orangehrm_e2e::wait::ReadyState;
use orangehrm_e2e::{Error, Result};
use parking_lot::Mutex;
use playwright_rs::{Cookie, StorageState, Viewport};
use std::time::{Duration, Instant};

pub const BASE_URL: &str = "https://hrm.test";
pub const ADMIN: &str = "Admin";
pub const ADMIN_PASSWORD: &str = "admin123";

const LOGIN_PATH: &str = "/web/index.php/auth/login";
const VALIDATE_PATH: &str = "/web/index.php/auth/validate";
const DASHBOARD_PATH: &str = "/web/index.php/dashboard/index";
const CHANGE_PASSWORD_PATH: &str = "/web/index.php/pim/updatePassword";

const CURRENT_PASSWORD_INPUT: &str = r#"div.oxd-input-group__label-wrapper:has(label:text("Current Password")) + div input[type="password"]"#;
const ANY_PASSWORD_INPUT: &str =
    r#"div.oxd-input-group__label-wrapper:has(label:text("Password")) + div input[type="password"]"#;
const CONFIRM_PASSWORD_INPUT: &str = r#"div.oxd-input-group__label-wrapper:has(label:text("Confirm Password")) + div input[type="password"]"#;
const NEW_PASSWORD_ERROR: &str =
    r#".oxd-input-group:has(label:text-is("Password")) .oxd-input-field-error-message"#;
const CONFIRM_PASSWORD_ERROR: &str =
    r#".oxd-input-group:has(label:text-is("Confirm Password")) .oxd-input-field-error-message"#;
const CURRENT_PASSWORD_ERROR: &str =
    r#".oxd-input-group:has(label:text-is("Current Password")) .oxd-input-field-error-message"#;
/// Substring label match: every password group's error carries it.
pub const ANY_PASSWORD_ERROR: &str =
    r#".oxd-input-group:has(label:has-text("Password")) .oxd-input-field-error-message"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Blank,
    Login,
    Dashboard,
    ChangePassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Inert,
    LoginUsername,
    LoginPassword,
    LoginButton,
    ProfileArea,
    MenuAbout,
    MenuSupport,
    MenuChangePassword,
    MenuLogout,
    ClosePopup,
    Hamburger,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
    Save,
    Cancel,
}

/// Transient UI text (alerts, toasts, field messages) with its render time.
#[derive(Debug, Clone)]
struct Shown {
    text: String,
    at: Instant,
}

impl Shown {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            at: Instant::now(),
        }
    }
}

#[derive(Debug, Default)]
struct LoginForm {
    username: String,
    password: String,
    username_error: Option<Shown>,
    password_error: Option<Shown>,
    alert: Option<Shown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toast {
    Success,
    Error,
}

#[derive(Debug, Default)]
struct PasswordForm {
    current: String,
    new: String,
    confirm: String,
    confirm_touched: bool,
    current_error: Option<Shown>,
    new_error: Option<Shown>,
    confirm_error: Option<Shown>,
    toast: Option<(Toast, Shown)>,
}

#[derive(Debug)]
struct State {
    url: String,
    screen: Screen,
    logged_in: bool,
    admin_password: String,
    login: LoginForm,
    form: PasswordForm,
    menu_open: bool,
    about_open: bool,
    viewport: Viewport,
    side_menu_open: bool,
    routes: Vec<(String, MockResponse)>,
    log: Vec<String>,
    screenshots: usize,
}

struct Node {
    parent: Option<usize>,
    key: Key,
    css: Vec<&'static str>,
    role: Option<(&'static str, String)>,
    text: String,
    attrs: Vec<(&'static str, String)>,
    visible: bool,
    value: Option<String>,
}

impl Node {
    fn new(key: Key) -> Self {
        Self {
            parent: None,
            key,
            css: Vec::new(),
            role: None,
            text: String::new(),
            attrs: Vec::new(),
            visible: true,
            value: None,
        }
    }

    fn css(mut self, selectors: &[&'static str]) -> Self {
        self.css.extend_from_slice(selectors);
        self
    }

    fn role(mut self, role: &'static str, name: impl Into<String>) -> Self {
        let name = name.into();
        self.text = name.clone();
        self.role = Some((role, name));
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn input(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

#[derive(Default)]
struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    fn add(&mut self, parent: Option<usize>, mut node: Node) -> usize {
        node.parent = parent;
        // Children of a hidden container are hidden too
        if let Some(p) = parent {
            node.visible &= self.nodes[p].visible;
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn is_descendant(&self, node: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[node].parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes[p].parent;
        }
        false
    }

    fn query(&self, selector: &Selector) -> Vec<usize> {
        let mut scope: Option<Vec<usize>> = None;
        for segment in selector.segments() {
            let current = match segment {
                Segment::Query(strategy) => (0..self.nodes.len())
                    .filter(|&i| matches_strategy(&self.nodes[i], strategy))
                    .filter(|&i| match &scope {
                        None => true,
                        Some(parents) => parents.iter().any(|&p| self.is_descendant(i, p)),
                    })
                    .collect(),
                Segment::Position(position) => {
                    let set = scope.clone().unwrap_or_default();
                    let picked = match position {
                        Position::Nth(k) => set.get(*k).copied(),
                        Position::Last => set.last().copied(),
                    };
                    picked.into_iter().collect()
                }
            };
            scope = Some(current);
        }
        scope.unwrap_or_default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}

fn matches_strategy(node: &Node, strategy: &Strategy) -> bool {
    let attr = |name: &str| {
        node.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    };
    match strategy {
        Strategy::Raw(css) => node.css.iter().any(|c| *c == css.as_str()),
        Strategy::Role { role, options } => match &node.role {
            Some((r, name)) if *r == role.as_str() => match &options.name {
                None => true,
                Some(wanted) if options.exact => name == wanted,
                Some(wanted) => contains_ci(name, wanted),
            },
            _ => false,
        },
        Strategy::Text(text) => !node.text.is_empty() && contains_ci(&node.text, text),
        Strategy::Label(label) => attr("aria-label").is_some_and(|v| contains_ci(v, label)),
        Strategy::Placeholder(p) => attr("placeholder").is_some_and(|v| contains_ci(v, p)),
        Strategy::AltText(alt) => attr("alt").is_some_and(|v| contains_ci(v, alt)),
        Strategy::Title(title) => attr("title").is_some_and(|v| contains_ci(v, title)),
        Strategy::TestId(id) => attr("data-testid") == Some(id.as_str()),
    }
}

fn policy_message(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if password.is_empty() {
        Some("Required")
    } else if len < 7 {
        Some("Should have at least 7 characters")
    } else if len > 64 {
        Some("Should not exceed 64 characters")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Your password must contain minimum 1 number")
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some("Your password must contain minimum 1 lower-case letter")
    } else {
        None
    }
}

/// Text of the alert inside a mocked login page.
fn alert_text(html: &str) -> Option<String> {
    let marker = "oxd-alert-content-text\">";
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('<')?;
    Some(html[start..start + end].trim().to_string())
}

fn route_matches(pattern: &str, url: &str) -> bool {
    match pattern.strip_prefix("**") {
        Some(suffix) => url.ends_with(suffix),
        None => pattern == url,
    }
}

pub struct FakeHrm {
    state: Mutex<State>,
    render_delay: Duration,
}

impl FakeHrm {
    /// A blank tab, not logged in.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                url: "about:blank".to_string(),
                screen: Screen::Blank,
                logged_in: false,
                admin_password: ADMIN_PASSWORD.to_string(),
                login: LoginForm::default(),
                form: PasswordForm::default(),
                menu_open: false,
                about_open: false,
                viewport: Viewport {
                    width: 1280,
                    height: 720,
                },
                side_menu_open: false,
                routes: Vec::new(),
                log: Vec::new(),
                screenshots: 0,
            }),
            render_delay: Duration::ZERO,
        }
    }

    /// A tab restored from a saved session, still blank.
    pub fn with_session() -> Self {
        let fake = Self::new();
        fake.state.lock().logged_in = true;
        fake
    }

    /// Alerts, toasts and field messages appear only after `delay`.
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }

    pub fn screen(&self) -> Screen {
        self.state.lock().screen
    }

    pub fn logged_in(&self) -> bool {
        self.state.lock().logged_in
    }

    pub fn admin_password(&self) -> String {
        self.state.lock().admin_password.clone()
    }

    pub fn viewport(&self) -> (u32, u32) {
        let state = self.state.lock();
        (state.viewport.width, state.viewport.height)
    }

    pub fn screenshots(&self) -> usize {
        self.state.lock().screenshots
    }

    /// Actions in the order they reached the page.
    pub fn log(&self) -> Vec<String> {
        self.state.lock().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.lock().log.clear();
    }

    fn shown(&self, shown: &Option<Shown>) -> bool {
        shown
            .as_ref()
            .is_some_and(|s| s.at.elapsed() >= self.render_delay)
    }

    fn build_dom(&self, state: &State) -> Dom {
        let mut dom = Dom::default();
        match state.screen {
            Screen::Blank => {}
            Screen::Login => self.login_dom(state, &mut dom),
            Screen::Dashboard => self.shell_dom(state, &mut dom, "Dashboard"),
            Screen::ChangePassword => {
                self.shell_dom(state, &mut dom, "PIM");
                self.change_password_dom(state, &mut dom);
            }
        }
        dom
    }

    fn login_dom(&self, state: &State, dom: &mut Dom) {
        let form = &state.login;
        dom.add(None, Node::new(Key::Inert).role("heading", "Login"));
        dom.add(
            None,
            Node::new(Key::Inert)
                .attr("alt", "company-branding")
                .attr("data-testid", "login-logo"),
        );

        if form.alert.is_some() {
            let visible = self.shown(&form.alert);
            let alert = dom.add(
                None,
                Node::new(Key::Inert)
                    .css(&[".oxd-alert--error"])
                    .attr("role", "alert")
                    .visible(visible),
            );
            let text = form.alert.as_ref().map(|a| a.text.clone()).unwrap_or_default();
            dom.add(
                Some(alert),
                Node::new(Key::Inert)
                    .css(&[".oxd-alert--error .oxd-alert-content-text"])
                    .text(text),
            );
        }

        dom.add(
            None,
            Node::new(Key::LoginUsername)
                .attr("placeholder", "Username")
                .attr("aria-label", "Username")
                .input(&form.username),
        );
        if let Some(error) = &form.username_error {
            dom.add(
                None,
                Node::new(Key::Inert)
                    .css(&[r#"div:has(input[placeholder="Username"]) + span"#])
                    .text(error.text.clone())
                    .visible(self.shown(&form.username_error)),
            );
        }

        dom.add(
            None,
            Node::new(Key::LoginPassword)
                .attr("placeholder", "Password")
                .attr("aria-label", "Password")
                .input(&form.password),
        );
        if let Some(error) = &form.password_error {
            dom.add(
                None,
                Node::new(Key::Inert)
                    .css(&[r#"div:has(input[placeholder="Password"]) + span"#])
                    .text(error.text.clone())
                    .visible(self.shown(&form.password_error)),
            );
        }

        dom.add(
            None,
            Node::new(Key::LoginButton)
                .role("button", "Login")
                .css(&["button[type='submit']"]),
        );
        dom.add(
            None,
            Node::new(Key::Inert)
                .text("Forgot your password?")
                .attr("title", "Reset password"),
        );
    }

    fn shell_dom(&self, state: &State, dom: &mut Dom, heading: &str) {
        let header = dom.add(None, Node::new(Key::Inert).css(&[".oxd-topbar-header"]));
        dom.add(
            Some(header),
            Node::new(Key::Hamburger).css(&[".oxd-topbar-header-hamburger"]),
        );
        dom.add(Some(header), Node::new(Key::Inert).role("heading", heading));
        dom.add(
            Some(header),
            Node::new(Key::ProfileArea)
                .css(&[".oxd-topbar-header-userarea"])
                .text("Paul Collings"),
        );

        if state.menu_open {
            let menu = dom.add(None, Node::new(Key::Inert).attr("role", "menu"));
            for (key, name) in [
                (Key::MenuAbout, "About"),
                (Key::MenuSupport, "Support"),
                (Key::MenuChangePassword, "Change Password"),
                (Key::MenuLogout, "Logout"),
            ] {
                dom.add(Some(menu), Node::new(key).role("menuitem", name));
            }
        }

        let wide = state.viewport.width >= 768;
        dom.add(
            None,
            Node::new(Key::Inert)
                .role("navigation", "Sidepanel")
                .visible(wide || state.side_menu_open),
        );

        if state.about_open {
            let sheet = dom.add(None, Node::new(Key::Inert).css(&[".oxd-dialog-sheet"]));
            dom.add(Some(sheet), Node::new(Key::Inert).role("heading", "About"));
            for row in [
                "Company Name: OrangeHRM",
                "Version: OrangeHRM OS 5.7",
                "Active Employees: 12",
                "Employees Terminated: 3",
            ] {
                dom.add(Some(sheet), Node::new(Key::Inert).text(row));
            }
            dom.add(
                Some(sheet),
                Node::new(Key::ClosePopup).css(&[".oxd-dialog-close-button"]),
            );
        }
    }

    fn change_password_dom(&self, state: &State, dom: &mut Dom) {
        let form = &state.form;
        dom.add(
            None,
            Node::new(Key::Inert)
                .css(&[".orangehrm-main-title"])
                .text("Update Password"),
        );

        dom.add(
            None,
            Node::new(Key::CurrentPassword)
                .css(&[CURRENT_PASSWORD_INPUT, ANY_PASSWORD_INPUT])
                .input(&form.current),
        );
        self.field_error(dom, CURRENT_PASSWORD_ERROR, &form.current_error);

        dom.add(
            None,
            Node::new(Key::NewPassword)
                .css(&[ANY_PASSWORD_INPUT])
                .input(&form.new),
        );
        self.field_error(dom, NEW_PASSWORD_ERROR, &form.new_error);
        dom.add(
            None,
            Node::new(Key::Inert)
                .css(&[".orangehrm-password-chip"])
                .text("For a strong password, please use a hard to guess combination of text"),
        );

        dom.add(
            None,
            Node::new(Key::ConfirmPassword)
                .css(&[CONFIRM_PASSWORD_INPUT, ANY_PASSWORD_INPUT])
                .input(&form.confirm),
        );
        self.field_error(dom, CONFIRM_PASSWORD_ERROR, &form.confirm_error);

        dom.add(None, Node::new(Key::Cancel).role("button", "Cancel"));
        dom.add(None, Node::new(Key::Save).role("button", "Save"));

        if let Some((kind, shown)) = &form.toast {
            let css = match kind {
                Toast::Success => ".oxd-toast-content-text.oxd-text--toast-message",
                Toast::Error => ".oxd-toast-content--error .oxd-text--toast-message",
            };
            let visible = shown.at.elapsed() >= self.render_delay;
            dom.add(
                None,
                Node::new(Key::Inert)
                    .css(&[css])
                    .text(shown.text.clone())
                    .visible(visible),
            );
        }
    }

    fn field_error(&self, dom: &mut Dom, css: &'static str, error: &Option<Shown>) {
        if let Some(shown) = error {
            dom.add(
                None,
                Node::new(Key::Inert)
                    .css(&[css, ANY_PASSWORD_ERROR])
                    .text(shown.text.clone())
                    .visible(self.shown(error)),
            );
        }
    }

    /// Exactly one visible match, like a Playwright action.
    fn target(&self, state: &State, selector: &Selector) -> Result<(Key, Option<String>, String)> {
        let dom = self.build_dom(state);
        let matches = dom.query(selector);
        match matches.as_slice() {
            [] => Err(Error::ElementNotFound(selector.to_string())),
            [one] => {
                let node = &dom.nodes[*one];
                if !node.visible {
                    return Err(Error::NotActionable {
                        selector: selector.to_string(),
                        reason: "element is not visible".into(),
                    });
                }
                Ok((node.key, node.value.clone(), node.text.clone()))
            }
            many => Err(Error::NotActionable {
                selector: selector.to_string(),
                reason: format!("strict mode violation: {} elements", many.len()),
            }),
        }
    }

    fn navigate(state: &mut State, path: &str) {
        state.menu_open = false;
        state.about_open = false;
        state.login = LoginForm::default();
        state.form = PasswordForm::default();

        let (screen, path) = match path {
            p if p.starts_with(LOGIN_PATH) => (Screen::Login, LOGIN_PATH),
            _ if !state.logged_in => (Screen::Login, LOGIN_PATH),
            p if p.starts_with(DASHBOARD_PATH) => (Screen::Dashboard, DASHBOARD_PATH),
            p if p.starts_with(CHANGE_PASSWORD_PATH) => (Screen::ChangePassword, CHANGE_PASSWORD_PATH),
            _ => (Screen::Blank, path),
        };
        state.screen = screen;
        state.url = format!("{BASE_URL}{path}");
    }

    fn submit_login(&self, state: &mut State) {
        let form = &mut state.login;
        form.alert = None;
        form.username_error = form.username.is_empty().then(|| Shown::new("Required"));
        form.password_error = form.password.is_empty().then(|| Shown::new("Required"));
        if form.username_error.is_some() || form.password_error.is_some() {
            return;
        }

        let validate_url = format!("{BASE_URL}{VALIDATE_PATH}");
        let mocked = state
            .routes
            .iter()
            .rev()
            .find(|(pattern, _)| route_matches(pattern, &validate_url))
            .map(|(_, response)| response.clone());
        if let Some(response) = mocked {
            let text = alert_text(&response.body).unwrap_or_default();
            state.login.alert = Some(Shown::new(text));
            return;
        }

        if state.login.username == ADMIN && state.login.password == state.admin_password {
            state.logged_in = true;
            Self::navigate(state, DASHBOARD_PATH);
        } else {
            state.login.alert = Some(Shown::new("Invalid credentials"));
        }
    }

    fn save_password(&self, state: &mut State) {
        let form = &mut state.form;
        form.toast = None;
        if form.current.is_empty() {
            form.current_error = Some(Shown::new("Required"));
        }
        if form.new.is_empty() {
            form.new_error = Some(Shown::new("Required"));
        }
        if form.confirm.is_empty() {
            form.confirm_error = Some(Shown::new("Required"));
        }
        if form.current_error.is_some() || form.new_error.is_some() || form.confirm_error.is_some() {
            return;
        }

        if form.current != state.admin_password {
            form.toast = Some((Toast::Error, Shown::new("Current Password is Incorrect")));
            return;
        }

        state.admin_password = form.new.clone();
        state.form = PasswordForm {
            toast: Some((Toast::Success, Shown::new("Successfully Saved"))),
            ..PasswordForm::default()
        };
    }

    fn recheck_confirmation(form: &mut PasswordForm) {
        if !form.confirm_touched {
            return;
        }
        form.confirm_error = if form.confirm.is_empty() {
            Some(Shown::new("Required"))
        } else if form.confirm != form.new {
            Some(Shown::new("Passwords do not match"))
        } else {
            None
        };
    }
}

impl Default for FakeHrm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowsingContext for FakeHrm {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.log.push(format!("goto {url}"));
        if let Some(path) = url.strip_prefix(BASE_URL) {
            Self::navigate(&mut state, path);
            Ok(())
        } else if url.starts_with("http://") || url.starts_with("https://") {
            state.screen = Screen::Blank;
            state.url = url.to_string();
            Ok(())
        } else {
            Err(Error::NavigationFailed {
                url: url.to_string(),
                reason: "net::ERR_INVALID_URL".into(),
            })
        }
    }

    fn url(&self) -> String {
        self.state.lock().url.clone()
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        let state = self.state.lock();
        Ok(self.build_dom(&state).query(selector).len())
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let mut state = self.state.lock();
        let (key, _, _) = self.target(&state, selector)?;
        state.log.push(format!("click {selector}"));

        match key {
            Key::LoginButton => self.submit_login(&mut state),
            Key::ProfileArea => state.menu_open = !state.menu_open,
            Key::MenuAbout => {
                state.menu_open = false;
                state.about_open = true;
            }
            Key::MenuSupport => state.menu_open = false,
            Key::MenuChangePassword => Self::navigate(&mut state, CHANGE_PASSWORD_PATH),
            Key::MenuLogout => {
                state.logged_in = false;
                Self::navigate(&mut state, LOGIN_PATH);
            }
            Key::ClosePopup => state.about_open = false,
            Key::Hamburger => state.side_menu_open = !state.side_menu_open,
            Key::Save => self.save_password(&mut state),
            Key::Cancel => Self::navigate(&mut state, DASHBOARD_PATH),
            _ => {}
        }
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
        let mut state = self.state.lock();
        let (key, _, _) = self.target(&state, selector)?;
        state.log.push(format!("fill {selector}"));

        let required = || (value.is_empty()).then(|| Shown::new("Required"));
        match key {
            Key::LoginUsername => {
                state.login.username = value.to_string();
                state.login.username_error = required();
            }
            Key::LoginPassword => {
                state.login.password = value.to_string();
                state.login.password_error = required();
            }
            Key::CurrentPassword => {
                let form = &mut state.form;
                form.toast = None;
                form.current = value.to_string();
                form.current_error = required();
            }
            Key::NewPassword => {
                let form = &mut state.form;
                form.toast = None;
                form.new = value.to_string();
                form.new_error = policy_message(value).map(Shown::new);
                Self::recheck_confirmation(form);
            }
            Key::ConfirmPassword => {
                let form = &mut state.form;
                form.toast = None;
                form.confirm = value.to_string();
                form.confirm_touched = true;
                Self::recheck_confirmation(form);
            }
            _ => {
                return Err(Error::NotActionable {
                    selector: selector.to_string(),
                    reason: "element is not an <input>".into(),
                });
            }
        }
        Ok(())
    }

    async fn text_content(&self, selector: &Selector) -> Result<Option<String>> {
        let state = self.state.lock();
        let dom = self.build_dom(&state);
        match dom.query(selector).as_slice() {
            [] => Err(Error::ElementNotFound(selector.to_string())),
            [one] => Ok(Some(dom.nodes[*one].text.clone())),
            many => Err(Error::NotActionable {
                selector: selector.to_string(),
                reason: format!("strict mode violation: {} elements", many.len()),
            }),
        }
    }

    async fn input_value(&self, selector: &Selector) -> Result<String> {
        let state = self.state.lock();
        let (_, value, _) = self.target(&state, selector)?;
        value.ok_or_else(|| Error::NotActionable {
            selector: selector.to_string(),
            reason: "element is not an <input>".into(),
        })
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        let state = self.state.lock();
        let dom = self.build_dom(&state);
        match dom.query(selector).as_slice() {
            [] => Ok(false),
            [one] => Ok(dom.nodes[*one].visible),
            many => Err(Error::NotActionable {
                selector: selector.to_string(),
                reason: format!("strict mode violation: {} elements", many.len()),
            }),
        }
    }

    async fn ready_state(&self) -> Result<ReadyState> {
        Ok(ReadyState::Complete)
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        let mut state = self.state.lock();
        state.viewport = viewport;
        state.side_menu_open = false;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let mut state = self.state.lock();
        state.screenshots += 1;
        Ok(b"\x89PNG\r\n\x1a\nfake".to_vec())
    }

    async fn route(&self, pattern: &str, response: MockResponse) -> Result<()> {
        self.state.lock().routes.push((pattern.to_string(), response));
        Ok(())
    }

    async fn storage_state(&self) -> Result<StorageState> {
        let state = self.state.lock();
        let cookies = if state.logged_in {
            vec![Cookie {
                name: "orangehrm".into(),
                value: "5f1d0c".into(),
                domain: "hrm.test".into(),
                path: "/web".into(),
                expires: -1.0,
                http_only: true,
                secure: true,
                same_site: Some("Lax".into()),
            }]
        } else {
            Vec::new()
        };
        Ok(StorageState {
            cookies,
            origins: Vec::new(),
        })
    }
}
