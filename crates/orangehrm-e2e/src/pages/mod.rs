// Page objects
//
// A feature page embeds a `BasePage` and adds its own locator table. Every
// page resolves its table once, at construction, against the shared
// browsing context.

mod base;
mod change_password;
mod login;
pub mod tables;

pub use base::{BasePage, ViewportPreset};
pub use change_password::{
    ChangePasswordPage, ChangePasswordState, RejectionReason, SUCCESS_MESSAGE, TITLE,
    WRONG_CURRENT_PASSWORD,
};
pub use login::{LoginOutcome, LoginPage};

use crate::element::ElementHandle;
use crate::error::Result;
use crate::locator::Elements;

/// Application paths, relative to the configured base URL.
pub mod paths {
    pub const LOGIN: &str = "/web/index.php/auth/login";
    pub const DASHBOARD: &str = "/web/index.php/dashboard/index";
    pub const CHANGE_PASSWORD: &str = "/web/index.php/pim/updatePassword";
}

/// Shared surface of every page object.
pub trait PageObject {
    /// The embedded base page (the page itself for `BasePage`).
    fn base(&self) -> &BasePage;

    /// Handles resolved from this page's own locator table.
    fn elements(&self) -> &Elements;

    /// Looks up a handle by table name.
    ///
    /// Fails with `Error::UnknownElement` for names the table does not declare.
    fn element(&self, name: &str) -> Result<&ElementHandle> {
        self.elements().get(name)
    }

    fn current_url(&self) -> String {
        self.base().current_url()
    }
}
