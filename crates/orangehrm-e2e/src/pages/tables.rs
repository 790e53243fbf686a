// Locator tables for the OrangeHRM pages
//
// Kept in the serialized descriptor format so a table can be dumped,
// diffed, or overridden from a JSON file without touching page code.

use crate::error::Result;
use crate::locator::LocatorTable;
use serde_json::{Value, json};

const PASSWORD_INPUT: &str = r#"+ div input[type="password"]"#;

/// Top bar, side panel, profile menu and the About dialog.
pub fn base_page() -> Result<LocatorTable> {
    LocatorTable::from_json("BasePage", &base_page_json())
}

pub fn login_page() -> Result<LocatorTable> {
    LocatorTable::from_json("LoginPage", &login_page_json())
}

pub fn change_password_page() -> Result<LocatorTable> {
    LocatorTable::from_json("ChangePasswordPage", &change_password_page_json())
}

pub fn base_page_json() -> Value {
    json!({
        "navbar": ".oxd-topbar-header",
        "sidebar": ["navigation", { "name": "Sidepanel" }],
        "hamburger": ".oxd-topbar-header-hamburger",
        "path": ["heading", { "name": "Dashboard" }],
        "profileDropdown": ".oxd-topbar-header-userarea",
        "logoutButton": ["menuitem", { "name": "Logout" }],
        "aboutButton": ["menuitem", { "name": "About" }],
        "changePasswordButton": ["menuitem", { "name": "Change Password" }],
        "popup": ".oxd-dialog-sheet",
        "popupTitle": ["heading", { "name": "About" }],
        "popupCompanyName": { "text": "Company Name: " },
        "popupVersion": { "text": "Version: " },
        "popupActiveEmployees": { "text": "Active Employees: " },
        "popupEmployeesTerminated": { "text": "Employees Terminated: " },
        "closePopupButton": ".oxd-dialog-close-button",
        "spinner": ".oxd-loading-spinner"
    })
}

pub fn login_page_json() -> Value {
    json!({
        "title": ["heading", { "name": "Login" }],
        "username": { "placeholder": "Username" },
        "password": { "placeholder": "Password" },
        "loginButton": ["button", { "name": "Login" }],
        "usernameValidationMessage": r#"div:has(input[placeholder="Username"]) + span"#,
        "passwordValidationMessage": r#"div:has(input[placeholder="Password"]) + span"#,
        "errorAlert": ".oxd-alert--error",
        "errorAlertText": ".oxd-alert--error .oxd-alert-content-text"
    })
}

pub fn change_password_page_json() -> Value {
    let field = |label: &str| {
        format!(r#"div.oxd-input-group__label-wrapper:has(label:text("{label}")) {PASSWORD_INPUT}"#)
    };
    // text-is: "Password" must not match the other two labels
    let field_error = |label: &str| {
        format!(r#".oxd-input-group:has(label:text-is("{label}")) .oxd-input-field-error-message"#)
    };

    json!({
        "pimPath": ["heading", { "name": "PIM" }],
        "containerChangePassword": ".orangehrm-main-title",
        "currentPassword": field("Current Password"),
        // label:text("Password") also matches the other two labels
        "newPassword": { "css": field("Password"), "nth": 1 },
        "confirmPassword": field("Confirm Password"),
        "saveButton": ["button", { "name": "Save" }],
        "cancelButton": ["button", { "name": "Cancel" }],
        "spinner": ".oxd-loading-spinner",
        "errorMessage": ".oxd-toast-content--error .oxd-text--toast-message",
        "successMessage": ".oxd-toast-content-text.oxd-text--toast-message",
        "newPasswordPolicy": ".orangehrm-password-chip",
        "alertMessageNewPassword": field_error("Password"),
        "alertMessageConfirmPassword": field_error("Confirm Password")
    })
}
