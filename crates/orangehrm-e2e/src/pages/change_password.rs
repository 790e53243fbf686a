// ChangePasswordPage - the Update Password form under PIM
//
// The form moves Idle -> Filling -> Submitted -> {Succeeded, Rejected}.
// Success is the spinner gone, all three fields cleared and the
// "Successfully Saved" toast; rejection is either the wrong-password toast
// or an inline policy message under the new or confirmation field.

use super::{BasePage, PageObject, tables};
use crate::assertions::expect;
use crate::element::ElementHandle;
use crate::error::{Error, Result};
use crate::locator::Elements;
use crate::password_policy::{PasswordPolicy, PolicyCase, PolicyCheck, PolicyRule};
use crate::wait::POLL_INTERVAL;
use std::fmt;
use std::time::Instant;

pub const TITLE: &str = "Update Password";
pub const SUCCESS_MESSAGE: &str = "Successfully Saved";
pub const WRONG_CURRENT_PASSWORD: &str = "Current Password is Incorrect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    WrongCurrentPassword,
    Policy(PolicyRule),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::WrongCurrentPassword => f.write_str(WRONG_CURRENT_PASSWORD),
            RejectionReason::Policy(rule) => f.write_str(rule.message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePasswordState {
    Idle,
    Filling,
    Submitted,
    Succeeded,
    Rejected(RejectionReason),
}

impl ChangePasswordState {
    /// Whether the form may move from `self` to `next`.
    ///
    /// Filling is allowed from any state but `Submitted`, so a rejected or
    /// completed form can be edited again.
    pub fn can_transition_to(&self, next: &ChangePasswordState) -> bool {
        use ChangePasswordState::*;
        matches!(
            (self, next),
            (Idle | Filling | Succeeded | Rejected(_), Filling)
                | (Filling, Submitted)
                | (Submitted, Succeeded | Rejected(_))
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChangePasswordState::Succeeded | ChangePasswordState::Rejected(_))
    }
}

pub struct ChangePasswordPage {
    base: BasePage,
    elements: Elements,
    policy: PasswordPolicy,
    state: ChangePasswordState,
}

impl ChangePasswordPage {
    pub fn new(base: BasePage) -> Result<Self> {
        let elements = tables::change_password_page()?.resolve(base.context());
        Ok(Self {
            base,
            elements,
            policy: PasswordPolicy::default(),
            state: ChangePasswordState::Idle,
        })
    }

    pub fn state(&self) -> ChangePasswordState {
        self.state
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// The "Update Password" container title is visible within 5 seconds.
    pub async fn is_container_title_visible(&self) -> bool {
        match self.elements.get("containerChangePassword") {
            Ok(title) => {
                title
                    .is_visible_within(self.base.config().timeouts().default)
                    .await
            }
            Err(_) => false,
        }
    }

    /// The container title reads exactly "Update Password".
    pub async fn is_title_change_password_ok(&self) -> bool {
        let Ok(title) = self.elements.get("containerChangePassword") else {
            return false;
        };
        expect(title.clone())
            .with_timeout(self.base.config().timeouts().default)
            .to_have_text(TITLE)
            .await
            .is_ok()
    }

    pub async fn enter_current_password(&mut self, password: &str) -> Result<()> {
        self.transition(ChangePasswordState::Filling)?;
        self.elements.get("currentPassword")?.fill(password).await
    }

    pub async fn enter_new_password(&mut self, password: &str) -> Result<()> {
        self.transition(ChangePasswordState::Filling)?;
        self.elements.get("newPassword")?.fill(password).await
    }

    pub async fn confirm_new_password(&mut self, password: &str) -> Result<()> {
        self.transition(ChangePasswordState::Filling)?;
        self.elements.get("confirmPassword")?.last().fill(password).await
    }

    /// Fills the form, saves, and waits for the outcome.
    ///
    /// Fails with `Error::AssertionTimeout` when neither success nor a
    /// rejection is observed within the page-load timeout.
    pub async fn change_password(&mut self, current: &str, new: &str) -> Result<ChangePasswordState> {
        self.enter_current_password(current).await?;
        self.enter_new_password(new).await?;
        self.confirm_new_password(new).await?;
        self.submit().await
    }

    /// Clicks Save and observes the result.
    ///
    /// On any error the form goes back to `Filling`, so it can be corrected
    /// and submitted again.
    pub async fn submit(&mut self) -> Result<ChangePasswordState> {
        self.transition(ChangePasswordState::Submitted)?;
        let outcome = match self.await_outcome().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "submit failed, form back to filling");
                self.state = ChangePasswordState::Filling;
                return Err(e);
            }
        };

        self.transition(outcome)?;
        tracing::info!(state = ?outcome, "password change finished");
        Ok(outcome)
    }

    async fn await_outcome(&self) -> Result<ChangePasswordState> {
        self.elements.get("saveButton")?.click().await?;

        let timeout = self.base.config().timeouts().page_load;
        let start = Instant::now();
        loop {
            if let Some(outcome) = self.observe_outcome().await? {
                return Ok(outcome);
            }

            if start.elapsed() >= timeout {
                return Err(Error::AssertionTimeout(format!(
                    "No password change outcome after {timeout:?}"
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn observe_outcome(&self) -> Result<Option<ChangePasswordState>> {
        let error_toast = self.elements.get("errorMessage")?;
        if error_toast.is_visible().await.unwrap_or(false) {
            let text = read_trimmed(error_toast).await.unwrap_or_default();
            if text == WRONG_CURRENT_PASSWORD {
                return Ok(Some(ChangePasswordState::Rejected(
                    RejectionReason::WrongCurrentPassword,
                )));
            }
            return Err(Error::AssertionFailed(format!(
                "unexpected error toast '{text}'"
            )));
        }

        for name in ["alertMessageNewPassword", "alertMessageConfirmPassword"] {
            if let Some(text) = self.visible_text(name).await? {
                let rule = PolicyRule::from_message(&text).ok_or_else(|| {
                    Error::AssertionFailed(format!("unknown policy message '{text}'"))
                })?;
                return Ok(Some(ChangePasswordState::Rejected(RejectionReason::Policy(
                    rule,
                ))));
            }
        }

        if self.is_saved().await? {
            return Ok(Some(ChangePasswordState::Succeeded));
        }
        Ok(None)
    }

    async fn is_saved(&self) -> Result<bool> {
        if self.elements.get("spinner")?.is_visible().await.unwrap_or(false) {
            return Ok(false);
        }
        let saved = self
            .visible_text("successMessage")
            .await?
            .is_some_and(|text| text.contains(SUCCESS_MESSAGE));
        if !saved {
            return Ok(false);
        }

        for field in self.fields()? {
            if !field.input_value().await.unwrap_or_default().is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The error toast reads exactly `text` within 5 seconds.
    pub async fn expect_error_message(&self, text: &str) -> Result<()> {
        expect(self.elements.get("errorMessage")?.clone())
            .with_timeout(self.base.config().timeouts().default)
            .to_have_text(text)
            .await
    }

    /// Inline message under the new-password field, if shown within 3 seconds.
    pub async fn new_password_message(&self) -> Result<Option<String>> {
        self.message_within_short("alertMessageNewPassword").await
    }

    /// Inline message under the confirmation field, if shown within 3 seconds.
    pub async fn confirm_password_message(&self) -> Result<Option<String>> {
        self.message_within_short("alertMessageConfirmPassword").await
    }

    /// Enters `candidate` as the new password and reads the policy verdict
    /// the UI renders for it.
    pub async fn check_password_policy(&mut self, candidate: &str) -> Result<PolicyCheck> {
        self.enter_new_password(candidate).await?;
        let message = self.new_password_message().await?;
        check_from_message(message)
    }

    /// True when the UI accepts `candidate`: no policy message under the field.
    pub async fn validate_password(&mut self, candidate: &str) -> bool {
        match self.check_password_policy(candidate).await {
            Ok(check) => check.is_satisfied(),
            Err(e) => {
                tracing::warn!(error = %e, "password validation degraded to false");
                false
            }
        }
    }

    /// Enters both passwords and reads the message under the confirmation field.
    pub async fn check_confirmation(&mut self, new: &str, confirmation: &str) -> Result<PolicyCheck> {
        self.enter_new_password(new).await?;
        self.confirm_new_password(confirmation).await?;
        let message = self.confirm_password_message().await?;
        check_from_message(message)
    }

    /// Runs every case and fails listing all candidates whose on-screen
    /// verdict differs from the expected one.
    pub async fn assert_policy_messages(&mut self, cases: &[PolicyCase]) -> Result<()> {
        let mut mismatches = Vec::new();
        for case in cases {
            let observed = self.check_password_policy(&case.candidate).await?;
            tracing::debug!(candidate = %case.candidate, ?observed, "policy case");
            if observed != case.expected {
                mismatches.push(format!(
                    "'{}': expected {}, got {}",
                    case.candidate,
                    describe(case.expected),
                    describe(observed)
                ));
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(Error::AssertionFailed(format!(
                "password policy messages differ: {}",
                mismatches.join("; ")
            )))
        }
    }

    fn fields(&self) -> Result<[ElementHandle; 3]> {
        Ok([
            self.elements.get("currentPassword")?.clone(),
            self.elements.get("newPassword")?.clone(),
            self.elements.get("confirmPassword")?.last(),
        ])
    }

    async fn visible_text(&self, name: &str) -> Result<Option<String>> {
        let handle = self.elements.get(name)?;
        if !handle.is_visible().await.unwrap_or(false) {
            return Ok(None);
        }
        Ok(read_trimmed(handle).await)
    }

    async fn message_within_short(&self, name: &str) -> Result<Option<String>> {
        let handle = self.elements.get(name)?;
        if !handle
            .is_visible_within(self.base.config().timeouts().short)
            .await
        {
            return Ok(None);
        }
        Ok(read_trimmed(handle).await)
    }

    fn transition(&mut self, next: ChangePasswordState) -> Result<()> {
        if self.state == next && next == ChangePasswordState::Filling {
            return Ok(());
        }
        if !self.state.can_transition_to(&next) {
            return Err(Error::AssertionFailed(format!(
                "change password form cannot go from {:?} to {:?}",
                self.state, next
            )));
        }
        tracing::debug!(from = ?self.state, to = ?next, "change password state");
        self.state = next;
        Ok(())
    }
}

fn check_from_message(message: Option<String>) -> Result<PolicyCheck> {
    match message {
        None => Ok(PolicyCheck::Satisfied),
        Some(text) => PolicyRule::from_message(&text)
            .map(PolicyCheck::Violated)
            .ok_or_else(|| Error::AssertionFailed(format!("unknown policy message '{text}'"))),
    }
}

fn describe(check: PolicyCheck) -> String {
    match check.expected_message() {
        Some(message) => format!("'{message}'"),
        None => "no message".to_string(),
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

impl PageObject for ChangePasswordPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn elements(&self) -> &Elements {
        &self.elements
    }
}

impl std::fmt::Debug for ChangePasswordPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordPage")
            .field("state", &self.state)
            .field("elements", &self.elements)
            .finish()
    }
}
