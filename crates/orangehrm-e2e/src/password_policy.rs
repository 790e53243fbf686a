// Password policy - the rules OrangeHRM enforces on a new password
//
// Rules are checked in a fixed order and the first failure wins, which is
// also the message the UI renders under the field.

use std::fmt;

/// One policy dimension and the exact message the UI shows when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRule {
    Required,
    MinLength,
    MaxLength,
    Digit,
    LowerCase,
    /// Confirmation differs from the new password
    ConfirmationMismatch,
}

impl PolicyRule {
    /// Rules applying to the password itself, in evaluation order.
    pub const PASSWORD_RULES: [PolicyRule; 5] = [
        PolicyRule::Required,
        PolicyRule::MinLength,
        PolicyRule::MaxLength,
        PolicyRule::Digit,
        PolicyRule::LowerCase,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            PolicyRule::Required => "Required",
            PolicyRule::MinLength => "Should have at least 7 characters",
            PolicyRule::MaxLength => "Should not exceed 64 characters",
            PolicyRule::Digit => "Your password must contain minimum 1 number",
            PolicyRule::LowerCase => "Your password must contain minimum 1 lower-case letter",
            PolicyRule::ConfirmationMismatch => "Passwords do not match",
        }
    }

    /// Exact (trimmed) match against the known messages.
    pub fn from_message(text: &str) -> Option<PolicyRule> {
        let text = text.trim();
        Self::PASSWORD_RULES
            .iter()
            .chain(std::iter::once(&PolicyRule::ConfirmationMismatch))
            .copied()
            .find(|rule| rule.message() == text)
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of checking a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyCheck {
    Satisfied,
    Violated(PolicyRule),
}

impl PolicyCheck {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PolicyCheck::Satisfied)
    }

    pub fn violation(&self) -> Option<PolicyRule> {
        match self {
            PolicyCheck::Satisfied => None,
            PolicyCheck::Violated(rule) => Some(*rule),
        }
    }

    /// Message the UI should show, if any.
    pub fn expected_message(&self) -> Option<&'static str> {
        self.violation().map(|rule| rule.message())
    }
}

/// Length bounds are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_len: 7,
            max_len: 64,
        }
    }
}

impl PasswordPolicy {
    pub fn evaluate(&self, candidate: &str) -> PolicyCheck {
        PolicyRule::PASSWORD_RULES
            .iter()
            .copied()
            .find(|rule| !self.holds(*rule, candidate))
            .map_or(PolicyCheck::Satisfied, PolicyCheck::Violated)
    }

    /// Checks the confirmation field against the new password.
    pub fn check_confirmation(&self, new_password: &str, confirmation: &str) -> PolicyCheck {
        if confirmation.is_empty() {
            PolicyCheck::Violated(PolicyRule::Required)
        } else if new_password != confirmation {
            PolicyCheck::Violated(PolicyRule::ConfirmationMismatch)
        } else {
            PolicyCheck::Satisfied
        }
    }

    fn holds(&self, rule: PolicyRule, candidate: &str) -> bool {
        let len = candidate.chars().count();
        match rule {
            PolicyRule::Required => !candidate.is_empty(),
            PolicyRule::MinLength => len >= self.min_len,
            PolicyRule::MaxLength => len <= self.max_len,
            PolicyRule::Digit => candidate.chars().any(|c| c.is_ascii_digit()),
            PolicyRule::LowerCase => candidate.chars().any(|c| c.is_lowercase()),
            PolicyRule::ConfirmationMismatch => true,
        }
    }
}

/// A candidate password paired with the outcome the UI must show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCase {
    pub candidate: String,
    pub expected: PolicyCheck,
}

impl PolicyCase {
    pub fn new(candidate: impl Into<String>, expected: PolicyCheck) -> Self {
        Self {
            candidate: candidate.into(),
            expected,
        }
    }

    pub fn violating(candidate: impl Into<String>, rule: PolicyRule) -> Self {
        Self::new(candidate, PolicyCheck::Violated(rule))
    }
}

/// One candidate per length/character-class rule, each failing exactly there.
pub fn standard_cases() -> Vec<PolicyCase> {
    vec![
        PolicyCase::violating("123", PolicyRule::MinLength),
        PolicyCase::violating("A".repeat(65), PolicyRule::MaxLength),
        PolicyCase::violating("abcdefg", PolicyRule::Digit),
        PolicyCase::violating("1234567", PolicyRule::LowerCase),
        PolicyCase::new("orange123", PolicyCheck::Satisfied),
    ]
}
