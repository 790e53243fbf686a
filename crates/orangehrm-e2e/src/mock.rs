// Network mocks - canned responses for endpoints the demo cannot reproduce

use crate::context::BrowsingContext;
use crate::error::Result;

/// Route pattern of the login form submission.
pub const LOGIN_VALIDATE_ROUTE: &str = "**/web/index.php/auth/validate";

/// Login page re-rendered with the "Account disabled" alert.
const DISABLED_USER_PAGE: &str = include_str!("../fixtures/disabled_user.html");

/// Canned HTTP response used to fulfill an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=UTF-8".to_string(),
            body: body.into(),
        }
    }

    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_string(),
            body: value.to_string(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// Answers the login submission with the disabled-account page.
pub async fn mock_disabled_user_response(context: &dyn BrowsingContext) -> Result<()> {
    tracing::info!(route = LOGIN_VALIDATE_ROUTE, "mocking disabled user response");
    context
        .route(LOGIN_VALIDATE_ROUTE, MockResponse::html(DISABLED_USER_PAGE))
        .await
}
