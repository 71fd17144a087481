//! Request and result records for simulated flows

use serde::{Deserialize, Serialize};

use crate::session::AuthSession;
use crate::user::User;

/// Email/password login request
///
/// Missing fields deserialize as empty strings so that malformed input
/// falls through to the ordinary lookup and validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn remember_me(mut self) -> Self {
        self.remember_me = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

impl PasswordResetRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
}

impl PasswordResetConfirm {
    pub fn new(token: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            new_password: new_password.into(),
        }
    }
}

/// Provider redirect back to the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCallback {
    pub provider: String,
    #[serde(default)]
    pub code: String,
    /// State echoed back by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// State the caller issued when starting the flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_state: Option<String>,
}

impl OAuthCallback {
    pub fn new(provider: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            code: code.into(),
            state: None,
            expected_state: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn expecting_state(mut self, expected: impl Into<String>) -> Self {
        self.expected_state = Some(expected.into());
        self
    }
}

/// Result of starting an OAuth flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthStart {
    pub provider: String,
    pub state: String,
    pub authorization_url: String,
}

/// Outcome of a simulated flow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "requires2FA", default, skip_serializing_if = "Option::is_none")]
    pub requires_2fa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_password_reset: Option<bool>,
}

impl AuthResult {
    /// Bare success with nothing attached
    pub fn succeeded() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn authenticated(user: User, session: AuthSession) -> Self {
        Self {
            success: true,
            user: Some(user),
            session: Some(session),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Password accepted but a second factor is still needed
    pub fn two_factor_required(user: User) -> Self {
        Self {
            success: false,
            user: Some(user),
            requires_2fa: Some(true),
            ..Self::default()
        }
    }

    pub fn requires_two_factor(&self) -> bool {
        self.requires_2fa.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_login_fields_default_to_empty() {
        let creds: LoginCredentials = serde_json::from_str("{}").unwrap();
        assert_eq!(creds, LoginCredentials::default());
    }

    #[test]
    fn test_failed_result_shape() {
        let json = serde_json::to_value(AuthResult::failed("Invalid credentials")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "Invalid credentials" })
        );
    }

    #[test]
    fn test_two_factor_result_flag_name() {
        let result = AuthResult::two_factor_required(User::new("a@x.com", "A"));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["requires2FA"], true);
        assert_eq!(json["success"], false);
        assert!(json.get("session").is_none());
        assert!(result.requires_two_factor());
    }
}
