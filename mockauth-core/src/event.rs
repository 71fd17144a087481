//! Audit events emitted by simulated flows

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::Result;
use crate::session::SessionId;
use crate::user::UserId;

/// Kind of an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthEventType {
    #[serde(rename = "login-attempt")]
    LoginAttempt,
    #[serde(rename = "login-success")]
    LoginSuccess,
    #[serde(rename = "login-failure")]
    LoginFailure,
    #[serde(rename = "2fa-required")]
    TwoFactorRequired,
    #[serde(rename = "2fa-success")]
    TwoFactorSuccess,
    #[serde(rename = "2fa-failure")]
    TwoFactorFailure,
    #[serde(rename = "password-reset-requested")]
    PasswordResetRequested,
    #[serde(rename = "password-reset-completed")]
    PasswordResetCompleted,
    #[serde(rename = "oauth-initiated")]
    OAuthInitiated,
    #[serde(rename = "oauth-callback")]
    OAuthCallback,
    #[serde(rename = "session-created")]
    SessionCreated,
    #[serde(rename = "session-expired")]
    SessionExpired,
    #[serde(rename = "logout")]
    Logout,
    #[serde(rename = "simulator-started")]
    SimulatorStarted,
    #[serde(rename = "simulator-stopped")]
    SimulatorStopped,
}

impl AuthEventType {
    pub const ALL: [AuthEventType; 15] = [
        AuthEventType::LoginAttempt,
        AuthEventType::LoginSuccess,
        AuthEventType::LoginFailure,
        AuthEventType::TwoFactorRequired,
        AuthEventType::TwoFactorSuccess,
        AuthEventType::TwoFactorFailure,
        AuthEventType::PasswordResetRequested,
        AuthEventType::PasswordResetCompleted,
        AuthEventType::OAuthInitiated,
        AuthEventType::OAuthCallback,
        AuthEventType::SessionCreated,
        AuthEventType::SessionExpired,
        AuthEventType::Logout,
        AuthEventType::SimulatorStarted,
        AuthEventType::SimulatorStopped,
    ];

    /// The wire tag, e.g. `2fa-required`
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthEventType::LoginAttempt => "login-attempt",
            AuthEventType::LoginSuccess => "login-success",
            AuthEventType::LoginFailure => "login-failure",
            AuthEventType::TwoFactorRequired => "2fa-required",
            AuthEventType::TwoFactorSuccess => "2fa-success",
            AuthEventType::TwoFactorFailure => "2fa-failure",
            AuthEventType::PasswordResetRequested => "password-reset-requested",
            AuthEventType::PasswordResetCompleted => "password-reset-completed",
            AuthEventType::OAuthInitiated => "oauth-initiated",
            AuthEventType::OAuthCallback => "oauth-callback",
            AuthEventType::SessionCreated => "session-created",
            AuthEventType::SessionExpired => "session-expired",
            AuthEventType::Logout => "logout",
            AuthEventType::SimulatorStarted => "simulator-started",
            AuthEventType::SimulatorStopped => "simulator-stopped",
        }
    }
}

impl fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthEventType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AuthEventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownEventType(s.to_string()))
    }
}

/// An append-only audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEvent {
    #[serde(rename = "type")]
    pub event_type: AuthEventType,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl AuthEvent {
    pub fn new(event_type: AuthEventType, success: bool) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            success,
            data: None,
            error: None,
            user_id: None,
            session_id: None,
        }
    }

    /// Attach a key to the free-form data payload
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_user(mut self, user_id: &UserId) -> Self {
        self.user_id = Some(user_id.clone());
        self
    }

    pub fn with_session(mut self, session_id: &SessionId) -> Self {
        self.session_id = Some(session_id.clone());
        self
    }

    /// Look up a key in the data payload
    pub fn data_value(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }

    /// Convenience for string-valued payload entries
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data_value(key).and_then(Value::as_str)
    }

    /// Load an event log previously serialized as a JSON array
    pub fn parse_log(json: &str) -> Result<Vec<AuthEvent>> {
        Ok(serde_json::from_str(json)?)
    }
}
