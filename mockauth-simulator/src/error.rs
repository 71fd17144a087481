//! Simulator error types

use mockauth_core::AuthResult;
use thiserror::Error;

/// Every failure a simulated flow can report.
///
/// The display text is the message callers see in `AuthResult::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid 2FA code")]
    InvalidTwoFactorCode,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid OAuth state")]
    InvalidOAuthState,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SimulatorError> for AuthResult {
    fn from(err: SimulatorError) -> Self {
        if let SimulatorError::Internal(msg) = &err {
            tracing::error!("Internal error: {}", msg);
        }
        AuthResult::failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_result_carries_display_text() {
        let result: AuthResult = SimulatorError::SessionNotFound.into();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Session not found"));
        assert!(result.user.is_none());
    }
}
