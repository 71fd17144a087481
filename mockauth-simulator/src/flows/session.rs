//! Session creation and validation

use chrono::{DateTime, Duration, Utc};
use mockauth_core::{
    AuthEvent, AuthEventType, AuthResult, AuthSession, DeviceInfo, SessionId, UserId,
};

use super::FlowResult;
use crate::crypto::generate_token;
use crate::error::SimulatorError;
use crate::state::SimulatorState;

/// Lifetime of a "remember me" session
pub const REMEMBER_ME_DAYS: i64 = 30;

/// Open a session for an existing user and emit `session-created`
pub(crate) fn create_session(
    state: &mut SimulatorState,
    user_id: &UserId,
    remember_me: bool,
) -> AuthSession {
    let now = Utc::now();
    let lifetime = if remember_me {
        Duration::days(REMEMBER_ME_DAYS)
    } else {
        Duration::minutes(i64::from(state.config.session_timeout))
    };

    let session = AuthSession {
        id: SessionId::generate(),
        user_id: user_id.clone(),
        token: generate_token(),
        refresh_token: generate_token(),
        created_at: now,
        expires_at: now + lifetime,
        device_info: DeviceInfo::placeholder(),
    };
    state.sessions.push(session.clone());

    state.emit(
        AuthEvent::new(AuthEventType::SessionCreated, true)
            .with_user(user_id)
            .with_session(&session.id)
            .with_data("rememberMe", remember_me)
            .with_data("expiresAt", session.expires_at.to_rfc3339()),
    );

    session
}

/// Resolve a live session; expired sessions are dropped on sight
pub(crate) fn check_session(
    state: &mut SimulatorState,
    session_id: &SessionId,
    now: DateTime<Utc>,
) -> FlowResult {
    let Some(session) = state.find_session(session_id).cloned() else {
        state.emit(
            AuthEvent::new(AuthEventType::SessionExpired, false)
                .with_session(session_id)
                .with_data("reason", "Session not found")
                .with_error("Session not found"),
        );
        return Err(SimulatorError::SessionNotFound);
    };

    if session.is_expired_at(now) {
        state.remove_session(session_id);
        state.emit(
            AuthEvent::new(AuthEventType::SessionExpired, false)
                .with_user(&session.user_id)
                .with_session(session_id)
                .with_data("reason", "Session expired")
                .with_error("Session expired"),
        );
        return Err(SimulatorError::SessionExpired);
    }

    let user = state
        .find_user(&session.user_id)
        .cloned()
        .ok_or(SimulatorError::UserNotFound)?;

    Ok(AuthResult::authenticated(user, session))
}
