//! Credential login, second factor and logout

use mockauth_core::{
    AuthEvent, AuthEventType, AuthResult, LoginCredentials, SessionId, User, UserId,
};

use super::session::create_session;
use super::FlowResult;
use crate::crypto::{is_valid_two_factor_code, password_accepted};
use crate::error::SimulatorError;
use crate::state::SimulatorState;

/// Record a bad password for a known account and build its event.
///
/// Attempts are only counted and reported; nothing is locked out.
fn password_failure(state: &mut SimulatorState, user: &User) -> AuthEvent {
    let attempts = state.record_failed_attempt(&user.email);
    let mut event = AuthEvent::new(AuthEventType::LoginFailure, false)
        .with_user(&user.id)
        .with_data("email", user.email.as_str())
        .with_data("failedAttempts", attempts)
        .with_error("Invalid password");

    if attempts >= state.config.max_login_attempts {
        event = event
            .with_data("lockoutThresholdReached", true)
            .with_data("lockoutDuration", state.config.lockout_duration);
    }
    event
}

pub(crate) fn login(state: &mut SimulatorState, credentials: &LoginCredentials) -> FlowResult {
    // Unknown accounts get the same answer as bad passwords
    let Some(user) = state.find_user_by_email(&credentials.email).cloned() else {
        state.emit(
            AuthEvent::new(AuthEventType::LoginFailure, false)
                .with_data("email", credentials.email.as_str())
                .with_error("User not found"),
        );
        return Err(SimulatorError::InvalidCredentials);
    };

    if !password_accepted(&credentials.password) {
        let event = password_failure(state, &user);
        state.emit(event);
        return Err(SimulatorError::InvalidCredentials);
    }

    state.clear_failed_attempts(&credentials.email);

    if user.two_factor_enabled {
        state.emit(
            AuthEvent::new(AuthEventType::TwoFactorRequired, true)
                .with_user(&user.id)
                .with_data("email", user.email.as_str()),
        );
        return Ok(AuthResult::two_factor_required(user));
    }

    let session = create_session(state, &user.id, credentials.remember_me);
    state.emit(
        AuthEvent::new(AuthEventType::LoginSuccess, true)
            .with_user(&user.id)
            .with_session(&session.id)
            .with_data("email", user.email.as_str()),
    );

    Ok(AuthResult::authenticated(user, session))
}

/// Any six-digit code passes; it is not tied to a particular login
pub(crate) fn verify_two_factor(
    state: &mut SimulatorState,
    user_id: &UserId,
    code: &str,
) -> FlowResult {
    let user = state
        .find_user(user_id)
        .cloned()
        .ok_or(SimulatorError::UserNotFound)?;

    if !is_valid_two_factor_code(code) {
        state.emit(
            AuthEvent::new(AuthEventType::TwoFactorFailure, false)
                .with_user(&user.id)
                .with_error("Invalid 2FA code"),
        );
        return Err(SimulatorError::InvalidTwoFactorCode);
    }

    let session = create_session(state, &user.id, false);
    state.emit(
        AuthEvent::new(AuthEventType::TwoFactorSuccess, true)
            .with_user(&user.id)
            .with_session(&session.id),
    );

    Ok(AuthResult::authenticated(user, session))
}

pub(crate) fn logout(state: &mut SimulatorState, session_id: &SessionId) -> FlowResult {
    let session = state
        .remove_session(session_id)
        .ok_or(SimulatorError::SessionNotFound)?;

    state.emit(
        AuthEvent::new(AuthEventType::Logout, true)
            .with_user(&session.user_id)
            .with_session(&session.id),
    );

    Ok(AuthResult::succeeded())
}
