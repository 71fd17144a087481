//! Password reset request and confirmation

use mockauth_core::{
    AuthEvent, AuthEventType, AuthResult, PasswordResetConfirm, PasswordResetRequest,
};

use super::FlowResult;
use crate::crypto::generate_secret;
use crate::state::SimulatorState;

/// Always reports success so callers cannot probe which emails exist.
/// The reset token only ever appears in the event log.
pub(crate) fn request_password_reset(
    state: &mut SimulatorState,
    request: &PasswordResetRequest,
) -> FlowResult {
    let event = AuthEvent::new(AuthEventType::PasswordResetRequested, true)
        .with_data("email", request.email.as_str());

    let event = match state.find_user_by_email(&request.email) {
        Some(user) => event
            .with_user(&user.id)
            .with_data("userId", user.id.as_str())
            .with_data("resetToken", generate_secret()),
        None => event,
    };
    state.emit(event);

    Ok(AuthResult::succeeded())
}

/// Any token is accepted and no stored password changes
pub(crate) fn confirm_password_reset(
    state: &mut SimulatorState,
    confirm: &PasswordResetConfirm,
) -> FlowResult {
    state.emit(
        AuthEvent::new(AuthEventType::PasswordResetCompleted, true)
            .with_data("token", confirm.token.as_str()),
    );

    Ok(AuthResult::succeeded())
}
