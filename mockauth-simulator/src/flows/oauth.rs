//! OAuth start and callback

use mockauth_core::{AuthEvent, AuthEventType, AuthResult, OAuthCallback, OAuthStart, User};

use super::session::create_session;
use super::FlowResult;
use crate::crypto::generate_secret;
use crate::error::SimulatorError;
use crate::state::SimulatorState;

/// Synthetic email an OAuth provider's user is keyed by
pub fn oauth_email(provider: &str) -> String {
    format!("oauth-{}@example.com", provider)
}

/// "google" -> "Google User"
fn oauth_display_name(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => format!("{}{} User", first.to_uppercase(), chars.as_str()),
        None => "OAuth User".to_string(),
    }
}

pub(crate) fn oauth_start(state: &mut SimulatorState, provider: &str) -> OAuthStart {
    let nonce = generate_secret();
    let start = OAuthStart {
        provider: provider.to_string(),
        authorization_url: format!(
            "https://auth.example.com/oauth/{}/authorize?state={}",
            provider, nonce
        ),
        state: nonce,
    };

    state.emit(
        AuthEvent::new(AuthEventType::OAuthInitiated, true)
            .with_data("provider", provider)
            .with_data("state", start.state.as_str()),
    );

    start
}

/// Sign in as the provider's synthetic user, creating it on first use.
///
/// State is only compared when the caller supplies both sides.
pub(crate) fn oauth_callback(state: &mut SimulatorState, callback: &OAuthCallback) -> FlowResult {
    if let (Some(received), Some(expected)) = (&callback.state, &callback.expected_state) {
        if received != expected {
            state.emit(
                AuthEvent::new(AuthEventType::OAuthCallback, false)
                    .with_data("provider", callback.provider.as_str())
                    .with_error("Invalid OAuth state"),
            );
            return Err(SimulatorError::InvalidOAuthState);
        }
    }

    let email = oauth_email(&callback.provider);
    let existing = state.find_user_by_email(&email).cloned();
    let user = match existing {
        Some(user) => user,
        None => {
            let user = User::new(email, oauth_display_name(&callback.provider))
                .with_email_verified(true)
                .with_avatar(format!(
                    "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                    callback.provider
                ));
            state.users.push(user.clone());
            user
        }
    };

    let session = create_session(state, &user.id, false);
    state.emit(
        AuthEvent::new(AuthEventType::OAuthCallback, true)
            .with_user(&user.id)
            .with_session(&session.id)
            .with_data("provider", callback.provider.as_str()),
    );

    Ok(AuthResult::authenticated(user, session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(oauth_display_name("google"), "Google User");
        assert_eq!(oauth_display_name("GitHub"), "GitHub User");
        assert_eq!(oauth_display_name(""), "OAuth User");
    }

    #[test]
    fn test_oauth_email() {
        assert_eq!(oauth_email("github"), "oauth-github@example.com");
    }
}
