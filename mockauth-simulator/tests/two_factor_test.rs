//! Tests for the two-factor step

mod common;

use common::{admin_user, create_simulator, event_types, plain_user};
use mockauth_simulator::{generate_two_factor_code, AuthEventType, LoginCredentials, UserId};

/// Test: 2FA users get requires2FA with the user but no session
#[tokio::test]
async fn test_login_requires_two_factor() {
    let simulator = create_simulator();
    let admin = admin_user(&simulator);

    let result = simulator
        .simulate_login(&LoginCredentials::new(&admin.email, "abcdef"))
        .await;

    assert!(!result.success);
    assert!(result.requires_two_factor());
    assert_eq!(result.user.as_ref().unwrap().id, admin.id);
    assert!(result.session.is_none());
    assert!(result.error.is_none());
    assert_eq!(simulator.active_session_count(), 0);
    assert_eq!(event_types(&simulator), vec![AuthEventType::TwoFactorRequired]);
}

/// Test: a bad password on a 2FA account fails before the 2FA step
#[tokio::test]
async fn test_two_factor_user_bad_password() {
    let simulator = create_simulator();
    let admin = admin_user(&simulator);

    let result = simulator
        .simulate_login(&LoginCredentials::new(&admin.email, "123"))
        .await;

    assert!(!result.success);
    assert!(!result.requires_two_factor());
    assert_eq!(event_types(&simulator), vec![AuthEventType::LoginFailure]);
}

/// Test: non-matching then matching code after the same login
#[tokio::test]
async fn test_code_format_decides_outcome() {
    let simulator = create_simulator();
    let admin = admin_user(&simulator);

    let login = simulator
        .simulate_login(&LoginCredentials::new(&admin.email, "abcdef"))
        .await;
    let user_id = login.user.unwrap().id;

    let result = simulator.simulate_2fa(&user_id, "12345a").await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Invalid 2FA code"));
    assert!(result.session.is_none());

    let result = simulator.simulate_2fa(&user_id, "654321").await;
    assert!(result.success);
    let session = result.session.unwrap();
    assert_eq!(session.user_id, user_id);
    // never a remember-me session
    assert_eq!((session.expires_at - session.created_at).num_minutes(), 30);

    assert_eq!(
        event_types(&simulator),
        vec![
            AuthEventType::TwoFactorRequired,
            AuthEventType::TwoFactorFailure,
            AuthEventType::SessionCreated,
            AuthEventType::TwoFactorSuccess,
        ]
    );
}

/// Test: the code is not bound to a prior login
#[tokio::test]
async fn test_code_not_bound_to_login() {
    let simulator = create_simulator();
    let user = plain_user(&simulator);

    let result = simulator
        .simulate_2fa(&user.id, &generate_two_factor_code())
        .await;

    assert!(result.success);
    assert_eq!(result.user.unwrap().id, user.id);
}

/// Test: unknown user id is a failure result
#[tokio::test]
async fn test_unknown_user() {
    let simulator = create_simulator();

    let result = simulator
        .simulate_2fa(&UserId::from("no-such-user"), "123456")
        .await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("User not found"));
    assert!(simulator.get_events().is_empty());
}

/// Test: malformed codes are all rejected
#[tokio::test]
async fn test_malformed_codes() {
    let simulator = create_simulator();
    let admin = admin_user(&simulator);

    for code in ["", "12345", "1234567", "abcdef", "12 456"] {
        let result = simulator.simulate_2fa(&admin.id, code).await;
        assert!(!result.success, "code {:?} was accepted", code);
    }
    assert_eq!(simulator.active_session_count(), 0);
}
