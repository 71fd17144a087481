//! Token and code helpers
//!
//! Nothing here is cryptographically meaningful. Tokens are random
//! opaque strings and the password/2FA rules are simulation policy.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Minimum accepted password length, counted in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of access and refresh tokens
pub const TOKEN_LENGTH: usize = 32;

/// Any password of at least [`MIN_PASSWORD_LENGTH`] characters is accepted
pub fn password_accepted(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

/// A 2FA code is valid iff it is exactly six ASCII digits
pub fn is_valid_two_factor_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Generate a random 6-digit code, as an authenticator app would show
pub fn generate_two_factor_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// Generate an opaque alphanumeric token
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Generate a random secret for reset tokens and OAuth state
pub fn generate_secret() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(password_accepted("abcdef"));
        assert!(password_accepted("correct horse battery staple"));
        assert!(!password_accepted("abcde"));
        assert!(!password_accepted(""));
        // UTF-16 units: not bytes, and astral characters count twice
        assert!(!password_accepted("ééééé"));
        assert!(password_accepted("😀😀😀"));
        assert!(!password_accepted("😀😀"));
    }

    #[test]
    fn test_two_factor_code_rule() {
        assert!(is_valid_two_factor_code("123456"));
        assert!(is_valid_two_factor_code("000000"));
        assert!(!is_valid_two_factor_code("12345"));
        assert!(!is_valid_two_factor_code("1234567"));
        assert!(!is_valid_two_factor_code("12a456"));
        assert!(!is_valid_two_factor_code(" 123456"));
        assert!(!is_valid_two_factor_code("１２３４５６"));
    }

    #[test]
    fn test_generated_code_format() {
        for _ in 0..100 {
            let code = generate_two_factor_code();
            assert_eq!(code.len(), 6);
            assert!(is_valid_two_factor_code(&code));
        }
    }

    #[test]
    fn test_token_shape_and_uniqueness() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_eq!(t1.len(), TOKEN_LENGTH);
        assert!(t1.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_secret_uniqueness() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
