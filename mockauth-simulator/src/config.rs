//! Simulator configuration

use std::str::FromStr;

use mockauth_core::User;
use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// Default simulated latency per operation
pub const DEFAULT_DELAY_MS: i64 = 100;

/// Effective feature and timeout settings
///
/// The feature toggles and the lockout settings are stored and reported
/// but do not gate any flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorConfig {
    #[serde(rename = "enable2FA")]
    pub enable_2fa: bool,
    pub enable_password_reset: bool,
    #[serde(rename = "enableOAuth")]
    pub enable_oauth: bool,
    /// Lifetime of a session without "remember me", in minutes
    pub session_timeout: u32,
    pub max_login_attempts: u32,
    /// In minutes
    pub lockout_duration: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enable_2fa: true,
            enable_password_reset: true,
            enable_oauth: true,
            session_timeout: 30,
            max_login_attempts: 5,
            lockout_duration: 15,
        }
    }
}

impl SimulatorConfig {
    /// Defaults with every populated override applied
    pub fn merged(overrides: &ConfigOverrides) -> Self {
        let defaults = Self::default();
        Self {
            enable_2fa: overrides.enable_2fa.unwrap_or(defaults.enable_2fa),
            enable_password_reset: overrides
                .enable_password_reset
                .unwrap_or(defaults.enable_password_reset),
            enable_oauth: overrides.enable_oauth.unwrap_or(defaults.enable_oauth),
            session_timeout: overrides.session_timeout.unwrap_or(defaults.session_timeout),
            max_login_attempts: overrides
                .max_login_attempts
                .unwrap_or(defaults.max_login_attempts),
            lockout_duration: overrides.lockout_duration.unwrap_or(defaults.lockout_duration),
        }
    }
}

/// Partial configuration supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(rename = "enable2FA", default)]
    pub enable_2fa: Option<bool>,
    #[serde(default)]
    pub enable_password_reset: Option<bool>,
    #[serde(rename = "enableOAuth", default)]
    pub enable_oauth: Option<bool>,
    #[serde(default)]
    pub session_timeout: Option<u32>,
    #[serde(default)]
    pub max_login_attempts: Option<u32>,
    #[serde(default)]
    pub lockout_duration: Option<u32>,
}

/// Construction options for [`crate::AuthSimulator`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorOptions {
    pub config: ConfigOverrides,
    /// Seed users; `None` seeds the built-in default accounts
    pub mock_users: Option<Vec<User>>,
    pub enable_logging: bool,
    /// Artificial latency per operation; `<= 0` disables it
    pub delay_ms: i64,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            config: ConfigOverrides::default(),
            mock_users: None,
            enable_logging: false,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl SimulatorOptions {
    pub fn with_config(mut self, config: ConfigOverrides) -> Self {
        self.config = config;
        self
    }

    pub fn with_mock_users(mut self, users: Vec<User>) -> Self {
        self.mock_users = Some(users);
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: i64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Build options from environment variables
    ///
    /// All optional; unset or empty variables keep the defaults:
    /// - MOCKAUTH_DELAY_MS
    /// - MOCKAUTH_ENABLE_LOGGING
    /// - MOCKAUTH_ENABLE_2FA
    /// - MOCKAUTH_ENABLE_PASSWORD_RESET
    /// - MOCKAUTH_ENABLE_OAUTH
    /// - MOCKAUTH_SESSION_TIMEOUT (minutes)
    /// - MOCKAUTH_MAX_LOGIN_ATTEMPTS
    /// - MOCKAUTH_LOCKOUT_DURATION (minutes)
    pub fn from_env() -> Result<Self, SimulatorError> {
        let defaults = Self::default();

        Ok(Self {
            config: ConfigOverrides {
                enable_2fa: env_flag("MOCKAUTH_ENABLE_2FA")?,
                enable_password_reset: env_flag("MOCKAUTH_ENABLE_PASSWORD_RESET")?,
                enable_oauth: env_flag("MOCKAUTH_ENABLE_OAUTH")?,
                session_timeout: env_parse("MOCKAUTH_SESSION_TIMEOUT")?,
                max_login_attempts: env_parse("MOCKAUTH_MAX_LOGIN_ATTEMPTS")?,
                lockout_duration: env_parse("MOCKAUTH_LOCKOUT_DURATION")?,
            },
            mock_users: None,
            enable_logging: env_flag("MOCKAUTH_ENABLE_LOGGING")?
                .unwrap_or(defaults.enable_logging),
            delay_ms: env_parse("MOCKAUTH_DELAY_MS")?.unwrap_or(defaults.delay_ms),
        })
    }
}

fn get_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, SimulatorError> {
    get_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| SimulatorError::Config(format!("{key} has invalid value {raw:?}")))
        })
        .transpose()
}

fn env_flag(key: &str) -> Result<Option<bool>, SimulatorError> {
    match get_env(key).map(|s| s.to_ascii_lowercase()).as_deref() {
        None => Ok(None),
        Some("1" | "true" | "yes" | "on") => Ok(Some(true)),
        Some("0" | "false" | "no" | "off") => Ok(Some(false)),
        Some(other) => Err(SimulatorError::Config(format!(
            "{key} has invalid value {other:?}"
        ))),
    }
}
