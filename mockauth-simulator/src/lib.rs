//! Mock authentication-flow simulator
//!
//! Emulates login, two-factor authentication, password reset, OAuth
//! callbacks and session lifecycle entirely in memory, with artificial
//! latency and an audit event log. Meant as a development and test
//! fixture; nothing here is real security.

pub mod config;
pub mod crypto;
pub mod error;
mod flows;
pub mod sink;
pub mod simulator;
pub mod state;

pub use config::{ConfigOverrides, SimulatorConfig, SimulatorOptions};
pub use crypto::generate_two_factor_code;
pub use error::SimulatorError;
pub use flows::{oauth_email, REMEMBER_ME_DAYS};
pub use simulator::AuthSimulator;
pub use sink::{ConsoleEventSink, EventSink};
pub use state::{default_users, SimulatorSnapshot};

pub use mockauth_core::{
    AuthEvent, AuthEventType, AuthResult, AuthSession, DeviceInfo, LoginCredentials,
    OAuthCallback, OAuthStart, PasswordResetConfirm, PasswordResetRequest, SessionId, User,
    UserId,
};
