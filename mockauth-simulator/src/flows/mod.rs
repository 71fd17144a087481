//! Flow rules, one module per flow family
//!
//! Each flow runs synchronously against the locked state. Failures are
//! returned as `SimulatorError` after any audit event has been appended.

mod auth;
mod oauth;
mod reset;
mod session;

pub(crate) use auth::{login, logout, verify_two_factor};
pub use oauth::oauth_email;
pub(crate) use oauth::{oauth_callback, oauth_start};
pub(crate) use reset::{confirm_password_reset, request_password_reset};
pub(crate) use session::check_session;
pub use session::REMEMBER_ME_DAYS;

use mockauth_core::AuthResult;

use crate::error::SimulatorError;

pub(crate) type FlowResult = Result<AuthResult, SimulatorError>;
