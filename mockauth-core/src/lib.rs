//! Mock auth core types
//!
//! Plain data shared by the simulator and its callers:
//! - users and the sessions issued to them
//! - the append-only audit events every flow emits
//! - request and result records for each simulated flow

pub mod auth;
pub mod error;
pub mod event;
pub mod session;
pub mod user;

pub use auth::{
    AuthResult, LoginCredentials, OAuthCallback, OAuthStart, PasswordResetConfirm,
    PasswordResetRequest,
};
pub use error::Error;
pub use event::{AuthEvent, AuthEventType};
pub use session::{AuthSession, DeviceInfo, SessionId};
pub use user::{User, UserId};

/// Result type for mockauth-core operations
pub type Result<T> = std::result::Result<T, Error>;
