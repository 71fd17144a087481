//! The simulator engine

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use mockauth_core::{
    AuthEvent, AuthEventType, AuthResult, LoginCredentials, OAuthCallback, OAuthStart,
    PasswordResetConfirm, PasswordResetRequest, SessionId, User, UserId,
};

use crate::config::{SimulatorConfig, SimulatorOptions};
use crate::error::SimulatorError;
use crate::flows::{self, FlowResult};
use crate::sink::{ConsoleEventSink, EventSink};
use crate::state::{default_users, SimulatorSnapshot, SimulatorState};

/// In-memory auth-flow simulator
///
/// Every flow operation first waits out the configured delay, then runs
/// its state changes under a single lock that is never held across an
/// await. Two racing calls therefore interleave only at the delay, and
/// each call's events land in the log contiguously. The sink sees events
/// in log order; a sink must not call back into the simulator.
///
/// Flows report failures as `AuthResult { success: false, .. }`; none of
/// them return `Err` or panic on bad input. The feature toggles in the
/// config and the running flag are informational and gate nothing.
pub struct AuthSimulator {
    state: Mutex<SimulatorState>,
    delay: Option<Duration>,
    sink: Option<Arc<dyn EventSink>>,
    /// Held from the end of a state change until its events are delivered
    delivery: Mutex<()>,
}

impl AuthSimulator {
    /// Seed users and merge config; `enable_logging` installs the console sink
    pub fn new(options: SimulatorOptions) -> Self {
        let config = SimulatorConfig::merged(&options.config);
        let users = options.mock_users.unwrap_or_else(default_users);

        let sink: Option<Arc<dyn EventSink>> = if options.enable_logging {
            Some(Arc::new(ConsoleEventSink::new()))
        } else {
            None
        };

        let delay = u64::try_from(options.delay_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        tracing::debug!(
            users = users.len(),
            delay_ms = options.delay_ms,
            logging = options.enable_logging,
            "Created auth simulator"
        );

        Self {
            state: Mutex::new(SimulatorState::new(config, users)),
            delay,
            sink,
            delivery: Mutex::new(()),
        }
    }

    /// Send events to `sink` instead of the console
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Mark running and emit `simulator-started`
    pub fn start(&self) {
        self.mutate(|state| {
            state.is_running = true;
            state.emit(AuthEvent::new(AuthEventType::SimulatorStarted, true));
        });
        tracing::info!("Auth simulator started");
    }

    /// Mark stopped and emit `simulator-stopped`; flows stay callable
    pub fn stop(&self) {
        self.mutate(|state| {
            state.is_running = false;
            state.emit(AuthEvent::new(AuthEventType::SimulatorStopped, true));
        });
        tracing::info!("Auth simulator stopped");
    }

    /// Reseed the default users and drop all sessions and events
    pub fn reset(&self) {
        self.mutate(SimulatorState::reseed);
        tracing::info!("Auth simulator reset");
    }

    /// Current value of the running flag
    pub fn is_running(&self) -> bool {
        self.lock().is_running
    }

    /// Email/password login; 2FA accounts stop at `requires2FA`
    pub async fn simulate_login(&self, credentials: &LoginCredentials) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::login(state, credentials))
    }

    /// Accept any six-digit code for an existing user
    pub async fn simulate_2fa(&self, user_id: &UserId, code: &str) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::verify_two_factor(state, user_id, code))
    }

    /// Always succeeds; a reset token is recorded only in the event log
    pub async fn simulate_password_reset_request(
        &self,
        request: &PasswordResetRequest,
    ) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::request_password_reset(state, request))
    }

    /// Always succeeds; no password is stored or changed
    pub async fn simulate_password_reset_confirm(
        &self,
        confirm: &PasswordResetConfirm,
    ) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::confirm_password_reset(state, confirm))
    }

    /// Issue a state nonce and authorization URL for `provider`
    pub async fn simulate_oauth_start(&self, provider: &str) -> OAuthStart {
        self.simulate_delay().await;
        self.mutate(|state| flows::oauth_start(state, provider))
    }

    /// Sign in as the provider's synthetic user, creating it on first use
    pub async fn simulate_oauth_callback(&self, callback: &OAuthCallback) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::oauth_callback(state, callback))
    }

    /// Remove an active session
    pub async fn simulate_logout(&self, session_id: &SessionId) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::logout(state, session_id))
    }

    /// Resolve a live session and its user; expired sessions are removed
    pub async fn check_session(&self, session_id: &SessionId) -> AuthResult {
        self.simulate_delay().await;
        self.run(|state| flows::check_session(state, session_id, Utc::now()))
    }

    /// Detached copy of the whole state
    pub fn get_state(&self) -> SimulatorSnapshot {
        self.lock().snapshot()
    }

    /// Copy of the event log in append order
    pub fn get_events(&self) -> Vec<AuthEvent> {
        self.lock().events.clone()
    }

    /// Empty the event log, leaving users and sessions alone
    pub fn clear_events(&self) {
        self.lock().events.clear();
    }

    /// Exact-match lookup, returning a copy
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.lock().find_user_by_email(email).cloned()
    }

    /// Number of sessions not yet logged out or found expired
    pub fn active_session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// Move a session's expiry (for testing purposes)
    pub fn set_session_expiry(
        &self,
        session_id: &SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SimulatorError> {
        let mut state = self.lock();
        let session = state
            .find_session_mut(session_id)
            .ok_or(SimulatorError::SessionNotFound)?;
        session.expires_at = expires_at;
        Ok(())
    }

    async fn simulate_delay(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// A panicking caller must not wedge the simulator
    fn lock(&self) -> MutexGuard<'_, SimulatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run<F>(&self, flow: F) -> AuthResult
    where
        F: FnOnce(&mut SimulatorState) -> FlowResult,
    {
        self.mutate(flow).unwrap_or_else(AuthResult::from)
    }

    /// Apply `f` under the lock, then hand whatever it emitted to the sink.
    ///
    /// The delivery guard is taken before the state lock is released, so
    /// sinks receive batches in the same order the log recorded them.
    fn mutate<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut SimulatorState) -> T,
    {
        let mut state = self.lock();
        let mark = state.events.len();
        let output = f(&mut *state);

        let Some(sink) = &self.sink else {
            return output;
        };

        let emitted = state
            .events
            .get(mark..)
            .map(<[AuthEvent]>::to_vec)
            .unwrap_or_default();
        let delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        drop(state);

        for event in &emitted {
            sink.record(event);
        }
        drop(delivery);

        output
    }
}

impl Default for AuthSimulator {
    fn default() -> Self {
        Self::new(SimulatorOptions::default())
    }
}
