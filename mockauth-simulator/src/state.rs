//! Simulator state aggregate

use std::collections::HashMap;

use mockauth_core::{AuthEvent, AuthSession, SessionId, User, UserId};
use serde::{Deserialize, Serialize};

use crate::config::SimulatorConfig;

/// The three built-in accounts: two plain users and one 2FA-enabled admin
pub fn default_users() -> Vec<User> {
    vec![
        User::new("john.doe@example.com", "John Doe")
            .with_email_verified(true)
            .with_avatar("https://api.dicebear.com/7.x/avataaars/svg?seed=john"),
        User::new("jane.smith@example.com", "Jane Smith")
            .with_email_verified(true)
            .with_avatar("https://api.dicebear.com/7.x/avataaars/svg?seed=jane"),
        User::new("admin@example.com", "Admin User")
            .with_email_verified(true)
            .with_two_factor(true),
    ]
}

/// Copy of the simulator state handed out to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorSnapshot {
    pub users: Vec<User>,
    pub sessions: Vec<AuthSession>,
    pub events: Vec<AuthEvent>,
    pub config: SimulatorConfig,
    pub is_running: bool,
}

/// Everything one simulator instance owns
///
/// Users keep creation order, events keep append order.
#[derive(Debug)]
pub(crate) struct SimulatorState {
    pub(crate) users: Vec<User>,
    pub(crate) sessions: Vec<AuthSession>,
    pub(crate) events: Vec<AuthEvent>,
    pub(crate) config: SimulatorConfig,
    pub(crate) is_running: bool,
    /// Failed password checks per existing account, reported on events only
    failed_attempts: HashMap<String, u32>,
}

impl SimulatorState {
    pub(crate) fn new(config: SimulatorConfig, users: Vec<User>) -> Self {
        Self {
            users,
            sessions: Vec::new(),
            events: Vec::new(),
            config,
            is_running: false,
            failed_attempts: HashMap::new(),
        }
    }

    pub(crate) fn find_user(&self, user_id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == user_id)
    }

    /// Exact, case-sensitive match
    pub(crate) fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub(crate) fn find_session(&self, session_id: &SessionId) -> Option<&AuthSession> {
        self.sessions.iter().find(|s| &s.id == session_id)
    }

    pub(crate) fn find_session_mut(&mut self, session_id: &SessionId) -> Option<&mut AuthSession> {
        self.sessions.iter_mut().find(|s| &s.id == session_id)
    }

    pub(crate) fn remove_session(&mut self, session_id: &SessionId) -> Option<AuthSession> {
        let index = self.sessions.iter().position(|s| &s.id == session_id)?;
        Some(self.sessions.remove(index))
    }

    /// Append an event to the log
    pub(crate) fn emit(&mut self, event: AuthEvent) {
        tracing::debug!(
            event_type = %event.event_type,
            success = event.success,
            user_id = event.user_id.as_ref().map(|id| id.as_str()),
            session_id = event.session_id.as_ref().map(|id| id.as_str()),
            "Auth event"
        );
        self.events.push(event);
    }

    /// Count a failed password check for `email`, returning the running total
    pub(crate) fn record_failed_attempt(&mut self, email: &str) -> u32 {
        let count = self.failed_attempts.entry(email.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn clear_failed_attempts(&mut self, email: &str) {
        self.failed_attempts.remove(email);
    }

    #[cfg(test)]
    pub(crate) fn tracked_failed_logins(&self) -> usize {
        self.failed_attempts.len()
    }

    /// Back to the default accounts with no sessions, events or counters.
    /// Config and the running flag are left alone.
    pub(crate) fn reseed(&mut self) {
        self.users = default_users();
        self.sessions.clear();
        self.events.clear();
        self.failed_attempts.clear();
    }

    pub(crate) fn snapshot(&self) -> SimulatorSnapshot {
        SimulatorSnapshot {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            events: self.events.clone(),
            config: self.config.clone(),
            is_running: self.is_running,
        }
    }
}
