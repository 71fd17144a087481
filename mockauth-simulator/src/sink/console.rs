//! Console event sink for development

use std::fmt::Write;

use mockauth_core::AuthEvent;

use super::EventSink;

/// Writes one line per event to stderr
pub struct ConsoleEventSink;

impl ConsoleEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an event as a single log line
pub fn format_event_line(event: &AuthEvent) -> String {
    let mut line = format!(
        "[mock-auth] {} {} {}",
        event.timestamp.to_rfc3339(),
        event.event_type,
        if event.success { "ok" } else { "failed" }
    );
    if let Some(user_id) = &event.user_id {
        let _ = write!(line, " user={}", user_id);
    }
    if let Some(session_id) = &event.session_id {
        let _ = write!(line, " session={}", session_id);
    }
    if let Some(error) = &event.error {
        let _ = write!(line, " error={:?}", error);
    }
    line
}

impl EventSink for ConsoleEventSink {
    fn record(&self, event: &AuthEvent) {
        eprintln!("{}", format_event_line(event));

        tracing::info!(
            event_type = %event.event_type,
            success = event.success,
            "Auth event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockauth_core::{AuthEventType, UserId};

    #[test]
    fn test_line_format() {
        let event = AuthEvent::new(AuthEventType::LoginFailure, false)
            .with_user(&UserId::from("u1"))
            .with_error("Invalid password");
        let line = format_event_line(&event);

        assert!(line.starts_with("[mock-auth] "));
        assert!(line.contains(" login-failure failed"));
        assert!(line.contains(" user=u1"));
        assert!(line.ends_with(" error=\"Invalid password\""));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_line_without_optional_fields() {
        let line = format_event_line(&AuthEvent::new(AuthEventType::SimulatorStarted, true));
        assert!(line.ends_with("simulator-started ok"));
    }
}
