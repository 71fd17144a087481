//! Event sink abstractions

pub mod console;

pub use console::ConsoleEventSink;

use mockauth_core::AuthEvent;

/// Receives every event the simulator emits, in emission order
pub trait EventSink: Send + Sync {
    fn record(&self, event: &AuthEvent);
}
