//! Common test utilities for simulator integration tests

#![allow(dead_code)]

use std::sync::{Arc, RwLock};
use std::time::Duration;

use mockauth_simulator::{
    AuthEvent, AuthEventType, AuthSimulator, EventSink, SimulatorOptions, User,
};

/// Event sink that captures everything it is handed
#[derive(Default, Clone)]
pub struct CapturingSink {
    pub events: Arc<RwLock<Vec<AuthEvent>>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> Vec<AuthEventType> {
        self.events
            .read()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }
}

impl EventSink for CapturingSink {
    fn record(&self, event: &AuthEvent) {
        self.events.write().unwrap().push(event.clone());
    }
}

/// Capturing sink that takes its time with every event
#[derive(Clone)]
pub struct SlowSink {
    pub inner: CapturingSink,
    pub pause: Duration,
}

impl SlowSink {
    pub fn new(pause: Duration) -> Self {
        Self {
            inner: CapturingSink::new(),
            pause,
        }
    }
}

impl EventSink for SlowSink {
    fn record(&self, event: &AuthEvent) {
        std::thread::sleep(self.pause);
        self.inner.record(event);
    }
}

/// Route simulator logs to the test output when RUST_LOG is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Zero-delay simulator seeded with the default accounts
pub fn create_simulator() -> AuthSimulator {
    init_tracing();
    AuthSimulator::new(SimulatorOptions::default().with_delay_ms(0))
}

/// Zero-delay simulator seeded with `users`
pub fn create_simulator_with_users(users: Vec<User>) -> AuthSimulator {
    init_tracing();
    AuthSimulator::new(
        SimulatorOptions::default()
            .with_delay_ms(0)
            .with_mock_users(users),
    )
}

/// Zero-delay simulator that reports events to a capturing sink
pub fn create_captured_simulator() -> (AuthSimulator, CapturingSink) {
    let sink = CapturingSink::new();
    let simulator = create_simulator().with_sink(Arc::new(sink.clone()));
    (simulator, sink)
}

pub fn event_types(simulator: &AuthSimulator) -> Vec<AuthEventType> {
    simulator
        .get_events()
        .iter()
        .map(|e| e.event_type)
        .collect()
}

pub fn plain_user(simulator: &AuthSimulator) -> User {
    simulator
        .find_user_by_email("john.doe@example.com")
        .expect("default user missing")
}

pub fn admin_user(simulator: &AuthSimulator) -> User {
    simulator
        .find_user_by_email("admin@example.com")
        .expect("default admin missing")
}
