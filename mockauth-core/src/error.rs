//! Error types for mockauth-core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
