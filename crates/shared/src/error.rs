use thiserror::Error;

use crate::protocol::ServiceEnvelope;

/// Failure reported by the organizing service itself, either through a
/// non-success HTTP status or an `{"status": "error"}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub http_status: Option<u16>,
    pub message: String,
}

impl ServiceError {
    pub const UNKNOWN: &'static str = "Unknown error.";

    pub fn new(http_status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            http_status,
            message: message.into(),
        }
    }

    pub fn from_envelope(http_status: Option<u16>, envelope: ServiceEnvelope) -> Self {
        match envelope.message {
            Some(message) if !message.trim().is_empty() => Self::new(http_status, message),
            _ => Self::new(http_status, Self::UNKNOWN),
        }
    }
}
