use shared::error::ServiceError;
use thiserror::Error;

/// Normalized failure of a single round trip to the organizing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request was refused before it left the client.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("organizing service unreachable: {0}")]
    ServiceUnreachable(String),
    #[error(transparent)]
    ServiceRejected(#[from] ServiceError),
    #[error("malformed response from organizing service: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::InvalidRequest(_) => GatewayErrorKind::InvalidRequest,
            Self::ServiceUnreachable(_) => GatewayErrorKind::ServiceUnreachable,
            Self::ServiceRejected(_) => GatewayErrorKind::ServiceRejected,
            Self::MalformedResponse(_) => GatewayErrorKind::MalformedResponse,
        }
    }

    /// Message suitable for a status line: the service's own text when it
    /// rejected the request, the transport detail otherwise.
    pub fn surfaced_message(&self) -> String {
        match self {
            Self::ServiceRejected(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    InvalidRequest,
    ServiceUnreachable,
    ServiceRejected,
    MalformedResponse,
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::MalformedResponse(value.to_string())
        } else {
            Self::ServiceUnreachable(value.to_string())
        }
    }
}
