//! Worker-to-UI events and the error taxonomy surfaced to the user.

use std::path::PathBuf;

use client_core::{GatewayError, GatewayErrorKind};
use shared::{
    domain::FileFailure,
    protocol::{OrganizeResponse, SaveScheduleRequest},
};

use crate::backend_bridge::commands::ListingTicket;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    DirectoryPicked(Option<PathBuf>),
    ServiceHealth(Result<String, GatewayError>),
    FilesListed {
        ticket: ListingTicket,
        result: Result<Vec<String>, GatewayError>,
    },
    OrganizeFinished {
        source_directory: String,
        result: Result<OrganizeResponse, GatewayError>,
    },
    ScheduleSaved {
        request: SaveScheduleRequest,
        result: Result<(), GatewayError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// Missing or invalid input; shown inline, never logged as a fault.
    UserInput,
    /// The organizing service could not be reached.
    Transport,
    /// The organizing service answered with a failure.
    Service,
    /// Organize finished but some files failed.
    PartialFailure,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Listing,
    Organize,
    Schedule,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn user_input(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::UserInput, context, message)
    }

    pub fn internal(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::Internal, context, message)
    }

    pub fn partial_failure(failure: &FileFailure) -> Self {
        Self::new(
            UiErrorCategory::PartialFailure,
            UiErrorContext::Organize,
            format!("Error with \"{}\": {}", failure.file, failure.message),
        )
    }

    pub fn from_gateway(context: UiErrorContext, err: &GatewayError) -> Self {
        let category = match err.kind() {
            GatewayErrorKind::InvalidRequest => UiErrorCategory::UserInput,
            GatewayErrorKind::ServiceUnreachable => UiErrorCategory::Transport,
            GatewayErrorKind::ServiceRejected | GatewayErrorKind::MalformedResponse => {
                UiErrorCategory::Service
            }
        };
        Self::new(category, context, err.surfaced_message())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_logged(&self) -> bool {
        self.category != UiErrorCategory::UserInput
    }

    /// Status line text for the slot that owns this error's context.
    pub fn status_text(&self) -> String {
        match self.category {
            UiErrorCategory::Transport => {
                "Network error: Could not connect to the organizing service. Please ensure it is running."
                    .to_string()
            }
            UiErrorCategory::UserInput => self.message.clone(),
            _ => match self.context {
                UiErrorContext::Schedule => format!("Error saving schedule: {}", self.message),
                _ => format!("Error: {}", self.message),
            },
        }
    }

    /// Activity log text, phrased per flow the way the status line is.
    pub fn log_text(&self) -> String {
        if self.category == UiErrorCategory::PartialFailure {
            return self.message.clone();
        }
        let network = self.category == UiErrorCategory::Transport;
        match (self.context, network) {
            (UiErrorContext::Listing, true) => {
                format!("Network error listing files: {}", self.message)
            }
            (UiErrorContext::Listing, false) => format!("Failed to list files: {}", self.message),
            (UiErrorContext::Organize, true) => {
                format!("Network error during immediate organization: {}", self.message)
            }
            (UiErrorContext::Organize, false) => {
                format!("Immediate organization failed: {}", self.message)
            }
            (UiErrorContext::Schedule, true) => {
                format!("Network error saving schedule: {}", self.message)
            }
            (UiErrorContext::Schedule, false) => {
                format!("Failed to save schedule: {}", self.message)
            }
            (UiErrorContext::BackendStartup, _) => {
                format!("Background worker failed to start: {}", self.message)
            }
            (UiErrorContext::Dispatch, _) => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ServiceError;

    #[test]
    fn refused_connection_is_a_transport_error() {
        let err = UiError::from_gateway(
            UiErrorContext::Listing,
            &GatewayError::ServiceUnreachable("connection refused".to_string()),
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(err.is_logged());
        assert_eq!(
            err.log_text(),
            "Network error listing files: organizing service unreachable: connection refused"
        );
    }

    #[test]
    fn service_rejection_keeps_the_service_message() {
        let err = UiError::from_gateway(
            UiErrorContext::Schedule,
            &GatewayError::ServiceRejected(ServiceError::new(Some(400), "Missing schedule data.")),
        );
        assert_eq!(err.category(), UiErrorCategory::Service);
        assert_eq!(err.status_text(), "Error saving schedule: Missing schedule data.");
        assert_eq!(err.log_text(), "Failed to save schedule: Missing schedule data.");
    }

    #[test]
    fn partial_failure_names_the_file() {
        let err = UiError::partial_failure(&FileFailure {
            file: "a.txt".to_string(),
            message: "locked".to_string(),
        });
        assert!(err.is_logged());
        assert_eq!(err.log_text(), "Error with \"a.txt\": locked");
    }

    #[test]
    fn user_input_errors_are_not_logged() {
        let err = UiError::user_input(
            UiErrorContext::Schedule,
            "Please select a time for the schedule.",
        );
        assert!(!err.is_logged());
        assert_eq!(err.status_text(), "Please select a time for the schedule.");
    }
}
