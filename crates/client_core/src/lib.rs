use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    error::ServiceError,
    protocol::{
        ListFilesRequest, ListFilesResponse, OrganizeRequest, OrganizeResponse,
        SaveScheduleRequest, ServiceEnvelope, ServiceStatus, HEALTH_PATH, LIST_FILES_PATH,
        ORGANIZE_IN_PLACE_PATH, SAVE_SCHEDULE_PATH,
    },
};
use tracing::{debug, warn};

pub mod activity_log;
pub mod error;
pub mod session;

pub use activity_log::{ActivityLog, LogEntry};
pub use error::{GatewayError, GatewayErrorKind};
pub use session::{path_basename, DirectorySession, FilePreview};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Request surface of the organizing service. Implementations hold no
/// state between calls.
#[async_trait]
pub trait OrganizerGateway: Send + Sync {
    async fn list_files(&self, directory_path: &str) -> Result<Vec<String>, GatewayError>;
    async fn organize_now(
        &self,
        source_directory: &str,
        rename_files: bool,
    ) -> Result<OrganizeResponse, GatewayError>;
    async fn save_schedule(&self, request: &SaveScheduleRequest) -> Result<(), GatewayError>;
    /// Returns the service's greeting when it reports itself healthy.
    async fn health_check(&self) -> Result<String, GatewayError>;
}

pub struct OrganizerClient {
    http: Client,
    service_url: String,
}

impl OrganizerClient {
    pub fn new(service_url: impl Into<String>) -> Self {
        let service_url = service_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            service_url,
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.service_url);
        debug!(%url, "posting to organizing service");
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_service_payload(status, &bytes, ServiceStatus::Success)
    }
}

#[async_trait]
impl OrganizerGateway for OrganizerClient {
    async fn list_files(&self, directory_path: &str) -> Result<Vec<String>, GatewayError> {
        if directory_path.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "a directory path is required to list files".to_string(),
            ));
        }

        let body: ListFilesResponse = self
            .post_json(
                LIST_FILES_PATH,
                &ListFilesRequest {
                    directory_path: directory_path.to_string(),
                },
            )
            .await?;
        Ok(body.files)
    }

    async fn organize_now(
        &self,
        source_directory: &str,
        rename_files: bool,
    ) -> Result<OrganizeResponse, GatewayError> {
        if source_directory.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "a source directory is required to organize".to_string(),
            ));
        }

        self.post_json(
            ORGANIZE_IN_PLACE_PATH,
            &OrganizeRequest {
                source_directory: source_directory.to_string(),
                rename_files,
            },
        )
        .await
    }

    async fn save_schedule(&self, request: &SaveScheduleRequest) -> Result<(), GatewayError> {
        let _: ServiceEnvelope = self.post_json(SAVE_SCHEDULE_PATH, request).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<String, GatewayError> {
        let url = format!("{}{HEALTH_PATH}", self.service_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body: ServiceEnvelope = decode_service_payload(status, &bytes, ServiceStatus::Healthy)?;
        Ok(body.message.unwrap_or_else(|| "Service is healthy.".to_string()))
    }
}

/// Maps an HTTP status plus JSON body onto the gateway's result shape.
///
/// A response only counts as a success when the HTTP status is 2xx *and* the
/// payload carries `expected` in its `status` field; the endpoint payload is
/// then decoded from the same object.
fn decode_service_payload<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    expected: ServiceStatus,
) -> Result<T, GatewayError> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) if status.is_success() => {
            return Err(GatewayError::MalformedResponse(format!(
                "response body is not JSON: {err}"
            )));
        }
        Err(_) => {
            return Err(ServiceError::new(
                Some(status.as_u16()),
                format!("service responded with HTTP {status}"),
            )
            .into());
        }
    };

    let envelope = serde_json::from_value::<ServiceEnvelope>(value.clone());

    if !status.is_success() {
        warn!(http_status = status.as_u16(), "organizing service rejected request");
        return Err(
            ServiceError::from_envelope(Some(status.as_u16()), envelope.unwrap_or_default())
                .into(),
        );
    }

    let envelope = envelope.map_err(|err| {
        GatewayError::MalformedResponse(format!("unrecognized response envelope: {err}"))
    })?;

    match envelope.status {
        Some(reported) if reported == expected => serde_json::from_value(value).map_err(|err| {
            GatewayError::MalformedResponse(format!(
                "unexpected {} payload: {err}",
                reported_label(reported)
            ))
        }),
        Some(ServiceStatus::Error) => Err(ServiceError::from_envelope(None, envelope).into()),
        Some(other) => Err(GatewayError::MalformedResponse(format!(
            "unexpected status '{}'",
            reported_label(other)
        ))),
        None => Err(GatewayError::MalformedResponse(
            "response is missing the status field".to_string(),
        )),
    }
}

fn reported_label(status: ServiceStatus) -> &'static str {
    match status {
        ServiceStatus::Success => "success",
        ServiceStatus::Error => "error",
        ServiceStatus::Healthy => "healthy",
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
