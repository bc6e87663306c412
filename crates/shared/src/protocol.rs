use serde::{Deserialize, Serialize};

use crate::domain::{FileFailure, ScheduleType};

pub const LIST_FILES_PATH: &str = "/list_files";
pub const ORGANIZE_IN_PLACE_PATH: &str = "/auto_organize_in_place";
pub const SAVE_SCHEDULE_PATH: &str = "/save_schedule";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Success,
    Error,
    Healthy,
}

/// Fields common to every service response. Endpoint specific payloads are
/// flattened next to these on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesRequest {
    pub directory_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeRequest {
    pub source_directory: String,
    pub rename_files: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeResponse {
    pub processed_count: u64,
    pub error_count: u64,
    #[serde(default)]
    pub errors: Vec<FileFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    pub directory: String,
    pub schedule_type: ScheduleType,
    pub schedule_time: String,
    pub rename_files: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_request_uses_service_field_names() {
        let request = SaveScheduleRequest {
            directory: "C:/Users/alice/Downloads".to_string(),
            schedule_type: ScheduleType::Daily,
            schedule_time: "09:30".to_string(),
            rename_files: true,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "directory": "C:/Users/alice/Downloads",
                "schedule_type": "daily",
                "schedule_time": "09:30",
                "rename_files": true,
            })
        );
    }

    #[test]
    fn organize_response_tolerates_extra_fields() {
        let body = serde_json::json!({
            "status": "success",
            "processed_count": 3,
            "error_count": 1,
            "processed_files": [],
            "errors": [{"file": "a.txt", "message": "locked"}],
        });

        let parsed: OrganizeResponse = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.processed_count, 3);
        assert_eq!(parsed.error_count, 1);
        assert_eq!(parsed.errors[0].file, "a.txt");
    }
}
