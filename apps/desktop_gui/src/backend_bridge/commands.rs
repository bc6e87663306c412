//! Backend commands queued from the controller to the background worker.

use shared::protocol::SaveScheduleRequest;

/// Identifies one listing request. Only the most recently issued ticket may
/// update the session; responses carrying an older ticket are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    pub request_id: u64,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    PickDirectory,
    ListFiles {
        ticket: ListingTicket,
    },
    OrganizeNow {
        source_directory: String,
        rename_files: bool,
    },
    SaveSchedule {
        request: SaveScheduleRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PickDirectory => "pick_directory",
            Self::ListFiles { .. } => "list_files",
            Self::OrganizeNow { .. } => "organize_now",
            Self::SaveSchedule { .. } => "save_schedule",
        }
    }
}
