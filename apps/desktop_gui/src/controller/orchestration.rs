//! Orchestration of user actions into backend commands, and of worker
//! events back into session, status and activity log updates.

use chrono::NaiveTime;
use client_core::{path_basename, ActivityLog, DirectorySession, GatewayError};
use crossbeam_channel::{Sender, TrySendError};
use shared::{
    domain::{LogSeverity, ScheduleType},
    protocol::{OrganizeResponse, SaveScheduleRequest},
};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::{BackendCommand, ListingTicket};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::reducer::{ActionAvailability, FlowState, ListingPhase, OrchestrationState};
use crate::controller::status::{StatusChannel, StatusSlot};

pub const STARTUP_MESSAGE: &str = "FilePilot application started.";
const SCHEDULE_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleForm {
    pub schedule_type: ScheduleType,
    pub schedule_time: String,
    pub rename_files: bool,
}

/// Everything the user can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BrowseForDirectory,
    SelectDirectory(String),
    Refresh,
    OrganizeNow { rename_files: bool },
    SaveSchedule(ScheduleForm),
    OpenScheduleDialog,
    CloseScheduleDialog,
    OpenActivityLog,
    CloseActivityLog,
}

pub struct OrchestrationController {
    session: DirectorySession,
    log: ActivityLog,
    status: StatusChannel,
    flow: FlowState,
    schedule_dialog_open: bool,
    activity_log_open: bool,
}

impl Default for OrchestrationController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestrationController {
    pub fn new() -> Self {
        let mut controller = Self {
            session: DirectorySession::new(),
            log: ActivityLog::new(),
            status: StatusChannel::default(),
            flow: FlowState::default(),
            schedule_dialog_open: false,
            activity_log_open: false,
        };
        controller.record(STARTUP_MESSAGE, LogSeverity::Info);
        controller
    }

    pub fn session(&self) -> &DirectorySession {
        &self.session
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    pub fn state(&self) -> OrchestrationState {
        self.flow.state(&self.session)
    }

    pub fn availability(&self) -> ActionAvailability {
        self.flow.availability(&self.session)
    }

    pub fn is_organizing(&self) -> bool {
        self.flow.organizing().is_some()
    }

    pub fn is_saving_schedule(&self) -> bool {
        self.flow.schedule_pending()
    }

    pub fn schedule_dialog_open(&self) -> bool {
        self.schedule_dialog_open
    }

    pub fn activity_log_open(&self) -> bool {
        self.activity_log_open
    }

    pub fn handle(&mut self, action: Action) -> Vec<BackendCommand> {
        match action {
            Action::BrowseForDirectory => vec![BackendCommand::PickDirectory],
            Action::SelectDirectory(path) => self.select_directory(&path),
            Action::Refresh => self.refresh(),
            Action::OrganizeNow { rename_files } => self.organize_now(rename_files),
            Action::SaveSchedule(form) => self.save_schedule(form),
            Action::OpenScheduleDialog => {
                match self.session.selected_directory() {
                    Some(_) => {
                        self.schedule_dialog_open = true;
                        self.record("Opened Schedule Tasks dialog.", LogSeverity::Info);
                    }
                    None => self.status.show(
                        StatusSlot::Organize,
                        "Please select a directory first to schedule an organization.",
                        LogSeverity::Info,
                    ),
                }
                Vec::new()
            }
            Action::CloseScheduleDialog => {
                self.schedule_dialog_open = false;
                self.status.clear(StatusSlot::Schedule);
                Vec::new()
            }
            Action::OpenActivityLog => {
                self.activity_log_open = true;
                self.record("Opened Activity Log.", LogSeverity::Info);
                Vec::new()
            }
            Action::CloseActivityLog => {
                self.activity_log_open = false;
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::Info(message) => {
                self.status.show(StatusSlot::General, message, LogSeverity::Info);
                Vec::new()
            }
            UiEvent::Error(err) => {
                self.report_error(StatusSlot::General, &err);
                Vec::new()
            }
            UiEvent::DirectoryPicked(Some(path)) => {
                self.select_directory(&path.to_string_lossy())
            }
            UiEvent::DirectoryPicked(None) => {
                debug!("directory picker cancelled");
                Vec::new()
            }
            UiEvent::ServiceHealth(result) => {
                match result {
                    Ok(greeting) => self.record(
                        format!("Organizing service is reachable: {greeting}"),
                        LogSeverity::Info,
                    ),
                    Err(err) => {
                        let message = format!("Organizing service is not reachable yet: {err}");
                        self.status
                            .show(StatusSlot::General, message.clone(), LogSeverity::Info);
                        self.record(message, LogSeverity::Info);
                    }
                }
                Vec::new()
            }
            UiEvent::FilesListed { ticket, result } => {
                self.finish_listing(ticket, result);
                Vec::new()
            }
            UiEvent::OrganizeFinished {
                source_directory,
                result,
            } => self.finish_organize(source_directory, result),
            UiEvent::ScheduleSaved { request, result } => {
                self.finish_schedule(request, result);
                Vec::new()
            }
        }
    }

    /// Resolves the flow a command belonged to when it never reached the
    /// worker, so no action is left disabled waiting for a reply.
    pub fn dispatch_failed(&mut self, command: &BackendCommand, reason: &str) {
        let err = UiError::internal(UiErrorContext::Dispatch, reason);
        self.report_error(StatusSlot::General, &err);

        match command {
            BackendCommand::ListFiles { ticket } => {
                if self.flow.accept_listing(ticket) {
                    self.flow.finish_listing(ListingPhase::ListError);
                    self.status
                        .show(StatusSlot::FileList, err.status_text(), LogSeverity::Error);
                }
            }
            BackendCommand::OrganizeNow { .. } => {
                self.flow.finish_organize();
            }
            BackendCommand::SaveSchedule { .. } => self.flow.finish_schedule(),
            BackendCommand::PickDirectory => {}
        }
    }

    fn select_directory(&mut self, path: &str) -> Vec<BackendCommand> {
        if !self.session.select_directory(path) {
            return Vec::new();
        }
        let directory = self
            .session
            .selected_directory()
            .unwrap_or_default()
            .to_string();
        info!(%directory, "directory selected");
        self.record(format!("Directory selected: {directory}"), LogSeverity::Info);
        self.start_listing().into_iter().collect()
    }

    fn refresh(&mut self) -> Vec<BackendCommand> {
        if !self.session.request_refresh() {
            self.status.show(
                StatusSlot::FileList,
                "No directory selected to refresh.",
                LogSeverity::Info,
            );
            return Vec::new();
        }
        self.start_listing().into_iter().collect()
    }

    fn start_listing(&mut self) -> Option<BackendCommand> {
        let directory = self.session.take_refresh_request()?;
        self.status
            .show(StatusSlot::FileList, "Fetching files...", LogSeverity::Info);
        self.record(
            format!("Attempting to list files in: {directory}"),
            LogSeverity::Info,
        );
        let ticket = self.flow.begin_listing(directory);
        Some(BackendCommand::ListFiles { ticket })
    }

    fn finish_listing(&mut self, ticket: ListingTicket, result: Result<Vec<String>, GatewayError>) {
        if !self.flow.accept_listing(&ticket) || !self.session.is_selected(&ticket.directory) {
            debug!(
                request_id = ticket.request_id,
                directory = %ticket.directory,
                "discarding superseded listing response"
            );
            return;
        }

        let directory = ticket.directory;
        match result {
            Ok(files) if files.is_empty() => {
                self.session.set_file_list(files);
                self.flow.finish_listing(ListingPhase::Empty);
                self.status.show(
                    StatusSlot::FileList,
                    "No supported files found.",
                    LogSeverity::Info,
                );
                self.record(
                    format!("No files found in \"{directory}\"."),
                    LogSeverity::Info,
                );
            }
            Ok(files) => {
                let count = files.len();
                self.session.set_file_list(files);
                self.flow.finish_listing(ListingPhase::Ready);
                self.status.clear(StatusSlot::FileList);
                self.record(
                    format!("Found {count} files in \"{directory}\"."),
                    LogSeverity::Success,
                );
            }
            Err(err) => {
                self.flow.finish_listing(ListingPhase::ListError);
                let err = UiError::from_gateway(UiErrorContext::Listing, &err);
                self.report_error(StatusSlot::FileList, &err);
            }
        }
    }

    fn organize_now(&mut self, rename_files: bool) -> Vec<BackendCommand> {
        self.status.clear(StatusSlot::Organize);
        let Some(directory) = self.session.selected_directory().map(str::to_string) else {
            let err = UiError::user_input(
                UiErrorContext::Organize,
                "Please select a directory to organize.",
            );
            self.report_error(StatusSlot::Organize, &err);
            return Vec::new();
        };
        if self.is_organizing() {
            debug!(%directory, "organize already in flight");
            return Vec::new();
        }
        if !self.availability().can_organize {
            self.status.show(
                StatusSlot::Organize,
                "There are no listed files to organize yet.",
                LogSeverity::Info,
            );
            return Vec::new();
        }

        self.flow.begin_organize(directory.clone());
        self.record(
            format!(
                "Starting immediate organization for: \"{directory}\" (Rename: {})",
                yes_no(rename_files)
            ),
            LogSeverity::Info,
        );
        vec![BackendCommand::OrganizeNow {
            source_directory: directory,
            rename_files,
        }]
    }

    fn finish_organize(
        &mut self,
        source_directory: String,
        result: Result<OrganizeResponse, GatewayError>,
    ) -> Vec<BackendCommand> {
        self.flow.finish_organize();

        match result {
            Ok(summary) => {
                info!(
                    directory = %source_directory,
                    processed = summary.processed_count,
                    errors = summary.error_count,
                    "organize finished"
                );
                self.status.show(
                    StatusSlot::Organize,
                    format!(
                        "Successfully organized {} files. Encountered {} errors.",
                        summary.processed_count, summary.error_count
                    ),
                    LogSeverity::Success,
                );
                self.record(
                    format!(
                        "Immediate organization complete: {} files processed, {} errors.",
                        summary.processed_count, summary.error_count
                    ),
                    LogSeverity::Success,
                );
                for failure in &summary.errors {
                    self.report_error_log_only(&UiError::partial_failure(failure));
                }
            }
            Err(err) => {
                let err = UiError::from_gateway(UiErrorContext::Organize, &err);
                self.report_error(StatusSlot::Organize, &err);
            }
        }

        // The directory changed on disk whether or not the call succeeded.
        self.session.request_refresh();
        self.start_listing().into_iter().collect()
    }

    fn save_schedule(&mut self, form: ScheduleForm) -> Vec<BackendCommand> {
        self.status.clear(StatusSlot::Schedule);
        let Some(directory) = self.session.selected_directory().map(str::to_string) else {
            let err = UiError::user_input(
                UiErrorContext::Schedule,
                "No directory selected for scheduling.",
            );
            self.report_error(StatusSlot::Schedule, &err);
            return Vec::new();
        };

        let schedule_time = form.schedule_time.trim().to_string();
        if form.schedule_type.requires_time() {
            if schedule_time.is_empty() {
                let err = UiError::user_input(
                    UiErrorContext::Schedule,
                    "Please select a time for the schedule.",
                );
                self.report_error(StatusSlot::Schedule, &err);
                return Vec::new();
            }
            if NaiveTime::parse_from_str(&schedule_time, SCHEDULE_TIME_FORMAT).is_err() {
                let err = UiError::user_input(
                    UiErrorContext::Schedule,
                    "Schedule time must be a 24-hour HH:MM value.",
                );
                self.report_error(StatusSlot::Schedule, &err);
                return Vec::new();
            }
        }

        if self.flow.schedule_pending() {
            debug!(%directory, "schedule save already in flight");
            return Vec::new();
        }
        if !self.availability().can_schedule {
            self.status.show(
                StatusSlot::Schedule,
                "Scheduling is available once the directory lists files.",
                LogSeverity::Info,
            );
            return Vec::new();
        }

        self.flow.begin_schedule();
        self.record(
            format!(
                "Attempting to save schedule: Dir={directory}, Type={}, Time={schedule_time}, Rename={}",
                form.schedule_type,
                yes_no(form.rename_files)
            ),
            LogSeverity::Info,
        );
        vec![BackendCommand::SaveSchedule {
            request: SaveScheduleRequest {
                directory,
                schedule_type: form.schedule_type,
                schedule_time,
                rename_files: form.rename_files,
            },
        }]
    }

    fn finish_schedule(&mut self, request: SaveScheduleRequest, result: Result<(), GatewayError>) {
        self.flow.finish_schedule();

        match result {
            Ok(()) => {
                self.status.show(
                    StatusSlot::Schedule,
                    format!(
                        "Schedule saved successfully for \"{}\"! Type: {} Time: {}",
                        path_basename(&request.directory),
                        request.schedule_type,
                        request.schedule_time
                    ),
                    LogSeverity::Success,
                );
                self.record(
                    format!(
                        "Schedule saved: Type={}, Time={}, Directory={}.",
                        request.schedule_type, request.schedule_time, request.directory
                    ),
                    LogSeverity::Success,
                );
            }
            Err(err) => {
                let err = UiError::from_gateway(UiErrorContext::Schedule, &err);
                self.report_error(StatusSlot::Schedule, &err);
            }
        }
    }

    fn report_error(&mut self, slot: StatusSlot, err: &UiError) {
        self.status.show(slot, err.status_text(), LogSeverity::Error);
        self.report_error_log_only(err);
    }

    fn report_error_log_only(&mut self, err: &UiError) {
        if err.is_logged() {
            warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
            self.record(err.log_text(), LogSeverity::Error);
        }
    }

    fn record(&mut self, message: impl Into<String>, severity: LogSeverity) {
        let entry = self.log.record(message, severity);
        debug!(severity = entry.severity.label(), "{}", entry.message);
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Queues controller output for the background worker. A command that cannot
/// be queued is handed back to the controller so its flow is resolved.
pub fn dispatch_backend_commands(
    cmd_tx: &Sender<BackendCommand>,
    commands: Vec<BackendCommand>,
    controller: &mut OrchestrationController,
) {
    for cmd in commands {
        let cmd_name = cmd.name();
        tracing::debug!(command = cmd_name, "queueing ui->backend command");
        match cmd_tx.try_send(cmd) {
            Ok(()) => {
                tracing::debug!(command = cmd_name, "queued ui->backend command");
            }
            Err(TrySendError::Full(cmd)) => {
                tracing::warn!(command = cmd_name, "ui->backend command queue is full");
                controller.dispatch_failed(&cmd, "UI command queue is full; please retry");
            }
            Err(TrySendError::Disconnected(cmd)) => {
                tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
                controller.dispatch_failed(
                    &cmd,
                    "Background worker disconnected (possible startup/runtime failure); restart the application",
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
