use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use client_core::{GatewayError, OrganizerGateway};
use crossbeam_channel::bounded;
use shared::{
    domain::ScheduleType,
    error::ServiceError,
    protocol::{OrganizeResponse, SaveScheduleRequest},
};

use super::*;
use crate::backend_bridge::commands::ListingTicket;
use crate::controller::orchestration::{dispatch_backend_commands, Action, OrchestrationController};
use crate::controller::reducer::OrchestrationState;

const SLOW_DIRECTORY: &str = "/data/slow";
const FAST_DIRECTORY: &str = "/data/fast";

#[derive(Default)]
struct ScriptedGateway {
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn note(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl OrganizerGateway for ScriptedGateway {
    async fn list_files(&self, directory_path: &str) -> Result<Vec<String>, GatewayError> {
        self.note(format!("list_files {directory_path}"));
        if directory_path == SLOW_DIRECTORY {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(vec![format!("{directory_path}/report.pdf")])
    }

    async fn organize_now(
        &self,
        source_directory: &str,
        rename_files: bool,
    ) -> Result<OrganizeResponse, GatewayError> {
        self.note(format!("organize_now {source_directory} {rename_files}"));
        Ok(OrganizeResponse {
            processed_count: 1,
            error_count: 0,
            errors: Vec::new(),
        })
    }

    async fn save_schedule(&self, request: &SaveScheduleRequest) -> Result<(), GatewayError> {
        self.note(format!("save_schedule {}", request.directory));
        Err(GatewayError::ServiceRejected(ServiceError::new(
            Some(400),
            "Missing schedule data.",
        )))
    }

    async fn health_check(&self) -> Result<String, GatewayError> {
        Ok("Organizing service is running.".to_string())
    }
}

#[tokio::test]
async fn list_command_carries_its_ticket_back() {
    let gateway = ScriptedGateway::default();
    let ticket = ListingTicket {
        request_id: 7,
        directory: FAST_DIRECTORY.to_string(),
    };

    let event = execute(
        &gateway,
        BackendCommand::ListFiles {
            ticket: ticket.clone(),
        },
    )
    .await;

    match event {
        UiEvent::FilesListed {
            ticket: returned,
            result,
        } => {
            assert_eq!(returned, ticket);
            assert_eq!(result, Ok(vec!["/data/fast/report.pdf".to_string()]));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(gateway.calls(), vec!["list_files /data/fast"]);
}

#[tokio::test]
async fn organize_and_schedule_results_pass_through() {
    let gateway = ScriptedGateway::default();

    let organized = execute(
        &gateway,
        BackendCommand::OrganizeNow {
            source_directory: FAST_DIRECTORY.to_string(),
            rename_files: true,
        },
    )
    .await;
    assert!(matches!(
        organized,
        UiEvent::OrganizeFinished { ref source_directory, result: Ok(ref summary) }
            if source_directory == FAST_DIRECTORY && summary.processed_count == 1
    ));

    let request = SaveScheduleRequest {
        directory: FAST_DIRECTORY.to_string(),
        schedule_type: ScheduleType::Daily,
        schedule_time: "08:00".to_string(),
        rename_files: false,
    };
    let saved = execute(
        &gateway,
        BackendCommand::SaveSchedule {
            request: request.clone(),
        },
    )
    .await;
    match saved {
        UiEvent::ScheduleSaved {
            request: returned,
            result: Err(GatewayError::ServiceRejected(err)),
        } => {
            assert_eq!(returned, request);
            assert_eq!(err.message, "Missing schedule data.");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn worker_applies_only_the_latest_selection_when_replies_cross() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let worker = launch(cmd_rx, ui_tx, gateway.clone());

    let mut controller = OrchestrationController::new();
    for directory in [SLOW_DIRECTORY, FAST_DIRECTORY] {
        let commands = controller.handle(Action::SelectDirectory(directory.to_string()));
        dispatch_backend_commands(&cmd_tx, commands, &mut controller);
    }

    let mut listings = Vec::new();
    let mut healthy = false;
    while listings.len() < 2 {
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker event");
        match &event {
            UiEvent::FilesListed { ticket, .. } => listings.push(ticket.directory.clone()),
            UiEvent::ServiceHealth(result) => healthy = result.is_ok(),
            _ => {}
        }
        let follow_up = controller.apply(event);
        assert!(follow_up.is_empty());
    }

    assert_eq!(listings, vec![FAST_DIRECTORY, SLOW_DIRECTORY]);
    assert_eq!(controller.state(), OrchestrationState::Ready);
    assert_eq!(controller.session().selected_directory(), Some(FAST_DIRECTORY));
    assert_eq!(
        controller.session().files(),
        ["/data/fast/report.pdf".to_string()].as_slice()
    );

    drop(cmd_tx);
    worker.join().expect("worker thread exits once the queue closes");
    // The health probe may land after both listings; drain whatever is left.
    while let Ok(event) = ui_rx.try_recv() {
        if let UiEvent::ServiceHealth(result) = event {
            healthy = result.is_ok();
        }
    }
    assert!(healthy);
    let mut calls = gateway.calls();
    calls.sort();
    assert_eq!(calls, vec!["list_files /data/fast", "list_files /data/slow"]);
}
