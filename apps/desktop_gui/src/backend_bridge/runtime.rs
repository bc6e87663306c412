//! Background worker: owns the tokio runtime and runs every backend command
//! against the organizing service gateway.

use std::{path::PathBuf, sync::Arc, thread};

use client_core::{GatewayError, OrganizerGateway};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker thread. Commands are each run on their own task, so
/// replies may arrive in a different order than the commands were queued.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    gateway: Arc<dyn OrganizerGateway>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Background worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::internal(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Background worker ready".to_string()));

            let probe_gateway = Arc::clone(&gateway);
            let probe_tx = ui_tx.clone();
            tokio::spawn(async move {
                let result = probe_gateway.health_check().await;
                if let Err(err) = &result {
                    tracing::warn!("organizing service health probe failed: {err}");
                }
                let _ = probe_tx.try_send(UiEvent::ServiceHealth(result));
            });

            // `recv` blocks this worker thread only; spawned tasks keep running
            // on the runtime's pool threads.
            while let Ok(cmd) = cmd_rx.recv() {
                let cmd_name = cmd.name();
                tracing::debug!(command = cmd_name, "backend received command");
                let gateway = Arc::clone(&gateway);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(gateway.as_ref(), cmd).await;
                    if ui_tx.try_send(event).is_err() {
                        tracing::warn!(command = cmd_name, "dropped backend->ui event");
                    }
                });
            }
            tracing::info!("ui command queue closed; background worker stopping");
        });
    })
}

/// Runs one command to completion and describes its outcome for the UI.
pub async fn execute(gateway: &dyn OrganizerGateway, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::PickDirectory => UiEvent::DirectoryPicked(pick_directory().await),
        BackendCommand::ListFiles { ticket } => {
            let result = gateway.list_files(&ticket.directory).await;
            log_outcome("list_files", &result);
            UiEvent::FilesListed { ticket, result }
        }
        BackendCommand::OrganizeNow {
            source_directory,
            rename_files,
        } => {
            let result = gateway.organize_now(&source_directory, rename_files).await;
            log_outcome("organize_now", &result);
            UiEvent::OrganizeFinished {
                source_directory,
                result,
            }
        }
        BackendCommand::SaveSchedule { request } => {
            let result = gateway.save_schedule(&request).await;
            log_outcome("save_schedule", &result);
            UiEvent::ScheduleSaved { request, result }
        }
    }
}

async fn pick_directory() -> Option<PathBuf> {
    match tokio::task::spawn_blocking(|| rfd::FileDialog::new().pick_folder()).await {
        Ok(path) => path,
        Err(err) => {
            tracing::error!("directory picker task failed: {err}");
            None
        }
    }
}

fn log_outcome<T>(command: &'static str, result: &Result<T, GatewayError>) {
    match result {
        Ok(_) => tracing::debug!(command, "gateway call succeeded"),
        Err(err) => tracing::warn!(command, kind = ?err.kind(), "gateway call failed: {err}"),
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
