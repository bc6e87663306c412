use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use client_core::{OrganizerClient, OrganizerGateway};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DesktopGuiApp;

const WINDOW_TITLE: &str = "FilePilot";

fn main() -> eframe::Result<()> {
    let loaded = config::load_settings();
    let settings = loaded.settings;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }
    match &loaded.source {
        Some(path) => tracing::info!(path = %path.display(), "loaded settings file"),
        None => tracing::debug!("no settings file found; using defaults and environment"),
    }
    tracing::info!(service_url = %settings.service_url, "starting FilePilot");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let gateway: Arc<dyn OrganizerGateway> =
        Arc::new(OrganizerClient::new(settings.service_url.clone()));
    backend_bridge::runtime::launch(cmd_rx, ui_tx, gateway);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let preview_limit = settings.preview_limit;
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, preview_limit)))),
    )
}
