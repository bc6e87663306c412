//! Small rendering helpers shared by the main view and its windows.

use client_core::{FilePreview, LogEntry};
use eframe::egui;
use shared::domain::LogSeverity;

use crate::controller::status::StatusMessage;

pub fn severity_color(severity: LogSeverity) -> egui::Color32 {
    match severity {
        LogSeverity::Info => egui::Color32::from_rgb(96, 165, 250),
        LogSeverity::Success => egui::Color32::from_rgb(74, 222, 128),
        LogSeverity::Error => egui::Color32::from_rgb(248, 113, 113),
    }
}

pub fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).strong().size(16.0));
}

pub fn status_line(ui: &mut egui::Ui, status: Option<&StatusMessage>) {
    if let Some(status) = status {
        ui.label(egui::RichText::new(&status.text).color(severity_color(status.severity)));
    }
}

pub fn file_preview(ui: &mut egui::Ui, preview: &FilePreview) {
    for name in &preview.names {
        ui.label(format!("• {name}"));
    }
    if preview.remaining > 0 {
        ui.label(
            egui::RichText::new(format!("... and {} more.", preview.remaining))
                .color(ui.visuals().weak_text_color()),
        );
    }
}

pub fn log_rows<'a>(ui: &mut egui::Ui, entries: impl Iterator<Item = &'a LogEntry>) {
    let mut empty = true;
    for entry in entries {
        empty = false;
        ui.horizontal_wrapped(|ui| {
            ui.label(
                egui::RichText::new(format!("[{}]", entry.timestamp_label()))
                    .monospace()
                    .color(ui.visuals().weak_text_color()),
            );
            ui.label(egui::RichText::new(&entry.message).color(severity_color(entry.severity)));
        });
    }
    if empty {
        ui.label(egui::RichText::new("No activity yet.").italics());
    }
}
