//! The eframe application: renders controller state and turns clicks into
//! controller actions.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ScheduleType;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{
    dispatch_backend_commands, Action, OrchestrationController, ScheduleForm,
};
use crate::controller::reducer::OrchestrationState;
use crate::controller::status::StatusSlot;
use crate::ui::panels;

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: OrchestrationController,
    preview_limit: usize,
    organize_rename: bool,
    schedule_form: ScheduleForm,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        preview_limit: usize,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: OrchestrationController::new(),
            preview_limit,
            organize_rename: false,
            schedule_form: ScheduleForm::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let commands = self.controller.apply(event);
            dispatch_backend_commands(&self.cmd_tx, commands, &mut self.controller);
        }
    }

    fn run_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            let commands = self.controller.handle(action);
            dispatch_backend_commands(&self.cmd_tx, commands, &mut self.controller);
        }
    }

    fn show_main_view(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("FilePilot");
            panels::status_line(ui, self.controller.status().get(StatusSlot::General));
            ui.separator();

            self.show_directory_section(ui, actions);
            ui.add_space(12.0);
            self.show_files_section(ui, actions);
            ui.add_space(12.0);
            self.show_organize_section(ui, actions);
            ui.add_space(12.0);
            self.show_recent_activity(ui, actions);
        });
    }

    fn show_directory_section(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        panels::section_title(ui, "Select Directory");
        ui.horizontal(|ui| {
            let shown = self
                .controller
                .session()
                .selected_directory()
                .unwrap_or("No directory selected");
            ui.label(egui::RichText::new(shown).monospace());
            if ui.button("Browse...").clicked() {
                actions.push(Action::BrowseForDirectory);
            }
        });
    }

    fn show_files_section(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let availability = self.controller.availability();
        let state = self.controller.state();

        ui.horizontal(|ui| {
            panels::section_title(ui, "Files");
            let count = match state {
                OrchestrationState::Ready => self.controller.session().file_count(),
                _ => 0,
            };
            ui.label(format!("({count})"));
            if state == OrchestrationState::Listing {
                ui.spinner();
            }
            if ui
                .add_enabled(availability.can_refresh, egui::Button::new("Refresh"))
                .clicked()
            {
                actions.push(Action::Refresh);
            }
        });

        panels::status_line(ui, self.controller.status().get(StatusSlot::FileList));
        if state == OrchestrationState::Ready {
            let preview = self.controller.session().preview(self.preview_limit);
            panels::file_preview(ui, &preview);
        }
    }

    fn show_organize_section(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let availability = self.controller.availability();
        panels::section_title(ui, "Organize");
        ui.checkbox(&mut self.organize_rename, "Rename files while organizing");
        ui.horizontal(|ui| {
            let label = if self.controller.is_organizing() {
                "Processing..."
            } else {
                "Organize Now"
            };
            if ui
                .add_enabled(availability.can_organize, egui::Button::new(label))
                .clicked()
            {
                actions.push(Action::OrganizeNow {
                    rename_files: self.organize_rename,
                });
            }
            if ui
                .add_enabled(availability.can_schedule, egui::Button::new("Schedule Tasks"))
                .clicked()
            {
                actions.push(Action::OpenScheduleDialog);
            }
        });
        panels::status_line(ui, self.controller.status().get(StatusSlot::Organize));
    }

    fn show_recent_activity(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            panels::section_title(ui, "Recent Activity");
            if ui.button("View Full Log").clicked() {
                actions.push(Action::OpenActivityLog);
            }
        });
        egui::ScrollArea::vertical()
            .id_salt("recent_activity")
            .max_height(ui.available_height())
            .show(ui, |ui| {
                panels::log_rows(ui, self.controller.log().digest());
            });
    }

    fn show_schedule_dialog(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if !self.controller.schedule_dialog_open() {
            return;
        }
        let availability = self.controller.availability();
        let mut open = true;

        egui::Window::new("Schedule Tasks")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Directory: {}",
                    self.controller
                        .session()
                        .selected_directory()
                        .unwrap_or("No directory selected")
                ));
                ui.separator();

                egui::ComboBox::from_label("Schedule type")
                    .selected_text(self.schedule_form.schedule_type.as_str())
                    .show_ui(ui, |ui| {
                        for schedule_type in ScheduleType::ALL {
                            ui.selectable_value(
                                &mut self.schedule_form.schedule_type,
                                schedule_type,
                                schedule_type.as_str(),
                            );
                        }
                    });

                if self.schedule_form.schedule_type.requires_time() {
                    ui.horizontal(|ui| {
                        ui.label("Time");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.schedule_form.schedule_time)
                                .hint_text("HH:MM")
                                .desired_width(80.0),
                        );
                    });
                }
                ui.checkbox(&mut self.schedule_form.rename_files, "Rename files");

                let label = if self.controller.is_saving_schedule() {
                    "Saving..."
                } else {
                    "Save Schedule"
                };
                if ui
                    .add_enabled(availability.can_schedule, egui::Button::new(label))
                    .clicked()
                {
                    actions.push(Action::SaveSchedule(self.schedule_form.clone()));
                }
                panels::status_line(ui, self.controller.status().get(StatusSlot::Schedule));
            });

        if !open {
            actions.push(Action::CloseScheduleDialog);
        }
    }

    fn show_activity_log(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if !self.controller.activity_log_open() {
            return;
        }
        let mut open = true;

        egui::Window::new("Activity Log")
            .open(&mut open)
            .default_size([640.0, 420.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("activity_log_detail")
                    .show(ui, |ui| {
                        panels::log_rows(ui, self.controller.log().detail());
                    });
            });

        if !open {
            actions.push(Action::CloseActivityLog);
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        self.show_main_view(ctx, &mut actions);
        self.show_schedule_dialog(ctx, &mut actions);
        self.show_activity_log(ctx, &mut actions);
        self.run_actions(actions);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
