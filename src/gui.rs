// LogExport - gui.rs
//
// Top-level eframe::App implementation.
// Hosts the export sheet and drives the export controller each frame.

use crate::app::export::ExportController;
use crate::app::state::AppState;
use crate::core::model::ExportState;
use crate::ui;

/// The LogExport application.
pub struct LogExportApp {
    pub state: AppState,
    pub controller: ExportController,
}

impl LogExportApp {
    pub fn new(state: AppState, controller: ExportController) -> Self {
        Self { state, controller }
    }

    /// Refresh the status bar after the controller changed state.
    fn update_status(&mut self) {
        match self.controller.state() {
            ExportState::Idle => {
                if let Some(outcome) = self.controller.last_outcome() {
                    self.state.status_message = outcome.describe();
                }
            }
            ExportState::Error(_) => {
                self.state.status_message = "Export failed.".to_string();
            }
            ExportState::InProgress => {}
        }
    }
}

impl eframe::App for LogExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply finished exports. For file exports this presents the save
        // dialog, so it must happen on this thread.
        if self.controller.poll() {
            self.update_status();
            ctx.request_repaint();
        }

        // Keep polling while a worker is running, including an abandoned one
        // whose exit re-enables the export buttons.
        if self.controller.is_in_progress() || self.controller.is_worker_running() {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                crate::util::constants::EXPORT_POLL_INTERVAL_MS,
            ));
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export Logs\u{2026}").clicked() {
                        self.state.show_sheet = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.controller.is_in_progress() {
                    ui.spinner();
                }
                let colour = match self.controller.state() {
                    ExportState::Error(_) => ui::theme::ERROR_TEXT,
                    ExportState::Idle if self.controller.last_outcome().is_some() => {
                        ui::theme::SUCCESS_TEXT
                    }
                    _ => ui.style().visuals.text_color(),
                };
                ui.colored_label(colour, &self.state.status_message);
                if self.state.debug_mode {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new("debug").small().weak());
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.heading(crate::util::constants::APP_NAME);
                ui.add_space(8.0);
                ui.label("Export recent log entries to the clipboard or a file.");
                ui.add_space(12.0);
                if ui.button("Export Logs\u{2026}").clicked() {
                    self.state.show_sheet = true;
                }
            });
        });

        ui::panels::export_sheet::render(ctx, &mut self.state, &mut self.controller);
        ui::panels::error_alert::render(ctx, &mut self.controller);
        ui::panels::warnings::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Abandons any in-flight export so its artifact is removed when the
    /// worker finishes.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.abandon();
    }
}
