// LogExport - ui/panels/export_sheet.rs
//
// Export sheet: lookback window picker, system-logs toggle, and the two
// export actions. Rendered as a centred, non-collapsible window.
//
// The sheet never mutates export state itself; it only calls into the
// ExportController. Closing the sheet while an export is running abandons
// it, and the worker removes its artifact when it finishes.

use crate::app::export::ExportController;
use crate::app::state::AppState;
use crate::core::model::LookbackWindow;
use crate::ui::theme;

/// Render the export sheet (if `state.show_sheet` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState, controller: &mut ExportController) {
    if !state.show_sheet {
        return;
    }

    // An abandoned worker that has not exited yet also blocks new exports.
    let busy = !controller.can_start();
    let mut open = true;
    let mut dismissed = false;

    egui::Window::new("Export Logs")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::SHEET_MIN_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.strong("Filter");
            ui.add_space(4.0);

            ui.add_enabled_ui(!busy, |ui| {
                egui::Grid::new("export_filter")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Last");
                        egui::ComboBox::from_id_salt("export_window")
                            .selected_text(state.window.label())
                            .show_ui(ui, |ui| {
                                for window in LookbackWindow::all() {
                                    ui.selectable_value(&mut state.window, *window, window.label());
                                }
                            });
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut state.include_system_logs, "Include system logs");
                        ui.end_row();
                    });
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    dismissed = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = theme::BUTTON_SPACING;

                    let to_file = ui.add_enabled(!busy, egui::Button::new("Export to file\u{2026}"));
                    let to_clipboard = ui.add_enabled(!busy, egui::Button::new("Copy to clipboard"));
                    if busy {
                        ui.spinner();
                    }

                    let options = state.export_options(chrono::Utc::now());
                    if to_clipboard.clicked() && controller.start_export_to_clipboard(options) {
                        state.status_message = "Exporting to clipboard\u{2026}".to_string();
                    }
                    if to_file.clicked() && controller.start_export_to_file(options) {
                        state.status_message = "Exporting to file\u{2026}".to_string();
                    }
                });
            });
        });

    if !open || dismissed {
        state.dismiss_sheet(controller);
    }
}
