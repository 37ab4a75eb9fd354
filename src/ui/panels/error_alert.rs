// LogExport - ui/panels/error_alert.rs
//
// Alert shown while the export controller holds an unacknowledged error.
// Dismissing it (OK or the close button) acknowledges the error.

use crate::app::export::ExportController;
use crate::ui::theme;

pub fn render(ctx: &egui::Context, controller: &mut ExportController) {
    let Some(message) = controller.current_error().map(str::to_owned) else {
        return;
    };

    let mut open = true;
    let mut acknowledged = false;
    egui::Window::new("Export Failed")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::ALERT_MIN_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(theme::ERROR_TEXT, message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

    if !open || acknowledged {
        controller.acknowledge_error();
    }
}
