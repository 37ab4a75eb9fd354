// LogExport - ui/panels/warnings.rs
//
// Startup warnings window (config.toml problems). Shown once; closing it
// clears the list.

use crate::app::state::AppState;
use crate::ui::theme;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if state.warnings.is_empty() {
        return;
    }

    let mut open = true;
    egui::Window::new("Configuration Warnings")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .show(ctx, |ui| {
            for warning in &state.warnings {
                ui.colored_label(theme::WARNING_TEXT, warning);
            }
        });

    if !open {
        state.warnings.clear();
    }
}
