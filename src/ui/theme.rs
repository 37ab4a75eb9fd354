// LogExport - ui/theme.rs
//
// Colours and layout constants for the export sheet and status bar.
// No dependencies on app state or business logic.

use egui::Color32;

/// Error alert text.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Successful export feedback in the status bar.
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Config warnings.
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const SHEET_MIN_WIDTH: f32 = 340.0;
pub const ALERT_MIN_WIDTH: f32 = 300.0;
pub const BUTTON_SPACING: f32 = 8.0;
