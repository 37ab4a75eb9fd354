// LogExport - app/state.rs
//
// UI selection and status shown around the export controller.
// Owned by the eframe::App implementation.

use crate::app::export::ExportController;
use crate::core::model::{ExportOptions, LookbackWindow};
use chrono::{DateTime, Utc};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Currently selected lookback window.
    pub window: LookbackWindow,

    /// Whether entries from outside the host application are included.
    pub include_system_logs: bool,

    /// Whether the export sheet is open.
    pub show_sheet: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal configuration warnings to show once at startup.
    pub warnings: Vec<String>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    pub fn new(window: LookbackWindow, include_system_logs: bool, debug_mode: bool) -> Self {
        Self {
            window,
            include_system_logs,
            show_sheet: false,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            debug_mode,
        }
    }

    /// Capture the current selection as export options.
    pub fn export_options(&self, now: DateTime<Utc>) -> ExportOptions {
        ExportOptions::from_window(self.window, self.include_system_logs, now)
    }

    /// Close the export sheet, abandoning any export still in flight.
    pub fn dismiss_sheet(&mut self, controller: &mut ExportController) {
        if controller.is_in_progress() {
            self.status_message = "Export cancelled.".to_string();
        }
        controller.abandon();
        self.show_sheet = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{LogQuery, LogStore, StoreHandle};
    use crate::core::sink::{Clipboard, ClipboardSink, ContentType, FileSink, SaveFlow, SaveOutcome};
    use crate::core::writer::ExportWriter;
    use crate::util::error::{ExportError, Result};
    use chrono::TimeZone;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    struct ClosedStore;

    impl LogStore for ClosedStore {
        fn name(&self) -> &str {
            "closed"
        }

        fn open(&self) -> Result<Box<dyn StoreHandle>> {
            Err(ExportError::StoreUnavailable {
                store: "closed".to_string(),
                reason: "not available".to_string(),
            })
        }
    }

    struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn set_text(&self, _text: String) {}
    }

    struct CancelSaveFlow;

    impl SaveFlow for CancelSaveFlow {
        fn present(&self, _artifact: &Path, _name: &str, _ct: ContentType) -> Result<SaveOutcome> {
            Ok(SaveOutcome::Cancelled)
        }
    }

    fn controller(dir: &TempDir) -> ExportController {
        ExportController::new(
            LogQuery::new(Arc::new(ClosedStore), "logexport"),
            ExportWriter::new(dir.path().to_path_buf(), "logexport"),
            ClipboardSink::new(Arc::new(NullClipboard)),
            FileSink::new(Box::new(CancelSaveFlow), "logexport"),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn test_export_options_follow_selection() {
        let mut state = AppState::new(LookbackWindow::TenMinutes, false, false);
        state.window = LookbackWindow::Hour;
        state.include_system_logs = true;

        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let opts = state.export_options(now);
        assert_eq!(opts.since_inclusive, Utc.with_ymd_and_hms(2026, 10, 16, 11, 0, 0).unwrap());
        assert!(opts.include_system_logs);
    }

    #[test]
    fn test_dismissing_sheet_mid_export_resets_status() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir);
        let mut state = AppState::new(LookbackWindow::TenMinutes, false, false);
        state.show_sheet = true;

        // Not polled, so the controller stays in progress.
        assert!(controller.start_export_to_clipboard(state.export_options(Utc::now())));
        state.status_message = "Exporting to clipboard\u{2026}".to_string();

        state.dismiss_sheet(&mut controller);
        assert!(!state.show_sheet);
        assert_eq!(state.status_message, "Export cancelled.");
        assert!(!controller.is_in_progress());
    }

    #[test]
    fn test_dismissing_idle_sheet_keeps_status() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller(&dir);
        let mut state = AppState::new(LookbackWindow::TenMinutes, false, false);
        state.show_sheet = true;
        state.status_message = "Copied 3 log lines to the clipboard.".to_string();

        state.dismiss_sheet(&mut controller);
        assert!(!state.show_sheet);
        assert_eq!(state.status_message, "Copied 3 log lines to the clipboard.");
    }
}
