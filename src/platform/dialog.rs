// LogExport - platform/dialog.rs
//
// Native "save as" flow using `rfd`.
//
// The dialog is modal and blocking, so it is presented from the UI thread
// (macOS requires native dialogs on the main thread). On confirmation the
// artifact is copied to the chosen destination.

use crate::core::sink::{ContentType, SaveFlow, SaveOutcome};
use crate::util::error::{ExportError, Result};
use std::path::Path;

/// Save flow presenting the platform's native file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeSaveFlow;

impl SaveFlow for NativeSaveFlow {
    fn present(
        &self,
        artifact: &Path,
        suggested_name: &str,
        content_type: ContentType,
    ) -> Result<SaveOutcome> {
        let Some(destination) = rfd::FileDialog::new()
            .set_title("Export logs")
            .add_filter(content_type.name, &[content_type.extension])
            .set_file_name(suggested_name)
            .save_file()
        else {
            return Ok(SaveOutcome::Cancelled);
        };

        std::fs::copy(artifact, &destination).map_err(|e| ExportError::SaveFailed {
            destination: destination.clone(),
            source: e,
        })?;
        Ok(SaveOutcome::Saved(destination))
    }
}
