// LogExport - core/sink.rs
//
// Delivery strategies for a finished export artifact.
//
// Both sinks take the artifact by value: once `deliver` returns, the
// artifact has been dropped and its file removed, whatever the outcome.
// Platform collaborators (clipboard, save dialog) sit behind traits so the
// sinks can be exercised without a windowing system.

use crate::core::writer::ExportArtifact;
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// Collaborator traits
// =============================================================================

/// System clipboard.
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: String);
}

/// Content type offered to the save flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType {
    /// Display name, e.g. "Log file".
    pub name: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
}

/// The content type of exported logs.
pub const LOG_CONTENT_TYPE: ContentType = ContentType {
    name: constants::LOG_CONTENT_TYPE_NAME,
    extension: constants::LOG_FILE_EXTENSION,
};

/// Result of a user-driven save flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The artifact was written to this destination.
    Saved(PathBuf),
    /// The user dismissed the flow without saving.
    Cancelled,
}

/// User-facing "save as" flow.
///
/// `present` blocks until the user confirms or cancels and, on confirmation,
/// writes the artifact content to the chosen destination. A failed write is
/// reported as `SaveFailed`; cancellation is not an error.
pub trait SaveFlow: Send {
    fn present(
        &self,
        artifact: &Path,
        suggested_name: &str,
        content_type: ContentType,
    ) -> Result<SaveOutcome>;
}

/// Default file name offered by the save flow:
/// `<process-name>-<UTC timestamp, ISO-8601 basic format>.log`.
pub fn suggested_file_name(process_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "{process_name}-{}.{}",
        now.format("%Y%m%dT%H%M%SZ"),
        constants::LOG_FILE_EXTENSION
    )
}

// =============================================================================
// ClipboardSink
// =============================================================================

/// Copies the artifact's text to the clipboard, then discards the artifact.
#[derive(Clone)]
pub struct ClipboardSink {
    clipboard: Arc<dyn Clipboard>,
}

impl ClipboardSink {
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self { clipboard }
    }

    /// Read the artifact as UTF-8 and place it on the clipboard.
    /// Returns the number of bytes copied.
    pub fn deliver(&self, artifact: ExportArtifact) -> Result<usize> {
        let bytes = artifact.read_all()?;
        let text = String::from_utf8(bytes).map_err(|e| ExportError::DecodeFailed {
            path: artifact.path().to_path_buf(),
            source: e,
        })?;
        let len = text.len();
        self.clipboard.set_text(text);
        tracing::debug!(bytes = len, "Export copied to clipboard");
        Ok(len)
    }
}

// =============================================================================
// FileSink
// =============================================================================

/// Hands the artifact to the save flow, then discards it.
pub struct FileSink {
    save_flow: Box<dyn SaveFlow>,
    process_name: String,
}

impl FileSink {
    pub fn new(save_flow: Box<dyn SaveFlow>, process_name: impl Into<String>) -> Self {
        Self {
            save_flow,
            process_name: process_name.into(),
        }
    }

    /// Present the save flow for `artifact`. The artifact is retained until
    /// the flow finishes and deleted regardless of the outcome.
    pub fn deliver(&self, artifact: ExportArtifact, now: DateTime<Utc>) -> Result<SaveOutcome> {
        let name = suggested_file_name(&self.process_name, now);
        let outcome = self
            .save_flow
            .present(artifact.path(), &name, LOG_CONTENT_TYPE);
        match &outcome {
            Ok(SaveOutcome::Saved(dest)) => {
                tracing::info!(destination = %dest.display(), "Export saved");
            }
            Ok(SaveOutcome::Cancelled) => tracing::info!("Export save cancelled by user"),
            Err(e) => tracing::warn!(error = %e, "Export save failed"),
        }
        drop(artifact);
        outcome
    }
}
