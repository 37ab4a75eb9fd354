// LogExport - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Errors stay typed through the whole pipeline; the controller is the only
// place that turns one into a user-facing message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by the export pipeline (query, write, deliver).
#[derive(Debug)]
pub enum ExportError {
    /// The log store could not be opened.
    StoreUnavailable { store: String, reason: String },

    /// The log store was opened but reading from it failed mid-enumeration.
    StoreRead { store: String, source: io::Error },

    /// The temporary artifact could not be created.
    CreateFailed { path: PathBuf, source: io::Error },

    /// I/O failure while streaming lines into the artifact.
    WriteFailed { path: PathBuf, source: io::Error },

    /// The artifact could not be read back for delivery.
    ReadFailed { path: PathBuf, source: io::Error },

    /// The artifact content is not valid UTF-8.
    DecodeFailed {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// The save flow could not write the chosen destination.
    SaveFailed {
        destination: PathBuf,
        source: io::Error,
    },

    /// The export did not finish within the configured timeout.
    TimedOut { secs: u64 },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable { store, reason } => {
                write!(f, "Cannot access logs ({store}): {reason}")
            }
            Self::StoreRead { store, source } => {
                write!(f, "Failed reading logs ({store}): {source}")
            }
            Self::CreateFailed { path, source } => write!(
                f,
                "Failed to create a temporary file at '{}': {source}",
                path.display()
            ),
            Self::WriteFailed { path, source } => {
                write!(f, "Failed to write logs to '{}': {source}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "Failed to read exported logs '{}': {source}", path.display())
            }
            Self::DecodeFailed { path, source } => write!(
                f,
                "Exported logs '{}' are not valid UTF-8: {source}",
                path.display()
            ),
            Self::SaveFailed {
                destination,
                source,
            } => write!(
                f,
                "Failed to save logs to '{}': {source}",
                destination.display()
            ),
            Self::TimedOut { secs } => write!(
                f,
                "Export timed out after {secs}s. Try a shorter time window."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreRead { source, .. } => Some(source),
            Self::CreateFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::ReadFailed { source, .. } => Some(source),
            Self::DecodeFailed { source, .. } => Some(source),
            Self::SaveFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for export results.
pub type Result<T> = std::result::Result<T, ExportError>;
