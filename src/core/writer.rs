// LogExport - core/writer.rs
//
// Streams formatted lines into a freshly created temporary artifact.
//
// The artifact is an owned path: dropping an `ExportArtifact` deletes the
// file (best-effort), so whichever stage holds it last is responsible for
// cleanup simply by letting it go out of scope.

use crate::core::format::format_entry;
use crate::core::model::LogEntry;
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// ExportArtifact
// =============================================================================

/// A temporary export file. Deleted when dropped.
#[derive(Debug)]
pub struct ExportArtifact {
    path: PathBuf,
}

impl ExportArtifact {
    /// Take ownership of an existing file; it will be deleted on drop.
    pub fn adopt(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full artifact content.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| ExportError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Drop for ExportArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Export artifact removed");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                // Not surfaced: the export result has already been delivered.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove export artifact"
                );
            }
        }
    }
}

// =============================================================================
// ExportWriter
// =============================================================================

/// Creates uniquely named artifacts in a directory and fills them.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    /// Directory artifacts are created in.
    dir: PathBuf,

    /// Host process name, used as the artifact name prefix.
    process_name: String,
}

impl ExportWriter {
    pub fn new(dir: PathBuf, process_name: impl Into<String>) -> Self {
        Self {
            dir,
            process_name: process_name.into(),
        }
    }

    /// Directory artifacts are created in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a new artifact: `<process-name>-<uuid>.log`.
    fn next_path(&self) -> PathBuf {
        self.dir.join(format!(
            "{}-{}.{}",
            self.process_name,
            uuid::Uuid::new_v4(),
            constants::LOG_FILE_EXTENSION
        ))
    }

    /// Write `entries` into a new artifact, one canonical line each, in
    /// receipt order. Returns the artifact and the number of lines written.
    ///
    /// Lines are streamed through a fixed-size buffer; the full result set is
    /// never held in memory. The file is flushed and closed before return.
    /// An error from the entry sequence aborts the write and deletes the
    /// partial artifact.
    pub fn write<I>(&self, entries: I) -> Result<(ExportArtifact, usize)>
    where
        I: IntoIterator<Item = Result<LogEntry>>,
    {
        let path = self.next_path();

        // create_new: never reuse a path belonging to another export.
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| ExportError::CreateFailed {
                path: path.clone(),
                source: e,
            })?;
        let artifact = ExportArtifact::adopt(path);

        let write_err = |e: std::io::Error| ExportError::WriteFailed {
            path: artifact.path().to_path_buf(),
            source: e,
        };

        let mut writer = BufWriter::with_capacity(constants::EXPORT_WRITE_BUFFER_SIZE, file);
        let mut lines = 0usize;
        for entry in entries {
            let entry = entry?;
            writer
                .write_all(format_entry(&entry).as_bytes())
                .map_err(write_err)?;
            lines += 1;
        }

        let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        tracing::info!(
            path = %artifact.path().display(),
            lines,
            "Export artifact written"
        );
        Ok((artifact, lines))
    }
}
