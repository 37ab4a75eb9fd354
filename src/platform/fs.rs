// LogExport - platform/fs.rs
//
// Process and filesystem helpers.

use crate::util::constants;
use std::path::PathBuf;

/// Name of the running executable without extension, falling back to the
/// application identifier when it cannot be determined.
pub fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| constants::APP_ID.to_lowercase())
}

/// Directory for temporary export artifacts: the configured override, or
/// the OS temp directory.
pub fn artifact_dir(configured: Option<&PathBuf>) -> PathBuf {
    configured.cloned().unwrap_or_else(std::env::temp_dir)
}
