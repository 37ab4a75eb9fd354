// LogExport - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogExport";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogExport";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default host identifier. Entries whose subsystem starts with this value
/// are "application" logs; everything else is treated as a system log.
///
/// Matches the crate name, which is the first segment of every `tracing`
/// target emitted from this crate.
pub const DEFAULT_HOST_IDENTIFIER: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Export
// =============================================================================

/// File extension (and content type) of exported log files.
pub const LOG_FILE_EXTENSION: &str = "log";

/// Display name of the log content type in save dialogs.
pub const LOG_CONTENT_TYPE_NAME: &str = "Log file";

/// Default timeout for a single export (seconds).
pub const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 120;

/// Minimum user-configurable export timeout (seconds).
pub const MIN_EXPORT_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable export timeout (seconds).
pub const MAX_EXPORT_TIMEOUT_SECS: u64 = 3_600;

/// Buffer size used when streaming formatted lines into the artifact.
pub const EXPORT_WRITE_BUFFER_SIZE: usize = 64 * 1024; // 64 KB

/// Category assigned to captured events whose target has no module path.
pub const DEFAULT_CATEGORY: &str = "default";

// =============================================================================
// In-process log store
// =============================================================================

/// Default number of entries retained by the in-process log store.
pub const DEFAULT_STORE_CAPACITY: usize = 50_000;

/// Minimum user-configurable store capacity.
pub const MIN_STORE_CAPACITY: usize = 1_000;

/// Maximum user-configurable store capacity.
pub const MAX_STORE_CAPACITY: usize = 1_000_000;

/// Default level captured into the in-process log store.
pub const DEFAULT_STORE_LEVEL: &str = "debug";

// =============================================================================
// UI
// =============================================================================

/// Repaint interval while an export is running, so results are picked up
/// promptly even when the user is not interacting with the window.
pub const EXPORT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
