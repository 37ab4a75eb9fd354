// LogExport - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Log Entry (output of a log store query)
// =============================================================================

/// A single entry read from a log store.
///
/// Transient: produced by a query, consumed by the formatter, never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was emitted, in UTC.
    pub timestamp: DateTime<Utc>,

    /// Entry level as reported by the store.
    pub level: LogLevel,

    /// Hierarchical origin tag, e.g. the emitting crate or bundle identifier.
    pub subsystem: String,

    /// Finer-grained origin tag within the subsystem.
    pub category: String,

    /// Fully composed message text.
    pub message: String,
}

// =============================================================================
// Level
// =============================================================================

/// Log levels understood by the export format.
///
/// Any value a store reports that is not one of the named levels maps to
/// `Unknown` (including on deserialisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Notice,
    Debug,
    Info,
    Error,
    Fault,
    Undefined,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LogLevel {
    /// Lowercase symbolic name used in exported lines.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Notice => "notice",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Error => "error",
            LogLevel::Fault => "fault",
            LogLevel::Undefined => "undefined",
            LogLevel::Unknown => "unknown",
        }
    }

    /// Inverse of [`LogLevel::name`]. Unrecognised names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "notice" => LogLevel::Notice,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "error" => LogLevel::Error,
            "fault" => LogLevel::Fault,
            "undefined" => LogLevel::Undefined,
            _ => LogLevel::Unknown,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Lookback window
// =============================================================================

/// The fixed set of time windows a user can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LookbackWindow {
    #[default]
    TenMinutes,
    Hour,
    Day,
}

impl LookbackWindow {
    /// Returns all variants in picker order (longest first).
    pub fn all() -> &'static [LookbackWindow] {
        &[
            LookbackWindow::Day,
            LookbackWindow::Hour,
            LookbackWindow::TenMinutes,
        ]
    }

    /// Length of the window.
    pub fn duration(&self) -> Duration {
        match self {
            LookbackWindow::TenMinutes => Duration::minutes(10),
            LookbackWindow::Hour => Duration::hours(1),
            LookbackWindow::Day => Duration::days(1),
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LookbackWindow::TenMinutes => "ten minutes",
            LookbackWindow::Hour => "one hour",
            LookbackWindow::Day => "one day",
        }
    }

    /// Short key used in config.toml and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            LookbackWindow::TenMinutes => "10m",
            LookbackWindow::Hour => "1h",
            LookbackWindow::Day => "1d",
        }
    }

    /// Parse a short key (`10m`, `1h`, `1d`).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|w| w.key().eq_ignore_ascii_case(key.trim()))
    }
}

// =============================================================================
// Export options
// =============================================================================

/// Parameters of one export invocation, captured from the UI selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Oldest timestamp (inclusive) to export.
    pub since_inclusive: DateTime<Utc>,

    /// When false, only entries from the host application are exported.
    pub include_system_logs: bool,
}

impl ExportOptions {
    /// Options covering `window` back from `now`.
    pub fn from_window(window: LookbackWindow, include_system_logs: bool, now: DateTime<Utc>) -> Self {
        Self {
            since_inclusive: now - window.duration(),
            include_system_logs,
        }
    }
}

// =============================================================================
// Export state
// =============================================================================

/// State of the export controller as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    InProgress,
    /// A failed export, holding a human-readable message until acknowledged.
    Error(String),
}

/// Where a finished export went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Lines were copied to the clipboard.
    Copied { lines: usize },

    /// The file was saved to `destination`.
    Saved {
        lines: usize,
        destination: std::path::PathBuf,
    },

    /// The user cancelled the save dialog.
    Cancelled,
}

impl ExportOutcome {
    /// Status-bar text for the outcome.
    pub fn describe(&self) -> String {
        match self {
            ExportOutcome::Copied { lines } => format!("Copied {lines} log lines to the clipboard."),
            ExportOutcome::Saved { lines, destination } => {
                format!("Saved {lines} log lines to '{}'.", destination.display())
            }
            ExportOutcome::Cancelled => "Export cancelled.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_level_names_round_trip() {
        for level in [
            LogLevel::Notice,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Error,
            LogLevel::Fault,
            LogLevel::Undefined,
            LogLevel::Unknown,
        ] {
            assert_eq!(LogLevel::from_name(level.name()), level);
        }
        assert_eq!(LogLevel::from_name("warning"), LogLevel::Unknown);
    }

    #[test]
    fn test_unknown_level_deserialises_to_unknown() {
        let level: LogLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(level, LogLevel::Unknown);
        let level: LogLevel = serde_json::from_str("\"fault\"").unwrap();
        assert_eq!(level, LogLevel::Fault);
    }

    #[test]
    fn test_window_keys() {
        assert_eq!(LookbackWindow::from_key("1h"), Some(LookbackWindow::Hour));
        assert_eq!(LookbackWindow::from_key(" 10M "), Some(LookbackWindow::TenMinutes));
        assert_eq!(LookbackWindow::from_key("2h"), None);
    }

    #[test]
    fn test_options_from_window() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let opts = ExportOptions::from_window(LookbackWindow::Day, true, now);
        assert_eq!(opts.since_inclusive, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(opts.include_system_logs);
    }
}
