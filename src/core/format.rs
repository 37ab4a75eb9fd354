// LogExport - core/format.rs
//
// Canonical text representation of a log entry:
//
//   <ISO-8601 UTC timestamp> - [<level>] - <subsystem> - <category> - <message>\n
//
// The format is an external contract: exported files must diff cleanly
// across runs, so formatting is pure and timestamps are always UTC with
// second precision.

use crate::core::model::{LogEntry, LogLevel};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Separator between fields of a canonical line.
const FIELD_SEPARATOR: &str = " - ";

/// Format a timestamp the way exported lines do (`1970-01-01T00:01:40Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert one entry into its canonical line, including the trailing newline.
pub fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{ts}{sep}[{level}]{sep}{subsystem}{sep}{category}{sep}{message}\n",
        ts = format_timestamp(&entry.timestamp),
        level = entry.level.name(),
        subsystem = entry.subsystem,
        category = entry.category,
        message = entry.message,
        sep = FIELD_SEPARATOR,
    )
}

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Subsystem and category are matched lazily so a message may itself
        // contain the field separator.
        Regex::new(r"(?s)^(\S+) - \[([a-z]+)\] - (.*?) - (.*?) - (.*?)\n?$")
            .expect("canonical line regex is valid")
    })
}

/// Parse a canonical line back into an entry.
///
/// Returns `None` when the line does not follow the canonical format. Used
/// to verify exports; subsystem and category must not contain `" - "`.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    let caps = line_regex().captures(line)?;
    let timestamp = DateTime::parse_from_rfc3339(&caps[1])
        .ok()?
        .with_timezone(&Utc);
    Some(LogEntry {
        timestamp,
        level: LogLevel::from_name(&caps[2]),
        subsystem: caps[3].to_string(),
        category: caps[4].to_string(),
        message: caps[5].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(secs: i64, level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            level,
            subsystem: "com.app".to_string(),
            category: "ui".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_canonical_line() {
        let line = format_entry(&entry(100, LogLevel::Info, "button is pressed"));
        assert_eq!(
            line,
            "1970-01-01T00:01:40Z - [info] - com.app - ui - button is pressed\n"
        );
    }

    #[test]
    fn test_unknown_level_name() {
        let line = format_entry(&entry(0, LogLevel::Unknown, "x"));
        assert!(line.contains(" - [unknown] - "), "{line}");
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let mut e = entry(100, LogLevel::Debug, "m");
        e.timestamp = Utc.timestamp_opt(100, 750_000_000).unwrap();
        assert!(format_entry(&e).starts_with("1970-01-01T00:01:40Z - "));
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let e = entry(1_700_000_000, LogLevel::Fault, "disk full");
        assert_eq!(format_entry(&e), format_entry(&e.clone()));
    }

    #[test]
    fn test_parse_recovers_all_fields() {
        let original = entry(1_700_000_000, LogLevel::Error, "failed - retrying in 5s");
        let parsed = parse_line(&format_entry(&original)).expect("canonical line parses");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_rejects_foreign_lines() {
        assert!(parse_line("not a log line").is_none());
        assert!(parse_line("yesterday - [info] - a - b - c\n").is_none());
    }
}
