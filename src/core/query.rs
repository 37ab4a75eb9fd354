// LogExport - core/query.rs
//
// Reading raw entries from a log store for a time range.
//
// Stores are collaborators behind the `LogStore` / `StoreHandle` traits:
// open a handle, compute a store-specific cursor for a timestamp, then
// enumerate entries from that cursor with an optional subsystem-prefix
// filter. The handle is moved into the returned iterator so it is released
// as soon as enumeration completes, fails, or is abandoned.

use crate::core::model::{ExportOptions, LogEntry};
use crate::util::error::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Lazy, finite, non-restartable sequence of entries in store order.
pub type Entries = Box<dyn Iterator<Item = Result<LogEntry>> + Send>;

/// Opaque store-specific position (an index, a byte offset, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cursor(pub u64);

/// A source of log entries for the current process.
pub trait LogStore: Send + Sync {
    /// Short store description used in errors and logs.
    fn name(&self) -> &str;

    /// Open a read handle. Fails with `StoreUnavailable` when access is denied.
    fn open(&self) -> Result<Box<dyn StoreHandle>>;
}

/// An open read handle on a log store.
pub trait StoreHandle: Send {
    /// Position of the first entry at or after `at_or_after`.
    fn position(&mut self, at_or_after: DateTime<Utc>) -> Result<Cursor>;

    /// Enumerate entries from `from` in chronological order, keeping only
    /// subsystems starting with `subsystem_prefix` when one is given.
    fn entries(self: Box<Self>, from: Cursor, subsystem_prefix: Option<String>) -> Result<Entries>;
}

/// Subsystem-prefix predicate shared by store implementations.
pub fn subsystem_matches(subsystem: &str, prefix: Option<&str>) -> bool {
    prefix.map_or(true, |p| subsystem.starts_with(p))
}

/// Query front-end: turns export options into a store enumeration.
#[derive(Clone)]
pub struct LogQuery {
    store: Arc<dyn LogStore>,
    host_identifier: String,
}

impl LogQuery {
    /// `host_identifier` is the subsystem prefix identifying the host
    /// application's own entries.
    pub fn new(store: Arc<dyn LogStore>, host_identifier: impl Into<String>) -> Self {
        Self {
            store,
            host_identifier: host_identifier.into(),
        }
    }

    /// Fetch entries at or after `options.since_inclusive`.
    ///
    /// With `include_system_logs` false only the host's subsystems are
    /// returned; with it true the whole process is returned unfiltered.
    pub fn fetch(&self, options: &ExportOptions) -> Result<Entries> {
        let mut handle = self.store.open()?;
        let cursor = handle.position(options.since_inclusive)?;

        let prefix = if options.include_system_logs {
            None
        } else {
            Some(self.host_identifier.clone())
        };

        tracing::debug!(
            store = self.store.name(),
            since = %options.since_inclusive,
            cursor = cursor.0,
            prefix = prefix.as_deref().unwrap_or("<none>"),
            "Log store query opened"
        );

        let since = options.since_inclusive;
        let entries = handle.entries(cursor, prefix)?;
        // Cursors may be coarse; the lower bound is enforced exactly here.
        Ok(Box::new(entries.filter(move |item| match item {
            Ok(entry) => entry.timestamp >= since,
            Err(_) => true,
        })))
    }
}
