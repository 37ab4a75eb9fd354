// LogExport - platform/log_store.rs
//
// In-process log store: a bounded ring buffer of entries captured from
// this process's own `tracing` events.
//
// Architecture:
//   - `StoreLayer` is a `tracing_subscriber::Layer` installed at startup;
//     every event it sees becomes a `LogEntry` in the shared buffer.
//   - `MemoryLogStore` implements `LogStore`; opening it snapshots the
//     buffer so enumeration never holds the lock while the export writes.
//   - The event target supplies subsystem and category: the first `::`
//     segment is the subsystem (the emitting crate), the remainder the
//     category. Events from crates other than the host are "system" logs.
//
// Timestamps are taken while holding the buffer lock, so buffer order is
// chronological and cursors can be found by binary search.

use crate::core::model::{LogEntry, LogLevel};
use crate::core::query::{subsystem_matches, Cursor, Entries, LogStore, StoreHandle};
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

const STORE_NAME: &str = "in-process";

// =============================================================================
// MemoryLogStore
// =============================================================================

struct Inner {
    buffer: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    /// Set once a capture layer has been created for this store.
    installed: AtomicBool,
}

/// Shared ring buffer of captured entries. Cheap to clone.
#[derive(Clone)]
pub struct MemoryLogStore {
    inner: Arc<Inner>,
}

impl MemoryLogStore {
    /// Create an empty store retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                buffer: Mutex::new(VecDeque::with_capacity(capacity.min(4_096))),
                capacity: capacity.max(1),
                installed: AtomicBool::new(false),
            }),
        }
    }

    /// Create the capture layer feeding this store.
    pub fn layer(&self) -> StoreLayer {
        self.inner.installed.store(true, Ordering::SeqCst);
        StoreLayer {
            store: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic while holding the lock cannot leave the deque inconsistent.
        self.inner
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry as-is. Callers must keep timestamps non-decreasing.
    pub fn push(&self, entry: LogEntry) {
        let mut buffer = self.lock();
        if buffer.len() >= self.inner.capacity {
            buffer.pop_front();
        }
        buffer.push_back(entry);
    }

    /// Append an entry stamped with the current time. The stamp is clamped
    /// to the newest buffered entry, so the buffer stays sorted even if the
    /// wall clock steps backwards.
    pub fn record(&self, level: LogLevel, subsystem: &str, category: &str, message: String) {
        let mut buffer = self.lock();
        let now = Utc::now();
        let timestamp = buffer.back().map_or(now, |last| last.timestamp.max(now));
        if buffer.len() >= self.inner.capacity {
            buffer.pop_front();
        }
        buffer.push_back(LogEntry {
            timestamp,
            level,
            subsystem: subsystem.to_string(),
            category: category.to_string(),
            message,
        });
    }

    /// Number of entries currently retained.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogStore for MemoryLogStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn open(&self) -> Result<Box<dyn StoreHandle>> {
        if !self.inner.installed.load(Ordering::SeqCst) {
            return Err(ExportError::StoreUnavailable {
                store: STORE_NAME.to_string(),
                reason: "log capture is not enabled for this process".to_string(),
            });
        }
        let snapshot: Vec<LogEntry> = self.lock().iter().cloned().collect();
        Ok(Box::new(MemoryHandle { snapshot }))
    }
}

struct MemoryHandle {
    snapshot: Vec<LogEntry>,
}

impl StoreHandle for MemoryHandle {
    fn position(&mut self, at_or_after: DateTime<Utc>) -> Result<Cursor> {
        let idx = self
            .snapshot
            .partition_point(|e| e.timestamp < at_or_after);
        Ok(Cursor(idx as u64))
    }

    fn entries(self: Box<Self>, from: Cursor, subsystem_prefix: Option<String>) -> Result<Entries> {
        let skip = usize::try_from(from.0).unwrap_or(usize::MAX);
        Ok(Box::new(
            self.snapshot
                .into_iter()
                .skip(skip)
                .filter(move |e| subsystem_matches(&e.subsystem, subsystem_prefix.as_deref()))
                .map(Ok),
        ))
    }
}

// =============================================================================
// Capture layer
// =============================================================================

/// `tracing` layer that records events into a `MemoryLogStore`.
pub struct StoreLayer {
    store: MemoryLogStore,
}

impl<S: Subscriber> Layer<S> for StoreLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Must not emit tracing events here: that would re-enter this layer.
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let (subsystem, category) = split_target(meta.target());
        self.store
            .record(map_level(meta.level()), subsystem, category, visitor.finish());
    }
}

/// Map a tracing level onto the export level set.
pub fn map_level(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Notice,
        Level::INFO => LogLevel::Info,
        Level::DEBUG | Level::TRACE => LogLevel::Debug,
    }
}

/// Split `crate::module::path` into (`crate`, `module::path`).
pub fn split_target(target: &str) -> (&str, &str) {
    match target.split_once("::") {
        Some((subsystem, rest)) if !rest.is_empty() => (subsystem, rest),
        Some((subsystem, _)) => (subsystem, constants::DEFAULT_CATEGORY),
        None => (target, constants::DEFAULT_CATEGORY),
    }
}

/// Collects the `message` field followed by remaining fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}
