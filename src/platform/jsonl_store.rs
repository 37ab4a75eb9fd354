// LogExport - platform/jsonl_store.rs
//
// Log store backed by a JSON-lines file: one `LogEntry` object per line,
// in chronological order.
//
//   {"timestamp":"2026-10-16T10:15:00Z","level":"info","subsystem":"app","category":"ui","message":"..."}
//
// The cursor is the byte offset of the first record at or after the
// requested time. Enumeration seeks there and streams line by line, so the
// file is never loaded into memory. Malformed lines are skipped.

use crate::core::model::LogEntry;
use crate::core::query::{subsystem_matches, Cursor, Entries, LogStore, StoreHandle};
use crate::util::error::{ExportError, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;

/// JSON-lines file log store.
#[derive(Debug, Clone)]
pub struct JsonlLogStore {
    path: PathBuf,
    name: String,
}

impl JsonlLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl LogStore for JsonlLogStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<Box<dyn StoreHandle>> {
        let file = File::open(&self.path).map_err(|e| ExportError::StoreUnavailable {
            store: self.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(JsonlHandle {
            reader: BufReader::new(file),
            name: self.name.clone(),
        }))
    }
}

struct JsonlHandle {
    reader: BufReader<File>,
    name: String,
}

impl JsonlHandle {
    fn read_err(&self, e: io::Error) -> ExportError {
        ExportError::StoreRead {
            store: self.name.clone(),
            source: e,
        }
    }
}

/// Parse one record line; `None` for blank or malformed lines.
fn parse_record(line: &[u8]) -> Option<LogEntry> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(line).ok()
}

impl StoreHandle for JsonlHandle {
    fn position(&mut self, at_or_after: DateTime<Utc>) -> Result<Cursor> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| self.read_err(e))?;

        let mut offset = 0u64;
        let mut line = Vec::new();
        loop {
            line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut line)
                .map_err(|e| self.read_err(e))?;
            if n == 0 {
                return Ok(Cursor(offset));
            }
            if let Some(entry) = parse_record(&line) {
                if entry.timestamp >= at_or_after {
                    return Ok(Cursor(offset));
                }
            }
            offset += n as u64;
        }
    }

    fn entries(mut self: Box<Self>, from: Cursor, subsystem_prefix: Option<String>) -> Result<Entries> {
        self.reader
            .seek(SeekFrom::Start(from.0))
            .map_err(|e| self.read_err(e))?;
        Ok(Box::new(JsonlEntries {
            handle: *self,
            prefix: subsystem_prefix,
            line_number: 0,
            done: false,
        }))
    }
}

/// Streaming iterator over records from a cursor.
struct JsonlEntries {
    handle: JsonlHandle,
    prefix: Option<String>,
    line_number: u64,
    done: bool,
}

impl Iterator for JsonlEntries {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        while !self.done {
            line.clear();
            match self.handle.reader.read_until(b'\n', &mut line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_number += 1;
                    match parse_record(&line) {
                        Some(entry)
                            if subsystem_matches(&entry.subsystem, self.prefix.as_deref()) =>
                        {
                            return Some(Ok(entry));
                        }
                        Some(_) => {}
                        None => {
                            tracing::debug!(
                                store = %self.handle.name,
                                line = self.line_number,
                                "Skipping malformed log record"
                            );
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(self.handle.read_err(e)));
                }
            }
        }
        None
    }
}
