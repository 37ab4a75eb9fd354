// LogExport - tests/e2e_export.rs
//
// End-to-end tests for the export pipeline.
//
// These tests drive the real ExportController with real log stores (a
// JSON-lines file and the in-process store), the real writer on a real
// temp directory, and the real formatter. Only the clipboard and the save
// dialog are replaced, since both need a desktop session.

use chrono::{DateTime, TimeZone, Utc};
use logexport::app::export::ExportController;
use logexport::core::format::parse_line;
use logexport::core::model::{ExportOptions, ExportOutcome, ExportState, LogLevel, LookbackWindow};
use logexport::core::query::{LogQuery, LogStore};
use logexport::core::sink::{Clipboard, ClipboardSink, ContentType, FileSink, SaveFlow, SaveOutcome};
use logexport::core::writer::ExportWriter;
use logexport::platform::jsonl_store::JsonlLogStore;
use logexport::platform::log_store::MemoryLogStore;
use logexport::util::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Store contents: two host entries and one system entry inside the last
/// ten minutes of `now()`, plus older entries on either side of the hour.
const FIXTURE: &str = r#"{"timestamp":"2026-10-15T09:00:00Z","level":"info","subsystem":"com.app","category":"startup","message":"launched yesterday"}
{"timestamp":"2026-10-16T11:30:00Z","level":"debug","subsystem":"com.app.net","category":"http","message":"GET /status 200"}
this line is not json
{"timestamp":"2026-10-16T11:55:00Z","level":"info","subsystem":"com.app","category":"ui","message":"button is pressed"}
{"timestamp":"2026-10-16T11:56:00Z","level":"notice","subsystem":"kernel","category":"power","message":"display woke"}
{"timestamp":"2026-10-16T11:59:59Z","level":"error","subsystem":"com.app","category":"sync","message":"upload failed - retrying"}
"#;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

#[derive(Default)]
struct RecordingClipboard {
    text: Mutex<Option<String>>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&self, text: String) {
        *self.text.lock().unwrap() = Some(text);
    }
}

/// Save flow that copies the artifact to a fixed destination, or cancels
/// when no destination is set.
struct ScriptedSaveFlow {
    destination: Option<PathBuf>,
    seen: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl SaveFlow for ScriptedSaveFlow {
    fn present(&self, artifact: &Path, suggested_name: &str, content_type: ContentType) -> Result<SaveOutcome> {
        assert_eq!(content_type.extension, "log");
        self.seen
            .lock()
            .unwrap()
            .push((artifact.to_path_buf(), suggested_name.to_string()));
        match &self.destination {
            Some(dest) => {
                std::fs::copy(artifact, dest).unwrap();
                Ok(SaveOutcome::Saved(dest.clone()))
            }
            None => Ok(SaveOutcome::Cancelled),
        }
    }
}

struct Pipeline {
    controller: ExportController,
    clipboard: Arc<RecordingClipboard>,
    seen: Arc<Mutex<Vec<(PathBuf, String)>>>,
    artifacts: TempDir,
    _store_dir: TempDir,
}

fn jsonl_pipeline(destination: Option<PathBuf>) -> Pipeline {
    let store_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().join("store.jsonl");
    std::fs::write(&store_path, FIXTURE).unwrap();
    pipeline(Arc::new(JsonlLogStore::new(store_path)), store_dir, destination)
}

fn pipeline(store: Arc<dyn LogStore>, store_dir: TempDir, destination: Option<PathBuf>) -> Pipeline {
    let artifacts = TempDir::new().unwrap();
    let clipboard = Arc::new(RecordingClipboard::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let controller = ExportController::new(
        LogQuery::new(store, "com.app"),
        ExportWriter::new(artifacts.path().to_path_buf(), "e2e"),
        ClipboardSink::new(clipboard.clone()),
        FileSink::new(
            Box::new(ScriptedSaveFlow {
                destination,
                seen: seen.clone(),
            }),
            "e2e",
        ),
        Duration::from_secs(30),
    );
    Pipeline {
        controller,
        clipboard,
        seen,
        artifacts,
        _store_dir: store_dir,
    }
}

/// Poll the controller the way the UI does until the export settles.
fn run_to_completion(controller: &mut ExportController) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.is_in_progress() {
        controller.poll();
        assert!(Instant::now() < deadline, "export did not finish");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn leftover_artifacts(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

// =============================================================================
// Clipboard
// =============================================================================

/// Ten-minute window, host only: the two host entries in order, in the
/// canonical line format, and no artifact left behind.
#[test]
fn e2e_clipboard_export_from_jsonl_store() {
    let mut p = jsonl_pipeline(None);
    let options = ExportOptions::from_window(LookbackWindow::TenMinutes, false, now());

    assert!(p.controller.start_export_to_clipboard(options));
    run_to_completion(&mut p.controller);

    assert_eq!(*p.controller.state(), ExportState::Idle);
    assert_eq!(
        p.controller.last_outcome(),
        Some(&ExportOutcome::Copied { lines: 2 })
    );

    let text = p.clipboard.text.lock().unwrap().clone().unwrap();
    assert_eq!(
        text,
        "2026-10-16T11:55:00Z - [info] - com.app - ui - button is pressed\n\
         2026-10-16T11:59:59Z - [error] - com.app - sync - upload failed - retrying\n"
    );

    // Every exported line parses back to the entry it came from.
    let parsed: Vec<_> = text.lines().map(|l| parse_line(l).unwrap()).collect();
    assert_eq!(parsed[1].level, LogLevel::Error);
    assert_eq!(parsed[1].message, "upload failed - retrying");

    assert_eq!(leftover_artifacts(&p.artifacts), 0);
}

/// With system logs included the subsystem filter is lifted.
#[test]
fn e2e_clipboard_export_includes_system_logs() {
    let mut p = jsonl_pipeline(None);
    let options = ExportOptions::from_window(LookbackWindow::TenMinutes, true, now());

    assert!(p.controller.start_export_to_clipboard(options));
    run_to_completion(&mut p.controller);

    let text = p.clipboard.text.lock().unwrap().clone().unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains(" - [notice] - kernel - power - display woke\n"));
}

/// The hour window reaches the nested host subsystem but not yesterday.
#[test]
fn e2e_hour_window_matches_subsystem_prefix() {
    let mut p = jsonl_pipeline(None);
    let options = ExportOptions::from_window(LookbackWindow::Hour, false, now());

    assert!(p.controller.start_export_to_clipboard(options));
    run_to_completion(&mut p.controller);

    let text = p.clipboard.text.lock().unwrap().clone().unwrap();
    let first = parse_line(text.lines().next().unwrap()).unwrap();
    assert_eq!(first.subsystem, "com.app.net");
    assert!(!text.contains("launched yesterday"));
}

// =============================================================================
// File
// =============================================================================

#[test]
fn e2e_file_export_saves_and_cleans_up() {
    let out_dir = TempDir::new().unwrap();
    let dest = out_dir.path().join("saved.log");
    let mut p = jsonl_pipeline(Some(dest.clone()));
    let options = ExportOptions::from_window(LookbackWindow::Day, false, now());

    assert!(p.controller.start_export_to_file(options));
    run_to_completion(&mut p.controller);

    assert_eq!(
        p.controller.last_outcome(),
        Some(&ExportOutcome::Saved {
            lines: 3,
            destination: dest.clone()
        })
    );
    let saved = std::fs::read_to_string(&dest).unwrap();
    assert_eq!(saved.lines().count(), 3);
    assert!(saved.ends_with('\n'));

    let seen = p.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].1.starts_with("e2e-"));
    assert!(seen[0].1.ends_with(".log"));
    assert!(!seen[0].0.exists(), "artifact must be removed after saving");
    assert_eq!(leftover_artifacts(&p.artifacts), 0);
}

#[test]
fn e2e_file_export_cancelled_is_not_an_error() {
    let mut p = jsonl_pipeline(None);
    let options = ExportOptions::from_window(LookbackWindow::TenMinutes, false, now());

    assert!(p.controller.start_export_to_file(options));
    run_to_completion(&mut p.controller);

    assert_eq!(*p.controller.state(), ExportState::Idle);
    assert_eq!(p.controller.last_outcome(), Some(&ExportOutcome::Cancelled));
    assert!(p.controller.current_error().is_none());
    assert_eq!(leftover_artifacts(&p.artifacts), 0);
}

// =============================================================================
// Failures
// =============================================================================

/// A missing store file surfaces as an error and then recovers on
/// acknowledgement.
#[test]
fn e2e_missing_store_reports_error() {
    let store_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonlLogStore::new(store_dir.path().join("absent.jsonl")));
    let mut p = pipeline(store, store_dir, None);

    assert!(p
        .controller
        .start_export_to_clipboard(ExportOptions::from_window(LookbackWindow::Day, true, now())));
    run_to_completion(&mut p.controller);

    let message = p.controller.current_error().unwrap().to_string();
    assert!(message.starts_with("Cannot access logs"), "{message}");
    assert!(p.clipboard.text.lock().unwrap().is_none());
    assert_eq!(leftover_artifacts(&p.artifacts), 0);

    p.controller.acknowledge_error();
    assert_eq!(*p.controller.state(), ExportState::Idle);
}

// =============================================================================
// In-process store
// =============================================================================

/// Entries recorded into the in-process store export like any other store.
#[test]
fn e2e_memory_store_export() {
    let store = MemoryLogStore::new(1_000);
    let _layer = store.layer();
    store.record(LogLevel::Info, "com.app", "ui", "opened settings".to_string());
    store.record(LogLevel::Debug, "winit", "event_loop", "resumed".to_string());

    let mut p = pipeline(Arc::new(store), TempDir::new().unwrap(), None);
    let options = ExportOptions::from_window(LookbackWindow::TenMinutes, false, Utc::now());

    assert!(p.controller.start_export_to_clipboard(options));
    run_to_completion(&mut p.controller);

    let text = p.clipboard.text.lock().unwrap().clone().unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with(" - [info] - com.app - ui - opened settings\n"));
}
