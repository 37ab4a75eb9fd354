// LogExport - app/export.rs
//
// Export lifecycle management. Runs query -> format -> write -> deliver on
// a background thread and applies results to the export state on the UI
// thread via an mpsc channel.
//
// Architecture:
//   - `ExportController` lives on the UI thread and owns `ExportState`;
//     `run_export` runs on a background thread.
//   - Single-flight: a start request while an export is in progress is
//     rejected, not queued.
//   - All cross-thread communication is via `ExportProgress` messages; the
//     worker never touches controller state.
//   - Clipboard exports are delivered on the worker. File exports hand the
//     artifact back to the UI thread, which presents the save dialog.
//   - If the controller stops listening (dismissal, timeout), the job's
//     cancel flag is raised so the worker skips clipboard delivery, and its
//     send fails; the undelivered message is dropped, which removes any
//     artifact it carries.
//   - An abandoned worker still counts against single-flight until its
//     thread exits.

use crate::core::model::{ExportOptions, ExportOutcome, ExportState};
use crate::core::query::LogQuery;
use crate::core::sink::{ClipboardSink, FileSink, SaveOutcome};
use crate::core::writer::{ExportArtifact, ExportWriter};
use crate::util::error::{ExportError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Where an export is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Clipboard,
    File,
}

/// Messages sent from the export thread to the UI thread.
#[derive(Debug)]
pub enum ExportProgress {
    /// The export was copied to the clipboard.
    Copied { lines: usize },

    /// The artifact is written and waiting for the save flow.
    ArtifactReady {
        artifact: ExportArtifact,
        lines: usize,
    },

    /// The export failed; `error` is the user-facing message.
    Failed { error: String },

    /// The controller stopped waiting before delivery; nothing was delivered.
    Abandoned,
}

// =============================================================================
// ExportController
// =============================================================================

/// Orchestrates exports and owns the Idle / InProgress / Error state.
pub struct ExportController {
    query: LogQuery,
    writer: ExportWriter,
    clipboard_sink: ClipboardSink,
    file_sink: FileSink,
    timeout: Duration,

    state: ExportState,
    last_outcome: Option<ExportOutcome>,

    /// Channel receiver for the in-flight export, if any.
    progress_rx: Option<mpsc::Receiver<ExportProgress>>,
    started_at: Option<Instant>,

    /// Most recent worker thread; kept after abandonment until it exits.
    worker: Option<JoinHandle<()>>,
    /// Raised when the controller stops waiting for the current worker.
    cancelled: Arc<AtomicBool>,
    spawn: SpawnWorker,
}

impl ExportController {
    pub fn new(
        query: LogQuery,
        writer: ExportWriter,
        clipboard_sink: ClipboardSink,
        file_sink: FileSink,
        timeout: Duration,
    ) -> Self {
        Self {
            query,
            writer,
            clipboard_sink,
            file_sink,
            timeout,
            state: ExportState::Idle,
            last_outcome: None,
            progress_rx: None,
            started_at: None,
            worker: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            spawn: spawn_worker,
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn is_in_progress(&self) -> bool {
        self.state == ExportState::InProgress
    }

    /// True while a worker thread is alive, including one that was
    /// abandoned or timed out and has not finished yet.
    pub fn is_worker_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Whether a start request would be accepted now.
    pub fn can_start(&self) -> bool {
        !self.is_in_progress() && !self.is_worker_running()
    }

    /// Message of the unacknowledged failure, if any.
    pub fn current_error(&self) -> Option<&str> {
        match &self.state {
            ExportState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Outcome of the most recent successful export.
    pub fn last_outcome(&self) -> Option<&ExportOutcome> {
        self.last_outcome.as_ref()
    }

    /// Start exporting to the clipboard. Returns false if rejected because
    /// another export is in flight, or if the worker could not be started
    /// (the state is then Error).
    pub fn start_export_to_clipboard(&mut self, options: ExportOptions) -> bool {
        self.start(options, ExportTarget::Clipboard)
    }

    /// Start exporting to a user-chosen file. Returns false under the same
    /// conditions as `start_export_to_clipboard`.
    pub fn start_export_to_file(&mut self, options: ExportOptions) -> bool {
        self.start(options, ExportTarget::File)
    }

    fn start(&mut self, options: ExportOptions, target: ExportTarget) -> bool {
        if self.is_in_progress() {
            tracing::debug!(?target, "Export already in progress; start rejected");
            return false;
        }
        if self.is_worker_running() {
            tracing::debug!(?target, "Abandoned export still running; start rejected");
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let job = ExportJob {
            query: self.query.clone(),
            writer: self.writer.clone(),
            clipboard: (target == ExportTarget::Clipboard).then(|| self.clipboard_sink.clone()),
            options,
            cancelled: cancelled.clone(),
        };

        // Replaces a pending Error: retrying dismisses it.
        self.state = ExportState::InProgress;
        self.last_outcome = None;

        let spawned = (self.spawn)(job, tx);

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                self.cancelled = cancelled;
                self.progress_rx = Some(rx);
                self.started_at = Some(Instant::now());
                tracing::info!(
                    ?target,
                    since = %options.since_inclusive,
                    include_system_logs = options.include_system_logs,
                    "Export started"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to spawn export thread");
                self.fail(format!("Could not start export: {e}"));
                return false;
            }
        }
        true
    }

    /// Dismiss the current error, returning to Idle.
    pub fn acknowledge_error(&mut self) {
        if matches!(self.state, ExportState::Error(_)) {
            self.state = ExportState::Idle;
        }
    }

    /// Apply any finished export result. Call from the UI thread each frame.
    ///
    /// Returns true if the state changed. For file exports this presents the
    /// save flow, which blocks until the user confirms or cancels.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.progress_rx else {
            return false;
        };

        match rx.try_recv() {
            Ok(msg) => {
                self.progress_rx = None;
                self.started_at = None;
                self.join_worker();
                self.apply(msg);
                true
            }
            Err(TryRecvError::Empty) => {
                let timed_out = self
                    .started_at
                    .is_some_and(|started| started.elapsed() >= self.timeout);
                if timed_out {
                    // Dropping the receiver makes the worker discard its result.
                    self.cancelled.store(true, Ordering::SeqCst);
                    self.progress_rx = None;
                    self.started_at = None;
                    let err = ExportError::TimedOut {
                        secs: self.timeout.as_secs(),
                    };
                    tracing::warn!(error = %err, "Export abandoned");
                    self.fail(err.to_string());
                    true
                } else {
                    false
                }
            }
            Err(TryRecvError::Disconnected) => {
                self.progress_rx = None;
                self.started_at = None;
                self.join_worker();
                tracing::error!("Export thread exited without reporting a result");
                self.fail("Export stopped unexpectedly.".to_string());
                true
            }
        }
    }

    /// Stop listening to the in-flight export (e.g. the export UI was
    /// dismissed). The worker skips clipboard delivery and cleans up its
    /// artifact when it finishes; no new export starts until it has exited.
    pub fn abandon(&mut self) {
        if self.progress_rx.take().is_some() {
            self.cancelled.store(true, Ordering::SeqCst);
            tracing::info!("In-flight export abandoned");
        }
        self.started_at = None;
        if self.is_in_progress() {
            self.state = ExportState::Idle;
        }
    }

    /// Reap a worker that has already reported or disconnected; it exits
    /// right after sending.
    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("Export thread panicked");
            }
        }
    }

    fn apply(&mut self, msg: ExportProgress) {
        match msg {
            ExportProgress::Copied { lines } => {
                self.finish(ExportOutcome::Copied { lines });
            }
            ExportProgress::ArtifactReady { artifact, lines } => {
                match self.file_sink.deliver(artifact, chrono::Utc::now()) {
                    Ok(SaveOutcome::Saved(destination)) => {
                        self.finish(ExportOutcome::Saved { lines, destination });
                    }
                    Ok(SaveOutcome::Cancelled) => self.finish(ExportOutcome::Cancelled),
                    Err(e) => self.fail(e.to_string()),
                }
            }
            ExportProgress::Failed { error } => self.fail(error),
            ExportProgress::Abandoned => self.state = ExportState::Idle,
        }
    }

    fn finish(&mut self, outcome: ExportOutcome) {
        tracing::info!(outcome = %outcome.describe(), "Export finished");
        self.state = ExportState::Idle;
        self.last_outcome = Some(outcome);
    }

    fn fail(&mut self, message: String) {
        self.state = ExportState::Error(message);
    }
}

// =============================================================================
// Background export pipeline
// =============================================================================

/// Everything the worker needs, moved onto the export thread.
struct ExportJob {
    query: LogQuery,
    writer: ExportWriter,
    /// Present for clipboard exports.
    clipboard: Option<ClipboardSink>,
    options: ExportOptions,
    /// Raised by the controller on abandonment or timeout.
    cancelled: Arc<AtomicBool>,
}

type SpawnWorker = fn(ExportJob, mpsc::Sender<ExportProgress>) -> std::io::Result<JoinHandle<()>>;

fn spawn_worker(job: ExportJob, tx: mpsc::Sender<ExportProgress>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("log-export".to_string())
        .spawn(move || run_export(job, tx))
}

/// Full pipeline: query -> format/write -> deliver, in strict sequence.
fn run_export(job: ExportJob, tx: mpsc::Sender<ExportProgress>) {
    let started = Instant::now();
    let msg = match execute(&job) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(error = %e, "Export failed");
            ExportProgress::Failed {
                error: e.to_string(),
            }
        }
    };
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Export worker done");

    if let Err(mpsc::SendError(undelivered)) = tx.send(msg) {
        tracing::info!("Export result discarded; no longer awaited");
        drop(undelivered);
    }
}

fn execute(job: &ExportJob) -> Result<ExportProgress> {
    let entries = job.query.fetch(&job.options)?;
    let (artifact, lines) = job.writer.write(entries)?;
    match &job.clipboard {
        Some(_) if job.cancelled.load(Ordering::SeqCst) => {
            tracing::info!("Export abandoned before delivery; clipboard left untouched");
            drop(artifact);
            Ok(ExportProgress::Abandoned)
        }
        Some(sink) => {
            sink.deliver(artifact)?;
            Ok(ExportProgress::Copied { lines })
        }
        None => Ok(ExportProgress::ArtifactReady { artifact, lines }),
    }
}
