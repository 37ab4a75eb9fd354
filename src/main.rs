// LogExport - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation with the in-process log store attached
// 4. Export pipeline wiring and eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use logexport::app;

pub use logexport::core;
pub use logexport::platform;
pub use logexport::ui;
pub use logexport::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, Layer};

use crate::core::model::LookbackWindow;
use crate::core::query::{LogQuery, LogStore};
use crate::core::sink::{ClipboardSink, FileSink};
use crate::core::writer::ExportWriter;
use crate::platform::jsonl_store::JsonlLogStore;
use crate::platform::log_store::MemoryLogStore;

/// LogExport - export recent application log entries.
///
/// Copies the log entries of the last 10 minutes, hour or day to the
/// clipboard or saves them to a file.
#[derive(Parser, Debug)]
#[command(name = "LogExport", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Export from a JSON-lines log file instead of this process's own logs.
    #[arg(short = 's', long = "store")]
    store: Option<PathBuf>,

    /// Initially selected lookback window: 10m, 1h or 1d.
    #[arg(short = 'w', long = "window", value_parser = parse_window)]
    window: Option<LookbackWindow>,

    /// Include entries from outside the host application.
    #[arg(long = "include-system-logs")]
    include_system_logs: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_window(value: &str) -> Result<LookbackWindow, String> {
    LookbackWindow::from_key(value).ok_or_else(|| format!("expected 10m, 1h or 1d, got '{value}'"))
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging so [logging] level can take effect;
    // its warnings are logged once the subscriber is installed.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (config, config_warnings) = platform::config::load_config(&config_path);

    // The in-process store captures this process's own events under its own
    // filter, independent of stderr verbosity.
    let memory_store = MemoryLogStore::new(config.store_capacity);
    let capture = memory_store
        .layer()
        .with_filter(EnvFilter::new(&config.store_level));
    util::logging::init(cli.debug, config.log_level.as_deref(), Some(capture));

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LogExport starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let store: Arc<dyn LogStore> = match cli.store {
        Some(ref path) => {
            tracing::info!(path = %path.display(), "Using JSON-lines log store");
            Arc::new(JsonlLogStore::new(path.clone()))
        }
        None => Arc::new(memory_store),
    };
    let query = LogQuery::new(store, config.host_identifier.clone());

    let process_name = platform::fs::process_name();
    let writer = ExportWriter::new(
        platform::fs::artifact_dir(config.temp_dir.as_ref()),
        process_name.clone(),
    );
    let timeout = Duration::from_secs(config.timeout_secs);

    let mut state = app::state::AppState::new(
        cli.window.unwrap_or(config.default_window),
        cli.include_system_logs || config.include_system_logs,
        cli.debug,
    );
    state.warnings = config_warnings;

    tracing::info!(
        host = %config.host_identifier,
        artifacts = %writer.dir().display(),
        timeout_secs = config.timeout_secs,
        "Ready to launch GUI"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            // The clipboard needs the egui context, which only exists now.
            let clipboard = platform::clipboard::EguiClipboard::new(cc.egui_ctx.clone());
            let controller = app::export::ExportController::new(
                query,
                writer,
                ClipboardSink::new(Arc::new(clipboard)),
                FileSink::new(Box::new(platform::dialog::NativeSaveFlow), process_name),
                timeout,
            );
            Ok(Box::new(gui::LogExportApp::new(state, controller)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogExport GUI: {e}");
        std::process::exit(1);
    }
}
