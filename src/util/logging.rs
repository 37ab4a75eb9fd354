// LogExport - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug (sets RUST_LOG=debug)
//   - Config file: [logging] level = "debug"
//
// Output: stderr. An optional capture layer (the in-process log store) is
// stacked underneath with its own filter, so exports are not limited by
// the stderr verbosity.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Build the stderr filter.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
pub fn stderr_filter(debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    }
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
/// `capture` is an extra layer installed below the stderr layer, typically
/// the in-process log store's capture layer with its own filter attached.
pub fn init<L>(debug_flag: bool, config_level: Option<&str>, capture: Option<L>)
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = stderr_filter(debug_flag, config_level);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(capture)
        .with(stderr_layer)
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
