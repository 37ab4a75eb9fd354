// LogExport - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::LookbackWindow;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogExport configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logexport/ or %APPDATA%\LogExport\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[export]` section.
    pub export: ExportSection,
    /// `[store]` section.
    pub store: StoreSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Initially selected window: "10m", "1h" or "1d".
    pub default_window: Option<String>,
    /// Initial state of the "include system logs" toggle.
    pub include_system_logs: Option<bool>,
    /// Subsystem prefix identifying the host application's own entries.
    pub host_identifier: Option<String>,
    /// Export timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Directory for temporary artifacts.
    pub temp_dir: Option<String>,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Entries retained by the in-process store.
    pub capacity: Option<usize>,
    /// Minimum level captured into the in-process store.
    pub level: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Export --
    pub default_window: LookbackWindow,
    pub include_system_logs: bool,
    pub host_identifier: String,
    pub timeout_secs: u64,
    pub temp_dir: Option<PathBuf>,

    // -- Store --
    pub store_capacity: usize,
    pub store_level: String,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_window: LookbackWindow::default(),
            include_system_logs: false,
            host_identifier: constants::DEFAULT_HOST_IDENTIFIER.to_string(),
            timeout_secs: constants::DEFAULT_EXPORT_TIMEOUT_SECS,
            temp_dir: None,
            store_capacity: constants::DEFAULT_STORE_CAPACITY,
            store_level: constants::DEFAULT_STORE_LEVEL.to_string(),
            log_level: None,
        }
    }
}

fn is_valid_level(level: &str) -> bool {
    constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str())
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning; the
/// application still starts but the user is informed.
///
/// Runs before logging is initialised, so warnings are returned rather than
/// logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Export: default_window --
    if let Some(ref key) = raw.export.default_window {
        match LookbackWindow::from_key(key) {
            Some(window) => config.default_window = window,
            None => warnings.push(format!(
                "[export] default_window = \"{key}\" is not recognised. \
                 Expected \"10m\", \"1h\" or \"1d\". Using default ({}).",
                LookbackWindow::default().key(),
            )),
        }
    }

    if let Some(include) = raw.export.include_system_logs {
        config.include_system_logs = include;
    }

    // -- Export: host_identifier --
    if let Some(ref id) = raw.export.host_identifier {
        let id = id.trim();
        if id.is_empty() {
            warnings.push(format!(
                "[export] host_identifier must not be empty. Using default ({}).",
                constants::DEFAULT_HOST_IDENTIFIER,
            ));
        } else {
            config.host_identifier = id.to_string();
        }
    }

    // -- Export: timeout_secs --
    if let Some(secs) = raw.export.timeout_secs {
        if (constants::MIN_EXPORT_TIMEOUT_SECS..=constants::MAX_EXPORT_TIMEOUT_SECS).contains(&secs) {
            config.timeout_secs = secs;
        } else {
            warnings.push(format!(
                "[export] timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_EXPORT_TIMEOUT_SECS,
                constants::MAX_EXPORT_TIMEOUT_SECS,
                constants::DEFAULT_EXPORT_TIMEOUT_SECS,
            ));
        }
    }

    // -- Export: temp_dir --
    if let Some(ref dir) = raw.export.temp_dir {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            config.temp_dir = Some(path);
        } else {
            warnings.push(format!(
                "[export] temp_dir = \"{dir}\" is not an existing directory. \
                 Using the system temp directory.",
            ));
        }
    }

    // -- Store: capacity --
    if let Some(capacity) = raw.store.capacity {
        if (constants::MIN_STORE_CAPACITY..=constants::MAX_STORE_CAPACITY).contains(&capacity) {
            config.store_capacity = capacity;
        } else {
            warnings.push(format!(
                "[store] capacity = {capacity} is out of range ({}-{}). Using default ({}).",
                constants::MIN_STORE_CAPACITY,
                constants::MAX_STORE_CAPACITY,
                constants::DEFAULT_STORE_CAPACITY,
            ));
        }
    }

    // -- Store: level --
    if let Some(ref level) = raw.store.level {
        if is_valid_level(level) {
            config.store_level = level.to_lowercase();
        } else {
            warnings.push(format!(
                "[store] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_STORE_LEVEL,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if is_valid_level(level) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.default_window, LookbackWindow::TenMinutes);
        assert_eq!(config.host_identifier, "logexport");
        assert_eq!(config.timeout_secs, constants::DEFAULT_EXPORT_TIMEOUT_SECS);
    }

    #[test]
    fn test_valid_values_are_applied() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().display().to_string().replace('\\', "/");
        let path = write_config(
            &dir,
            &format!(
                r#"
[export]
default_window = "1h"
include_system_logs = true
host_identifier = "com.example.app"
timeout_secs = 30
temp_dir = "{temp}"

[store]
capacity = 2000
level = "TRACE"

[logging]
level = "warn"

[future]
ignored = 1
"#
            ),
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_window, LookbackWindow::Hour);
        assert!(config.include_system_logs);
        assert_eq!(config.host_identifier, "com.example.app");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.temp_dir.is_some());
        assert_eq!(config.store_capacity, 2000);
        assert_eq!(config.store_level, "trace");
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[export]
default_window = "2h"
host_identifier = "  "
timeout_secs = 0
temp_dir = "/definitely/not/here"

[store]
capacity = 5

[logging]
level = "loud"
"#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 6, "{warnings:?}");
        assert_eq!(config.default_window, LookbackWindow::TenMinutes);
        assert_eq!(config.host_identifier, "logexport");
        assert_eq!(config.timeout_secs, constants::DEFAULT_EXPORT_TIMEOUT_SECS);
        assert!(config.temp_dir.is_none());
        assert_eq!(config.store_capacity, constants::DEFAULT_STORE_CAPACITY);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[export\nbroken");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
        assert!(!config.include_system_logs);
    }
}
