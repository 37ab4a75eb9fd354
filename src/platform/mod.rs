// LogExport - platform/mod.rs
//
// Platform abstraction layer: concrete log stores, clipboard, save dialog,
// process/filesystem helpers, configuration.
// Implements the collaborator traits declared in core.
// Must NOT depend on: app, ui.

pub mod clipboard;
pub mod config;
pub mod dialog;
pub mod fs;
pub mod jsonl_store;
pub mod log_store;
