// LogExport - lib.rs
//
// Library entry point, exposing the export pipeline and its collaborators
// for integration testing and embedding in other egui applications.
//
// The GUI-specific `gui` module lives in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
