// LogExport - app/mod.rs
//
// Application layer: export orchestration and UI-facing state.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod export;
pub mod state;
