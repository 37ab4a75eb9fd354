// LogExport - core/mod.rs
//
// Core export pipeline: model, query, formatting, artifact writing, sinks.
// Platform collaborators (log stores, clipboard, save dialog) are reached
// only through the traits declared here.
// Must NOT depend on: ui, platform, app.

pub mod format;
pub mod model;
pub mod query;
pub mod sink;
pub mod writer;
