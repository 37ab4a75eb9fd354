// LogExport - ui/panels/mod.rs

pub mod error_alert;
pub mod export_sheet;
pub mod warnings;
