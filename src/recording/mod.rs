//! Recording module for lap result export.

pub mod exporter_csv;
pub mod types;

pub use exporter_csv::{export_all, export_laps_csv, generate_csv_filename};
pub use types::ExportError;
