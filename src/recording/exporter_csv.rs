//! CSV export of completed laps.
//!
//! One file per entrant with at least one lap: `Lap,Time,Penalty`.

use crate::racing::EntrantSnapshot;
use crate::recording::types::ExportError;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export an entrant's laps to CSV format.
pub fn export_laps_csv(entrant: &EntrantSnapshot) -> Result<String, ExportError> {
    if entrant.laps.is_empty() {
        return Err(ExportError::NoData(entrant.name.clone()));
    }

    let mut output = Vec::new();

    writeln!(output, "Lap,Time,Penalty").map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for (i, lap) in entrant.laps.iter().enumerate() {
        writeln!(output, "{},{:.2},{:.1}", i + 1, lap.time, lap.penalty)
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Generate the export filename for an entrant.
pub fn generate_csv_filename(name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.csv", name.replace(' ', "_"), at.format("%Y%m%d_%H%M%S"))
}

/// Write one CSV per entrant with laps into `dir`. Returns the written paths.
pub fn export_all(
    entrants: &[EntrantSnapshot],
    dir: &Path,
    at: NaiveDateTime,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for entrant in entrants.iter().filter(|e| !e.laps.is_empty()) {
        let content = export_laps_csv(entrant)?;
        let path = dir.join(generate_csv_filename(&entrant.name, at));
        std::fs::write(&path, content)?;
        tracing::info!("Saved {}", path.display());
        written.push(path);
    }

    if written.is_empty() {
        tracing::info!("No completed laps to export");
    }

    Ok(written)
}
