//! Recording types for lap result export.

use thiserror::Error;

/// Errors during lap export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Entrant has no completed laps
    #[error("{0} has no laps to export")]
    NoData(String),

    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
