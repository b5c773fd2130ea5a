//! Error types for the incidents crate.

use thiserror::Error;

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, IncidentError>;

/// Errors that abort a cleaning run.
///
/// Individual malformed rows are never reported here; they are dropped.
#[derive(Debug, Error)]
pub enum IncidentError {
    /// Input or output file could not be opened, read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV stream failed below the row level
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Error code for integration with responder-core error handling.
/// Range: 11xxx for incident errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentErrorCode {
    /// File I/O failure
    Io = 11001,
    /// CSV stream failure
    Csv = 11002,
}

impl IncidentError {
    /// Returns the error code for this error.
    pub fn code(&self) -> IncidentErrorCode {
        match self {
            IncidentError::Io { .. } => IncidentErrorCode::Io,
            IncidentError::Csv(_) => IncidentErrorCode::Csv,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        IncidentError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
