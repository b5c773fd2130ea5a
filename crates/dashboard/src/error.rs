//! Error types for the dashboard crate.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while producing map output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output file could not be written
    #[error("Failed to write map output: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON serialization failed
    #[error("Failed to serialize GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for integration with responder-core error handling.
/// Range: 12xxx for rendering errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorCode {
    /// Output file could not be written
    Io = 12001,
    /// GeoJSON serialization failed
    Json = 12002,
}

impl RenderError {
    /// Returns the error code for this error.
    pub fn code(&self) -> RenderErrorCode {
        match self {
            RenderError::Io(_) => RenderErrorCode::Io,
            RenderError::Json(_) => RenderErrorCode::Json,
        }
    }
}
