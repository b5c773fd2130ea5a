//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Buffer radius that is not a positive finite number
    #[error("Invalid buffer radius: {0}")]
    InvalidRadius(String),
}

/// Error code for integration with responder-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid buffer radius
    InvalidRadius = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidRadius(_) => GeoErrorCode::InvalidRadius,
        }
    }
}
