//! Error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum ErrorCode {
    // General errors (1xxx)
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    // Geometry errors (4xxx)
    InvalidCoordinate = 4001,
    InvalidRadius = 4002,

    // Data errors (5xxx)
    CsvError = 5001,
    InvalidEvent = 5002,

    // Validation errors (7xxx)
    ValidationError = 7000,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Geometry",
            5 => "Data",
            7 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }

    // Convenience constructors

    /// A required input file does not exist
    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    /// Configuration could not be loaded
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// An explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .responder.toml file or use --config to specify a path")
    }

    /// Configuration parsed but holds an unusable value
    pub fn config_invalid(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigValidationError,
            format!("Invalid value for `{field}`: {}", message.into()),
        )
    }

    /// Coordinate outside the valid latitude/longitude range
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::new(
            ErrorCode::InvalidCoordinate,
            format!("Invalid coordinate: ({latitude}, {longitude})"),
        )
        .with_suggestion("Latitude must be within [-90, 90] and longitude within [-180, 180]")
    }

    /// Input validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DATA_ERROR: i32 = 4;
}

impl Error {
    /// Map this error onto a process exit code
    pub fn exit_code(&self) -> i32 {
        match self.code.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            4 | 7 => exit_codes::VALIDATION_ERROR,
            2 | 5 => exit_codes::DATA_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidEvent, format!("JSON parse error: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
