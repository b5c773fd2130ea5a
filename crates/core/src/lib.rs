//! Core utilities for the responder coverage tools
//!
//! This crate provides functionality shared by every responder crate and binary:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use responder_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("inner buffer radius: {} km", config.schema.coverage.inner_radius_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{exit_codes, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
