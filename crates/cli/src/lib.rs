//! Terminal helpers shared by the responder binaries
//!
//! - Status lines and a coverage summary panel
//! - Count, percentage and duration formatting
//! - Spinners for long-running passes

#![warn(missing_docs)]

pub mod output;
pub mod progress;
