//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the coverage dashboard and the
//! incident cleaner.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
