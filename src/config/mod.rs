//! Settings for agentsync.
//!
//! This module defines the Config struct that represents `.agentsync.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of the configured values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
