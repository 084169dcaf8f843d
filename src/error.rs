//! Error types for the agentsync CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for agentsync operations.
///
/// Each variant maps to a specific exit code. Variants carrying a list hold
/// every problem found in a run so the user can fix them all in one pass.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Mapping config or tool settings are malformed.
    #[error("{0}")]
    ConfigError(String),

    /// A file or directory could not be read or written.
    #[error("{0}")]
    IoError(String),

    /// One or more source documents are structurally invalid.
    #[error("{}", itemize(.0))]
    DocumentError(Vec<String>),

    /// Validation findings that were escalated to errors.
    #[error("Validation failed:\n{}", itemize(.0))]
    ValidationError(Vec<String>),
}

impl SyncError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::ConfigError(_) => exit_codes::FATAL_ERROR,
            SyncError::IoError(_) => exit_codes::FATAL_ERROR,
            SyncError::DocumentError(_) => exit_codes::FATAL_ERROR,
            SyncError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

fn itemize(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for agentsync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
