//! Exit code constants for the agentsync CLI.
//!
//! These codes are relied on by scripts and must stay stable:
//! - 0: Success
//! - 1: Validation failure reported to the user (strict checks, schema)
//! - 2: Fatal configuration, argument, document, or I/O error

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Validation failure: strict-mode findings or schema violations.
pub const VALIDATION_FAILURE: i32 = 1;

/// Fatal error: bad config, unreadable input, malformed documents.
pub const FATAL_ERROR: i32 = 2;
