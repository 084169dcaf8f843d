//! Filesystem utilities for agentsync.
//!
//! Reads happen up front, writes are queued in a [`WritePlan`] and committed
//! atomically only after a run has passed every fatal check.

mod atomic;
mod plan;
mod read;

pub use plan::WritePlan;
pub use read::{display_path, list_documents, read_text};
