//! Command implementations for agentsync.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command plans its work first and only writes once
//! nothing fatal was found.

mod export;
mod sync_models;
mod validate_schema;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// Settings are only loaded for commands that read them, so a broken
/// settings file does not block `validate-schema`.
pub fn dispatch(command: Command, settings: Option<&Path>) -> Result<()> {
    match command {
        Command::SyncModels(args) => {
            sync_models::cmd_sync_models(args, &Config::resolve(settings)?)
        }
        Command::Export(args) => export::cmd_export(args, &Config::resolve(settings)?),
        Command::ValidateSchema(args) => validate_schema::cmd_validate_schema(args),
    }
}
