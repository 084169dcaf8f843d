//! Implementation of the `agentsync validate-schema` command.

use crate::cli::ValidateSchemaArgs;
use crate::error::{Result, SyncError};
use crate::fs::read_text;
use crate::schema;
use serde_json::Value;
use std::path::Path;

/// Run `agentsync validate-schema`.
pub fn cmd_validate_schema(args: ValidateSchemaArgs) -> Result<()> {
    let errors = check_files(&args.schema, &args.input)?;
    if !errors.is_empty() {
        return Err(SyncError::ValidationError(errors));
    }
    println!("OK: schema validation passed");
    Ok(())
}

/// Validate the JSON document at `input` against the schema at `schema_path`.
pub fn check_files(schema_path: &Path, input: &Path) -> Result<Vec<String>> {
    let schema = load_json(schema_path)?;
    let value = load_json(input)?;
    let errors = schema::validate(&schema, &value, "$");
    tracing::debug!(
        schema = %schema_path.display(),
        input = %input.display(),
        errors = errors.len(),
        "schema check finished"
    );
    Ok(errors)
}

fn load_json(path: &Path) -> Result<Value> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| {
        SyncError::IoError(format!("Failed to load JSON '{}': {}", path.display(), e))
    })
}
