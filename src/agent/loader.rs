//! Batch loading of agent definitions from a directory.

use super::AgentDefinition;
use crate::error::{Result, SyncError};
use crate::fs::{list_documents, read_text};
use std::path::Path;

/// Load every document in `dir` whose file name matches `pattern`.
///
/// Structural problems are collected across the whole directory and reported
/// together as one [`SyncError::DocumentError`].
pub fn load_agents(dir: &Path, pattern: &str) -> Result<Vec<AgentDefinition>> {
    let paths = list_documents(dir, pattern)?;
    let mut agents = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();

    for path in paths {
        let content = match read_text(&path) {
            Ok(content) => content,
            Err(err) => {
                errors.push(err.to_string());
                continue;
            }
        };

        match AgentDefinition::from_source(&path, &content) {
            Ok(agent) => {
                tracing::debug!(
                    name = %agent.name,
                    mode = ?agent.mode,
                    model = ?agent.model,
                    parent = ?agent.parent_agent,
                    hidden = ?agent.hidden,
                    temperature = ?agent.temperature,
                    tools = ?agent.tools,
                    "loaded agent definition"
                );
                agents.push(agent);
            }
            Err(problems) => errors.extend(problems.iter().map(ToString::to_string)),
        }
    }

    if !errors.is_empty() {
        return Err(SyncError::DocumentError(errors));
    }

    Ok(agents)
}
