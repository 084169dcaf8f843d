//! Agent -> model mapping loaded from `agent-models.json`.
//!
//! The mapping is the single source of truth for which model each agent runs
//! on. It is validated structurally with every problem accumulated, so one
//! run reports all of them:
//!
//! ```text
//! {
//!   "agent_models": { "orchestrator-release": "gpt-5", "executor-core": "gpt-5-mini" },
//!   "supported_models": ["gpt-5", "gpt-5-mini"],
//!   "discouraged_default_models": ["gpt-5"]
//! }
//! ```

use crate::error::{Result, SyncError};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Validated model mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMapping {
    /// Agent identifier -> model identifier, both trimmed and non-empty.
    pub agent_models: BTreeMap<String, String>,
    /// Models considered valid targets. Empty means "no restriction".
    pub supported_models: Vec<String>,
    /// Models that work but should not be used as defaults.
    pub discouraged_models: Vec<String>,
}

/// Result of [`ModelMapping::from_value`]: the usable part plus every error.
#[derive(Debug, Clone, Default)]
pub struct MappingLoad {
    pub mapping: ModelMapping,
    pub errors: Vec<String>,
}

/// Outcome of checking mapping values against the supported/discouraged sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFindings {
    /// Models missing from `supported_models`; fatal under strict mode.
    pub unsupported: Vec<String>,
    /// Models listed as discouraged; always just warnings.
    pub discouraged: Vec<String>,
}

impl ModelMapping {
    /// Read and validate a mapping file. Any structural error is fatal here.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::ConfigError(format!(
                "Failed to load config JSON '{}': {}",
                path.display(),
                e
            ))
        })?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| {
            SyncError::ConfigError(format!(
                "Failed to load config JSON '{}': {}",
                path.display(),
                e
            ))
        })?;

        let load = Self::from_value(&raw);
        if !load.errors.is_empty() {
            let message = load
                .errors
                .iter()
                .map(|err| format!("Config error: {}", err))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(SyncError::ConfigError(message));
        }

        tracing::debug!(
            agents = load.mapping.agent_models.len(),
            supported = load.mapping.supported_models.len(),
            "loaded model mapping"
        );
        Ok(load.mapping)
    }

    /// Validate a raw JSON value, keeping valid entries and collecting errors.
    pub fn from_value(raw: &Value) -> MappingLoad {
        let mut load = MappingLoad::default();

        let Some(entries) = raw.get("agent_models").and_then(Value::as_object) else {
            load.errors.push(
                "'agent_models' must be an object mapping agent -> model string".to_string(),
            );
            return load;
        };

        for (agent, model) in entries {
            let agent_key = agent.trim();
            if agent_key.is_empty() {
                load.errors.push(format!("Invalid agent key: {:?}", agent));
                continue;
            }
            match model.as_str().map(str::trim) {
                Some(model) if !model.is_empty() => {
                    load.mapping
                        .agent_models
                        .insert(agent_key.to_string(), model.to_string());
                }
                _ => load
                    .errors
                    .push(format!("Invalid model for agent {:?}: {}", agent, model)),
            }
        }

        load.mapping.supported_models =
            string_list(raw, "supported_models", &mut load.errors);
        load.mapping.discouraged_models =
            string_list(raw, "discouraged_default_models", &mut load.errors);

        load
    }

    /// Target model for `agent`, if mapped.
    pub fn model_for(&self, agent: &str) -> Option<&str> {
        self.agent_models.get(agent).map(String::as_str)
    }

    /// Check every mapped model against the supported and discouraged sets.
    pub fn policy_findings(&self) -> PolicyFindings {
        let supported: BTreeSet<&str> = self.supported_models.iter().map(String::as_str).collect();
        let discouraged: BTreeSet<&str> =
            self.discouraged_models.iter().map(String::as_str).collect();
        let mut findings = PolicyFindings::default();

        for (agent, model) in &self.agent_models {
            if !supported.is_empty() && !supported.contains(model.as_str()) {
                findings.unsupported.push(format!(
                    "Model for {} is not listed in supported_models: {}",
                    agent, model
                ));
            }
            if discouraged.contains(model.as_str()) {
                findings.discouraged.push(format!(
                    "Discouraged default model used by {}: {} (typically higher cost)",
                    agent, model
                ));
            }
        }

        findings
    }
}

/// Read an optional array of strings, dropping non-string and blank entries.
fn string_list(raw: &Value, field: &str, errors: &mut Vec<String>) -> Vec<String> {
    match raw.get(field) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Some(_) => {
            errors.push(format!("'{}' must be an array of strings", field));
            Vec::new()
        }
    }
}
