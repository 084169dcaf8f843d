//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Settings for agentsync runs.
///
/// This struct represents the contents of `.agentsync.yaml`. Every field has a
/// default, unknown fields are ignored, and command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Model synchronization
    // =========================================================================
    /// Path to the agent -> model mapping JSON.
    #[serde(default = "default_model_config")]
    pub model_config: String,

    /// Path to the catalog document (`AGENTS.md`).
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Root directory holding `agents/` and `commands/`.
    #[serde(default = "default_opencode_root")]
    pub opencode_root: String,

    // =========================================================================
    // Export
    // =========================================================================
    /// Directory of source agent documents to export.
    #[serde(default = "default_source_agents")]
    pub source_agents: String,

    /// Whether to emit `-solo` fallback documents for orchestrators.
    #[serde(default = "default_true")]
    pub emit_fallback: bool,

    /// Header keys accepted in addition to the built-in set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_known_keys: Vec<String>,

    // =========================================================================
    // Discovery
    // =========================================================================
    /// File-name glob selecting documents inside a directory.
    #[serde(default = "default_document_glob")]
    pub document_glob: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_config: default_model_config(),
            catalog: default_catalog(),
            opencode_root: default_opencode_root(),
            source_agents: default_source_agents(),
            emit_fallback: default_true(),
            extra_known_keys: Vec::new(),
            document_glob: default_document_glob(),
        }
    }
}

impl Config {
    /// Built-in header keys plus any configured extras.
    pub fn known_keys(&self) -> BTreeSet<String> {
        KNOWN_FRONTMATTER_KEYS
            .iter()
            .map(|key| key.to_string())
            .chain(self.extra_known_keys.iter().map(|key| key.to_ascii_lowercase()))
            .collect()
    }
}
