//! Defaults for the agentsync settings file.

/// Settings file looked up in the working directory when `--settings` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = ".agentsync.yaml";

/// Header keys every source agent document may carry.
pub const KNOWN_FRONTMATTER_KEYS: [&str; 8] = [
    "name",
    "description",
    "mode",
    "hidden",
    "temperature",
    "tools",
    "model",
    "agent",
];

// Default value functions for serde
pub(crate) fn default_model_config() -> String {
    "agent-models.json".to_string()
}
pub(crate) fn default_catalog() -> String {
    "AGENTS.md".to_string()
}
pub(crate) fn default_opencode_root() -> String {
    "opencode".to_string()
}
pub(crate) fn default_source_agents() -> String {
    "opencode/agents".to_string()
}
pub(crate) fn default_document_glob() -> String {
    "*.md".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
