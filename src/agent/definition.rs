//! The `AgentDefinition` model and its construction from document text.

use crate::frontmatter::{self, FrontmatterError, HeaderBlock, strip_quotes};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a source document could not become an [`AgentDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The header block is missing or unterminated.
    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        #[source]
        source: FrontmatterError,
    },

    /// A required header key is absent or blank.
    #[error("{path}: missing required frontmatter key '{key}'")]
    MissingField { path: String, key: &'static str },
}

/// One agent, as declared by its source document.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    /// Source document path.
    pub path: PathBuf,
    pub name: String,
    pub description: String,
    /// Agent mode (e.g. `primary`, `subagent`).
    pub mode: Option<String>,
    pub hidden: Option<bool>,
    pub temperature: Option<f64>,
    /// Tool names enabled for the agent.
    pub tools: Vec<String>,
    pub model: Option<String>,
    /// The `agent` key: the agent this one runs under.
    pub parent_agent: Option<String>,
    /// Every top-level header key, as written.
    pub keys: BTreeSet<String>,
    /// Body text after the header block, byte-for-byte.
    pub body: String,
    /// Values present but not of the expected type.
    invalid_values: Vec<String>,
}

impl AgentDefinition {
    /// Build a definition from a source document.
    ///
    /// Both required keys are checked so a document missing `name` and
    /// `description` reports two errors.
    pub fn from_source(path: &Path, content: &str) -> Result<Self, Vec<DefinitionError>> {
        let display = crate::fs::display_path(path);
        let doc = frontmatter::parse(content).map_err(|source| {
            vec![DefinitionError::Frontmatter {
                path: display.clone(),
                source,
            }]
        })?;
        let block = &doc.block;

        let name = optional(block, "name");
        let description = optional(block, "description");
        let (name, description) = match (name, description) {
            (Some(name), Some(description)) => (name, description),
            (name, description) => {
                let mut errors = Vec::new();
                if name.is_none() {
                    errors.push(DefinitionError::MissingField {
                        path: display.clone(),
                        key: "name",
                    });
                }
                if description.is_none() {
                    errors.push(DefinitionError::MissingField {
                        path: display,
                        key: "description",
                    });
                }
                return Err(errors);
            }
        };

        let mut invalid_values = Vec::new();

        let hidden = block.get("hidden").and_then(|raw| {
            match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => {
                    invalid_values.push(format!(
                        "invalid value for 'hidden': {} (expected true or false)",
                        raw
                    ));
                    None
                }
            }
        });

        let temperature = block.get("temperature").and_then(|raw| {
            raw.trim().parse::<f64>().ok().or_else(|| {
                invalid_values.push(format!(
                    "invalid value for 'temperature': {} (expected a number)",
                    raw
                ));
                None
            })
        });

        Ok(Self {
            path: path.to_path_buf(),
            name,
            description,
            mode: optional(block, "mode"),
            hidden,
            temperature,
            tools: parse_tools(block),
            model: optional(block, "model"),
            parent_agent: optional(block, "agent"),
            keys: block.top_level_keys(),
            body: doc.body,
            invalid_values,
        })
    }

    /// Header keys not in `known`, as written and sorted.
    ///
    /// Keys match case-insensitively, the same way header lookups do;
    /// `known` holds lowercase keys.
    pub fn unknown_keys(&self, known: &BTreeSet<String>) -> Vec<String> {
        self.keys
            .iter()
            .filter(|key| !known.contains(&key.to_ascii_lowercase()))
            .cloned()
            .collect()
    }

    /// Typed header values that failed to parse.
    pub fn invalid_values(&self) -> &[String] {
        &self.invalid_values
    }
}

fn optional(block: &HeaderBlock, key: &str) -> Option<String> {
    block
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Tools come either inline (`tools: [read, edit]` / `tools: read, edit`) or
/// as nested `name: true|false` lines; nested tools set to `false` are off.
fn parse_tools(block: &HeaderBlock) -> Vec<String> {
    if let Some(inline) = block.get("tools").map(str::trim)
        && !inline.is_empty()
    {
        return inline
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|tool| strip_quotes(tool.trim()).trim().to_string())
            .filter(|tool| !tool.is_empty())
            .collect();
    }

    block
        .children("tools")
        .into_iter()
        .filter(|field| !field.value().eq_ignore_ascii_case("false"))
        .map(|field| field.key.clone())
        .collect()
}
