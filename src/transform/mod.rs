//! Export of source agent documents into Copilot `.agent.md` documents.
//!
//! A source agent becomes one output document: a fresh header block with
//! `name`, `description` and (when it delegates) an `agents:` list, then the
//! body with the positional placeholder rewritten. Orchestrators also get an
//! input-adapter block, and may get a `-solo` variant that runs every stage
//! inline instead of delegating.

mod adapters;


use crate::agent::AgentDefinition;
use crate::references::Resolution;
use serde_json::Value;

use adapters::{input_adapter, solo_adapter};

/// Name prefix marking an agent as an orchestrator.
pub const ORCHESTRATOR_PREFIX: &str = "orchestrator-";
/// Positional input placeholder understood by OpenCode only.
pub const INPUT_PLACEHOLDER: &str = "$ARGUMENTS";
/// Parameter name the placeholder is rewritten to.
pub const PARAMETER_NAME: &str = "raw_input";
pub const RUN_COMMAND_PREFIX: &str = "/run-";
pub const SOLO_SUFFIX: &str = "-solo";
pub const SOLO_DESCRIPTION_SUFFIX: &str = " (fallback: no subagents)";
pub const OUTPUT_EXTENSION: &str = ".agent.md";

/// A generated output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Agent name written into the header.
    pub name: String,
    /// Full document text, LF line endings, one trailing newline.
    pub content: String,
}

impl GeneratedDocument {
    /// File name for this document inside the target directory.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, OUTPUT_EXTENSION)
    }

    /// Whether the positional placeholder survived generation.
    pub fn has_placeholder(&self) -> bool {
        self.content.contains(INPUT_PLACEHOLDER)
    }
}

pub fn is_orchestrator(name: &str) -> bool {
    name.starts_with(ORCHESTRATOR_PREFIX)
}

/// Build the output document for `agent`.
///
/// The regular variant lists `dependencies` in its header. The solo variant
/// is renamed, annotated, and carries no dependency list.
pub fn transform(agent: &AgentDefinition, dependencies: &[String], solo: bool) -> GeneratedDocument {
    let body = adapt_body(&agent.name, &agent.body, solo);

    if solo {
        let name = format!("{}{}", agent.name, SOLO_SUFFIX);
        let description = format!("{}{}", agent.description, SOLO_DESCRIPTION_SUFFIX);
        let content = render_document(&name, &description, &body, &[]);
        return GeneratedDocument { name, content };
    }

    GeneratedDocument {
        name: agent.name.clone(),
        content: render_document(&agent.name, &agent.description, &body, dependencies),
    }
}

/// All documents exported for `agent`: the regular one, plus the solo
/// variant for orchestrators when `emit_fallback` is set.
pub fn export_variants(
    agent: &AgentDefinition,
    resolution: &Resolution,
    emit_fallback: bool,
) -> Vec<GeneratedDocument> {
    let mut documents = vec![transform(agent, &resolution.resolved, false)];
    if emit_fallback && is_orchestrator(&agent.name) {
        documents.push(transform(agent, &[], true));
    }
    documents
}

/// Rewrite the placeholder and prepend the orchestrator blocks.
pub fn adapt_body(agent_name: &str, body: &str, solo: bool) -> String {
    let body = body
        .replace("\r\n", "\n")
        .replace(INPUT_PLACEHOLDER, PARAMETER_NAME);

    let mut blocks = Vec::new();
    if is_orchestrator(agent_name) {
        blocks.push(input_adapter(agent_name));
        if solo {
            blocks.push(solo_adapter().to_string());
        }
    }
    blocks.push(body.trim_start_matches('\n').to_string());

    let mut out = blocks.join("\n\n").trim_end().to_string();
    out.push('\n');
    out
}

/// Assemble header block and body into the final document text.
pub fn render_document(name: &str, description: &str, body: &str, dependencies: &[String]) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("name: {}\n", yaml_quote(name)));
    out.push_str(&format!("description: {}\n", yaml_quote(description)));
    if !dependencies.is_empty() {
        out.push_str("agents:\n");
        for dependency in dependencies {
            out.push_str(&format!("  - {}\n", dependency));
        }
    }
    out.push_str("---\n\n");

    let body = body.trim_end_matches('\n');
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out
}

/// Double-quoted scalar; JSON string syntax is valid YAML.
fn yaml_quote(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}
