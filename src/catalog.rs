//! Reconciliation of the `AGENTS.md` catalog table against the model mapping.
//!
//! The catalog is a markdown table with five columns:
//!
//! ```text
//! | Agent | Role | Model | Mode | Notes |
//! |-------|------|-------|------|-------|
//! | orchestrator-release | Release lead | gpt-5 | primary | ... |
//! ```
//!
//! Only the model cell of data rows is ever rewritten, and only when it
//! disagrees with the mapping. Every other byte of the document is kept.

use crate::frontmatter::LineBuffer;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::sync::LazyLock;

static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\|\s*([^|]+?)\s*\|\s*([^|]+?)\s*\|\s*([^|]+?)\s*\|\s*([^|]+?)\s*\|\s*([^|]+?)\s*\|$",
    )
    .expect("Invalid catalog row regex")
});

/// Header label of the identifier column.
pub const HEADER_LABEL: &str = "Agent";

/// A catalog row whose model cell was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChange {
    pub agent: String,
    pub old_model: String,
    pub new_model: String,
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Catalog text after the rewrite.
    pub content: String,
    /// Rewritten rows, in document order.
    pub changed: Vec<RowChange>,
    /// Rows without a mapping, then mapping entries without a row.
    pub warnings: Vec<String>,
}

/// Whether a trimmed identifier cell marks a header, separator or blank row.
fn is_decoration(agent: &str) -> bool {
    agent.is_empty() || agent == HEADER_LABEL || agent.chars().all(|c| c == '-' || c == ':')
}

/// Byte range of the model cell's content within `line`.
///
/// A blank cell yields the whole span between its pipes so the rewrite can
/// lay the cell out as ` model `.
fn model_span(line: &str, cell: Range<usize>) -> (Range<usize>, bool) {
    let raw = &line[cell.clone()];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let start = line[..cell.start].rfind('|').map_or(cell.start, |idx| idx + 1);
        let end = line[cell.end..]
            .find('|')
            .map_or(cell.end, |idx| cell.end + idx);
        return (start..end, true);
    }
    let start = cell.start + (raw.len() - raw.trim_start().len());
    (start..start + trimmed.len(), false)
}

/// Rewrite every data row's model cell to the mapped model.
pub fn reconcile(content: &str, mapping: &BTreeMap<String, String>) -> Reconciliation {
    let mut buffer = LineBuffer::split(content);
    let mut changed = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = BTreeSet::new();

    for line in &mut buffer.lines {
        let Some(caps) = ROW_REGEX.captures(line) else {
            continue;
        };

        let agent = caps[1].trim().to_string();
        if is_decoration(&agent) {
            continue;
        }
        seen.insert(agent.clone());

        let Some(target) = mapping.get(&agent) else {
            warnings.push(format!("catalog row has no mapping in config: {}", agent));
            continue;
        };

        let cell = caps.get(3).map(|m| m.range()).unwrap_or_default();
        let (model_cell, blank) = model_span(line, cell);
        let current = if blank { "" } else { &line[model_cell.clone()] };
        if current == target {
            continue;
        }

        tracing::debug!(agent = %agent, from = current, to = %target, "catalog row updated");
        changed.push(RowChange {
            agent,
            old_model: current.to_string(),
            new_model: target.clone(),
        });
        if blank {
            line.replace_range(model_cell, &format!(" {} ", target));
        } else {
            line.replace_range(model_cell, target);
        }
    }

    for agent in mapping.keys().filter(|agent| !seen.contains(*agent)) {
        warnings.push(format!("config agent not found in catalog: {}", agent));
    }

    let content = if changed.is_empty() {
        content.to_string()
    } else {
        buffer.join()
    };

    Reconciliation {
        content,
        changed,
        warnings,
    }
}

/// Agent identifiers listed in a catalog.
///
/// Uses a looser grammar than [`reconcile`]: the first cell of any line that
/// starts with `|` and closes that cell with a second `|`, so catalogs with
/// extra or missing columns still count.
pub fn catalog_agents(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|') && line.split('|').count() >= 3)
        .filter_map(|line| line.split('|').nth(1))
        .map(str::trim)
        .filter(|agent| !agent.is_empty() && !is_decoration(agent))
        .map(str::to_string)
        .collect()
}
