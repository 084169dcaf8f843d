//! Header block ("frontmatter") parsing and in-place rewriting.
//!
//! Agent and command documents start with a block of `key: value` lines
//! delimited by `---` lines:
//!
//! ```text
//! ---
//! name: orchestrator-release
//! description: "Coordinates a release"
//! model: gpt-5
//! ---
//!
//! Body text...
//! ```
//!
//! This is not a YAML parser. The block is kept as an ordered
//! list of physical lines so a rewrite can touch exactly one line and leave
//! everything else, including newline style and trailing newline, as it was.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

mod rewrite;
mod text;


pub use rewrite::set_field;
pub use text::LineBuffer;

static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*---\s*$").expect("Invalid boundary regex"));

static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([A-Za-z0-9_-]+)(\s*:\s*)(.*)$").expect("Invalid field regex")
});

/// Structural problems with a document's header block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    /// The first line is not a `---` delimiter.
    #[error("missing frontmatter block")]
    MissingHeaderBlock,

    /// No closing `---` delimiter before end of document.
    #[error("unterminated frontmatter block")]
    UnterminatedHeaderBlock,
}

/// One `key: value` line inside a header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    /// Index of the physical line within the document.
    pub line_index: usize,
    /// Leading whitespace, kept verbatim.
    pub indent: String,
    /// Key as written (case preserved).
    pub key: String,
    /// Everything between key and value, colon included.
    pub separator: String,
    /// Trimmed value as written, quotes included.
    pub raw_value: String,
}

impl FieldLine {
    fn parse(line_index: usize, line: &str) -> Option<Self> {
        let caps = FIELD_REGEX.captures(line)?;
        Some(Self {
            line_index,
            indent: caps[1].to_string(),
            key: caps[2].to_string(),
            separator: caps[3].to_string(),
            raw_value: caps[4].trim().to_string(),
        })
    }

    /// The value with one layer of surrounding quotes removed.
    pub fn value(&self) -> &str {
        strip_quotes(&self.raw_value)
    }

    /// Whether the line sits at column zero.
    pub fn is_top_level(&self) -> bool {
        self.indent.is_empty()
    }

    /// Whether this line's key matches `key`, ignoring case.
    pub fn has_key(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    /// Render this line with a new value, keeping indent, key and separator.
    pub fn render(&self, value: &str) -> String {
        format!("{}{}{}{}", self.indent, self.key, self.separator, value)
    }
}

/// The located header block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Line index of the closing delimiter. The opening one is always line 0.
    pub close_line: usize,
    /// Recognized field lines in document order. Unrecognized lines are
    /// skipped but stay in the document untouched.
    pub fields: Vec<FieldLine>,
}

impl HeaderBlock {
    /// Locate the header block within a document's lines.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Result<Self, FrontmatterError> {
        let first = lines
            .first()
            .ok_or(FrontmatterError::MissingHeaderBlock)?;
        if !BOUNDARY_REGEX.is_match(first.as_ref()) {
            return Err(FrontmatterError::MissingHeaderBlock);
        }

        let close_line = lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, line)| BOUNDARY_REGEX.is_match(line.as_ref()))
            .map(|(idx, _)| idx)
            .ok_or(FrontmatterError::UnterminatedHeaderBlock)?;

        let fields = lines[1..close_line]
            .iter()
            .enumerate()
            .filter_map(|(offset, line)| FieldLine::parse(offset + 1, line.as_ref()))
            .collect();

        Ok(Self { close_line, fields })
    }

    /// Find the first field line with `key`, at any indentation.
    pub fn locate(&self, key: &str) -> Option<&FieldLine> {
        self.fields.iter().find(|field| field.has_key(key))
    }

    /// Look up a top-level value by key. The last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.is_top_level() && field.has_key(key))
            .map(FieldLine::value)
    }

    /// All top-level keys, as written.
    pub fn top_level_keys(&self) -> BTreeSet<String> {
        self.fields
            .iter()
            .filter(|field| field.is_top_level())
            .map(|field| field.key.clone())
            .collect()
    }

    /// Indented field lines nested directly under the top-level `key`.
    pub fn children(&self, key: &str) -> Vec<&FieldLine> {
        let Some(parent) = self
            .fields
            .iter()
            .rposition(|field| field.is_top_level() && field.has_key(key))
        else {
            return Vec::new();
        };

        self.fields[parent + 1..]
            .iter()
            .take_while(|field| !field.is_top_level())
            .collect()
    }
}

/// A document split into its header block and body.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub block: HeaderBlock,
    /// Everything after the closing delimiter line, byte-for-byte.
    pub body: String,
}

/// Parse a document's header block and extract its body.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterError> {
    let lines: Vec<&str> = content.lines().collect();
    let block = HeaderBlock::scan(&lines)?;

    let body_start: usize = content
        .split_inclusive('\n')
        .take(block.close_line + 1)
        .map(str::len)
        .sum();
    let body = content[body_start..].to_string();

    Ok(ParsedDocument { block, body })
}

/// Remove one layer of matching single or double quotes.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
