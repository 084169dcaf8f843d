//! Single-field rewrites that leave the rest of the document untouched.

use super::{FrontmatterError, HeaderBlock, LineBuffer, strip_quotes};

/// Outcome of [`set_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    /// The document text after the update (the input itself when unchanged).
    pub content: String,
    /// Raw value previously stored under the key, if the key existed.
    pub previous: Option<String>,
    /// Whether `content` differs from the input.
    pub changed: bool,
}

/// Set `key` to `value` in the document's header block.
///
/// An existing line keeps its indentation, key spelling and separator; only
/// the value is replaced. A missing key is appended as `key: value` right
/// before the closing delimiter. Values that already match, including ones
/// that differ only by surrounding quotes, are left alone.
pub fn set_field(content: &str, key: &str, value: &str) -> Result<FieldUpdate, FrontmatterError> {
    let value = value.trim();
    let mut buffer = LineBuffer::split(content);
    let block = HeaderBlock::scan(&buffer.lines)?;

    let Some(field) = block.locate(key) else {
        buffer.lines.insert(block.close_line, format!("{}: {}", key, value));
        return Ok(FieldUpdate {
            content: buffer.join(),
            previous: None,
            changed: true,
        });
    };

    let previous = Some(field.raw_value.clone());
    if field.raw_value == value || field.value() == strip_quotes(value) {
        return Ok(FieldUpdate {
            content: content.to_string(),
            previous,
            changed: false,
        });
    }

    buffer.lines[field.line_index] = field.render(value);
    Ok(FieldUpdate {
        content: buffer.join(),
        previous,
        changed: true,
    })
}
