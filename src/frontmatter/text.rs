//! Line-oriented text handling that round-trips newline conventions.

/// Newline convention detected in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    /// Unix line endings (`\n`).
    Lf,
    /// Windows line endings (`\r\n`).
    CrLf,
}

impl Newline {
    /// Detect the convention used by `content`.
    ///
    /// Any occurrence of `\r\n` makes the whole document CRLF.
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            Newline::CrLf
        } else {
            Newline::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// A document split into lines, remembering how to join it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    /// Lines without their terminators.
    pub lines: Vec<String>,
    /// Newline convention used when joining.
    pub newline: Newline,
    /// Whether the original text ended with a newline.
    pub trailing_newline: bool,
}

impl LineBuffer {
    /// Split `content` into lines.
    pub fn split(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            newline: Newline::detect(content),
            trailing_newline: content.ends_with('\n'),
        }
    }

    /// Join the lines back using the original newline convention.
    pub fn join(&self) -> String {
        let newline = self.newline.as_str();
        let mut out = self.lines.join(newline);
        if self.trailing_newline {
            out.push_str(newline);
        }
        out
    }
}
