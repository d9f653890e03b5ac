//! Text normalisation and line splitting.
//!
//! Every document goes through the same canonicalisation before alignment:
//! CRLF becomes LF, surrounding whitespace of the whole text is stripped,
//! and the result is split on LF. Interior lines keep their own leading and
//! trailing whitespace.

/// Canonicalise line endings and trim the whole text.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Split normalised text into lines.
///
/// Empty text yields a single empty line, and consecutive LFs produce
/// empty lines between them.
pub fn split_lines(normalized: &str) -> Vec<String> {
    normalized.split('\n').map(str::to_string).collect()
}

/// A document prepared for one comparison run.
///
/// Lines are immutable once the document is built.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("line_count", &self.lines.len())
            .finish()
    }
}

impl Document {
    /// Normalise raw text and split it into lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(&normalize_text(text)),
        }
    }

    /// Build a document from lines that are already split.
    ///
    /// No normalisation is applied.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn get_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}
