//! Per-document record of lines already placed in a row.
//!
//! The aligner claims each (document, line) pair at most once. Claims made
//! while building row `r` must be visible before row `r + 1` starts, so the
//! record is threaded explicitly through the aligner's single pass.

/// One flag per line per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedLines {
    flags: Vec<Vec<bool>>,
}

impl UsedLines {
    /// Create an all-unclaimed record for documents of the given lengths.
    pub fn new<I>(line_counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            flags: line_counts.into_iter().map(|n| vec![false; n]).collect(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.flags.len()
    }

    /// Number of lines in `document`, 0 for an unknown document.
    pub fn line_count(&self, document: usize) -> usize {
        self.flags.get(document).map_or(0, Vec::len)
    }

    /// True when `line` exists in `document` and has not been claimed.
    pub fn is_available(&self, document: usize, line: usize) -> bool {
        self.flags
            .get(document)
            .and_then(|lines| lines.get(line))
            .map_or(false, |used| !used)
    }

    pub fn is_used(&self, document: usize, line: usize) -> bool {
        self.flags
            .get(document)
            .and_then(|lines| lines.get(line))
            .copied()
            .unwrap_or(false)
    }

    /// Claim a line. Returns false if it was out of range or already claimed.
    pub fn claim(&mut self, document: usize, line: usize) -> bool {
        match self.flags.get_mut(document).and_then(|lines| lines.get_mut(line)) {
            Some(used) if !*used => {
                *used = true;
                true
            }
            _ => false,
        }
    }

    /// Grow the record so every document has at least the given number of
    /// lines. Existing claims are kept; added lines start unclaimed.
    pub fn ensure_sized<I>(&mut self, line_counts: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for (document, count) in line_counts.into_iter().enumerate() {
            if document == self.flags.len() {
                self.flags.push(Vec::new());
            }
            let lines = &mut self.flags[document];
            if lines.len() < count {
                lines.resize(count, false);
            }
        }
    }

    /// Number of claimed lines across all documents.
    pub fn claimed_count(&self) -> usize {
        self.flags
            .iter()
            .map(|lines| lines.iter().filter(|used| **used).count())
            .sum()
    }

    /// True once every line of every document has been claimed.
    pub fn all_claimed(&self) -> bool {
        self.flags.iter().all(|lines| lines.iter().all(|used| *used))
    }
}
