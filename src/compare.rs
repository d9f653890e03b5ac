//! The comparison entry point.
//!
//! [`Comparator`] runs the full pipeline: normalise each text into a
//! [`Document`], align the documents into rows, classify each row and
//! compute its word differences, then project every row slot into a
//! [`Cell`] a renderer can consume directly.
//!
//! ```
//! use layered_multidiff::{Comparator, CompareConfig, InputPolicy};
//!
//! let comparator = Comparator::new(CompareConfig {
//!     policy: InputPolicy::interactive(),
//!     ..CompareConfig::default()
//! });
//! let comparison = comparator.try_compare(&["a\nb\nc", "a\nx\nc"]).unwrap();
//! assert_eq!(comparison.rows.len(), 4);
//! assert_eq!(comparison.labels, vec!["Text 1", "Text 2"]);
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::align::{Aligner, Row};
use crate::classify::Classification;
use crate::config::CompareConfig;
use crate::display::ComparisonDisplay;
use crate::errors::{CompareError, CompareResult};
use crate::normalize::Document;
use crate::tokenize::pieces;

/// Label given to the document at `index` when none is supplied.
pub fn default_label(index: usize) -> String {
    format!("Text {}", index + 1)
}

/// Visual type of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Present in a `Common` row
    Common,
    /// Present in a `Unique` row
    Unique,
    /// Present in a `Partial` row
    Modified,
    /// Absent slot
    Empty,
}

impl CellKind {
    pub fn for_slot(classification: Classification, exists: bool) -> Self {
        if !exists {
            return CellKind::Empty;
        }
        match classification {
            Classification::Common => CellKind::Common,
            Classification::Unique => CellKind::Unique,
            Classification::Partial => CellKind::Modified,
        }
    }
}

/// A piece of cell content, flagged when it is a changed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightedPiece<'a> {
    pub text: &'a str,
    pub changed: bool,
}

/// One document's view of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Line content, empty for an absent slot.
    pub content: String,
    pub exists: bool,
    pub kind: CellKind,
    /// Index of the line in its document.
    pub line: Option<usize>,
    /// Words not shared by every present line in the row. Never empty.
    pub different_words: Option<BTreeSet<String>>,
}

impl Cell {
    fn empty() -> Self {
        Self {
            content: String::new(),
            exists: false,
            kind: CellKind::Empty,
            line: None,
            different_words: None,
        }
    }

    pub fn is_changed_word(&self, word: &str) -> bool {
        self.different_words
            .as_ref()
            .map_or(false, |words| words.contains(word))
    }

    /// Split the content into whitespace and word pieces, flagging changed
    /// words. Joining the piece texts gives back `content`.
    pub fn pieces(&self) -> Vec<HighlightedPiece<'_>> {
        pieces(&self.content)
            .into_iter()
            .map(|piece| HighlightedPiece {
                text: piece.text,
                changed: piece.is_word() && self.is_changed_word(piece.text),
            })
            .collect()
    }
}

/// A row of the comparison, one cell per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedRow {
    pub classification: Classification,
    pub cells: Vec<Cell>,
}

impl ComparedRow {
    fn from_row(row: &Row) -> Self {
        let classification = row.classification();
        let diff = row.word_diff();

        let cells = row
            .slots
            .iter()
            .enumerate()
            .map(|(document, slot)| match slot {
                Some(aligned) => Cell {
                    content: aligned.content.clone(),
                    exists: true,
                    kind: CellKind::for_slot(classification, true),
                    line: Some(aligned.line),
                    different_words: diff
                        .as_ref()
                        .and_then(|diff| diff.different_words(document))
                        .cloned(),
                },
                None => Cell::empty(),
            })
            .collect();

        Self {
            classification,
            cells,
        }
    }

    /// True when any cell carries different words.
    pub fn has_word_diff(&self) -> bool {
        self.cells.iter().any(|cell| cell.different_words.is_some())
    }

    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.exists).count()
    }
}

/// Summary counts for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub documents: usize,
    pub rows: usize,
    pub common: usize,
    pub partial: usize,
    pub unique: usize,
    pub rows_with_word_diff: usize,
}

impl ComparisonStats {
    fn collect(documents: usize, rows: &[ComparedRow]) -> Self {
        let mut stats = Self {
            documents,
            rows: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match row.classification {
                Classification::Common => stats.common += 1,
                Classification::Partial => stats.partial += 1,
                Classification::Unique => stats.unique += 1,
            }
            if row.has_word_diff() {
                stats.rows_with_word_diff += 1;
            }
        }
        stats
    }
}

/// Result of comparing N documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// One label per document.
    pub labels: Vec<String>,
    pub rows: Vec<ComparedRow>,
    pub stats: ComparisonStats,
}

impl Comparison {
    pub fn document_count(&self) -> usize {
        self.labels.len()
    }

    /// Cells of one document, in row order.
    pub fn column(&self, document: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.cells.get(document))
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Side-by-side plain-text rendering.
    pub fn display(&self) -> ComparisonDisplay<'_> {
        ComparisonDisplay::new(self)
    }
}

/// Runs comparisons with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare texts without applying the input policy.
    pub fn compare<S: AsRef<str>>(&self, texts: &[S]) -> Comparison {
        let documents = texts
            .iter()
            .map(|text| Document::from_text(text.as_ref()))
            .collect();
        let labels = (0..texts.len()).map(default_label).collect();
        self.run(documents, labels)
    }

    /// Compare texts after checking them against the input policy.
    pub fn try_compare<S: AsRef<str>>(&self, texts: &[S]) -> CompareResult<Comparison> {
        let labeled: Vec<(&str, &str)> = texts.iter().map(|text| ("", text.as_ref())).collect();
        self.compare_labeled(&labeled)
    }

    /// Compare `(label, text)` pairs after checking the input policy.
    ///
    /// Labels are trimmed; a blank label becomes [`default_label`].
    pub fn compare_labeled<L, T>(&self, inputs: &[(L, T)]) -> CompareResult<Comparison>
    where
        L: AsRef<str>,
        T: AsRef<str>,
    {
        let documents: Vec<Document> = inputs
            .iter()
            .map(|(_, text)| Document::from_text(text.as_ref()))
            .collect();

        if let Err(err) = self.config.policy.check(&documents) {
            tracing::debug!(op = "compare", documents = documents.len(), error = %err, "input rejected");
            return Err(err);
        }

        let labels = inputs
            .iter()
            .enumerate()
            .map(|(index, (label, _))| {
                let label = label.as_ref().trim();
                if label.is_empty() {
                    default_label(index)
                } else {
                    label.to_string()
                }
            })
            .collect();

        Ok(self.run(documents, labels))
    }

    /// Compare the texts of a JSON array of strings.
    pub fn compare_json(&self, json: &str) -> CompareResult<Comparison> {
        let texts = texts_from_json(json)?;
        self.try_compare(&texts)
    }

    fn run(&self, documents: Vec<Document>, labels: Vec<String>) -> Comparison {
        let started = Instant::now();
        let aligner = Aligner::new(self.config.align);
        let rows: Vec<ComparedRow> = aligner
            .align(&documents)
            .iter()
            .map(ComparedRow::from_row)
            .collect();
        let stats = ComparisonStats::collect(documents.len(), &rows);

        tracing::debug!(
            op = "compare",
            documents = stats.documents,
            rows = stats.rows,
            common = stats.common,
            partial = stats.partial,
            unique = stats.unique,
            elapsed_us = started.elapsed().as_micros() as u64,
            "compared documents"
        );

        Comparison {
            labels,
            rows,
            stats,
        }
    }
}

/// Extract the texts of a JSON array of strings.
fn texts_from_json(json: &str) -> CompareResult<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| CompareError::InvalidInput {
            message: e.to_string(),
        })?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(CompareError::InvalidInput {
                message: format!("expected an array of strings, got {}", json_kind(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::String(text) => Ok(text),
            other => Err(CompareError::InvalidInput {
                message: format!("element {} is {}, expected a string", index, json_kind(&other)),
            }),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Compare texts with the default configuration.
pub fn compare<S: AsRef<str>>(texts: &[S]) -> Comparison {
    Comparator::default().compare(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputPolicy;

    #[test]
    fn test_cell_kind_mapping() {
        assert_eq!(CellKind::for_slot(Classification::Common, true), CellKind::Common);
        assert_eq!(CellKind::for_slot(Classification::Unique, true), CellKind::Unique);
        assert_eq!(CellKind::for_slot(Classification::Partial, true), CellKind::Modified);
        assert_eq!(CellKind::for_slot(Classification::Partial, false), CellKind::Empty);
    }

    #[test]
    fn test_absent_cell_is_empty() {
        let comparison = compare(&["a\nb", "a"]);
        let cell = &comparison.rows[1].cells[1];
        assert!(!cell.exists);
        assert_eq!(cell.kind, CellKind::Empty);
        assert_eq!(cell.content, "");
        assert_eq!(cell.line, None);
        assert_eq!(cell.different_words, None);
    }

    #[test]
    fn test_partial_rows_are_modified_cells() {
        let comparison = compare(&["a", "a", "b"]);
        let row = &comparison.rows[0];
        assert_eq!(row.classification, Classification::Partial);
        let kinds: Vec<_> = row.cells.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CellKind::Modified, CellKind::Modified, CellKind::Empty]);
    }

    #[test]
    fn test_pieces_flag_changed_words() {
        let comparison = compare(&["keep  this one", "keep that one"]);
        let cell = &comparison.rows[0].cells[0];
        let pieces = cell.pieces();
        let joined: String = pieces.iter().map(|p| p.text).collect();
        assert_eq!(joined, "keep  this one");
        let changed: Vec<_> = pieces.iter().filter(|p| p.changed).map(|p| p.text).collect();
        assert_eq!(changed, vec!["this"]);
    }

    #[test]
    fn test_stats() {
        let comparison = compare(&["a\nb b\nc", "a\nb x\nd", "a\nq\nd"]);
        let stats = comparison.stats;
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.rows, comparison.rows.len());
        assert_eq!(stats.common + stats.partial + stats.unique, stats.rows);
        assert_eq!(
            stats.rows_with_word_diff,
            comparison.rows.iter().filter(|r| r.has_word_diff()).count()
        );
    }

    #[test]
    fn test_labels() {
        let comparator = Comparator::default();
        let comparison = comparator
            .compare_labeled(&[("  draft ", "a"), ("", "b"), ("final", "c")])
            .unwrap();
        assert_eq!(comparison.labels, vec!["draft", "Text 2", "final"]);
        assert_eq!(comparison.document_count(), 3);
    }

    #[test]
    fn test_policy_applies_to_try_compare_only() {
        let comparator = Comparator::new(CompareConfig {
            policy: InputPolicy::interactive(),
            ..CompareConfig::default()
        });
        assert!(matches!(
            comparator.try_compare(&["only one", ""]),
            Err(CompareError::TooFewDocuments { found: 1, required: 2 })
        ));
        assert_eq!(comparator.compare(&["only one", ""]).rows.len(), 2);
    }

    #[test]
    fn test_compare_json() {
        let comparison = Comparator::default()
            .compare_json(r#"["hello world", "hello earth"]"#)
            .unwrap();
        assert_eq!(comparison.rows.len(), 1);
    }

    #[test]
    fn test_compare_json_rejects_malformed_input() {
        let comparator = Comparator::default();
        for json in ["null", r#"{"a": 1}"#, r#"["a", 3]"#, r#"["a", null]"#, "[1"] {
            assert!(
                matches!(comparator.compare_json(json), Err(CompareError::InvalidInput { .. })),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_column() {
        let comparison = compare(&["a\nb", "a\nc"]);
        let contents: Vec<_> = comparison.column(1).map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "", "c"]);
        assert_eq!(comparison.column(5).count(), 0);
    }

    #[test]
    fn test_to_json_shape() {
        let comparison = compare(&["hello world", "hello earth"]);
        let value: serde_json::Value = serde_json::from_str(&comparison.to_json()).unwrap();
        assert_eq!(value["rows"][0]["classification"], "common");
        assert_eq!(value["rows"][0]["cells"][0]["kind"], "common");
        assert_eq!(value["rows"][0]["cells"][1]["different_words"][0], "earth");
        assert_eq!(value["stats"]["rows_with_word_diff"], 1);
    }
}
