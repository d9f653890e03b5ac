//! Windowed row alignment across N documents.
//!
//! The aligner scans positions `0..max_len` and, at each position, visits
//! the documents in index order. The first unclaimed line it meets becomes
//! the *seed* of a new row. Every other document then contributes at most
//! one line to that row: the line at the same position if it is equal or
//! similar to the seed, otherwise the first acceptable unclaimed line inside
//! the window around that position.
//!
//! The scan is greedy and never backtracks. An early match can take a line
//! that would have fit a later row better.
//!
//! ```text
//!  position   doc 0          doc 1
//!     0       "a"   <seed>   "a"   (same position, equal)
//!     1       "b"   <seed>   .     ("x" is not similar to "b")
//!     1       .              "x"   <seed>
//!     2       "c"   <seed>   "c"
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification};
use crate::normalize::Document;
use crate::similarity::{is_similar, SIMILARITY_THRESHOLD};
use crate::used::UsedLines;

/// How far from the seed position a match may be searched, in lines.
pub const WINDOW_RADIUS: usize = 2;

/// Tunable constants of the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Minimum word-overlap ratio for two different lines to share a row.
    pub similarity_threshold: f64,
    /// Offsets `-r..=-1` and `1..=r` are searched after the same position.
    pub window_radius: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            window_radius: WINDOW_RADIUS,
        }
    }
}

/// Window offsets in scan order: `-r, ..., -1, 1, ..., r`.
///
/// A radius above `isize::MAX` saturates.
pub fn window_offsets(radius: usize) -> impl Iterator<Item = isize> {
    let r = isize::try_from(radius).unwrap_or(isize::MAX);
    (-r..0).chain(1..=r)
}

fn offset_index(position: usize, offset: isize) -> Option<usize> {
    if offset < 0 {
        position.checked_sub(offset.unsigned_abs())
    } else {
        position.checked_add(offset as usize)
    }
}

/// A line placed into a row slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedLine {
    /// Index of the line within its document.
    pub line: usize,
    pub content: String,
}

/// One aligned group: a slot per document, each holding at most one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Scan position at which the row was seeded.
    pub position: usize,
    /// Document whose line seeded the row.
    pub seed: usize,
    pub slots: Vec<Option<AlignedLine>>,
}

impl Row {
    fn new(document_count: usize, seed: usize, position: usize) -> Self {
        Self {
            position,
            seed,
            slots: vec![None; document_count],
        }
    }

    fn place(&mut self, document: usize, line: usize, content: &str) {
        self.slots[document] = Some(AlignedLine {
            line,
            content: content.to_string(),
        });
    }

    pub fn document_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of documents that contributed a line.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn get(&self, document: usize) -> Option<&AlignedLine> {
        self.slots.get(document).and_then(Option::as_ref)
    }

    /// Slot contents in document order.
    pub fn contents(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|aligned| aligned.content.as_str()))
    }

    /// Recomputed from slot presence on every call.
    pub fn classification(&self) -> Classification {
        classify(self.present_count(), self.document_count())
    }
}

/// Greedy windowed aligner.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    pub fn new(config: AlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align the documents into rows.
    pub fn align(&self, documents: &[Document]) -> Vec<Row> {
        let mut used = UsedLines::new(documents.iter().map(Document::line_count));
        self.align_with(documents, &mut used)
    }

    /// Align using a caller-supplied claim record.
    ///
    /// Lines already claimed in `used` are skipped, both as seeds and as
    /// matches. A record sized for fewer lines than `documents` is grown
    /// first, so every line can still be placed.
    pub fn align_with(&self, documents: &[Document], used: &mut UsedLines) -> Vec<Row> {
        used.ensure_sized(documents.iter().map(Document::line_count));

        let max_len = documents
            .iter()
            .map(Document::line_count)
            .max()
            .unwrap_or(0);
        // Offsets past the longest document never land on a line.
        let radius = self.config.window_radius.min(max_len);
        let mut rows = Vec::new();

        for position in 0..max_len {
            for (seed, document) in documents.iter().enumerate() {
                let seed_line = match document.get_line(position) {
                    Some(line) => line,
                    None => continue,
                };
                if !used.claim(seed, position) {
                    continue;
                }

                tracing::trace!(
                    op = "align",
                    row = rows.len(),
                    seed_document = seed,
                    position,
                    "seeded row"
                );
                let mut row = Row::new(documents.len(), seed, position);
                row.place(seed, position, seed_line);

                for (other, other_document) in documents.iter().enumerate() {
                    if other == seed {
                        continue;
                    }
                    if let Some((line, offset)) =
                        self.find_match(other, other_document, used, seed_line, position, radius)
                    {
                        tracing::trace!(
                            op = "align",
                            row = rows.len(),
                            document = other,
                            line,
                            offset,
                            "matched"
                        );
                        used.claim(other, line);
                        if let Some(content) = other_document.get_line(line) {
                            row.place(other, line, content);
                        }
                    }
                }

                rows.push(row);
            }
        }

        rows
    }

    /// Same position first, then the window in scan order.
    fn find_match(
        &self,
        document: usize,
        lines: &Document,
        used: &UsedLines,
        seed_line: &str,
        position: usize,
        radius: usize,
    ) -> Option<(usize, isize)> {
        let offsets = std::iter::once(0).chain(window_offsets(radius));

        for offset in offsets {
            let index = match offset_index(position, offset) {
                Some(index) => index,
                None => continue,
            };
            if !used.is_available(document, index) {
                continue;
            }
            let candidate = match lines.get_line(index) {
                Some(candidate) => candidate,
                None => continue,
            };
            if is_similar(candidate, seed_line, self.config.similarity_threshold) {
                return Some((index, offset));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&[&str]]) -> Vec<Document> {
        texts
            .iter()
            .map(|lines| Document::from_lines(lines.iter().copied()))
            .collect()
    }

    fn contents(rows: &[Row]) -> Vec<Vec<Option<&str>>> {
        rows.iter().map(|row| row.contents().collect()).collect()
    }

    #[test]
    fn test_window_offsets_order() {
        assert_eq!(window_offsets(2).collect::<Vec<_>>(), vec![-2, -1, 1, 2]);
        assert_eq!(window_offsets(1).collect::<Vec<_>>(), vec![-1, 1]);
        assert_eq!(window_offsets(0).count(), 0);
        assert_eq!(window_offsets(usize::MAX).next(), Some(-isize::MAX));
    }

    #[test]
    fn test_offset_index_bounds() {
        assert_eq!(offset_index(0, -1), None);
        assert_eq!(offset_index(1, -1), Some(0));
        assert_eq!(offset_index(3, 2), Some(5));
    }

    #[test]
    fn test_disagreeing_middle_line_splits() {
        let documents = docs(&[&["a", "b", "c"], &["a", "x", "c"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(
            contents(&rows),
            vec![
                vec![Some("a"), Some("a")],
                vec![Some("b"), None],
                vec![None, Some("x")],
                vec![Some("c"), Some("c")],
            ]
        );
        assert_eq!(rows[2].seed, 1);
        assert_eq!(rows[2].position, 1);
    }

    #[test]
    fn test_inserted_line_matched_through_window() {
        let documents = docs(&[&["a", "b", "c"], &["new", "a", "b", "c"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(
            contents(&rows),
            vec![
                vec![Some("a"), Some("a")],
                vec![None, Some("new")],
                vec![Some("b"), Some("b")],
                vec![Some("c"), Some("c")],
            ]
        );
        assert_eq!(rows[0].get(1).map(|l| l.line), Some(1));
    }

    #[test]
    fn test_nearer_forward_offset_wins() {
        let documents = docs(&[&["z"], &["q", "z", "z"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(rows[0].get(1).map(|l| l.line), Some(1));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_lines_behind_the_position_are_already_claimed() {
        // Every line before the current position was visited as a seed, so
        // negative offsets only ever meet claimed lines.
        let documents = docs(&[&["a", "b", "c"], &["c", "b", "a"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            for aligned in row.slots.iter().flatten() {
                assert!(aligned.line >= row.position);
            }
        }
    }

    #[test]
    fn test_outside_window_is_not_matched() {
        let documents = docs(&[&["target"], &["p", "q", "r", "target"]]);
        let rows = Aligner::default().align(&documents);
        assert!(rows.iter().all(|row| row.present_count() == 1));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_wider_window_reaches_further() {
        let documents = docs(&[&["target"], &["p", "q", "r", "target"]]);
        let aligner = Aligner::new(AlignConfig {
            window_radius: 3,
            ..AlignConfig::default()
        });
        let rows = aligner.align(&documents);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].present_count(), 2);
    }

    #[test]
    fn test_zero_radius_only_checks_same_position() {
        let documents = docs(&[&["a", "b"], &["b", "a"]]);
        let aligner = Aligner::new(AlignConfig {
            window_radius: 0,
            ..AlignConfig::default()
        });
        let rows = aligner.align(&documents);
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_huge_radius_matches_radius_of_longest_document() {
        let documents = docs(&[&["a", "b"], &["b", "a"]]);
        let bounded = Aligner::new(AlignConfig {
            window_radius: 2,
            ..AlignConfig::default()
        })
        .align(&documents);
        let unbounded = Aligner::new(AlignConfig {
            window_radius: usize::MAX,
            ..AlignConfig::default()
        })
        .align(&documents);
        assert_eq!(unbounded, bounded);
        assert_eq!(
            contents(&unbounded),
            vec![vec![Some("a"), Some("a")], vec![Some("b"), Some("b")]]
        );
    }

    #[test]
    fn test_similar_lines_share_a_row() {
        let documents = docs(&[&["the quick brown fox"], &["the quick red fox"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].present_count(), 2);
    }

    #[test]
    fn test_matched_line_is_not_reseeded() {
        let documents = docs(&[&["x", "a"], &["a", "y"]]);
        let rows = Aligner::default().align(&documents);
        // doc 1's seed at position 0 absorbs doc 0 line 1 through offset +1,
        // so that line is skipped when position 1 comes round.
        assert_eq!(
            contents(&rows),
            vec![
                vec![Some("x"), None],
                vec![Some("a"), Some("a")],
                vec![None, Some("y")],
            ]
        );
    }

    #[test]
    fn test_three_documents_partial_row() {
        let documents = docs(&[&["shared", "only one"], &["shared"], &["shared"]]);
        let rows = Aligner::default().align(&documents);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].classification(), Classification::Common);
        assert_eq!(rows[1].classification(), Classification::Unique);
    }

    #[test]
    fn test_no_documents_no_rows() {
        assert!(Aligner::default().align(&[]).is_empty());
    }

    #[test]
    fn test_prior_claims_are_respected() {
        let documents = docs(&[&["a", "b"], &["a", "b"]]);
        let mut used = UsedLines::new(vec![2, 2]);
        used.claim(1, 0);
        let rows = Aligner::default().align_with(&documents, &mut used);
        assert_eq!(
            contents(&rows),
            vec![vec![Some("a"), None], vec![Some("b"), Some("b")]]
        );
        assert!(used.all_claimed());
    }

    #[test]
    fn test_undersized_claim_record_still_places_every_line() {
        let documents = docs(&[&["a", "b"], &["a", "b"]]);
        let mut used = UsedLines::new(vec![1]);
        let rows = Aligner::default().align_with(&documents, &mut used);
        assert_eq!(
            contents(&rows),
            vec![vec![Some("a"), Some("a")], vec![Some("b"), Some("b")]]
        );
        assert_eq!(used.document_count(), 2);
        assert!(used.all_claimed());
    }
}
