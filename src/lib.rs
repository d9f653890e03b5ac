#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Multi-document line alignment with word-level differences.
//!
//! Given N text documents, this crate groups their lines into aligned rows
//! (at most one line per document per row), classifies each row by how many
//! documents contributed a line, and for rows whose lines disagree computes
//! the words that are not shared by every contributing document.
//!
//! The alignment is a greedy, position-local heuristic: lines are matched
//! when they sit within a small window of each other and share enough words.
//! It is not a minimum-edit-distance diff.
//!
//! ## Modules
//!
//! - [`normalize`] - Line ending canonicalisation and line splitting
//! - [`tokenize`] - Whitespace tokenization into words and pieces
//! - [`similarity`] - Word-overlap similarity between two lines
//! - [`used`] - Per-document record of consumed lines
//! - [`align`] - The windowed row aligner
//! - [`classify`] - Presence-based row classification
//! - [`word_diff`] - Per-row word differences
//! - [`compare`] - The orchestrating [`Comparator`]
//! - [`display`] - Plain-text side-by-side rendering for debugging
//! - [`config`] - Tunable constants and caller input policy
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use layered_multidiff::{compare, CellKind, Classification};
//!
//! let comparison = compare(&["hello world", "hello earth"]);
//! assert_eq!(comparison.rows.len(), 1);
//!
//! let row = &comparison.rows[0];
//! assert_eq!(row.classification, Classification::Common);
//! assert_eq!(row.cells[0].kind, CellKind::Common);
//! assert!(row.cells[0].different_words.as_ref().unwrap().contains("world"));
//! ```

pub mod align;
pub mod classify;
pub mod compare;
pub mod config;
pub mod display;
pub mod errors;
pub mod normalize;
pub mod similarity;
pub mod tokenize;
pub mod used;
pub mod word_diff;

pub use align::{window_offsets, AlignConfig, AlignedLine, Aligner, Row, WINDOW_RADIUS};
pub use classify::{classify, Classification};
pub use compare::{
    compare, default_label, Cell, CellKind, ComparedRow, Comparator, Comparison, ComparisonStats,
    HighlightedPiece,
};
pub use config::{CompareConfig, InputPolicy};
pub use display::ComparisonDisplay;
pub use errors::{CompareError, CompareResult};
pub use normalize::{normalize_text, split_lines, Document};
pub use similarity::{is_similar, similar, similarity_ratio, SIMILARITY_THRESHOLD};
pub use tokenize::{pieces, word_set, words, Piece, PieceTag};
pub use used::UsedLines;
pub use word_diff::{word_diff, WordDiff};
