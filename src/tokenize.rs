//! Whitespace tokenization.
//!
//! Two views of the same line are offered. [`words`] and [`word_set`] drop
//! whitespace and are used for similarity scoring and word differences.
//! [`pieces`] keeps whitespace runs in place so a line can be re-emitted
//! with inline highlighting. Both split on the same boundaries, so every
//! word yielded by [`words`] is exactly one [`PieceTag::Word`] piece.

use std::collections::BTreeSet;

use serde::Serialize;

/// Iterate over the non-whitespace tokens of a line, in order.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// The distinct words of a line.
pub fn word_set(line: &str) -> BTreeSet<&str> {
    words(line).collect()
}

/// Classification of a piece of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceTag {
    /// A maximal run of non-whitespace characters
    Word,
    /// A maximal run of whitespace characters
    Space,
}

/// A contiguous slice of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece<'a> {
    /// The piece text.
    pub text: &'a str,
    /// Byte position where the piece starts (inclusive).
    pub start: usize,
    /// Byte position where the piece ends (exclusive).
    pub end: usize,
    pub tag: PieceTag,
}

impl Piece<'_> {
    pub fn is_word(&self) -> bool {
        self.tag == PieceTag::Word
    }
}

/// Split a line into alternating word and whitespace pieces.
///
/// Concatenating the pieces reproduces the line exactly.
pub fn pieces(line: &str) -> Vec<Piece<'_>> {
    let mut result = Vec::new();
    let mut current: Option<(usize, PieceTag)> = None;

    for (idx, ch) in line.char_indices() {
        let tag = if ch.is_whitespace() {
            PieceTag::Space
        } else {
            PieceTag::Word
        };
        match current {
            Some((_, open_tag)) if open_tag == tag => {}
            Some((start, open_tag)) => {
                result.push(Piece {
                    text: &line[start..idx],
                    start,
                    end: idx,
                    tag: open_tag,
                });
                current = Some((idx, tag));
            }
            None => current = Some((idx, tag)),
        }
    }

    if let Some((start, tag)) = current {
        result.push(Piece {
            text: &line[start..],
            start,
            end: line.len(),
            tag,
        });
    }

    result
}
