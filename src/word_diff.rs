//! Word-level differences within a row.
//!
//! For a row whose present lines are not all identical, the words shared by
//! every present line are the row's common words. Each present slot's
//! different words are its own words minus the common words, so a word is
//! highlighted wherever at least one other contributing document lacks it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::align::Row;
use crate::tokenize::word_set;

/// Word differences for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiff {
    /// Words present in every contributing line.
    pub common: BTreeSet<String>,
    /// Per slot: `None` for an absent slot or when nothing differs,
    /// otherwise a non-empty set.
    pub different: Vec<Option<BTreeSet<String>>>,
}

impl WordDiff {
    pub fn different_words(&self, document: usize) -> Option<&BTreeSet<String>> {
        self.different.get(document).and_then(Option::as_ref)
    }

    /// True when at least one slot carries different words.
    pub fn has_differences(&self) -> bool {
        self.different.iter().any(Option::is_some)
    }
}

/// Compute word differences for a row given as slot contents.
///
/// Returns `None` when fewer than two slots are present or every present
/// line is textually identical.
pub fn word_diff(slots: &[Option<&str>]) -> Option<WordDiff> {
    let present: Vec<&str> = slots.iter().flatten().copied().collect();
    if present.len() < 2 || present.iter().all(|line| *line == present[0]) {
        return None;
    }

    let mut sets = present.iter().map(|line| word_set(*line));
    let mut common = sets.next().unwrap_or_default();
    for set in sets {
        common.retain(|word| set.contains(word));
    }

    let different = slots
        .iter()
        .map(|slot| {
            slot.and_then(|line| {
                let own: BTreeSet<String> = word_set(line)
                    .into_iter()
                    .filter(|word| !common.contains(word))
                    .map(str::to_string)
                    .collect();
                if own.is_empty() {
                    None
                } else {
                    Some(own)
                }
            })
        })
        .collect();

    Some(WordDiff {
        common: common.into_iter().map(str::to_string).collect(),
        different,
    })
}

impl Row {
    /// Word differences between this row's present lines.
    pub fn word_diff(&self) -> Option<WordDiff> {
        let slots: Vec<Option<&str>> = self.contents().collect();
        word_diff(&slots)
    }
}
