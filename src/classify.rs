//! Presence-based row classification.
//!
//! Classification looks only at how many documents contributed a line.
//! Two present lines with different text still make a `Common` row.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Every document contributed a line
    Common,
    /// Exactly one document contributed a line
    Unique,
    /// More than one, but not every, document contributed a line
    Partial,
}

/// Classify a row from its present-slot count and total slot count.
///
/// `all present` is checked first, so a comparison of a single document
/// yields `Common` rows. A row with no present slot cannot come out of the
/// aligner; it resolves to `Unique`.
pub fn classify(present: usize, total: usize) -> Classification {
    if present == total && total > 0 {
        Classification::Common
    } else if present == 1 {
        Classification::Unique
    } else if present > 1 && present < total {
        Classification::Partial
    } else {
        Classification::Unique
    }
}
