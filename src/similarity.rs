//! Word-overlap similarity between two lines.

use crate::tokenize::word_set;

/// Minimum overlap ratio for two lines to count as similar.
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

/// Overlap of the two lines' word sets divided by the larger set size.
///
/// Returns 1.0 for equal strings and 0.0 when either line has no words.
/// The ratio is symmetric in its arguments.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    overlap_ratio(a, b).unwrap_or(0.0)
}

/// True when the lines are equal or their ratio reaches `threshold`.
///
/// A line without words is never similar to a different line, whatever
/// the threshold.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    overlap_ratio(a, b).map_or(false, |ratio| ratio >= threshold)
}

/// `None` when either line has no words.
fn overlap_ratio(a: &str, b: &str) -> Option<f64> {
    let words_a = word_set(a);
    let words_b = word_set(b);
    if words_a.is_empty() || words_b.is_empty() {
        return None;
    }

    let overlap = words_a.intersection(&words_b).count();
    let larger = words_a.len().max(words_b.len());
    Some(overlap as f64 / larger as f64)
}

/// [`is_similar`] with [`SIMILARITY_THRESHOLD`].
pub fn similar(a: &str, b: &str) -> bool {
    is_similar(a, b, SIMILARITY_THRESHOLD)
}
