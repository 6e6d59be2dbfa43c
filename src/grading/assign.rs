use rayon::prelude::*;

use super::boundaries::BoundaryMap;

/// Returns the first grade, highest first, whose threshold is at most `score`.
///
/// Falls back to the lowest label when nothing matches, which covers a
/// missing floor entry as well as scores below every threshold.
pub fn assign<'a>(score: f64, boundaries: &'a BoundaryMap) -> &'a str {
    boundaries
        .entries()
        .iter()
        .find(|b| score >= b.min_marks)
        .map(|b| b.grade.as_str())
        .unwrap_or_else(|| boundaries.fallback())
}

/// Grades every score. Output order matches input order.
pub fn assign_all(scores: &[f64], boundaries: &BoundaryMap) -> Vec<String> {
    scores
        .par_iter()
        .map(|&s| assign(s, boundaries).to_string())
        .collect()
}
