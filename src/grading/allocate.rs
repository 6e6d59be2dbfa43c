use std::collections::HashMap;

use tracing::{debug, info};

use super::assign::assign_all;
use super::boundaries::BoundaryMap;
use super::scale::GradeScale;
use super::types::Allocation;

/// Tent-shaped weights peaking at `center`.
///
/// The label farthest from the center weighs 1 and the center weighs
/// `max_distance + 1`.
pub fn weights(n: usize, center: usize) -> Vec<usize> {
    let distances: Vec<usize> = (0..n).map(|i| i.abs_diff(center)).collect();
    let max = distances.iter().copied().max().unwrap_or(0);
    distances.iter().map(|d| max - d + 1).collect()
}

/// Turns weights into student counts that sum to `total`.
///
/// Each count is the floored proportional share; whatever rounding leaves
/// over goes to the last label.
pub fn target_counts(weights: &[usize], total: usize) -> Vec<usize> {
    let sum: usize = weights.iter().sum();
    if sum == 0 {
        return vec![0; weights.len()];
    }

    let mut counts: Vec<usize> = weights
        .iter()
        .map(|&w| (w as f64 / sum as f64 * total as f64) as usize)
        .collect();

    let assigned: usize = counts.iter().sum();
    if let Some(last) = counts.last_mut() {
        *last += total.saturating_sub(assigned);
    }
    counts
}

/// Computes thresholds from the scores and the scale's centric grade.
///
/// Returns the boundaries together with the target counts they came from.
/// A grade with a target count of 0, or one reached after every student is
/// consumed, gets no entry in the map; its scores go to the next grade down.
/// The lowest grade always gets a threshold of 0.
pub fn compute_boundaries(scores: &[f64], scale: &GradeScale) -> (BoundaryMap, Vec<usize>) {
    let total = scores.len();
    let counts = target_counts(&weights(scale.len(), scale.centric_index()), total);

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut boundaries = BoundaryMap::new(scale);
    let graded = &scale.labels()[..scale.len() - 1];
    let mut start = 0;

    for (label, &count) in graded.iter().zip(&counts) {
        let end = (start + count).min(total);
        if start < end {
            boundaries.push(label, sorted[end - 1]);
        } else {
            debug!(grade = %label, start, count, "No students for grade, leaving it unbounded");
        }
        start = end;
    }

    boundaries.push(scale.lowest(), 0.0);

    (boundaries, counts)
}

/// Computes (or takes) boundaries and grades every score.
///
/// Manual boundaries are applied exactly as given. They are not validated
/// here; run [`validate`](super::validate::validate) first. An empty manual
/// map counts as absent.
pub fn allocate(
    scores: &[f64],
    scale: &GradeScale,
    manual: Option<&HashMap<String, f64>>,
) -> Allocation {
    let (boundaries, target_counts) = match manual {
        Some(manual) if !manual.is_empty() => {
            info!(entries = manual.len(), "Using manual boundaries");
            (BoundaryMap::from_manual(scale, manual), None)
        }
        _ => {
            let (boundaries, counts) = compute_boundaries(scores, scale);
            info!(
                students = scores.len(),
                centric = scale.centric(),
                ?counts,
                "Computed grade boundaries"
            );
            (boundaries, Some(counts))
        }
    };

    let grades = assign_all(scores, &boundaries);

    Allocation {
        boundaries,
        target_counts,
        grades,
    }
}
