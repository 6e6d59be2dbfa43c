use super::boundaries::BoundaryMap;

/// Checks that thresholds strictly descend in label order.
///
/// The lowest label is exempt. A non-lowest label without a threshold fails.
pub fn validate<S: AsRef<str>>(labels: &[S], boundaries: &BoundaryMap) -> bool {
    let Some((_, graded)) = labels.split_last() else {
        return false;
    };

    let mut values = Vec::with_capacity(graded.len());
    for label in graded {
        match boundaries.get(label.as_ref()) {
            Some(v) => values.push(v),
            None => return false,
        }
    }

    values.windows(2).all(|w| w[0] > w[1])
}
