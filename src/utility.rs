//! Numeric helpers over `f64` slices. All return `None` for empty input.

/// Computes the arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Computes the sample standard deviation (n - 1 denominator) given a
/// pre-computed mean. Needs at least two values.
pub fn sample_stddev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Middle value of an ascending slice, averaging the two middles for even lengths.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Most frequent value of an ascending slice; the smallest one wins ties.
pub fn mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&v| v == value).count();
        if best.is_none_or(|(_, n)| run > n) {
            best = Some((value, run));
        }
        i += run;
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_sample_stddev() {
        assert_eq!(sample_stddev(&[4.0], 4.0), None);
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_stddev(&values, 5.0).unwrap();
        assert_relative_eq!(sd, 2.138_089_935, epsilon = 1e-9);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[1.0, 3.0, 8.0]), Some(3.0));
        assert_eq!(median(&[1.0, 3.0, 8.0, 10.0]), Some(5.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mode_prefers_smallest_on_tie() {
        assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0, 3.0]), Some(2.0));
        assert_eq!(mode(&[4.0, 5.0, 6.0]), Some(4.0));
        assert_eq!(mode(&[]), None);
    }
}
