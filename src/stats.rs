use serde::Serialize;

use crate::utility::{mean, median, mode, sample_stddev};

/// Descriptive statistics of a marks column.
///
/// Every measure is `None` for an empty column; `stddev` also needs two values.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MarksStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub stddev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MarksStats {
    pub fn from_marks(marks: &[f64]) -> Self {
        let mut sorted = marks.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted);

        MarksStats {
            count: sorted.len(),
            mean,
            median: median(&sorted),
            mode: mode(&sorted),
            stddev: mean.and_then(|m| sample_stddev(&sorted, m)),
            min: sorted.first().copied(),
            max: sorted.last().copied(),
        }
    }

    /// `(name, value)` rows for display.
    pub fn rows(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("Mean", self.mean),
            ("Median", self.median),
            ("Mode", self.mode),
            ("Standard Deviation", self.stddev),
            ("Minimum", self.min),
            ("Maximum", self.max),
        ]
    }
}
