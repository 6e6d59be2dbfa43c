use std::collections::HashSet;

use crate::error::{GradingError, Result};

/// Labels used when none are configured, highest first.
pub const DEFAULT_LABELS: &[&str] = &["A+", "A", "B", "C", "D", "E", "F"];

/// An ordered set of grade labels (highest first) with one centric label.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    labels: Vec<String>,
    centric: usize,
}

impl GradeScale {
    /// Builds a scale, rejecting fewer than two labels, empty or duplicate
    /// labels, and a centric grade that is not one of the labels.
    pub fn new<S: Into<String>>(labels: Vec<S>, centric: &str) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.len() < 2 {
            return Err(GradingError::TooFewLabels(labels.len()));
        }

        let mut seen = HashSet::new();
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(GradingError::EmptyLabel(i));
            }
            if !seen.insert(label.as_str()) {
                return Err(GradingError::DuplicateLabel(label.clone()));
            }
        }

        let centric = labels
            .iter()
            .position(|l| l == centric)
            .ok_or_else(|| GradingError::UnknownCentric(centric.to_string()))?;

        Ok(Self { labels, centric })
    }

    /// Builds a scale from [`DEFAULT_LABELS`].
    pub fn with_default_labels(centric: &str) -> Result<Self> {
        Self::new(DEFAULT_LABELS.to_vec(), centric)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn centric_index(&self) -> usize {
        self.centric
    }

    pub fn centric(&self) -> &str {
        &self.labels[self.centric]
    }

    /// The catch-all floor grade.
    pub fn lowest(&self) -> &str {
        &self.labels[self.labels.len() - 1]
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// Splits a comma-separated label list, trimming each entry.
///
/// Empty entries are kept so that [`GradeScale::new`] can report them.
pub fn parse_labels(input: &str) -> Vec<String> {
    input.split(',').map(|l| l.trim().to_string()).collect()
}
