//! Error types for grade allocation.

use thiserror::Error;

/// Errors raised while setting up or running a grading pass.
///
/// Malformed score rows are not errors; the cleaner drops and counts them.
#[derive(Debug, Error, PartialEq)]
pub enum GradingError {
    /// Fewer than two grade labels were supplied
    #[error("at least two grade labels are required, got {0}")]
    TooFewLabels(usize),

    /// A label was empty after trimming
    #[error("grade label at position {0} is empty")]
    EmptyLabel(usize),

    /// The same label appears more than once
    #[error("duplicate grade label: {0}")]
    DuplicateLabel(String),

    /// The centric grade is not one of the labels
    #[error("centric grade {0:?} is not one of the grade labels")]
    UnknownCentric(String),

    /// The roster has no column with the expected name
    #[error("input must contain a {0:?} column")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, GradingError>;
