//! Result types produced by a grading pass.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::boundaries::{Boundary, BoundaryMap};

/// Outcome of [`allocate`](super::allocate::allocate).
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub boundaries: BoundaryMap,
    /// Target students per grade in label order; `None` for manual boundaries.
    pub target_counts: Option<Vec<usize>>,
    /// One grade per input score, in input order.
    pub grades: Vec<String>,
}

/// Number of students that received a grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeCount {
    pub grade: String,
    pub count: usize,
}

/// Summary of a grading run, written as JSON next to the graded roster.
#[derive(Debug, Serialize)]
pub struct BoundaryReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub centric: String,
    pub manual: bool,
    pub total_students: usize,
    pub dropped_rows: usize,
    pub boundaries: Vec<Boundary>,
    pub distribution: Vec<GradeCount>,
}
