//! Output formatting and persistence for graded rosters.
//!
//! Supports logging the boundary table, writing the graded roster as CSV and
//! the run summary as JSON.

use anyhow::Result;
use csv::{StringRecord, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::grading::types::GradeCount;
use crate::grading::BoundaryMap;
use crate::parser::Roster;
use crate::stats::MarksStats;

/// Name of the column holding the assigned grade.
pub const GRADE_COLUMN: &str = "grade";

/// Logs any value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Renders a value as pretty-printed JSON.
pub fn render_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", render_json(value)?);
    Ok(())
}

/// Logs one line per boundary, highest grade first.
pub fn log_boundaries(boundaries: &BoundaryMap) {
    for b in boundaries.entries() {
        info!(grade = %b.grade, min_marks = b.min_marks, "Grade boundary");
    }
}

pub fn log_distribution(distribution: &[GradeCount]) {
    for c in distribution {
        info!(grade = %c.grade, count = c.count, "Grade count");
    }
}

pub fn log_stats(stats: &MarksStats) {
    info!(count = stats.count, "Marks statistics");
    for (name, value) in stats.rows() {
        match value {
            Some(v) => info!(statistic = name, value = v, "Statistic"),
            None => info!(statistic = name, value = "N/A", "Statistic"),
        }
    }
}

/// Writes the roster with a `grade` column.
///
/// All original columns are kept. An existing `grade` column is overwritten
/// in place; otherwise one is appended.
pub fn write_graded<W: Write>(writer: W, roster: &Roster) -> Result<()> {
    let grade_idx = roster
        .headers
        .iter()
        .position(|h| h.trim() == GRADE_COLUMN);

    let mut headers = roster.headers.clone();
    if grade_idx.is_none() {
        headers.push_field(GRADE_COLUMN);
    }

    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&headers)?;

    for record in &roster.records {
        let grade = record.grade.as_deref().unwrap_or("");
        let row: StringRecord = match grade_idx {
            Some(idx) => record
                .row
                .iter()
                .enumerate()
                .map(|(i, field)| if i == idx { grade } else { field })
                .collect(),
            None => {
                let mut row = record.row.clone();
                row.push_field(grade);
                row
            }
        };
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the graded roster to `path`, replacing any existing file.
pub fn write_graded_csv(path: &str, roster: &Roster) -> Result<()> {
    debug!(path, rows = roster.len(), "Writing graded CSV");
    ensure_parent(path)?;
    write_graded(File::create(path)?, roster)
}

/// Writes `(grade, min_marks)` rows to a CSV file.
pub fn write_boundary_table(path: &str, boundaries: &BoundaryMap) -> Result<()> {
    ensure_parent(path)?;
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for b in boundaries.entries() {
        wtr.serialize(b)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serializes `value` as pretty JSON into `path`.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body)?;
    Ok(())
}

fn ensure_parent(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
