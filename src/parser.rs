//! CSV roster reader and marks cleaner.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::GradingError;

/// Column holding the scores unless configured otherwise.
pub const DEFAULT_MARKS_COLUMN: &str = "marks";

/// One student row. `row` keeps every original column for export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub marks: f64,
    pub row: StringRecord,
    pub grade: Option<String>,
}

/// A cleaned roster: only rows with numeric marks survive.
#[derive(Debug, Clone)]
pub struct Roster {
    pub headers: StringRecord,
    pub marks_column: usize,
    pub records: Vec<ScoreRecord>,
    pub dropped: usize,
}

impl Roster {
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.marks).collect()
    }

    /// Attaches grades positionally; `grades` must follow record order.
    pub fn apply_grades(&mut self, grades: Vec<String>) {
        for (record, grade) in self.records.iter_mut().zip(grades) {
            record.grade = Some(grade);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Marks surviving coercion and how many values were thrown away.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedMarks {
    pub marks: Vec<f64>,
    pub dropped: usize,
}

/// Parses one raw cell as a mark. Empty, non-numeric and non-finite values yield `None`.
pub fn coerce_marks(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Keeps the items whose mark cell coerces to a number, pairing each with it.
///
/// `cell` picks the raw mark out of an item; `None` (a missing field) counts
/// as invalid. Returns the survivors in input order and the dropped count.
pub fn retain_numeric<T, I, F>(items: I, cell: F) -> (Vec<(f64, T)>, usize)
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<&str>,
{
    let mut kept = Vec::new();
    let mut dropped = 0;
    for item in items {
        match cell(&item).and_then(coerce_marks) {
            Some(m) => kept.push((m, item)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "Found rows with invalid marks, removing them");
    }

    (kept, dropped)
}

/// Coerces a raw column, dropping values that are not numbers.
pub fn clean_marks<I, S>(values: I) -> CleanedMarks
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (kept, dropped) = retain_numeric(values, |v| Some(v.as_ref()));
    CleanedMarks {
        marks: kept.into_iter().map(|(m, _)| m).collect(),
        dropped,
    }
}

/// Reads a CSV roster and keeps the rows whose `column` holds a number.
///
/// # Errors
///
/// Fails on malformed CSV or when the header has no `column`. Bad marks are
/// counted in [`Roster::dropped`] instead.
pub fn read_roster<R: Read>(reader: R, column: &str) -> Result<Roster> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let marks_column = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| GradingError::MissingColumn(column.to_string()))?;

    let rows = rdr.records().collect::<csv::Result<Vec<StringRecord>>>()?;
    let (kept, dropped) = retain_numeric(rows, |row| row.get(marks_column));
    let records: Vec<ScoreRecord> = kept
        .into_iter()
        .map(|(marks, row)| ScoreRecord {
            marks,
            row,
            grade: None,
        })
        .collect();

    debug!(kept = records.len(), dropped, "Roster loaded");

    Ok(Roster {
        headers,
        marks_column,
        records,
        dropped,
    })
}

/// Opens `path` and reads it with [`read_roster`].
pub fn load_roster(path: impl AsRef<Path>, column: &str) -> Result<Roster> {
    let file = File::open(path.as_ref())?;
    read_roster(file, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_marks_drops_invalid() {
        let cleaned = clean_marks(["55", "bad", "70", ""]);
        assert_eq!(cleaned.marks, vec![55.0, 70.0]);
        assert_eq!(cleaned.dropped, 2);
    }

    #[test]
    fn test_coerce_marks() {
        assert_eq!(coerce_marks(" 42.5 "), Some(42.5));
        assert_eq!(coerce_marks("1e2"), Some(100.0));
        assert_eq!(coerce_marks("NaN"), None);
        assert_eq!(coerce_marks("inf"), None);
        assert_eq!(coerce_marks("12abc"), None);
    }

    #[test]
    fn test_retain_numeric_pairs_marks_with_rows() {
        let rows = vec![vec!["ana", "55"], vec!["bo"], vec!["cy", "x"], vec!["dee", "70"]];
        let (kept, dropped) = retain_numeric(rows, |r| r.get(1).copied());

        assert_eq!(dropped, 2);
        let names: Vec<_> = kept.iter().map(|(m, r)| (*m, r[0])).collect();
        assert_eq!(names, vec![(55.0, "ana"), (70.0, "dee")]);
    }

    #[test]
    fn test_read_roster_matches_clean_marks() {
        let raw = ["55", "bad", "70", ""];
        let data = format!("marks\n{}\n", raw.map(|v| format!("\"{v}\"")).join("\n"));
        let roster = read_roster(data.as_bytes(), "marks").unwrap();
        let cleaned = clean_marks(raw);

        assert_eq!(roster.scores(), cleaned.marks);
        assert_eq!(roster.dropped, cleaned.dropped);
    }

    #[test]
    fn test_clean_marks_all_invalid_is_empty() {
        let cleaned = clean_marks(["x", "y"]);
        assert!(cleaned.marks.is_empty());
        assert_eq!(cleaned.dropped, 2);
    }

    #[test]
    fn test_read_roster_keeps_other_columns() {
        let data = "name,marks\nana,55\nbo,bad\ncy,70\ndee,\n";
        let roster = read_roster(data.as_bytes(), "marks").unwrap();

        assert_eq!(roster.scores(), vec![55.0, 70.0]);
        assert_eq!(roster.dropped, 2);
        assert_eq!(roster.marks_column, 1);
        assert_eq!(&roster.records[1].row[0], "cy");
    }

    #[test]
    fn test_read_roster_short_row_is_dropped() {
        let data = "name,marks\nana,55\nbo\n";
        let roster = read_roster(data.as_bytes(), "marks").unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.dropped, 1);
    }

    #[test]
    fn test_read_roster_missing_column() {
        let data = "name,score\nana,55\n";
        let err = read_roster(data.as_bytes(), "marks").unwrap_err();
        assert_eq!(
            err.downcast_ref::<GradingError>(),
            Some(&GradingError::MissingColumn("marks".to_string()))
        );
    }

    #[test]
    fn test_apply_grades() {
        let data = "marks\n10\n20\n";
        let mut roster = read_roster(data.as_bytes(), "marks").unwrap();
        roster.apply_grades(vec!["F".into(), "A".into()]);
        assert_eq!(roster.records[1].grade.as_deref(), Some("A"));
    }
}
