use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use super::scale::GradeScale;

/// Minimum score required for a grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boundary {
    pub grade: String,
    pub min_marks: f64,
}

/// Ordered grade thresholds, highest grade first.
///
/// Labels whose threshold was never computed are absent. Scores that match
/// no entry fall back to `fallback`, the lowest label of the scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryMap {
    entries: Vec<Boundary>,
    #[serde(skip)]
    fallback: String,
}

impl BoundaryMap {
    pub fn new(scale: &GradeScale) -> Self {
        Self {
            entries: Vec::with_capacity(scale.len()),
            fallback: scale.lowest().to_string(),
        }
    }

    /// Orders caller-supplied thresholds by the scale's labels.
    ///
    /// Values are kept verbatim; nothing is checked or filled in. Keys that
    /// are not labels of the scale are dropped.
    pub fn from_manual(scale: &GradeScale, manual: &HashMap<String, f64>) -> Self {
        for key in manual.keys() {
            if scale.position(key).is_none() {
                warn!(grade = %key, "Ignoring manual boundary for unknown grade");
            }
        }

        let mut map = Self::new(scale);
        for label in scale.labels() {
            if let Some(&min_marks) = manual.get(label) {
                map.push(label, min_marks);
            }
        }
        map
    }

    pub(crate) fn push(&mut self, grade: &str, min_marks: f64) {
        self.entries.push(Boundary {
            grade: grade.to_string(),
            min_marks,
        });
    }

    pub fn get(&self, grade: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|b| b.grade == grade)
            .map(|b| b.min_marks)
    }

    pub fn entries(&self) -> &[Boundary] {
        &self.entries
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> GradeScale {
        GradeScale::new(vec!["A", "B", "F"], "B").unwrap()
    }

    #[test]
    fn test_from_manual_follows_label_order() {
        let manual = HashMap::from([
            ("F".to_string(), 0.0),
            ("A".to_string(), 90.0),
            ("B".to_string(), 30.0),
        ]);
        let map = BoundaryMap::from_manual(&scale(), &manual);

        let grades: Vec<_> = map.entries().iter().map(|b| b.grade.as_str()).collect();
        assert_eq!(grades, vec!["A", "B", "F"]);
        assert_eq!(map.get("A"), Some(90.0));
        assert_eq!(map.fallback(), "F");
    }

    #[test]
    fn test_from_manual_drops_unknown_and_keeps_gaps() {
        let manual = HashMap::from([("A".to_string(), 80.0), ("Z".to_string(), 5.0)]);
        let map = BoundaryMap::from_manual(&scale(), &manual);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("B"), None);
        assert_eq!(map.get("Z"), None);
    }
}
