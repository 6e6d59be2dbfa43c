use std::collections::HashMap;

use super::scale::GradeScale;
use super::types::GradeCount;

/// Counts students per grade in label order, including grades nobody got.
pub fn grade_distribution<S: AsRef<str>>(grades: &[S], scale: &GradeScale) -> Vec<GradeCount> {
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for g in grades {
        *tally.entry(g.as_ref()).or_default() += 1;
    }

    scale
        .labels()
        .iter()
        .map(|label| GradeCount {
            grade: label.clone(),
            count: tally.get(label.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_zero_fills() {
        let scale = GradeScale::new(vec!["A", "B", "C", "F"], "B").unwrap();
        let dist = grade_distribution(&["B", "A", "B", "F"], &scale);

        let counts: Vec<_> = dist.iter().map(|c| (c.grade.as_str(), c.count)).collect();
        assert_eq!(counts, vec![("A", 1), ("B", 2), ("C", 0), ("F", 1)]);
    }
}
