use anyhow::Result;
use curve_grader::grading::GradeScale;
use curve_grader::grading::scale::DEFAULT_LABELS;
use curve_grader::parser::DEFAULT_MARKS_COLUMN;
use serde::Deserialize;
use std::collections::HashMap;

/// Environment variable naming a config file to use when `--config` is absent.
pub const CONFIG_ENV: &str = "GRADER_CONFIG";

/// Grading settings, stored as a JSON object on disk:
/// ```json
/// {
///   "labels": ["A", "B", "C", "F"],
///   "centric": "B",
///   "column": "marks",
///   "boundaries": { "A": 85, "B": 60, "C": 40, "F": 0 }
/// }
/// ```
/// Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradingConfig {
    pub labels: Option<Vec<String>>,
    pub centric: Option<String>,
    pub column: Option<String>,
    pub boundaries: Option<HashMap<String, f64>>,
}

impl GradingConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GradingConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path`, or the file named by [`CONFIG_ENV`], or nothing.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) if !p.is_empty() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Values set in `overrides` win; the rest come from `self`.
    pub fn merge(self, overrides: GradingConfig) -> Self {
        Self {
            labels: overrides.labels.or(self.labels),
            centric: overrides.centric.or(self.centric),
            column: overrides.column.or(self.column),
            boundaries: overrides.boundaries.or(self.boundaries),
        }
    }

    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(DEFAULT_MARKS_COLUMN)
    }

    /// Manual boundaries, treating an empty map as none.
    pub fn manual(&self) -> Option<&HashMap<String, f64>> {
        self.boundaries.as_ref().filter(|m| !m.is_empty())
    }

    /// Builds the grade scale, defaulting to [`DEFAULT_LABELS`] and the first label as centric.
    pub fn scale(&self) -> Result<GradeScale> {
        let labels: Vec<String> = match &self.labels {
            Some(labels) => labels.clone(),
            None => DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
        };
        let centric = match &self.centric {
            Some(c) => c.clone(),
            None => labels.first().cloned().unwrap_or_default(),
        };
        Ok(GradeScale::new(labels, &centric)?)
    }
}
