//! CLI entry point for the curve grader.
//!
//! Provides subcommands for grading a CSV roster on a bell curve around a
//! chosen grade, previewing the computed boundaries, checking manual
//! boundaries, and summarizing the marks column.

mod infra;

use crate::infra::config::GradingConfig;
use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use curve_grader::grading::distribution::grade_distribution;
use curve_grader::grading::scale::parse_labels;
use curve_grader::grading::types::{BoundaryReport, GradeCount};
use curve_grader::grading::{BoundaryMap, GradeScale, allocate, validate};
use curve_grader::output::{
    log_boundaries, log_distribution, log_stats, print_json, print_pretty, write_boundary_table,
    write_graded_csv, write_json,
};
use curve_grader::parser::{Roster, load_roster};
use curve_grader::stats::MarksStats;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "curve_grader")]
#[command(about = "Assign letter grades on a bell curve centered on a chosen grade", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a CSV roster and write it back out with a grade column
    Grade {
        /// CSV file with a marks column
        #[arg(value_name = "FILE")]
        input: String,

        /// CSV file to write the graded roster to
        #[arg(short, long, default_value = "graded_students.csv")]
        output: String,

        /// Optional: JSON file to write the boundary report to
        #[arg(long)]
        report: Option<String>,

        /// Optional: CSV file to write the boundary table to
        #[arg(long)]
        table: Option<String>,

        #[command(flatten)]
        grading: GradingArgs,
    },
    /// Compute and show boundaries and the grade distribution without writing files
    Boundaries {
        /// CSV file with a marks column
        #[arg(value_name = "FILE")]
        input: String,

        /// Print the boundary report as JSON instead of one line per grade
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        grading: GradingArgs,
    },
    /// Check that manual boundaries descend strictly
    Validate {
        #[command(flatten)]
        grading: GradingArgs,
    },
    /// Show descriptive statistics of the marks column
    Stats {
        /// CSV file with a marks column
        #[arg(value_name = "FILE")]
        input: String,

        /// Name of the marks column
        #[arg(long)]
        column: Option<String>,

        /// JSON config file (defaults to $GRADER_CONFIG)
        #[arg(long)]
        config: Option<String>,

        /// Print the statistics as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GradingArgs {
    /// Grade labels, highest first (e.g. "A,B,C,D,F")
    #[arg(short, long)]
    labels: Option<String>,

    /// Grade that should receive the most students
    #[arg(short, long)]
    centric: Option<String>,

    /// Manual boundary as GRADE=MIN_MARKS; repeat for each grade
    #[arg(short, long = "boundary", value_name = "GRADE=MIN", value_parser = parse_boundary)]
    boundaries: Vec<(String, f64)>,

    /// Name of the marks column
    #[arg(long)]
    column: Option<String>,

    /// JSON config file (defaults to $GRADER_CONFIG)
    #[arg(long)]
    config: Option<String>,
}

impl GradingArgs {
    fn resolve(&self) -> Result<GradingConfig> {
        let file = GradingConfig::resolve(self.config.as_deref())?;
        let cli = GradingConfig {
            labels: self.labels.as_deref().map(parse_labels),
            centric: self.centric.clone(),
            column: self.column.clone(),
            boundaries: if self.boundaries.is_empty() {
                None
            } else {
                Some(self.boundaries.iter().cloned().collect())
            },
        };
        Ok(file.merge(cli))
    }
}

fn parse_boundary(s: &str) -> Result<(String, f64), String> {
    let (grade, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected GRADE=MIN_MARKS, got {s:?}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid minimum marks {value:?}: {e}"))?;
    Ok((grade.trim().to_string(), value))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/curve_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("curve_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grade {
            input,
            output,
            report,
            table,
            grading,
        } => {
            let config = grading.resolve()?;
            grade_file(&input, &output, report.as_deref(), table.as_deref(), &config)?;
        }
        Commands::Boundaries {
            input,
            json,
            grading,
        } => {
            let config = grading.resolve()?;
            let run = run_grading(&input, &config)?;
            if json {
                print_json(&build_report(&input, run))?;
            } else {
                log_boundaries(&run.boundaries);
                log_distribution(&run.distribution);
            }
        }
        Commands::Validate { grading } => {
            let config = grading.resolve()?;
            validate_manual(&config)?;
        }
        Commands::Stats {
            input,
            column,
            config,
            json,
        } => {
            let config = stats_config(config.as_deref(), column)?;
            let roster = load_roster(&input, config.column())?;
            let stats = MarksStats::from_marks(&roster.scores());
            print_pretty(&stats);
            if json {
                print_json(&stats)?;
            } else {
                log_stats(&stats);
            }
        }
    }

    Ok(())
}

/// Config for `stats`: only the column matters, `--column` beats the file.
fn stats_config(path: Option<&str>, column: Option<String>) -> Result<GradingConfig> {
    let file = GradingConfig::resolve(path)?;
    Ok(file.merge(GradingConfig {
        column,
        ..Default::default()
    }))
}

/// A graded roster with everything needed to report on it.
struct GradingRun {
    roster: Roster,
    scale: GradeScale,
    boundaries: BoundaryMap,
    distribution: Vec<GradeCount>,
    manual: bool,
}

/// Loads, cleans and grades `input`.
///
/// Manual boundaries that do not descend strictly are refused here, before
/// anything gets written.
#[tracing::instrument(skip(config), fields(source = %input))]
fn run_grading(input: &str, config: &GradingConfig) -> Result<GradingRun> {
    let scale = config.scale()?;
    let manual = config.manual();

    if let Some(manual) = manual {
        ensure_descending(&scale, manual)?;
    }

    let mut roster = load_roster(input, config.column())?;
    if roster.is_empty() {
        warn!("No rows with valid marks, every grade will be empty");
    }
    info!(
        students = roster.len(),
        dropped = roster.dropped,
        "Roster cleaned"
    );

    let allocation = allocate(&roster.scores(), &scale, manual);
    let distribution = grade_distribution(&allocation.grades, &scale);
    roster.apply_grades(allocation.grades);

    Ok(GradingRun {
        roster,
        scale,
        boundaries: allocation.boundaries,
        distribution,
        manual: manual.is_some(),
    })
}

/// Grades `input` and writes the graded CSV plus the optional report and table.
#[tracing::instrument(skip(config, report, table))]
fn grade_file(
    input: &str,
    output: &str,
    report: Option<&str>,
    table: Option<&str>,
    config: &GradingConfig,
) -> Result<()> {
    let run = run_grading(input, config)?;

    log_boundaries(&run.boundaries);
    log_distribution(&run.distribution);

    write_graded_csv(output, &run.roster)?;
    info!(path = output, rows = run.roster.len(), "Graded roster written");

    if let Some(path) = table {
        write_boundary_table(path, &run.boundaries)?;
        info!(path, "Boundary table written");
    }

    if let Some(path) = report {
        write_json(path, &build_report(input, run))?;
        info!(path, "Boundary report written");
    }

    Ok(())
}

fn build_report(input: &str, run: GradingRun) -> BoundaryReport {
    BoundaryReport {
        generated_at: Utc::now(),
        source: input.to_string(),
        centric: run.scale.centric().to_string(),
        manual: run.manual,
        total_students: run.roster.len(),
        dropped_rows: run.roster.dropped,
        boundaries: run.boundaries.entries().to_vec(),
        distribution: run.distribution,
    }
}

/// Validates the configured manual boundaries, failing when there are none.
#[tracing::instrument(skip(config))]
fn validate_manual(config: &GradingConfig) -> Result<()> {
    let scale = config.scale()?;
    let Some(manual) = config.manual() else {
        bail!("No manual boundaries given; pass --boundary GRADE=MIN or set them in the config");
    };

    ensure_descending(&scale, manual)?;
    log_boundaries(&BoundaryMap::from_manual(&scale, manual));
    info!("Grade boundaries are valid");
    Ok(())
}

fn ensure_descending(scale: &GradeScale, manual: &HashMap<String, f64>) -> Result<()> {
    let boundaries = BoundaryMap::from_manual(scale, manual);
    if !validate(scale.labels(), &boundaries) {
        bail!(
            "Grade boundaries must be in descending order for {}",
            scale.labels()[..scale.len() - 1].join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_grader::output::render_json;
    use std::env;
    use std::fs;

    #[test]
    fn test_parse_boundary() {
        assert_eq!(parse_boundary("A=90"), Ok(("A".to_string(), 90.0)));
        assert_eq!(parse_boundary(" A+ = 92.5"), Ok(("A+".to_string(), 92.5)));
        assert!(parse_boundary("A90").is_err());
        assert!(parse_boundary("A=high").is_err());
    }

    #[test]
    fn test_cli_parses_grade_command() {
        let cli = Cli::try_parse_from([
            "curve_grader",
            "grade",
            "marks.csv",
            "--labels",
            "A,B,F",
            "--centric",
            "B",
            "-b",
            "A=90",
            "-b",
            "B=30",
        ])
        .unwrap();

        let Commands::Grade {
            input,
            output,
            grading,
            ..
        } = cli.command
        else {
            panic!("expected grade command");
        };
        assert_eq!(input, "marks.csv");
        assert_eq!(output, "graded_students.csv");
        assert_eq!(grading.boundaries.len(), 2);
    }

    #[test]
    fn test_cli_parses_stats_flags() {
        let cli = Cli::try_parse_from([
            "curve_grader",
            "stats",
            "marks.csv",
            "--config",
            "grading.json",
            "--json",
        ])
        .unwrap();

        let Commands::Stats {
            column,
            config,
            json,
            ..
        } = cli.command
        else {
            panic!("expected stats command");
        };
        assert_eq!(column, None);
        assert_eq!(config.as_deref(), Some("grading.json"));
        assert!(json);
    }

    #[test]
    fn test_stats_config_reads_column_from_file() {
        let path = format!("{}/curve_grader_test_stats_config.json", env::temp_dir().display());
        fs::write(&path, r#"{"column": "score"}"#).unwrap();

        assert_eq!(stats_config(Some(&path), None).unwrap().column(), "score");
        assert_eq!(
            stats_config(Some(&path), Some("exam".into())).unwrap().column(),
            "exam"
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_boundary_report_json() {
        let config = GradingConfig {
            labels: Some(vec!["A".into(), "B".into(), "F".into()]),
            centric: Some("B".into()),
            ..Default::default()
        };
        let run = run_grading("tests/fixtures/roster.csv", &config).unwrap();
        let rendered = render_json(&build_report("roster.csv", run)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["centric"], "B");
        assert_eq!(json["manual"], false);
        assert_eq!(json["total_students"], 10);
        assert_eq!(json["dropped_rows"], 2);
        assert_eq!(json["boundaries"][0]["grade"], "A");
        assert_eq!(json["boundaries"][0]["min_marks"], 90.0);
        assert_eq!(json["distribution"][1]["count"], 5);
    }

    #[test]
    fn test_ensure_descending_rejects_equal() {
        let scale = GradeScale::new(vec!["A", "B", "F"], "B").unwrap();
        let manual = HashMap::from([
            ("A".to_string(), 30.0),
            ("B".to_string(), 30.0),
            ("F".to_string(), 0.0),
        ]);
        assert!(ensure_descending(&scale, &manual).is_err());
    }
}
