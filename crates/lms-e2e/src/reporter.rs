//! Reporters for regression runs.
//!
//! - `TerminalReporter`: coloured progress and summary output
//! - `MarkdownReporter`: human-readable report
//! - `JsonReporter`: machine-readable report
//! - `ReportWriter`: writes reports, endpoint coverage and environment
//!   properties into the results directory
//!
//! # Example
//!
//! ```no_run
//! use lms_e2e::{ReportFormat, ReportWriter, RunResults, TerminalReporter};
//! use std::path::PathBuf;
//!
//! let results = RunResults::default();
//! TerminalReporter::new().print_summary(&results);
//!
//! let writer = ReportWriter::new(PathBuf::from("lms-results"));
//! writer.write(&results, ReportFormat::Both).unwrap();
//! ```

use crate::models::{ReportFormat, TestResult, duration_serde};
use crate::runner::{ProgressCallback, ProgressEvent, RunResults};
use chrono::{DateTime, Utc};
use colored::Colorize;
use lms_client::{CoverageTracker, LmsConfig, LmsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Verbosity level for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Show only pass/fail summary.
    Quiet,
    /// Normal output with progress.
    #[default]
    Normal,
    /// Detailed output including every check.
    Verbose,
}

/// Terminal reporter for regression results.
#[derive(Debug)]
pub struct TerminalReporter {
    verbosity: Verbosity,

    /// Track current suite for grouping output.
    current_suite: Option<String>,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::with_verbosity(Verbosity::Normal)
    }

    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            current_suite: None,
        }
    }

    /// Handles a progress event, printing appropriate output.
    pub fn handle_progress(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { total_scenarios } => {
                if self.verbosity != Verbosity::Quiet {
                    self.print_run_started(total_scenarios);
                }
            }
            ProgressEvent::ScenarioStarted { scenario_id, suite } => {
                if self.verbosity == Verbosity::Verbose {
                    self.print_scenario_started(&scenario_id, &suite);
                }
            }
            ProgressEvent::ScenarioCompleted {
                scenario_id,
                passed,
                duration,
                ..
            } => {
                if self.verbosity != Verbosity::Quiet {
                    self.print_scenario_completed(&scenario_id, passed, duration);
                }
            }
            ProgressEvent::RunCompleted { results } => {
                // Summary is printed separately via print_summary
                if self.verbosity == Verbosity::Quiet {
                    self.print_quiet_summary(&results);
                }
            }
        }
    }

    fn print_run_started(&self, total: usize) {
        println!(
            "\n{}\n",
            format!(
                "Running {} scenario{}...",
                total,
                if total == 1 { "" } else { "s" }
            )
            .bold()
        );
    }

    fn print_scenario_started(&mut self, scenario_id: &str, suite: &str) {
        if self.current_suite.as_deref() != Some(suite) {
            self.current_suite = Some(suite.to_string());
            println!("{}", suite.bold().underline());
        }

        print!("  {} ", scenario_id.dimmed());
        io::stdout().flush().ok();
    }

    fn print_scenario_completed(&self, scenario_id: &str, passed: bool, duration: Duration) {
        let status = if passed { "✅" } else { "❌" };
        let duration_str = format!("({:.2}s)", duration.as_secs_f64()).dimmed();
        println!("  {} {} {}", status, scenario_id, duration_str);
    }

    fn print_quiet_summary(&self, results: &RunResults) {
        let passed = results.passed_count();
        let failed = results.failed_count();
        let total = results.total_count();

        if failed == 0 {
            println!("{}", format!("✓ {}/{} passed", passed, total).green());
        } else {
            println!("{}", format!("✗ {}/{} failed", failed, total).red());
        }
    }

    /// Prints a full summary of the run.
    pub fn print_summary(&self, results: &RunResults) {
        println!("\n{}", "━".repeat(40).dimmed());

        let passed = results.passed_count();
        let failed = results.failed_count();
        let total = results.total_count();

        let (emoji, color) = match verdict(results) {
            Verdict::Passed => ("🟢", colored::Color::Green),
            Verdict::Mixed => ("🟡", colored::Color::Yellow),
            Verdict::Failed => ("🔴", colored::Color::Red),
        };

        let verdict_text = format!("{}: {} of {} tests", verdict(results), passed, total);
        println!("{} {}", emoji, verdict_text.color(color).bold());

        let mut parts = vec![];
        if passed > 0 {
            parts.push(format!("{} passed", passed).green().to_string());
        }
        if failed > 0 {
            parts.push(format!("{} failed", failed).red().to_string());
        }
        if !parts.is_empty() {
            println!("   {}", parts.join(", "));
        }

        println!(
            "\n   {}",
            format!("Completed in {:.1}s", results.duration.as_secs_f64()).dimmed()
        );
    }

    /// Prints failed checks with the curl commands that reproduce them.
    pub fn print_failures(&self, results: &RunResults) {
        let failures = results.failures();
        if failures.is_empty() {
            return;
        }

        println!("\n{}\n", "Failed Tests:".red().bold());
        for result in failures {
            self.print_failed_test(result);
        }
    }

    fn print_failed_test(&self, result: &TestResult) {
        println!("  {} {}", "❌".red(), result.scenario_id.red().bold());
        println!("     {}\n", result.scenario_description.dimmed());

        for assertion in result.assertions.iter().filter(|a| !a.passed) {
            println!("     {} {}", "✗".red(), assertion.name);
            println!("       Expected: {}", assertion.expected.green());
            println!("       Actual:   {}", assertion.actual.red());
            println!();
        }

        if self.verbosity != Verbosity::Quiet && !result.curl.is_empty() {
            println!("     {}", "Requests:".dimmed());
            for command in &result.curl {
                for line in command.lines() {
                    println!("       {}", line.dimmed());
                }
            }
            println!();
        }
    }

    /// Prints results grouped by suite.
    pub fn print_by_suite(&self, results: &RunResults) {
        for (suite, suite_results) in results.by_suite() {
            println!("\n{}", suite.bold().underline());

            for result in suite_results {
                let status = if result.passed { "✅" } else { "❌" };
                let duration = format!("({:.2}s)", result.duration.as_secs_f64()).dimmed();
                println!("  {} {} {}", status, result.scenario_id, duration);

                if self.verbosity == Verbosity::Verbose {
                    for assertion in &result.assertions {
                        let check = if assertion.passed {
                            "└─ ✓".green()
                        } else {
                            "└─ ✗".red()
                        };
                        println!("     {} {}", check, assertion.name);
                    }
                }
            }
        }
    }
}

/// Creates a progress callback for use with TestRunner.
pub fn create_progress_callback(verbosity: Verbosity) -> ProgressCallback {
    let reporter = Arc::new(Mutex::new(TerminalReporter::with_verbosity(verbosity)));

    Box::new(move |event| {
        if let Ok(mut r) = reporter.lock() {
            r.handle_progress(event);
        }
    })
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Passed,
    Mixed,
    Failed,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Passed => write!(f, "PASSED"),
            Verdict::Mixed => write!(f, "MIXED"),
            Verdict::Failed => write!(f, "FAILED"),
        }
    }
}

pub fn verdict(results: &RunResults) -> Verdict {
    if results.all_passed() {
        Verdict::Passed
    } else if results.passed_count() > 0 {
        Verdict::Mixed
    } else {
        Verdict::Failed
    }
}

// ============================================================================
// File reports
// ============================================================================

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    /// Failed to write report file.
    #[error("failed to write report: {0}")]
    WriteError(#[from] std::io::Error),

    /// Failed to serialize report to JSON.
    #[error("failed to serialize report: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Failed to write the coverage report.
    #[error("failed to write coverage: {0}")]
    CoverageError(#[from] LmsError),
}

/// Full report structure for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub timestamp: DateTime<Utc>,

    /// Suite version used.
    pub version: String,

    #[serde(with = "duration_serde")]
    pub duration: Duration,

    pub passed: bool,

    pub verdict: Verdict,

    pub summary: ReportSummary,

    pub results: Vec<TestResult>,
}

/// Summary statistics for the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub by_suite: BTreeMap<String, SuiteSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Generates markdown reports.
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, results: &RunResults) -> String {
        let mut report = String::new();
        self.write_header(&mut report, results);
        self.write_summary(&mut report, results);
        self.write_failed_tests(&mut report, results);
        self.write_passed_tests(&mut report, results);
        report
    }

    fn write_header(&self, report: &mut String, results: &RunResults) {
        report.push_str("# LMS API Regression Report\n\n");

        let emoji = match verdict(results) {
            Verdict::Passed => "🟢",
            Verdict::Mixed => "🟡",
            Verdict::Failed => "🔴",
        };
        let _ = writeln!(report, "## {} {}\n", emoji, verdict(results));
        let _ = writeln!(
            report,
            "**Generated:** {}",
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        );
        let _ = writeln!(report, "**Version:** {}", crate::VERSION);
        let _ = writeln!(
            report,
            "**Duration:** {:.1}s\n",
            results.duration.as_secs_f64()
        );
    }

    fn write_summary(&self, report: &mut String, results: &RunResults) {
        report.push_str("## Summary\n\n");
        report.push_str("| Suite | Passed | Failed |\n");
        report.push_str("|-------|--------|--------|\n");
        for (suite, tests) in results.by_suite() {
            let passed = tests.iter().filter(|t| t.passed).count();
            let _ = writeln!(
                report,
                "| {} | {} | {} |",
                suite,
                passed,
                tests.len() - passed
            );
        }
        let _ = writeln!(
            report,
            "| **Total** | **{}** | **{}** |\n",
            results.passed_count(),
            results.failed_count()
        );
    }

    fn write_failed_tests(&self, report: &mut String, results: &RunResults) {
        let failures = results.failures();
        if failures.is_empty() {
            return;
        }

        report.push_str("## Failed Tests\n\n");
        for result in failures {
            let _ = writeln!(report, "### ❌ {}\n", result.scenario_id);
            let _ = writeln!(report, "{}\n", result.scenario_description);

            report.push_str("| Check | Expected | Actual |\n");
            report.push_str("|-------|----------|--------|\n");
            for assertion in result.assertions.iter().filter(|a| !a.passed) {
                let _ = writeln!(
                    report,
                    "| {} | {} | {} |",
                    escape_cell(&assertion.name),
                    escape_cell(&assertion.expected),
                    escape_cell(&assertion.actual)
                );
            }
            report.push('\n');

            if !result.curl.is_empty() {
                report.push_str("```bash\n");
                for command in &result.curl {
                    report.push_str(command);
                    report.push_str("\n\n");
                }
                report.push_str("```\n\n");
            }
        }
    }

    fn write_passed_tests(&self, report: &mut String, results: &RunResults) {
        let passed: Vec<_> = results.results.iter().filter(|r| r.passed).collect();
        if passed.is_empty() {
            return;
        }

        report.push_str("## Passed Tests\n\n");
        for result in passed {
            let _ = writeln!(
                report,
                "- ✅ `{}` {} ({:.2}s)",
                result.scenario_id,
                result.scenario_description,
                result.duration.as_secs_f64()
            );
        }
        report.push('\n');
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Generates JSON reports.
#[derive(Debug, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, results: &RunResults) -> Result<String, ReporterError> {
        let report = self.build_report(results);
        serde_json::to_string_pretty(&report).map_err(ReporterError::from)
    }

    pub fn build_report(&self, results: &RunResults) -> TestReport {
        let by_suite = results
            .by_suite()
            .into_iter()
            .map(|(suite, tests)| {
                let passed = tests.iter().filter(|t| t.passed).count();
                let summary = SuiteSummary {
                    total: tests.len(),
                    passed,
                    failed: tests.len() - passed,
                };
                (suite.to_string(), summary)
            })
            .collect();

        TestReport {
            timestamp: Utc::now(),
            version: crate::VERSION.to_string(),
            duration: results.duration,
            passed: results.all_passed(),
            verdict: verdict(results),
            summary: ReportSummary {
                total: results.total_count(),
                passed: results.passed_count(),
                failed: results.failed_count(),
                by_suite,
            },
            results: results.results.clone(),
        }
    }
}

/// Writes run artefacts into the results directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes reports in the specified format(s).
    pub fn write(
        &self,
        results: &RunResults,
        format: ReportFormat,
    ) -> Result<Vec<PathBuf>, ReporterError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written_files = Vec::new();
        if matches!(format, ReportFormat::Markdown | ReportFormat::Both) {
            written_files.push(self.write_markdown(results)?);
        }
        if matches!(format, ReportFormat::Json | ReportFormat::Both) {
            written_files.push(self.write_json(results)?);
        }
        Ok(written_files)
    }

    pub fn write_markdown(&self, results: &RunResults) -> Result<PathBuf, ReporterError> {
        let content = MarkdownReporter::new().generate(results);
        let path = self.output_dir.join("report.md");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_json(&self, results: &RunResults) -> Result<PathBuf, ReporterError> {
        let content = JsonReporter::new().generate(results)?;
        let path = self.output_dir.join("report.json");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes the per-endpoint hit counts as `coverage.json`.
    pub fn write_coverage(&self, coverage: &CoverageTracker) -> Result<PathBuf, ReporterError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("coverage.json");
        coverage.write_json(&path)?;
        Ok(path)
    }

    /// Writes `environment.properties` describing the target deployment.
    pub fn write_environment(&self, config: &LmsConfig) -> Result<PathBuf, ReporterError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("environment.properties");
        std::fs::write(&path, format!("{}\n", config.environment_properties()))?;
        Ok(path)
    }
}
