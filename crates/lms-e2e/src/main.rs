//! # lms-e2e
//!
//! Runs the LMS API regression suite against a live deployment.
//!
//! ## Usage
//!
//! ```bash
//! # Run every scenario against LMS_HTTP_CLIENT_URL (or localhost:8000)
//! lms-e2e
//!
//! # Run only the file scenarios against another deployment
//! lms-e2e --filter files --url http://lms.staging:8000
//!
//! # List available scenarios
//! lms-e2e --list
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use lms_client::LmsConfig;
use lms_e2e::{
    ReportFormat as LibReportFormat, ReportWriter, RunConfig, RunResults, ScenarioContext,
    TerminalReporter, TestRunner, Verbosity, all_scenarios, create_progress_callback,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Regression suite for the LMS REST API.
///
/// Registers throwaway users, exercises every endpoint and checks the
/// responses field by field and against their JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "lms-e2e")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show every check and request log
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show pass/fail summary
    #[arg(short, long)]
    pub quiet: bool,

    /// List available scenarios without running them
    #[arg(long)]
    pub list: bool,

    /// Run only scenarios whose id, description or suite contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// LMS base URL (overrides LMS_HTTP_CLIENT_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory for reports (overrides LMS_RESULTS_DIR)
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Generate report in specified format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub report: ReportFormat,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Markdown format (human-readable)
    #[default]
    Markdown,
    /// JSON format (machine-readable)
    Json,
    /// Both markdown and JSON
    Both,
}

impl ReportFormat {
    fn to_lib_format(self) -> LibReportFormat {
        match self {
            ReportFormat::Markdown => LibReportFormat::Markdown,
            ReportFormat::Json => LibReportFormat::Json,
            ReportFormat::Both => LibReportFormat::Both,
        }
    }
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Environment configuration with command-line overrides applied.
    fn config(&self) -> anyhow::Result<LmsConfig> {
        let env = LmsConfig::from_env().context("Failed to load configuration")?;
        let config = LmsConfig::new(
            self.url.clone().unwrap_or(env.base_url),
            Some(env.timeout),
            Some(env.image_png_file),
            Some(self.results_dir.clone().unwrap_or(env.results_dir)),
        )?;
        Ok(config)
    }
}

fn init_tracing(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Verbose => "info",
        Verbosity::Normal | Verbosity::Quiet => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    init_tracing(verbosity);

    println!(
        "\n{} {}",
        "🧪 LMS API Regression".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", "━".repeat(40).dimmed());

    if cli.list {
        list_scenarios();
        return ExitCode::SUCCESS;
    }

    match run_tests(&cli, verbosity).await {
        Ok(results) if results.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\n{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn list_scenarios() {
    let scenarios = all_scenarios();
    println!("{}\n", "Available scenarios:".bold());

    let mut current_suite = String::new();
    for scenario in &scenarios {
        if scenario.suite() != current_suite {
            current_suite = scenario.suite().to_string();
            println!("  {}", current_suite.bold().underline());
        }
        println!(
            "    {}  {}",
            scenario.id().cyan(),
            scenario.description().dimmed()
        );
    }

    println!(
        "\n  {}",
        format!(
            "Total: {} scenario{}",
            scenarios.len(),
            if scenarios.len() == 1 { "" } else { "s" }
        )
        .dimmed()
    );
}

async fn run_tests(cli: &Cli, verbosity: Verbosity) -> anyhow::Result<RunResults> {
    let config = cli.config()?;
    if verbosity != Verbosity::Quiet {
        println!("{}", format!("Target: {}", config.base_url).dimmed());
    }

    let results_dir = config.results_dir.clone();
    let context = ScenarioContext::new(config).context("Failed to build LMS clients")?;

    let mut run_config = RunConfig::new();
    if let Some(filter) = &cli.filter {
        run_config = run_config.with_filter(filter);
    }

    let runner = TestRunner::new(context, all_scenarios())
        .on_progress(create_progress_callback(verbosity));
    let results = runner.run(&run_config).await?;

    write_reports(&runner, &results, results_dir, cli.report.to_lib_format(), verbosity);

    let reporter = TerminalReporter::with_verbosity(verbosity);
    if verbosity == Verbosity::Verbose {
        reporter.print_by_suite(&results);
    }
    if !results.all_passed() {
        reporter.print_failures(&results);
    }
    reporter.print_summary(&results);

    Ok(results)
}

/// Report files are best effort: a write failure is shown but does not
/// change the exit code.
fn write_reports(
    runner: &TestRunner,
    results: &RunResults,
    results_dir: PathBuf,
    format: LibReportFormat,
    verbosity: Verbosity,
) {
    let writer = ReportWriter::new(results_dir);
    let context = runner.context();

    let written = [
        writer.write(results, format),
        writer.write_coverage(&context.coverage).map(|p| vec![p]),
        writer.write_environment(&context.config).map(|p| vec![p]),
    ];

    for outcome in written {
        match outcome {
            Ok(paths) => {
                if verbosity != Verbosity::Quiet {
                    for path in paths {
                        println!("{}", format!("Report written: {}", path.display()).dimmed());
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to write report");
                eprintln!("{} Failed to write report: {}", "Warning:".yellow(), e);
            }
        }
    }
}
