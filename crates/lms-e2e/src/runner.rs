//! Test runner for the regression suite.
//!
//! The TestRunner selects scenarios, runs them one after another against the
//! shared [`ScenarioContext`], and collects results for reporting.
//!
//! # Example
//!
//! ```no_run
//! use lms_client::LmsConfig;
//! use lms_e2e::{RunConfig, ScenarioContext, TestRunner, all_scenarios};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let context = ScenarioContext::new(LmsConfig::from_env()?)?;
//!     let runner = TestRunner::new(context, all_scenarios());
//!     let results = runner.run(&RunConfig::new().with_filter("files")).await?;
//!
//!     println!("Passed: {}", results.passed_count());
//!     Ok(())
//! }
//! ```

use crate::context::ScenarioContext;
use crate::models::{Assertion, Checks, TestResult};
use crate::scenarios::{ScenarioError, TestScenario};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// No scenarios matched the filter.
    #[error("no scenarios matched filter: {0}")]
    NoMatchingScenarios(String),
}

/// Configuration for a test run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Filter scenarios by pattern (matches id, description or suite).
    pub filter: Option<String>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Aggregated results from a test run.
#[derive(Debug, Clone, Default)]
pub struct RunResults {
    /// Individual test results, in execution order.
    pub results: Vec<TestResult>,

    /// Total duration of the run.
    pub duration: Duration,
}

impl RunResults {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Returns results grouped by suite, suites in name order.
    pub fn by_suite(&self) -> Vec<(&str, Vec<&TestResult>)> {
        let mut suites: BTreeMap<&str, Vec<&TestResult>> = BTreeMap::new();
        for result in &self.results {
            suites.entry(&result.suite).or_default().push(result);
        }
        suites.into_iter().collect()
    }

    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Progress callback for test execution updates.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted during test execution.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A test run has started.
    RunStarted { total_scenarios: usize },

    /// A scenario is about to execute.
    ScenarioStarted { scenario_id: String, suite: String },

    /// A scenario has completed.
    ScenarioCompleted {
        scenario_id: String,
        passed: bool,
        duration: Duration,
        result: TestResult,
    },

    /// The test run has completed.
    RunCompleted { results: RunResults },
}

/// Runs regression scenarios against one LMS deployment.
pub struct TestRunner {
    context: ScenarioContext,
    scenarios: Vec<Box<dyn TestScenario>>,
    on_progress: Option<ProgressCallback>,
}

impl TestRunner {
    pub fn new(context: ScenarioContext, scenarios: Vec<Box<dyn TestScenario>>) -> Self {
        Self {
            context,
            scenarios,
            on_progress: None,
        }
    }

    /// Sets a callback for progress updates.
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn context(&self) -> &ScenarioContext {
        &self.context
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns scenarios matching the given config, in registration order.
    pub fn matching_scenarios(&self, config: &RunConfig) -> Vec<&dyn TestScenario> {
        self.scenarios
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| matches_filter(*s, config.filter.as_deref()))
            .collect()
    }

    /// Runs all scenarios matching the configuration.
    ///
    /// A scenario that errors is recorded as a failed result; the run carries
    /// on with the next scenario.
    pub async fn run(&self, config: &RunConfig) -> Result<RunResults, RunnerError> {
        let start = Instant::now();
        let matching = self.matching_scenarios(config);

        if let Some(filter) = &config.filter
            && matching.is_empty()
        {
            return Err(RunnerError::NoMatchingScenarios(filter.clone()));
        }

        self.emit_progress(ProgressEvent::RunStarted {
            total_scenarios: matching.len(),
        });

        let mut results = Vec::with_capacity(matching.len());
        for scenario in matching {
            let result = self.run_scenario(scenario).await;

            self.emit_progress(ProgressEvent::ScenarioCompleted {
                scenario_id: result.scenario_id.clone(),
                passed: result.passed,
                duration: result.duration,
                result: result.clone(),
            });
            results.push(result);
        }

        let run_results = RunResults {
            results,
            duration: start.elapsed(),
        };
        info!(
            passed = run_results.passed_count(),
            failed = run_results.failed_count(),
            "Run finished"
        );

        self.emit_progress(ProgressEvent::RunCompleted {
            results: run_results.clone(),
        });

        Ok(run_results)
    }

    /// Runs all registered scenarios.
    pub async fn run_all(&self) -> Result<RunResults, RunnerError> {
        self.run(&RunConfig::default()).await
    }

    async fn run_scenario(&self, scenario: &dyn TestScenario) -> TestResult {
        self.emit_progress(ProgressEvent::ScenarioStarted {
            scenario_id: scenario.id().to_string(),
            suite: scenario.suite().to_string(),
        });
        self.context.curl.clear();

        let mut checks = Checks::new();
        let scenario_start = Instant::now();
        let outcome = scenario.run(&self.context, &mut checks).await;
        let duration = scenario_start.elapsed();

        match &outcome {
            Ok(()) => {}
            Err(ScenarioError::CheckFailed(check)) => {
                warn!(scenario = scenario.id(), check = %check, "Check failed");
            }
            Err(e) => {
                warn!(scenario = scenario.id(), error = %e, "Scenario errored");
                checks.push(Assertion {
                    name: "Execution".to_string(),
                    passed: false,
                    expected: "Scenario executes successfully".to_string(),
                    actual: format!("Error: {}", e),
                });
            }
        }

        let passed = outcome.is_ok() && checks.all_passed();
        let curl = if passed {
            Vec::new()
        } else {
            self.context.curl.drain()
        };

        TestResult {
            scenario_id: scenario.id().to_string(),
            scenario_description: scenario.description().to_string(),
            suite: scenario.suite().to_string(),
            passed,
            assertions: checks.into_assertions(),
            curl,
            duration,
        }
    }

    fn emit_progress(&self, event: ProgressEvent) {
        if let Some(callback) = &self.on_progress {
            callback(event);
        }
    }
}

/// Case-insensitive substring match on id, description or suite.
fn matches_filter(scenario: &dyn TestScenario, filter: Option<&str>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let filter = filter.to_lowercase();

    [scenario.id(), scenario.description(), scenario.suite()]
        .iter()
        .any(|field| field.to_lowercase().contains(&filter))
}
