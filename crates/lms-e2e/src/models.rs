//! Data models for the regression suite.
//!
//! Test results, the checks recorded while a scenario runs, and report
//! formats.

use lms_client::{AssertionError, AssertionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown format (human-readable)
    #[default]
    Markdown,
    /// JSON format (machine-readable)
    Json,
    /// Both markdown and JSON
    Both,
}

/// Result of a single scenario execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Unique identifier for the scenario
    pub scenario_id: String,
    /// Human-readable description
    pub scenario_description: String,
    /// Suite the scenario belongs to (e.g., "files")
    pub suite: String,
    /// Whether the test passed
    pub passed: bool,
    /// Individual checks, in the order they ran
    pub assertions: Vec<Assertion>,
    /// curl reproductions of the requests sent, kept for failed scenarios
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub curl: Vec<String>,
    /// How long the test took
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// A single check within a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Name of the check
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Expected value
    pub expected: String,
    /// Actual value observed
    pub actual: String,
}

impl Assertion {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            expected: "as expected".to_string(),
            actual: "as expected".to_string(),
        }
    }

    pub fn failed(name: impl Into<String>, error: &AssertionError) -> Self {
        Self {
            name: format!("{} ({})", name.into(), error.name),
            passed: false,
            expected: error.expected.clone(),
            actual: error.actual.clone(),
        }
    }
}

/// Ledger of the checks a scenario performs.
///
/// Owned by the runner, so checks recorded before a failure still show up in
/// the result.
#[derive(Debug, Clone, Default)]
pub struct Checks {
    assertions: Vec<Assertion>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a check and stops the scenario on failure.
    pub fn check(
        &mut self,
        name: &str,
        result: AssertionResult,
    ) -> Result<(), crate::scenarios::ScenarioError> {
        match result {
            Ok(()) => {
                self.assertions.push(Assertion::passed(name));
                Ok(())
            }
            Err(error) => {
                self.assertions.push(Assertion::failed(name, &error));
                Err(crate::scenarios::ScenarioError::CheckFailed(name.to_string()))
            }
        }
    }

    /// Appends an already-built assertion.
    pub fn push(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    pub fn all_passed(&self) -> bool {
        self.assertions.iter().all(|a| a.passed)
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    pub fn into_assertions(self) -> Vec<Assertion> {
        self.assertions
    }
}

/// Serde helper for Duration serialization.
pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
