//! # lms-e2e
//!
//! Regression suite for the LMS REST API.
//!
//! Runs one scenario per API test case against a live deployment, using the
//! typed clients and assertion helpers from `lms-client`, and writes the
//! results to a report directory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────────┐
//! │  TestRunner │────▶│  Scenarios  │────▶│ ScenarioContext │
//! └─────────────┘     └─────────────┘     └─────────────────┘
//!        │                   │                     │
//!        ▼                   ▼                     ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────────┐
//! │  Reporter   │     │  Fixtures   │     │   LmsClients    │
//! └─────────────┘     └─────────────┘     └─────────────────┘
//! ```

pub use crate::context::ScenarioContext;
pub use crate::fixtures::{CourseFixture, CourseSetup, ExerciseFixture, FileFixture, UserFixture};
pub use crate::models::{Assertion, Checks, ReportFormat, TestResult};
pub use crate::reporter::{
    JsonReporter, MarkdownReporter, ReportSummary, ReportWriter, ReporterError, SuiteSummary,
    TerminalReporter, TestReport, Verbosity, Verdict, create_progress_callback,
};
pub use crate::runner::{
    ProgressCallback, ProgressEvent, RunConfig, RunResults, RunnerError, TestRunner,
};
pub use crate::scenarios::{ScenarioError, TestScenario, all_scenarios};

pub mod context;
pub mod fixtures;
mod models;
pub mod reporter;
pub mod runner;
pub mod scenarios;

/// Library version, matching the crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
