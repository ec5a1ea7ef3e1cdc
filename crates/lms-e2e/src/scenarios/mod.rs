//! Regression scenarios for the LMS API.
//!
//! Each scenario is one API test case: it creates whatever fixtures it
//! needs through the typed clients, sends the request under test through the
//! raw operation, and records its checks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       TestScenario                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  fixtures  → users, files, courses, exercises (typed ops)    │
//! │  request   → raw operation, response kept as data            │
//! │  checks    → status, body assertions, JSON schema            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lms_client::LmsConfig;
//! use lms_e2e::{Checks, ScenarioContext, TestScenario};
//! use lms_e2e::scenarios::LoginScenario;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = ScenarioContext::new(LmsConfig::from_env()?)?;
//!     let mut checks = Checks::new();
//!
//!     LoginScenario.run(&ctx, &mut checks).await?;
//!     println!("{} checks passed", checks.len());
//!     Ok(())
//! }
//! ```

mod authentication;
mod courses;
mod exercises;
mod files;
mod users;

pub use authentication::LoginScenario;
pub use courses::{CreateCourseScenario, GetCoursesScenario, UpdateCourseScenario};
pub use exercises::{
    CreateExerciseScenario, DeleteExerciseScenario, GetExerciseScenario, GetExercisesScenario,
    UpdateExerciseScenario,
};
pub use files::{
    CreateFileScenario, CreateFileWithEmptyDirectoryScenario, CreateFileWithEmptyFilenameScenario,
    DeleteFileScenario, GetFileScenario, GetFileWithIncorrectIdScenario,
};
pub use users::{CreateUserScenario, GetUserMeScenario};

use crate::context::ScenarioContext;
use crate::models::Checks;
use async_trait::async_trait;
use lms_client::assertions::{assert_alias_round_trip, assert_status_code, validate_json_schema};
use lms_client::schema::parse_json;
use lms_client::{LmsError, RawResponse};
use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that stop a scenario before it completes.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A recorded check failed; details are in the check ledger.
    #[error("check failed: {0}")]
    CheckFailed(String),

    /// A client call failed (transport, login, unexpected status or body).
    #[error("client error: {0}")]
    Client(#[from] LmsError),
}

/// A regression test case that runs against a live LMS.
#[async_trait]
pub trait TestScenario: Send + Sync {
    /// Unique identifier for the scenario (e.g., "files-get").
    fn id(&self) -> &str;

    /// Human-readable description of what the scenario tests.
    fn description(&self) -> &str;

    /// The suite this scenario belongs to (e.g., "files").
    fn suite(&self) -> &str;

    /// Runs the scenario, recording every check into `checks`.
    ///
    /// Returns an error on the first failed check or client failure.
    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError>;
}

/// Returns every registered scenario, grouped by suite.
pub fn all_scenarios() -> Vec<Box<dyn TestScenario>> {
    vec![
        // Authentication
        Box::new(LoginScenario),
        // Users
        Box::new(CreateUserScenario::new("mail.ru")),
        Box::new(CreateUserScenario::new("gmail.com")),
        Box::new(CreateUserScenario::new("example.com")),
        Box::new(GetUserMeScenario),
        // Files
        Box::new(CreateFileScenario),
        Box::new(GetFileScenario),
        Box::new(CreateFileWithEmptyFilenameScenario),
        Box::new(CreateFileWithEmptyDirectoryScenario),
        Box::new(DeleteFileScenario),
        Box::new(GetFileWithIncorrectIdScenario),
        // Courses
        Box::new(CreateCourseScenario),
        Box::new(GetCoursesScenario),
        Box::new(UpdateCourseScenario),
        // Exercises
        Box::new(CreateExerciseScenario),
        Box::new(GetExerciseScenario),
        Box::new(GetExercisesScenario),
        Box::new(UpdateExerciseScenario),
        Box::new(DeleteExerciseScenario),
    ]
}

/// Checks the status code, then parses the body as `T`.
///
/// Returns the model together with the raw JSON so the caller can validate
/// it against the schema after its own field checks.
pub(crate) fn response_body<T: DeserializeOwned + JsonSchema>(
    checks: &mut Checks,
    response: &RawResponse,
    expected: StatusCode,
) -> Result<(T, Value), ScenarioError> {
    checks.check(
        "Status code",
        assert_status_code(response.status(), expected),
    )?;
    let model: T = parse_json(response.body())?;
    let json: Value = response.json()?;
    Ok((model, json))
}

/// Validates the raw body against the JSON Schema derived from `T`, then
/// checks that `T` reproduces it key for key.
pub(crate) fn check_schema<T>(checks: &mut Checks, json: &Value) -> Result<(), ScenarioError>
where
    T: JsonSchema + DeserializeOwned + Serialize,
{
    checks.check("JSON schema", validate_json_schema::<T>(json))?;
    checks.check("Alias round trip", assert_alias_round_trip::<T>(json))
}
