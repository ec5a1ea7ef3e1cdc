//! Authentication scenarios.

use super::{ScenarioError, TestScenario, check_schema, response_body};
use crate::context::ScenarioContext;
use crate::fixtures::UserFixture;
use crate::models::Checks;
use async_trait::async_trait;
use lms_client::assertions::assert_login_response;
use lms_client::schema::{LoginRequest, LoginResponse};
use reqwest::StatusCode;

/// Logs in as a freshly registered user and checks the token envelope.
pub struct LoginScenario;

#[async_trait]
impl TestScenario for LoginScenario {
    fn id(&self) -> &str {
        "authentication-login"
    }

    fn description(&self) -> &str {
        "Login with valid credentials returns a bearer token pair"
    }

    fn suite(&self) -> &str {
        "authentication"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let request = LoginRequest {
            email: user.email().to_string(),
            password: user.password().to_string(),
        };

        let response = ctx.clients.authentication().login_api(&request).await?;

        let (body, json) = response_body::<LoginResponse>(checks, &response, StatusCode::OK)?;
        checks.check("Login response", assert_login_response(&body))?;
        check_schema::<LoginResponse>(checks, &json)
    }
}
