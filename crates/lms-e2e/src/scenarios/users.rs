//! User scenarios.

use super::{ScenarioError, TestScenario, check_schema, response_body};
use crate::context::ScenarioContext;
use crate::fixtures::UserFixture;
use crate::models::Checks;
use async_trait::async_trait;
use lms_client::assertions::{assert_create_user_response, assert_get_user_response};
use lms_client::schema::{CreateUserRequest, CreateUserResponse, GetUserResponse};
use reqwest::StatusCode;

/// Registers a user whose email lives under the given domain.
///
/// Registered once per domain, so the server is exercised with addresses
/// of different shapes.
pub struct CreateUserScenario {
    domain: String,
    id: String,
    description: String,
}

impl CreateUserScenario {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            id: format!("users-create-{}", domain),
            description: format!("Create user with an @{} email", domain),
        }
    }
}

#[async_trait]
impl TestScenario for CreateUserScenario {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn suite(&self) -> &str {
        "users"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let request = CreateUserRequest::with_email_domain(&self.domain);

        let response = ctx.clients.public_users().create_user_api(&request).await?;

        let (body, json) =
            response_body::<CreateUserResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Create user response",
            assert_create_user_response(&request, &body),
        )?;
        check_schema::<CreateUserResponse>(checks, &json)
    }
}

/// Reads the current user back through the private client.
pub struct GetUserMeScenario;

#[async_trait]
impl TestScenario for GetUserMeScenario {
    fn id(&self) -> &str {
        "users-get-me"
    }

    fn description(&self) -> &str {
        "Get the authenticated user's profile"
    }

    fn suite(&self) -> &str {
        "users"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let client = ctx.clients.private_users(&user.credential()).await?;

        let response = client.get_user_me_api().await?;

        let (body, json) = response_body::<GetUserResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Get user response",
            assert_get_user_response(&body, &user.response),
        )?;
        check_schema::<GetUserResponse>(checks, &json)
    }
}
