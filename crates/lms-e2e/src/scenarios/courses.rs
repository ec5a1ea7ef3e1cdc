//! Course scenarios.

use super::{ScenarioError, TestScenario, check_schema, response_body};
use crate::context::ScenarioContext;
use crate::fixtures::{CourseSetup, FileFixture, UserFixture};
use crate::models::Checks;
use async_trait::async_trait;
use fake::{Fake, Faker};
use lms_client::assertions::{
    assert_create_course_response, assert_get_courses_response, assert_update_course_response,
};
use lms_client::schema::{
    CreateCourseRequest, CreateCourseResponse, GetCoursesQuery, GetCoursesResponse,
    UpdateCourseRequest, UpdateCourseResponse,
};
use reqwest::StatusCode;

pub struct CreateCourseScenario;

#[async_trait]
impl TestScenario for CreateCourseScenario {
    fn id(&self) -> &str {
        "courses-create"
    }

    fn description(&self) -> &str {
        "Create a course with a preview file"
    }

    fn suite(&self) -> &str {
        "courses"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let file = FileFixture::create(ctx, &user).await?;
        let client = ctx.clients.courses(&user.credential()).await?;
        let request = CreateCourseRequest {
            preview_file_id: file.id().to_string(),
            created_by_user_id: user.id().to_string(),
            ..Faker.fake()
        };

        let response = client.create_course_api(&request).await?;

        let (body, json) =
            response_body::<CreateCourseResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Create course response",
            assert_create_course_response(&request, &body),
        )?;
        check_schema::<CreateCourseResponse>(checks, &json)
    }
}

pub struct GetCoursesScenario;

#[async_trait]
impl TestScenario for GetCoursesScenario {
    fn id(&self) -> &str {
        "courses-get-list"
    }

    fn description(&self) -> &str {
        "List the courses created by a user"
    }

    fn suite(&self) -> &str {
        "courses"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let setup = CourseSetup::create(ctx).await?;
        let client = ctx.clients.courses(&setup.user.credential()).await?;
        let query = GetCoursesQuery {
            user_id: setup.user.id().to_string(),
        };

        let response = client.get_courses_api(&query).await?;

        let (body, json) =
            response_body::<GetCoursesResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Get courses response",
            assert_get_courses_response(&body, &[setup.course.response.clone()]),
        )?;
        check_schema::<GetCoursesResponse>(checks, &json)
    }
}

pub struct UpdateCourseScenario;

#[async_trait]
impl TestScenario for UpdateCourseScenario {
    fn id(&self) -> &str {
        "courses-update"
    }

    fn description(&self) -> &str {
        "Update every editable field of a course"
    }

    fn suite(&self) -> &str {
        "courses"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let setup = CourseSetup::create(ctx).await?;
        let client = ctx.clients.courses(&setup.user.credential()).await?;
        let request: UpdateCourseRequest = Faker.fake();

        let response = client
            .update_course_api(setup.course.id(), &request)
            .await?;

        let (body, json) =
            response_body::<UpdateCourseResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Update course response",
            assert_update_course_response(&request, &body),
        )?;
        check_schema::<UpdateCourseResponse>(checks, &json)
    }
}
