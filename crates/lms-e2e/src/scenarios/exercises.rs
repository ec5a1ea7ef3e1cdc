//! Exercise scenarios.

use super::{ScenarioError, TestScenario, check_schema, response_body};
use crate::context::ScenarioContext;
use crate::fixtures::{CourseSetup, ExerciseFixture};
use crate::models::Checks;
use async_trait::async_trait;
use fake::{Fake, Faker};
use lms_client::assertions::{
    assert_create_exercise_response, assert_exercise_not_found_response,
    assert_get_exercise_response, assert_get_exercises_response, assert_status_code,
    assert_update_exercise_response,
};
use lms_client::schema::{
    CreateExerciseRequest, ExerciseResponse, GetExercisesQuery, GetExercisesResponse,
    InternalErrorResponse, UpdateExerciseRequest,
};
use reqwest::StatusCode;

/// A course with one exercise in it.
async fn exercise_setup(
    ctx: &ScenarioContext,
) -> Result<(CourseSetup, ExerciseFixture), ScenarioError> {
    let setup = CourseSetup::create(ctx).await?;
    let exercise = ExerciseFixture::create(ctx, &setup.user, &setup.course).await?;
    Ok((setup, exercise))
}

pub struct CreateExerciseScenario;

#[async_trait]
impl TestScenario for CreateExerciseScenario {
    fn id(&self) -> &str {
        "exercises-create"
    }

    fn description(&self) -> &str {
        "Create an exercise in a course"
    }

    fn suite(&self) -> &str {
        "exercises"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let setup = CourseSetup::create(ctx).await?;
        let client = ctx.clients.exercises(&setup.user.credential()).await?;
        let request = CreateExerciseRequest {
            course_id: setup.course.id().to_string(),
            ..Faker.fake()
        };

        let response = client.create_exercise_api(&request).await?;

        let (body, json) = response_body::<ExerciseResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Create exercise response",
            assert_create_exercise_response(&request, &body),
        )?;
        check_schema::<ExerciseResponse>(checks, &json)
    }
}

pub struct GetExerciseScenario;

#[async_trait]
impl TestScenario for GetExerciseScenario {
    fn id(&self) -> &str {
        "exercises-get"
    }

    fn description(&self) -> &str {
        "Get an exercise by id"
    }

    fn suite(&self) -> &str {
        "exercises"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let (setup, exercise) = exercise_setup(ctx).await?;
        let client = ctx.clients.exercises(&setup.user.credential()).await?;

        let response = client.get_exercise_api(exercise.id()).await?;

        let (body, json) = response_body::<ExerciseResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Get exercise response",
            assert_get_exercise_response(&body, &exercise.response),
        )?;
        check_schema::<ExerciseResponse>(checks, &json)
    }
}

pub struct GetExercisesScenario;

#[async_trait]
impl TestScenario for GetExercisesScenario {
    fn id(&self) -> &str {
        "exercises-get-list"
    }

    fn description(&self) -> &str {
        "List the exercises of a course"
    }

    fn suite(&self) -> &str {
        "exercises"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let (setup, exercise) = exercise_setup(ctx).await?;
        let client = ctx.clients.exercises(&setup.user.credential()).await?;
        let query = GetExercisesQuery {
            course_id: setup.course.id().to_string(),
        };

        let response = client.get_exercises_api(&query).await?;

        let (body, json) =
            response_body::<GetExercisesResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Get exercises response",
            assert_get_exercises_response(&body, &[exercise.response.clone()]),
        )?;
        check_schema::<GetExercisesResponse>(checks, &json)
    }
}

pub struct UpdateExerciseScenario;

#[async_trait]
impl TestScenario for UpdateExerciseScenario {
    fn id(&self) -> &str {
        "exercises-update"
    }

    fn description(&self) -> &str {
        "Update every editable field of an exercise"
    }

    fn suite(&self) -> &str {
        "exercises"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let (setup, exercise) = exercise_setup(ctx).await?;
        let client = ctx.clients.exercises(&setup.user.credential()).await?;
        let request: UpdateExerciseRequest = Faker.fake();

        let response = client.update_exercise_api(exercise.id(), &request).await?;

        let (body, json) = response_body::<ExerciseResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Update exercise response",
            assert_update_exercise_response(&request, &body),
        )?;
        check_schema::<ExerciseResponse>(checks, &json)
    }
}

pub struct DeleteExerciseScenario;

#[async_trait]
impl TestScenario for DeleteExerciseScenario {
    fn id(&self) -> &str {
        "exercises-delete"
    }

    fn description(&self) -> &str {
        "Delete an exercise, then reading it back returns 404"
    }

    fn suite(&self) -> &str {
        "exercises"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let (setup, exercise) = exercise_setup(ctx).await?;
        let client = ctx.clients.exercises(&setup.user.credential()).await?;

        let delete_response = client.delete_exercise_api(exercise.id()).await?;
        checks.check(
            "Delete status code",
            assert_status_code(delete_response.status(), StatusCode::OK),
        )?;

        let get_response = client.get_exercise_api(exercise.id()).await?;
        let (body, json) = response_body::<InternalErrorResponse>(
            checks,
            &get_response,
            StatusCode::NOT_FOUND,
        )?;
        checks.check(
            "Not found response",
            assert_exercise_not_found_response(&body),
        )?;
        check_schema::<InternalErrorResponse>(checks, &json)
    }
}
