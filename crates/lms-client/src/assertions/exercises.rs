use super::AssertionResult;
use super::base::{assert_equal, assert_length};
use super::errors::assert_internal_error_response;
use crate::schema::{
    CreateExerciseRequest, Exercise, ExerciseResponse, GetExercisesResponse,
    InternalErrorResponse, UpdateExerciseRequest,
};
use tracing::info;

pub fn assert_create_exercise_response(
    request: &CreateExerciseRequest,
    response: &ExerciseResponse,
) -> AssertionResult {
    info!("Check create exercise response");
    let exercise = &response.exercise;
    assert_equal(&exercise.title, &request.title, "title")?;
    assert_equal(&exercise.course_id, &request.course_id, "course_id")?;
    assert_equal(&exercise.max_score, &request.max_score, "max_score")?;
    assert_equal(&exercise.min_score, &request.min_score, "min_score")?;
    assert_equal(&exercise.order_index, &request.order_index, "order_index")?;
    assert_equal(&exercise.description, &request.description, "description")?;
    assert_equal(&exercise.estimated_time, &request.estimated_time, "estimated_time")
}

pub fn assert_exercise(actual: &Exercise, expected: &Exercise) -> AssertionResult {
    assert_equal(&actual.id, &expected.id, "id")?;
    assert_equal(&actual.title, &expected.title, "title")?;
    assert_equal(&actual.course_id, &expected.course_id, "course_id")?;
    assert_equal(&actual.max_score, &expected.max_score, "max_score")?;
    assert_equal(&actual.min_score, &expected.min_score, "min_score")?;
    assert_equal(&actual.order_index, &expected.order_index, "order_index")?;
    assert_equal(&actual.description, &expected.description, "description")?;
    assert_equal(&actual.estimated_time, &expected.estimated_time, "estimated_time")
}

pub fn assert_get_exercises_response(
    get_exercises_response: &GetExercisesResponse,
    create_exercise_responses: &[ExerciseResponse],
) -> AssertionResult {
    info!("Check get exercises response");
    assert_length(
        &get_exercises_response.exercises,
        create_exercise_responses,
        "exercises",
    )?;
    for (actual, created) in get_exercises_response
        .exercises
        .iter()
        .zip(create_exercise_responses)
    {
        assert_exercise(actual, &created.exercise)?;
    }
    Ok(())
}

pub fn assert_get_exercise_response(
    get_exercise_response: &ExerciseResponse,
    create_exercise_response: &ExerciseResponse,
) -> AssertionResult {
    assert_exercise(
        &get_exercise_response.exercise,
        &create_exercise_response.exercise,
    )
}

pub fn assert_update_exercise_response(
    request: &UpdateExerciseRequest,
    response: &ExerciseResponse,
) -> AssertionResult {
    info!("Check update exercise response");
    let exercise = &response.exercise;
    if let Some(title) = &request.title {
        assert_equal(&exercise.title, title, "title")?;
    }
    if let Some(max_score) = &request.max_score {
        assert_equal(&exercise.max_score, max_score, "max_score")?;
    }
    if let Some(min_score) = &request.min_score {
        assert_equal(&exercise.min_score, min_score, "min_score")?;
    }
    if let Some(order_index) = &request.order_index {
        assert_equal(&exercise.order_index, order_index, "order_index")?;
    }
    if let Some(description) = &request.description {
        assert_equal(&exercise.description, description, "description")?;
    }
    if let Some(estimated_time) = &request.estimated_time {
        assert_equal(&exercise.estimated_time, estimated_time, "estimated_time")?;
    }
    Ok(())
}

pub fn assert_exercise_not_found_response(actual: &InternalErrorResponse) -> AssertionResult {
    let expected = InternalErrorResponse {
        details: "Exercise not found".to_string(),
    };
    assert_internal_error_response(actual, &expected)
}
