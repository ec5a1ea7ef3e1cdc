use super::AssertionResult;
use super::base::{assert_equal, assert_length};
use super::files::assert_file;
use super::users::assert_user;
use crate::schema::{
    Course, CreateCourseRequest, CreateCourseResponse, GetCoursesResponse, UpdateCourseRequest,
    UpdateCourseResponse,
};

pub fn assert_course(actual: &Course, expected: &Course) -> AssertionResult {
    assert_equal(&actual.id, &expected.id, "id")?;
    assert_equal(&actual.title, &expected.title, "title")?;
    assert_equal(&actual.max_score, &expected.max_score, "max_score")?;
    assert_equal(&actual.min_score, &expected.min_score, "min_score")?;
    assert_equal(&actual.description, &expected.description, "description")?;
    assert_equal(&actual.estimated_time, &expected.estimated_time, "estimated_time")?;
    assert_file(&actual.preview_file, &expected.preview_file)?;
    assert_user(&actual.created_by_user, &expected.created_by_user)
}

pub fn assert_create_course_response(
    request: &CreateCourseRequest,
    response: &CreateCourseResponse,
) -> AssertionResult {
    let course = &response.course;
    assert_equal(&course.title, &request.title, "title")?;
    assert_equal(&course.max_score, &request.max_score, "max_score")?;
    assert_equal(&course.min_score, &request.min_score, "min_score")?;
    assert_equal(&course.preview_file.id, &request.preview_file_id, "preview_file_id")?;
    assert_equal(&course.description, &request.description, "description")?;
    assert_equal(&course.estimated_time, &request.estimated_time, "estimated_time")?;
    assert_equal(
        &course.created_by_user.id,
        &request.created_by_user_id,
        "created_by_user_id",
    )
}

/// The listing holds exactly the created courses, in creation order.
pub fn assert_get_courses_response(
    get_courses_response: &GetCoursesResponse,
    create_course_responses: &[CreateCourseResponse],
) -> AssertionResult {
    assert_length(
        &get_courses_response.courses,
        create_course_responses,
        "courses",
    )?;
    for (actual, created) in get_courses_response
        .courses
        .iter()
        .zip(create_course_responses)
    {
        assert_course(actual, &created.course)?;
    }
    Ok(())
}

pub fn assert_update_course_response(
    request: &UpdateCourseRequest,
    response: &UpdateCourseResponse,
) -> AssertionResult {
    let course = &response.course;
    if let Some(title) = &request.title {
        assert_equal(&course.title, title, "title")?;
    }
    if let Some(max_score) = &request.max_score {
        assert_equal(&course.max_score, max_score, "max_score")?;
    }
    if let Some(min_score) = &request.min_score {
        assert_equal(&course.min_score, min_score, "min_score")?;
    }
    if let Some(description) = &request.description {
        assert_equal(&course.description, description, "description")?;
    }
    if let Some(estimated_time) = &request.estimated_time {
        assert_equal(&course.estimated_time, estimated_time, "estimated_time")?;
    }
    Ok(())
}
