//! Field-by-field checks of API responses.
//!
//! Every check returns `Err(AssertionError)` on the first mismatch, naming
//! the field along with the expected and actual values, so callers can
//! propagate failures with `?`.

mod authentication;
mod base;
mod courses;
mod errors;
mod exercises;
mod files;
mod schema;
mod users;

pub use authentication::assert_login_response;
pub use base::{assert_equal, assert_is_true, assert_length, assert_status_code};
pub use courses::{
    assert_course, assert_create_course_response, assert_get_courses_response,
    assert_update_course_response,
};
pub use errors::{
    assert_internal_error_response, assert_validation_error, assert_validation_error_response,
};
pub use exercises::{
    assert_create_exercise_response, assert_exercise, assert_exercise_not_found_response,
    assert_get_exercise_response, assert_get_exercises_response, assert_update_exercise_response,
};
pub use files::{
    assert_create_file_response, assert_create_file_with_empty_directory_response,
    assert_create_file_with_empty_filename_response, assert_file, assert_file_not_found_response,
    assert_get_file_response, assert_get_file_with_incorrect_file_id_response,
};
pub use schema::{assert_alias_round_trip, validate_json_schema};
pub use users::{
    assert_create_user_response, assert_get_user_response, assert_update_user_response,
    assert_user,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incorrect value of {name}. Expected {expected}, got {actual}.")]
pub struct AssertionError {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionError {
    pub fn new(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type AssertionResult = std::result::Result<(), AssertionError>;
