use super::AssertionResult;
use super::base::{assert_equal, assert_length};
use crate::schema::{InternalErrorResponse, ValidationError, ValidationErrorResponse};
use tracing::info;

pub fn assert_validation_error(actual: &ValidationError, expected: &ValidationError) -> AssertionResult {
    assert_equal(&actual.r#type, &expected.r#type, "type")?;
    assert_equal(&actual.input, &expected.input, "input")?;
    assert_equal(&actual.context, &expected.context, "context")?;
    assert_equal(&actual.message, &expected.message, "message")?;
    assert_equal(&actual.location, &expected.location, "location")
}

pub fn assert_validation_error_response(
    actual: &ValidationErrorResponse,
    expected: &ValidationErrorResponse,
) -> AssertionResult {
    info!("Check validation error response");
    assert_length(&actual.details, &expected.details, "details")?;
    for (actual, expected) in actual.details.iter().zip(&expected.details) {
        assert_validation_error(actual, expected)?;
    }
    Ok(())
}

/// Business errors such as a 404 "File not found".
pub fn assert_internal_error_response(
    actual: &InternalErrorResponse,
    expected: &InternalErrorResponse,
) -> AssertionResult {
    info!("Check internal error response");
    assert_equal(&actual.details, &expected.details, "details")
}
