use super::AssertionResult;
use super::base::assert_equal;
use super::errors::{assert_internal_error_response, assert_validation_error_response};
use crate::schema::{
    CreateFileRequest, CreateFileResponse, File, GetFileResponse, InternalErrorResponse,
    ValidationError, ValidationErrorResponse,
};
use serde_json::{Map, Value, json};

/// Checks the created file against the request, including its public URL
/// `<base_url>/static/<directory>/<filename>`.
pub fn assert_create_file_response(
    request: &CreateFileRequest,
    response: &CreateFileResponse,
    base_url: &str,
) -> AssertionResult {
    let expected_url = format!(
        "{}/static/{}/{}",
        base_url.trim_end_matches('/'),
        request.directory,
        request.filename
    );
    assert_equal(&response.file.url, &expected_url, "url")?;
    assert_equal(&response.file.filename, &request.filename, "filename")?;
    assert_equal(&response.file.directory, &request.directory, "directory")
}

pub fn assert_file(actual: &File, expected: &File) -> AssertionResult {
    assert_equal(&actual.id, &expected.id, "id")?;
    assert_equal(&actual.url, &expected.url, "url")?;
    assert_equal(&actual.filename, &expected.filename, "filename")?;
    assert_equal(&actual.directory, &expected.directory, "directory")
}

pub fn assert_get_file_response(
    get_file_response: &GetFileResponse,
    create_file_response: &CreateFileResponse,
) -> AssertionResult {
    assert_file(&get_file_response.file, &create_file_response.file)
}

pub fn assert_create_file_with_empty_filename_response(
    actual: &ValidationErrorResponse,
) -> AssertionResult {
    assert_validation_error_response(actual, &empty_field_error("filename"))
}

pub fn assert_create_file_with_empty_directory_response(
    actual: &ValidationErrorResponse,
) -> AssertionResult {
    assert_validation_error_response(actual, &empty_field_error("directory"))
}

pub fn assert_file_not_found_response(actual: &InternalErrorResponse) -> AssertionResult {
    let expected = InternalErrorResponse {
        details: "File not found".to_string(),
    };
    assert_internal_error_response(actual, &expected)
}

pub fn assert_get_file_with_incorrect_file_id_response(
    actual: &ValidationErrorResponse,
) -> AssertionResult {
    const PARSE_ERROR: &str = "invalid character: expected an optional prefix of `urn:uuid:` \
                               followed by [0-9a-fA-F-], found `i` at 1";
    let expected = ValidationErrorResponse {
        details: vec![ValidationError {
            r#type: "uuid_parsing".to_string(),
            input: json!("incorrect-file-id"),
            context: Some(Map::from_iter([("error".to_string(), json!(PARSE_ERROR))])),
            message: format!("Input should be a valid UUID, {}", PARSE_ERROR),
            location: vec![json!("path"), json!("file_id")],
        }],
    };
    assert_validation_error_response(actual, &expected)
}

fn empty_field_error(field: &str) -> ValidationErrorResponse {
    ValidationErrorResponse {
        details: vec![ValidationError {
            r#type: "string_too_short".to_string(),
            input: Value::String(String::new()),
            context: Some(Map::from_iter([("min_length".to_string(), json!(1))])),
            message: "String should have at least 1 character".to_string(),
            location: vec![json!("body"), json!(field)],
        }],
    }
}
