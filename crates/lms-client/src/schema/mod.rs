//! Request and response models for every LMS resource.
//!
//! Each model declares its wire name per field with `#[serde(rename = ..)]`;
//! that attribute list is the mapping table between the snake_case Rust
//! field and the camelCase wire key. The JSON Schema used for validation is
//! derived from the same declarations, so the two cannot drift apart.
//!
//! Random test data is a separate concern layered on through
//! [`fake::Dummy`] (see [`crate::fakers`]); nothing here generates values
//! while (de)serialising.

pub mod authentication;
pub mod courses;
pub mod errors;
pub mod exercises;
pub mod files;
pub mod users;

pub use authentication::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Token};
pub use courses::{
    Course, CreateCourseRequest, CreateCourseResponse, GetCourseResponse, GetCoursesQuery,
    GetCoursesResponse, UpdateCourseRequest, UpdateCourseResponse,
};
pub use errors::{InternalErrorResponse, ValidationError, ValidationErrorResponse};
pub use exercises::{
    CreateExerciseRequest, Exercise, ExerciseResponse, GetExercisesQuery, GetExercisesResponse,
    UpdateExerciseRequest,
};
pub use files::{CreateFileRequest, CreateFileResponse, File, GetFileResponse};
pub use users::{
    CreateUserRequest, CreateUserResponse, GetUserResponse, UpdateUserRequest,
    UpdateUserResponse, User,
};

use crate::error::{LmsError, Result};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};

/// JSON Schema (draft 2020-12) of a model's wire form.
pub fn json_schema_for<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

/// First schema violation of `instance` against `T`, as `(path, message)`.
///
/// The path is a JSON pointer into the instance; for a missing required
/// field it ends with that field's wire name.
pub fn first_violation<T: JsonSchema>(instance: &Value) -> Result<Option<(String, String)>> {
    let schema = json_schema_for::<T>();
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft202012)
        .compile(&schema)
        .map_err(|e| LmsError::Config(format!("invalid schema for {}: {}", T::schema_name(), e)))?;

    let violation = match compiled.validate(instance) {
        Ok(()) => None,
        Err(mut errors) => errors.next().map(|error| {
            let mut path = error.instance_path.to_string();
            if let ValidationErrorKind::Required { property } = &error.kind {
                let name = property
                    .as_str()
                    .map_or_else(|| property.to_string(), str::to_string);
                path = format!("{}/{}", path, name);
            }
            (path, error.to_string())
        }),
    };
    Ok(violation)
}

/// Decodes a response body into `T`, reporting mismatches as
/// [`LmsError::SchemaValidation`] with the offending field path.
///
/// The decoder's own path is authoritative; a schema violation below that
/// path (a missing required field, say) narrows it and is appended to the
/// message.
pub fn parse_json<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + JsonSchema,
{
    let model = std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("model");
    let text = || String::from_utf8_lossy(body).into_owned();

    let instance = match serde_json::from_slice::<Value>(body) {
        Ok(instance) => instance,
        Err(e) => {
            return Err(LmsError::SchemaValidation {
                model,
                path: String::new(),
                message: format!("body is not valid JSON: {}", e),
                body: text(),
            });
        }
    };

    let decode_error = match serde_path_to_error::deserialize::<_, T>(&instance) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    let mut path = json_pointer(decode_error.path());
    let mut message = decode_error.inner().to_string();
    if let Some((schema_path, violation)) = first_violation::<T>(&instance)? {
        if schema_path == path || schema_path.starts_with(&format!("{}/", path)) {
            path = schema_path;
        }
        message = format!("{}; schema: {}", message, violation);
    }

    Err(LmsError::SchemaValidation {
        model,
        path,
        message,
        body: text(),
    })
}

/// Renders a decoder path as a JSON pointer (`exercise.maxScore` becomes
/// `/exercise/maxScore`).
fn json_pointer(path: &Path) -> String {
    let mut pointer = String::new();
    for segment in path.iter() {
        pointer.push('/');
        match segment {
            Segment::Seq { index } => pointer.push_str(&index.to_string()),
            Segment::Map { key } => pointer.push_str(&key.replace('~', "~0").replace('/', "~1")),
            Segment::Enum { variant } => pointer.push_str(variant),
            _ => pointer.push('?'),
        }
    }
    pointer
}
