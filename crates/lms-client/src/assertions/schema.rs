use super::{AssertionError, AssertionResult};
use crate::schema::first_violation;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn model_name<T: JsonSchema>() -> String {
    format!("schema of {}", T::schema_name())
}

/// Validates `instance` against the JSON Schema derived from `T`.
pub fn validate_json_schema<T: JsonSchema>(instance: &Value) -> AssertionResult {
    match first_violation::<T>(instance) {
        Ok(None) => Ok(()),
        Ok(Some((path, message))) => Err(AssertionError::new(
            model_name::<T>(),
            "a conforming document",
            format!("{} at '{}'", message, path),
        )),
        Err(e) => Err(AssertionError::new(
            model_name::<T>(),
            "a valid schema",
            e.to_string(),
        )),
    }
}

/// Parses `instance` into `T` and serialises it back; the result must be
/// the same JSON, key for key.
pub fn assert_alias_round_trip<T>(instance: &Value) -> AssertionResult
where
    T: DeserializeOwned + Serialize + JsonSchema,
{
    let parsed: T = serde_json::from_value(instance.clone()).map_err(|e| {
        AssertionError::new(model_name::<T>(), "a parseable document", e.to_string())
    })?;
    let serialised = serde_json::to_value(&parsed).map_err(|e| {
        AssertionError::new(model_name::<T>(), "a serialisable model", e.to_string())
    })?;

    if &serialised == instance {
        Ok(())
    } else {
        Err(AssertionError::new(
            format!("round trip of {}", T::schema_name()),
            instance.to_string(),
            serialised.to_string(),
        ))
    }
}
