//! Error payloads. These are data: operations return them, they never raise.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub r#type: String,
    pub input: Value,
    #[serde(rename = "ctx", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(rename = "msg")]
    pub message: String,
    /// Path segments; list positions arrive as integers.
    #[serde(rename = "loc")]
    pub location: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationErrorResponse {
    #[serde(rename = "detail")]
    pub details: Vec<ValidationError>,
}

/// Business error such as "File not found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InternalErrorResponse {
    #[serde(rename = "detail")]
    pub details: String,
}
