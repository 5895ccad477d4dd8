//! JSON mapping error types

use super::FieldError;

/// Errors raised while mapping backend JSON into local record shapes.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// A single record was expected to be a JSON object.
    #[error("Expected a JSON object, got {0}")]
    ExpectedObject(&'static str),

    /// A record collection was expected to be an array or an object of objects.
    #[error("Expected a JSON array or object of records, got {0}")]
    ExpectedCollection(&'static str),

    /// A required field was missing or had the wrong type.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The payload could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MappingError {
    /// Returns the JSON type name used in error messages.
    pub fn json_type_name(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}
