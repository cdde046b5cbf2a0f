//! Validation error types and shared field checks

use std::fmt;

use serde_json::{Map, Value};

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required fields are absent or null
    Missing { fields: Vec<&'static str> },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field holds the wrong JSON type
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// Value doesn't match required format (e.g., identifier)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Payload is not a JSON object
    NotAnObject,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidType { field, expected } => {
                write!(f, "{} must be {}", field, expected)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotAnObject => write!(f, "request body must be a JSON object"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collect the fields from `required` that are absent or null in `body`.
pub(crate) fn missing_fields(
    body: &Map<String, Value>,
    required: &[&'static str],
) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| body.get(*field).map_or(true, Value::is_null))
        .collect()
}

/// Require `field` to be a string with visible content.
pub(crate) fn require_text<'a>(
    body: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing {
            fields: vec![field],
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}
