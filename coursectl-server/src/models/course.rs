//! Course payload validation
//!
//! A course needs all six catalogue fields. The submitted object is kept
//! verbatim (extra fields included) so reads return exactly what was posted.

use serde_json::{Map, Value};

use super::validation::{missing_fields, require_text};
use super::ValidationError;

/// Fields every course must carry
pub const COURSE_FIELDS: [&str; 6] = [
    "title",
    "description",
    "instructor",
    "duration",
    "price",
    "image",
];

/// Fields that must be non-blank strings
const TEXT_FIELDS: [&str; 4] = ["title", "description", "instructor", "image"];

/// Validated course ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    body: Map<String, Value>,
}

impl NewCourse {
    /// Validate a client payload.
    ///
    /// # Rules
    /// - All of [`COURSE_FIELDS`] present and non-null (reported together)
    /// - `title`, `description`, `instructor`, `image`: non-blank strings
    /// - `duration`: non-blank string (e.g. "6 weeks") or positive number
    /// - `price`: finite number, zero or more
    pub fn from_json(body: Map<String, Value>) -> Result<Self, ValidationError> {
        let missing = missing_fields(&body, &COURSE_FIELDS);
        if !missing.is_empty() {
            return Err(ValidationError::Missing { fields: missing });
        }

        for field in TEXT_FIELDS {
            require_text(&body, field)?;
        }

        match body.get("duration") {
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(ValidationError::Empty { field: "duration" });
            }
            Some(Value::String(_)) => {}
            Some(Value::Number(n)) if n.as_f64().is_some_and(|d| d > 0.0) => {}
            _ => {
                return Err(ValidationError::InvalidType {
                    field: "duration",
                    expected: "a string or a positive number",
                });
            }
        }

        match body.get("price").and_then(Value::as_f64) {
            Some(price) if price.is_finite() && price >= 0.0 => {}
            _ => {
                return Err(ValidationError::InvalidType {
                    field: "price",
                    expected: "a non-negative number",
                });
            }
        }

        Ok(Self { body })
    }

    pub fn title(&self) -> &str {
        self.body
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Consume and return the document body.
    pub fn into_body(self) -> Map<String, Value> {
        self.body
    }
}
