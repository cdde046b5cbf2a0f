//! Enrollment payload validation

use serde_json::{Map, Value};

use super::validation::{missing_fields, require_text};
use super::{Email, ValidationError};

/// Field holding the referenced course identifier
pub const COURSE_ID_FIELD: &str = "courseId";

/// Field holding the enrolled user's email
pub const EMAIL_FIELD: &str = "email";

/// Validated enrollment ready for insertion.
///
/// Only `courseId` and `email` are checked; the course reference is not
/// resolved, so it may point at a course that does not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    email: Email,
    body: Map<String, Value>,
}

impl NewEnrollment {
    pub fn from_json(body: Map<String, Value>) -> Result<Self, ValidationError> {
        let missing = missing_fields(&body, &[COURSE_ID_FIELD, EMAIL_FIELD]);
        if !missing.is_empty() {
            return Err(ValidationError::Missing { fields: missing });
        }

        require_text(&body, COURSE_ID_FIELD)?;
        let email = Email::new(require_text(&body, EMAIL_FIELD)?)?;

        Ok(Self { email, body })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn into_body(self) -> Map<String, Value> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn accepts_arbitrary_extra_fields() {
        let body = payload(json!({
            "courseId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "email": "ada@example.com",
            "paidAt": "2024-01-02",
            "coupon": null
        }));
        let enrollment = NewEnrollment::from_json(body.clone()).unwrap();
        assert_eq!(enrollment.email().as_str(), "ada@example.com");
        assert_eq!(enrollment.into_body(), body);
    }

    #[test]
    fn course_reference_is_not_resolved() {
        let body = payload(json!({ "courseId": "no-such-course", "email": "a@b.c" }));
        assert!(NewEnrollment::from_json(body).is_ok());
    }

    #[test]
    fn requires_course_and_email() {
        let err = NewEnrollment::from_json(payload(json!({ "note": "hi" }))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                fields: vec!["courseId", "email"]
            }
        );
    }

    #[test]
    fn email_must_be_text() {
        let body = payload(json!({ "courseId": "c1", "email": 42 }));
        assert!(matches!(
            NewEnrollment::from_json(body).unwrap_err(),
            ValidationError::InvalidType { field: "email", .. }
        ));
    }
}
