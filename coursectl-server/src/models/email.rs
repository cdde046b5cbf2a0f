//! User email used to look up enrollments
//!
//! Matching is exact and case-sensitive, so the value is kept as given.

use std::fmt;

use super::ValidationError;

/// Non-empty email identifying an enrolled user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Missing {
                fields: vec!["email"],
            });
        }

        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_case_and_spacing() {
        let email = Email::new("Ada@Example.com").unwrap();
        assert_eq!(email.as_str(), "Ada@Example.com");
    }

    #[test]
    fn empty_is_missing() {
        assert!(matches!(
            Email::new("").unwrap_err(),
            ValidationError::Missing { .. }
        ));
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(
            Email::new("   ").unwrap_err(),
            ValidationError::Empty { field: "email" }
        );
    }
}
