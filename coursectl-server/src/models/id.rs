//! Storage-assigned document identifiers

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::ValidationError;

/// Identifier generated by the document store (UUID v4, rendered as a string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier supplied by a client.
    ///
    /// # Example
    /// ```
    /// use coursectl_server::models::DocumentId;
    ///
    /// assert!(DocumentId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    /// assert!(DocumentId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "invalid identifier format",
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
