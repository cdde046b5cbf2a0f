//! Document store port and adapters
//!
//! Records are schema-flexible JSON objects grouped in named collections.
//! Handlers never talk to a concrete database: they get an
//! `Arc<dyn DocumentStore>` injected through application state.
//!
//! - `postgres`: sqlx/Postgres adapter (JSONB documents)
//! - `memory`: in-process adapter for tests and local runs

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::models::DocumentId;

pub use memory::MemoryStore;
pub use postgres::{PgDocumentStore, DEFAULT_MAX_CONNECTIONS};

/// Key under which the storage identifier is rendered
pub const ID_FIELD: &str = "_id";

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Courses,
    Enrolls,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Enrolls => "enrolls",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of field-equality predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Match every document in a collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value` exactly.
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, body: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }

    /// Filter as a JSON object (used for JSONB containment queries).
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// A stored record: identifier plus body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub body: Map<String, Value>,
}

impl Document {
    /// Build a document, dropping any `_id` key carried in the body.
    pub fn new(id: DocumentId, mut body: Map<String, Value>) -> Self {
        body.remove(ID_FIELD);
        Self { id, body }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    /// Wire representation: the body fields plus `_id`.
    pub fn into_json(self) -> Map<String, Value> {
        let mut out = Map::with_capacity(self.body.len() + 1);
        out.insert(ID_FIELD.to_owned(), Value::String(self.id.to_string()));
        out.extend(self.body);
        out
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.body.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in &self.body {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("corrupt document {id} in {collection}: {reason}")]
    Corrupt {
        collection: Collection,
        id: DocumentId,
        reason: &'static str,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Document store operations used by the repositories.
///
/// Implementations must be shareable across request handlers; one handle
/// lives for the whole process.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short adapter name for logs.
    fn kind(&self) -> &'static str;

    /// All documents matching `filter`, in the store's natural order.
    async fn find(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a document, returning the identifier the store assigned.
    async fn insert(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> Result<DocumentId, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connection(s). Called once on shutdown.
    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn filter_matches_exactly() {
        let body = object(json!({ "email": "ada@example.com", "courseId": "c1" }));
        assert!(Filter::all().matches(&body));
        assert!(Filter::field_eq("email", "ada@example.com").matches(&body));
        assert!(!Filter::field_eq("email", "Ada@example.com").matches(&body));
        assert!(!Filter::field_eq("email", "ada@example.com")
            .and("courseId", "c2")
            .matches(&body));
        assert!(!Filter::field_eq("missing", Value::Null).matches(&body));
    }

    #[test]
    fn document_json_carries_store_id() {
        let id = DocumentId::new();
        let doc = Document::new(id, object(json!({ "_id": "spoofed", "title": "Rust" })));
        let json = doc.clone().into_json();
        assert_eq!(json[ID_FIELD], json!(id.to_string()));
        assert_eq!(serde_json::to_value(&doc).unwrap(), Value::Object(json));
    }
}
