//! Postgres document store
//!
//! Every collection lives in one `documents` table keyed by
//! (collection, id). Bodies are JSONB; equality filters use containment
//! (`body @> filter`) so the GIN index serves them. Natural order is
//! insertion order.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, StoreError};
use crate::models::DocumentId;

/// Pool size used when none is configured
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Document store backed by a shared sqlx pool
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections`, then make sure the schema
    /// exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create the documents table and indexes (idempotent).
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running document store migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL NOT NULL,
                collection TEXT NOT NULL,
                id UUID NOT NULL DEFAULT gen_random_uuid(),
                body JSONB NOT NULL CHECK (jsonb_typeof(body) = 'object'),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_collection_seq_idx ON documents (collection, seq)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_body_idx ON documents USING GIN (body jsonb_path_ops)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Document store migrations complete");
        Ok(())
    }
}

fn document_from_row(collection: Collection, row: PgRow) -> Result<Document, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let Json(body): Json<Value> = row.try_get("body")?;

    match body {
        Value::Object(map) => Ok(Document::new(id.into(), map)),
        _ => Err(StoreError::Corrupt {
            collection,
            id: id.into(),
            reason: "body is not a JSON object",
        }),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            "#,
        )
        .bind(collection.as_str())
        .bind(Json(filter.to_value()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| document_from_row(collection, row))
            .collect()
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| document_from_row(collection, row)).transpose()
    }

    async fn insert(
        &self,
        collection: Collection,
        mut body: Map<String, Value>,
    ) -> Result<DocumentId, StoreError> {
        body.remove(super::ID_FIELD);

        let row = sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2) RETURNING id")
            .bind(collection.as_str())
            .bind(Json(Value::Object(body)))
            .fetch_one(&self.pool)
            .await?;

        let id: Uuid = row.try_get("id")?;
        Ok(id.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
