//! Postgres-backed document store.
//!
//! All collections share one `documents` table; bodies are stored as JSONB.
//!
//! ## Error Mapping
//!
//! | SQLx Error | Scenario | StoreError |
//! |------------|----------|------------|
//! | Database (unique violation `23505`) | concurrent insert of the same id | `Conflict` |
//! | Any other | pool closed, network, row decode | `Backend` |
//!
//! ## Thread Safety
//!
//! `PostgresDocumentStore` is `Send + Sync`; the SQLx pool handles connection
//! sharing between in-flight requests, so no extra locking is needed.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::instrument;

use miranda_core::DocumentId;

use super::{DocumentStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT        NOT NULL,
    id          UUID        NOT NULL,
    body        JSONB       NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection, id)
)
"#;

#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Wrap an existing pool. Call [`Self::ensure_schema`] before first use.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        tracing::info!(max_connections, "postgres document store connected");
        Ok(Self::new(pool))
    }

    /// Create the `documents` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            return StoreError::Conflict(format!("{operation}: {}", db.message()));
        }
    }
    tracing::error!(operation, error = %err, "postgres document store failure");
    StoreError::Backend(format!("{operation}: {err}"))
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self), err)]
    async fn list(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        let rows = sqlx::query("SELECT body FROM documents WHERE collection = $1 ORDER BY id ASC")
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter()
            .map(|row| row.try_get::<JsonValue, _>("body").map_err(|e| map_sqlx_error("list", e)))
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<JsonValue>, StoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.map(|r| r.try_get::<JsonValue, _>("body").map_err(|e| map_sqlx_error("get", e)))
            .transpose()
    }

    #[instrument(skip(self, body), err)]
    async fn insert(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!("{collection}/{id}")));
        }
        Ok(())
    }

    #[instrument(skip(self, body), err)]
    async fn replace(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}
