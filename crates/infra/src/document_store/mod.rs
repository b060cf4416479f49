//! Document store boundary.
//!
//! Documents are JSON values grouped in named collections and keyed by
//! [`DocumentId`]. The store knows nothing about document shapes; typing and
//! validation live in [`crate::repository::Repository`].

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use miranda_core::{DocumentId, DomainError};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

/// Document store operation error.
///
/// ## Error Categories
///
/// - **NotFound** / **Invalid** / **Conflict**: caller-facing failures
/// - **Serialization** / **Backend**: internal failures, never shown verbatim
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("document already exists: {0}")]
    Conflict(String),

    #[error("document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Async persistence for JSON documents.
///
/// Implementations must be safe for concurrent use by in-flight requests;
/// callers share one handle behind an `Arc`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError>;

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<JsonValue>, StoreError>;

    /// Insert a new document; fails with `Conflict` if the id is taken.
    async fn insert(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<(), StoreError>;

    /// Replace an existing document. Returns `false` if there was nothing to replace.
    async fn replace(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<bool, StoreError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn list(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        (**self).list(collection).await
    }

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(collection, id).await
    }

    async fn insert(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<(), StoreError> {
        (**self).insert(collection, id, body).await
    }

    async fn replace(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<bool, StoreError> {
        (**self).replace(collection, id, body).await
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        (**self).delete(collection, id).await
    }
}
