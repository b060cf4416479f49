//! Infrastructure layer: document persistence.

pub mod document_store;
pub mod repository;

pub use document_store::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError};
pub use repository::Repository;
