//! `miranda-core`: shared building blocks for the hotel dashboard.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod validate;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
