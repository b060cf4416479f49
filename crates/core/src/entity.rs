//! Entity trait: identity + continuity across state changes.

use crate::{DocumentId, DomainResult};

/// A persisted document with an identity and self-validation.
///
/// Implementors are flat records; `validate` is the only place field-level
/// invariants (required fields, ranges, date ordering) are enforced.
pub trait Entity {
    /// Collection the entity is stored in (e.g. `"rooms"`).
    const COLLECTION: &'static str;

    /// Human-readable kind used in messages (e.g. `"Room"`).
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> DocumentId;

    /// Replace the identifier (ids are assigned by the server, never the client).
    fn set_id(&mut self, id: DocumentId);

    /// Check field-level invariants before a write.
    fn validate(&self) -> DomainResult<()>;
}
