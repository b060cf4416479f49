//! Typed access to one collection of the document store.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use miranda_core::{DocumentId, Entity};

use crate::document_store::{DocumentStore, StoreError};

/// Typed repository over the collection named by `T::COLLECTION`.
///
/// Writes assign ids and validate before touching the store; reads map a
/// missing document to `StoreError::NotFound(T::KIND)`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Entity + Serialize + DeserializeOwned + Send,
{
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let docs = self.store.list(T::COLLECTION).await?;
        docs.into_iter()
            .map(|v| serde_json::from_value(v).map_err(StoreError::from))
            .collect()
    }

    pub async fn get(&self, id: DocumentId) -> Result<T, StoreError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(v) => Ok(serde_json::from_value(v)?),
            None => Err(StoreError::NotFound(T::KIND)),
        }
    }

    /// Store a new document under a freshly generated id.
    pub async fn create(&self, mut doc: T) -> Result<T, StoreError> {
        doc.set_id(DocumentId::new());
        doc.validate()?;
        let body = serde_json::to_value(&doc)?;
        self.store.insert(T::COLLECTION, doc.id(), body).await?;
        tracing::info!(collection = T::COLLECTION, id = %doc.id(), "document created");
        Ok(doc)
    }

    /// Replace the document stored under `id`; any id inside `doc` is ignored.
    pub async fn update(&self, id: DocumentId, mut doc: T) -> Result<T, StoreError> {
        doc.set_id(id);
        doc.validate()?;
        let body = serde_json::to_value(&doc)?;
        if !self.store.replace(T::COLLECTION, id, body).await? {
            return Err(StoreError::NotFound(T::KIND));
        }
        tracing::info!(collection = T::COLLECTION, id = %id, "document updated");
        Ok(doc)
    }

    pub async fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(StoreError::NotFound(T::KIND));
        }
        tracing::info!(collection = T::COLLECTION, id = %id, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_store::InMemoryDocumentStore;
    use miranda_core::DomainError;
    use miranda_hotel::{Room, RoomStatus};

    fn repo() -> Repository<Room> {
        Repository::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn room(number: &str) -> Room {
        Room {
            id: DocumentId::new(),
            photo: "room.jpg".to_string(),
            number: number.to_string(),
            bed_type: "Single".to_string(),
            amenities: vec!["Wifi".to_string()],
            rate: 90.0,
            offer_price: 75.0,
            status: RoomStatus::Available,
            room_floor: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_a_server_side_id() {
        let repo = repo();
        let submitted = room("101");
        let client_id = submitted.id;

        let created = repo.create(submitted).await.unwrap();
        assert_ne!(created.id, client_id);
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn invalid_documents_are_not_written() {
        let repo = repo();
        let err = repo.create(room("  ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(DomainError::Validation(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_documents_name_their_kind() {
        let repo = repo();
        let id = DocumentId::new();

        assert!(matches!(repo.get(id).await, Err(StoreError::NotFound("Room"))));
        assert!(matches!(repo.update(id, room("101")).await, Err(StoreError::NotFound("Room"))));
        assert!(matches!(repo.delete(id).await, Err(StoreError::NotFound("Room"))));
    }

    #[tokio::test]
    async fn update_keeps_the_path_id() {
        let repo = repo();
        let created = repo.create(room("101")).await.unwrap();

        let mut changed = room("102");
        changed.status = RoomStatus::Booked;
        let updated = repo.update(created.id, changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].number, "102");
        assert_eq!(listed[0].status, RoomStatus::Booked);
    }
}
