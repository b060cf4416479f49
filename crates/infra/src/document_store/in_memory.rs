use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use miranda_core::DocumentId;

use super::{DocumentStore, StoreError};

/// In-memory document store.
///
/// Intended for tests/dev. Keyed by `(collection, id)` so listing a collection
/// is a range scan in id order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<(String, DocumentId), JsonValue>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        let map = self.documents.read().map_err(poisoned)?;
        Ok(map
            .range((collection.to_string(), DocumentId::MIN)..)
            .take_while(|((c, _), _)| c == collection)
            .map(|(_, v)| v.clone())
            .collect())
    }

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<JsonValue>, StoreError> {
        let map = self.documents.read().map_err(poisoned)?;
        Ok(map.get(&(collection.to_string(), id)).cloned())
    }

    async fn insert(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<(), StoreError> {
        let mut map = self.documents.write().map_err(poisoned)?;
        let key = (collection.to_string(), id);
        if map.contains_key(&key) {
            return Err(StoreError::Conflict(format!("{collection}/{id}")));
        }
        map.insert(key, body);
        Ok(())
    }

    async fn replace(&self, collection: &str, id: DocumentId, body: JsonValue) -> Result<bool, StoreError> {
        let mut map = self.documents.write().map_err(poisoned)?;
        match map.get_mut(&(collection.to_string(), id)) {
            Some(slot) => {
                *slot = body;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        let mut map = self.documents.write().map_err(poisoned)?;
        Ok(map.remove(&(collection.to_string(), id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::new();
        store.insert("rooms", id, json!({"number": "101"})).await.unwrap();

        assert!(store.get("users", id).await.unwrap().is_none());
        assert!(store.list("users").await.unwrap().is_empty());
        assert_eq!(store.list("rooms").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::new();
        store.insert("rooms", id, json!({})).await.unwrap();

        let err = store.insert("rooms", id, json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_documents() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::new();

        assert!(!store.replace("rooms", id, json!({})).await.unwrap());
        assert!(!store.delete("rooms", id).await.unwrap());

        store.insert("rooms", id, json!({"v": 1})).await.unwrap();
        assert!(store.replace("rooms", id, json!({"v": 2})).await.unwrap());
        assert_eq!(store.get("rooms", id).await.unwrap(), Some(json!({"v": 2})));
        assert!(store.delete("rooms", id).await.unwrap());
        assert!(store.get("rooms", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_stops_at_neighbouring_collections() {
        let store = InMemoryDocumentStore::new();
        for collection in ["room", "rooms", "roomsx", "users"] {
            store.insert(collection, DocumentId::new(), json!({ "c": collection })).await.unwrap();
        }
        store.insert("rooms", DocumentId::new(), json!({ "c": "rooms" })).await.unwrap();

        let rooms = store.list("rooms").await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|v| v["c"] == "rooms"));
    }
}
