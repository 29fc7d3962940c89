//! In-memory record store

use async_trait::async_trait;
use lore_types::{IndexRow, Record, RecordId};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::RecordStore;
use crate::error::StoreError;

/// Record store backed by a `Vec`, keeping insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn index_rows(&self) -> Result<Vec<IndexRow>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter_map(Record::index_row).collect())
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn find_by_name_id(&self, name_id: &str) -> Result<Option<Record>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.name_id == name_id).cloned())
    }

    async fn insert(&self, mut record: Record) -> Result<RecordId, StoreError> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.name_id == record.name_id) {
            return Err(StoreError::DuplicateNameId(record.name_id));
        }

        let id = *record.id.get_or_insert_with(Uuid::new_v4);
        tracing::debug!(%id, name_id = %record.name_id, "Record inserted");
        records.push(record);
        Ok(id)
    }

    async fn replace(&self, id: RecordId, mut record: Record) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|r| r.name_id == record.name_id && r.id != Some(id))
        {
            return Err(StoreError::DuplicateNameId(record.name_id));
        }

        let slot = records
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;

        record.id = Some(id);
        *slot = record;
        tracing::debug!(%id, "Record replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_types::RecordType;

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = MemoryStore::new();
        let id = store
            .insert(Record::new("umaron", RecordType::Location))
            .await
            .unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name_id() {
        let store = MemoryStore::new();
        store
            .insert(Record::new("umaron", RecordType::Location))
            .await
            .unwrap();

        let err = store
            .insert(Record::new("umaron", RecordType::Item))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateNameId(name) if name == "umaron"));
    }

    #[tokio::test]
    async fn test_index_rows_in_insertion_order() {
        let store = MemoryStore::new();
        for name in ["zeta", "alpha", "mu"] {
            store.insert(Record::new(name, RecordType::Item)).await.unwrap();
        }

        let rows = store.index_rows().await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name_id.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mu"]);
    }

    #[tokio::test]
    async fn test_replace() {
        let store = MemoryStore::new();
        let id = store
            .insert(Record::new("umaron", RecordType::Location))
            .await
            .unwrap();

        let mut updated = Record::new("umaron", RecordType::Location);
        updated
            .articles
            .insert("description".to_string(), "A city.".to_string());
        store.replace(id, updated).await.unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.articles["description"], "A city.");
    }

    #[tokio::test]
    async fn test_replace_missing() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let err = store
            .replace(id, Record::new("umaron", RecordType::Location))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_replace_cannot_steal_name_id() {
        let store = MemoryStore::new();
        store
            .insert(Record::new("umaron", RecordType::Location))
            .await
            .unwrap();
        let other = store
            .insert(Record::new("garrett", RecordType::Item))
            .await
            .unwrap();

        let err = store
            .replace(other, Record::new("umaron", RecordType::Item))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateNameId(_)));
    }
}
