use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{InventoryRecord, OfficeFields};
use crate::database::store::{InventoryStore, OwnerId, StoreError};

/// In-process store used when no database is configured.
///
/// Each write holds the lock for a single record, which gives the same
/// per-document atomicity as the Postgres store.
#[derive(Default)]
pub struct MemoryInventoryStore {
    records: RwLock<Vec<InventoryRecord>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across all owners.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn list(&self, owner: &OwnerId) -> Result<Vec<InventoryRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.owner_id == owner.as_str())
            .cloned()
            .collect())
    }

    async fn create(&self, owner: &OwnerId, fields: OfficeFields) -> Result<InventoryRecord, StoreError> {
        let record = InventoryRecord::new(Uuid::new_v4(), owner.as_str().to_string(), fields);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: Uuid,
        fields: OfficeFields,
    ) -> Result<InventoryRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner.as_str())
            .ok_or(StoreError::NotFound)?;

        record.apply(fields);
        Ok(record.clone())
    }

    async fn delete(&self, owner: &OwnerId, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id && r.owner_id == owner.as_str())
            .ok_or(StoreError::NotFound)?;

        // remove, not swap_remove: list order is insertion order
        records.remove(index);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
