use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{InventoryRecord, OfficeFields};

/// Errors from inventory stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matches both the id and the owner.
    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Opaque user identity every store query is filtered by.
///
/// Outside this crate the only way to get one is `AuthUser::owner`, and an
/// `AuthUser` only comes from verified token claims. Request bodies never
/// reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub(crate) fn new(user_id: String) -> Self {
        Self(user_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Owner-scoped persistence for inventory records.
///
/// Every operation selects by owner; `update` and `delete` select by id AND
/// owner, so a record belonging to someone else reports `NotFound` exactly
/// like a missing one.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All records owned by `owner`, in insertion order.
    async fn list(&self, owner: &OwnerId) -> Result<Vec<InventoryRecord>, StoreError>;

    async fn create(&self, owner: &OwnerId, fields: OfficeFields) -> Result<InventoryRecord, StoreError>;

    async fn update(
        &self,
        owner: &OwnerId,
        id: Uuid,
        fields: OfficeFields,
    ) -> Result<InventoryRecord, StoreError>;

    async fn delete(&self, owner: &OwnerId, id: Uuid) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
