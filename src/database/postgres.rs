use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::models::{InventoryRecord, OfficeFields};
use crate::database::store::{InventoryStore, OwnerId, StoreError};

const RECORD_COLUMNS: &str = "id, name, description, quantity, date_added, owner_id";

/// Postgres-backed store, one row per inventory document.
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    /// Open a pool against `url` using the configured limits.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Created inventory database pool (max_connections={})",
            config.max_connections
        );
        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Inventory schema migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed inventory database pool");
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list(&self, owner: &OwnerId) -> Result<Vec<InventoryRecord>, StoreError> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM office_inventory WHERE owner_id = $1 ORDER BY seq"
        );
        let records = sqlx::query_as::<_, InventoryRecord>(&query)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn create(&self, owner: &OwnerId, fields: OfficeFields) -> Result<InventoryRecord, StoreError> {
        let query = format!(
            "INSERT INTO office_inventory (id, name, description, quantity, date_added, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RECORD_COLUMNS}"
        );
        let record = sqlx::query_as::<_, InventoryRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.quantity)
            .bind(fields.date_added)
            .bind(owner.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: Uuid,
        fields: OfficeFields,
    ) -> Result<InventoryRecord, StoreError> {
        // owner_id is only ever in the predicate, never in SET
        let query = format!(
            "UPDATE office_inventory
             SET name = $1, description = $2, quantity = $3, date_added = $4
             WHERE id = $5 AND owner_id = $6
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, InventoryRecord>(&query)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.quantity)
            .bind(fields.date_added)
            .bind(id)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, owner: &OwnerId, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM office_inventory WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
