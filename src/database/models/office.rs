use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One inventory item, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub date_added: DateTime<Utc>,
    pub owner_id: String,
}

/// The mutable fields of a record, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeFields {
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub date_added: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(id: Uuid, owner_id: String, fields: OfficeFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            quantity: fields.quantity,
            date_added: fields.date_added,
            owner_id,
        }
    }

    /// Full replace of the mutable fields; id and owner stay put.
    pub fn apply(&mut self, fields: OfficeFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.quantity = fields.quantity;
        self.date_added = fields.date_added;
    }
}
