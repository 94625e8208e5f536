pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryInventoryStore;
pub use models::{InventoryRecord, OfficeFields};
pub use postgres::PgInventoryStore;
pub use store::{InventoryStore, OwnerId, StoreError};
