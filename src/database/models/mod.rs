pub mod office;

pub use office::{InventoryRecord, OfficeFields};
