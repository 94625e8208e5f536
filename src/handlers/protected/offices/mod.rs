pub mod collection;
pub mod payload;
pub mod record;

pub use collection::{create, list};
pub use payload::{OfficePayload, ValidationPolicy};
pub use record::{delete, update};
