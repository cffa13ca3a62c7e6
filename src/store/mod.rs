pub mod record_store;
pub mod seed;

pub use record_store::{Database, RecordStore};
