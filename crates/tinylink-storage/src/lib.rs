pub mod config;
mod error;
pub mod memory;
pub mod postgres;

pub use config::StoreConfig;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use tinylink_core::{Operation, Result, StorageError, UrlRecord, UrlStore};
