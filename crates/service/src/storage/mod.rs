//! Storage abstractions for the gift list.
//!
//! A [`StorageUnit`] is the key-value store behind exactly one list name.
//! Backends: a JSON file per list, or an in-memory map.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::gifts::GiftItem;

pub mod file_unit;
pub mod json_map_store;
pub mod memory_unit;

pub use file_unit::FileStorageUnit;
pub use memory_unit::MemoryStorageUnit;

/// Key-value store scoped to one list. Each call is atomic on its own;
/// callers serialize read-modify-write sequences themselves.
#[async_trait]
pub trait StorageUnit: Send + Sync {
    /// All items in the store's key order. An empty store yields an empty vec.
    async fn list(&self) -> Result<Vec<GiftItem>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<GiftItem>, ServiceError>;
    /// Unconditional upsert of the whole record.
    async fn put(&self, id: &str, item: GiftItem) -> Result<(), ServiceError>;
    /// Removes the record if present. Absent ids are not an error.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
