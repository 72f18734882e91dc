use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::gifts::GiftItem;
use crate::storage::StorageUnit;

/// Volatile storage unit. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStorageUnit {
    items: RwLock<BTreeMap<String, GiftItem>>,
}

impl MemoryStorageUnit {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageUnit for MemoryStorageUnit {
    async fn list(&self) -> Result<Vec<GiftItem>, ServiceError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<GiftItem>, ServiceError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn put(&self, id: &str, item: GiftItem) -> Result<(), ServiceError> {
        self.items.write().await.insert(id.to_string(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.items.write().await.remove(id);
        Ok(())
    }
}
