use std::{path::Path, sync::Arc};

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::gifts::GiftItem;
use crate::storage::{json_map_store::JsonMapStore, StorageUnit};

/// File-backed storage unit: one JSON file per list, `<data_dir>/<list_name>.json`.
pub struct FileStorageUnit {
    store: Arc<JsonMapStore<String, GiftItem>>,
}

impl FileStorageUnit {
    pub async fn open(data_dir: &Path, list_name: &str) -> Result<Self, ServiceError> {
        let path = data_dir.join(format!("{list_name}.json"));
        let store = JsonMapStore::<String, GiftItem>::new(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl StorageUnit for FileStorageUnit {
    async fn list(&self) -> Result<Vec<GiftItem>, ServiceError> {
        Ok(self.store.list().await.into_iter().map(|(_, v)| v).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<GiftItem>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn put(&self, id: &str, item: GiftItem) -> Result<(), ServiceError> {
        self.store.insert(id.to_string(), item).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.remove(&id.to_string()).await.map(|_| ())
    }
}
