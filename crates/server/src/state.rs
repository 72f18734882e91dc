use std::{sync::Arc, time::Duration};

use common::search::SearchClient;
use configs::{AppConfig, StorageBackend};
use service::{Backend, GiftListService, StoreRegistry};

use crate::errors::JsonApiError;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<StoreRegistry>,
    /// The list served under `/gifts`.
    pub list_name: Arc<str>,
    pub search: Arc<SearchClient>,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let backend = match cfg.storage.backend {
            StorageBackend::File => Backend::File { data_dir: cfg.storage.data_dir.clone().into() },
            StorageBackend::Memory => Backend::Memory,
        };
        let search = SearchClient::new(
            cfg.search.base_url.clone(),
            cfg.search.api_key.clone(),
            cfg.search.num_results,
            Duration::from_secs(cfg.search.timeout_secs),
        )?;
        Ok(Self {
            registry: Arc::new(StoreRegistry::new(backend)),
            list_name: Arc::from(cfg.storage.list_name.as_str()),
            search: Arc::new(search),
        })
    }

    pub async fn gifts(&self) -> Result<Arc<GiftListService>, JsonApiError> {
        self.registry
            .resolve(&self.list_name)
            .await
            .map_err(|e| JsonApiError::from_service(e, "Invalid list"))
    }
}
