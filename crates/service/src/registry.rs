//! List name to service resolution.
//!
//! Every request for a list name reaches the same [`GiftListService`], whose
//! lock serializes that list. Units are opened lazily on first use.

use std::{path::PathBuf, sync::Arc};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::ServiceError;
use crate::gifts::GiftListService;
use crate::storage::{FileStorageUnit, MemoryStorageUnit, StorageUnit};

const MAX_LIST_NAME_LEN: usize = 64;

/// Where newly resolved lists keep their data.
#[derive(Clone, Debug)]
pub enum Backend {
    File { data_dir: PathBuf },
    Memory,
}

impl Backend {
    async fn open(&self, list_name: &str) -> Result<Arc<dyn StorageUnit>, ServiceError> {
        match self {
            Backend::File { data_dir } => Ok(Arc::new(FileStorageUnit::open(data_dir, list_name).await?)),
            Backend::Memory => Ok(Arc::new(MemoryStorageUnit::new())),
        }
    }
}

/// List names double as file names, so they are restricted to `[A-Za-z0-9_.-]`.
pub fn validate_list_name(name: &str) -> Result<(), ServiceError> {
    let ok = !name.is_empty()
        && name.len() <= MAX_LIST_NAME_LEN
        && !name.starts_with('.')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(ServiceError::BadRequest(format!("invalid list name: {name:?}")))
    }
}

pub struct StoreRegistry {
    backend: Backend,
    lists: DashMap<String, Arc<GiftListService>>,
    // held only while opening a unit, so one name is never opened twice
    open_lock: Mutex<()>,
}

impl StoreRegistry {
    pub fn new(backend: Backend) -> Self {
        Self { backend, lists: DashMap::new(), open_lock: Mutex::new(()) }
    }

    fn cached(&self, name: &str) -> Option<Arc<GiftListService>> {
        self.lists.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the service for `name`, opening its storage unit on first use.
    pub async fn resolve(&self, name: &str) -> Result<Arc<GiftListService>, ServiceError> {
        validate_list_name(name)?;
        if let Some(svc) = self.cached(name) {
            return Ok(svc);
        }

        let _guard = self.open_lock.lock().await;
        if let Some(svc) = self.cached(name) {
            return Ok(svc);
        }
        let unit = self.backend.open(name).await?;
        let svc = Arc::new(GiftListService::new(name, unit));
        self.lists.insert(name.to_string(), Arc::clone(&svc));
        info!(list = %name, backend = ?self.backend, "list storage opened");
        Ok(svc)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
