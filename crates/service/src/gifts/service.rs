use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::gifts::domain::{DeleteConfirmation, GiftItem, GiftPatch};
use crate::gifts::validation::{validate_new, validate_patch};
use crate::storage::StorageUnit;

/// The four list operations over one storage unit.
///
/// Every operation holds `lock` for its whole duration, so operations on the
/// same list never interleave and update's read-modify-write sees a
/// consistent prior value. Separate lists have separate services.
pub struct GiftListService {
    name: String,
    unit: Arc<dyn StorageUnit>,
    lock: Mutex<()>,
}

fn require_id(id: Option<&str>) -> Result<&str, ServiceError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ServiceError::BadRequest("Gift ID is required".into())),
    }
}

impl GiftListService {
    pub fn new(name: impl Into<String>, unit: Arc<dyn StorageUnit>) -> Self {
        Self { name: name.into(), unit, lock: Mutex::new(()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(list = %self.name))]
    pub async fn list(&self) -> Result<Vec<GiftItem>, ServiceError> {
        let _guard = self.lock.lock().await;
        let items = self.unit.list().await?;
        debug!(count = items.len(), "listed gifts");
        Ok(items)
    }

    #[instrument(skip(self), fields(list = %self.name))]
    pub async fn get(&self, id: &str) -> Result<Option<GiftItem>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.unit.get(id).await
    }

    /// Validate and store a new item. An existing item with the same id is overwritten.
    #[instrument(skip(self, body), fields(list = %self.name))]
    pub async fn add(&self, body: &Value) -> Result<GiftItem, ServiceError> {
        let gift = validate_new(body).map_err(ServiceError::Validation)?;
        let _guard = self.lock.lock().await;
        self.unit.put(&gift.id, gift.clone()).await?;
        info!(gift_id = %gift.id, "gift added");
        Ok(gift)
    }

    /// Merge a partial update over the stored item.
    #[instrument(skip(self, body), fields(list = %self.name))]
    pub async fn update(&self, id: Option<&str>, body: &Value) -> Result<GiftItem, ServiceError> {
        self.update_with(id, || validate_patch(body).map_err(ServiceError::Validation)).await
    }

    /// Like [`update`](Self::update) for an unparsed request body. The body is
    /// only decoded once the id is known to exist, so a missing item is
    /// reported before a malformed body.
    #[instrument(skip(self, raw), fields(list = %self.name))]
    pub async fn update_raw(&self, id: Option<&str>, raw: &[u8]) -> Result<GiftItem, ServiceError> {
        self.update_with(id, || {
            let body: Value = serde_json::from_slice(raw)
                .map_err(|e| ServiceError::MalformedBody(e.to_string()))?;
            validate_patch(&body).map_err(ServiceError::Validation)
        })
        .await
    }

    async fn update_with<F>(&self, id: Option<&str>, patch: F) -> Result<GiftItem, ServiceError>
    where
        F: FnOnce() -> Result<GiftPatch, ServiceError>,
    {
        let id = require_id(id)?;
        let _guard = self.lock.lock().await;
        let existing = self
            .unit
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gift"))?;
        let patch = patch()?;
        if patch.is_empty() {
            debug!(gift_id = %id, "empty patch");
        }
        let updated = patch.apply(existing);
        self.unit.put(id, updated.clone()).await?;
        info!(gift_id = %id, purchased = updated.purchased, "gift updated");
        Ok(updated)
    }

    /// Delete by id. Deleting an unknown id succeeds.
    #[instrument(skip(self), fields(list = %self.name))]
    pub async fn delete(&self, id: Option<&str>) -> Result<DeleteConfirmation, ServiceError> {
        let id = require_id(id)?;
        let _guard = self.lock.lock().await;
        self.unit.delete(id).await?;
        info!(gift_id = %id, "gift deleted");
        Ok(DeleteConfirmation::default())
    }
}
