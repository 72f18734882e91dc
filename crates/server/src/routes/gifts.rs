use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use service::{DeleteConfirmation, GiftItem, ServiceError};

use crate::errors::{outcome_label, JsonApiError};
use crate::observability::record_operation;
use crate::state::AppState;

const INVALID_ITEM: &str = "Invalid gift item";
const INVALID_UPDATE: &str = "Invalid gift update";

/// Count the outcome and convert failures into the JSON envelope.
fn finish<T>(op: &str, res: Result<T, ServiceError>, invalid_label: &str) -> Result<Json<T>, JsonApiError> {
    match res {
        Ok(v) => {
            record_operation(op, "ok");
            Ok(Json(v))
        }
        Err(e) => {
            record_operation(op, outcome_label(&e));
            Err(JsonApiError::from_service(e, invalid_label))
        }
    }
}

fn parse_body(body: &Bytes) -> Result<Value, JsonApiError> {
    serde_json::from_slice(body)
        .map_err(|e| JsonApiError::from_service(ServiceError::MalformedBody(e.to_string()), INVALID_ITEM))
}

/// List every gift on the default list.
pub async fn list_gifts(State(state): State<AppState>) -> Result<Json<Vec<GiftItem>>, JsonApiError> {
    let svc = state.gifts().await?;
    finish("list", svc.list().await, INVALID_ITEM)
}

/// Add a gift; an existing id is overwritten.
pub async fn add_gift(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GiftItem>, JsonApiError> {
    let body = parse_body(&body)?;
    let svc = state.gifts().await?;
    finish("add", svc.add(&body).await, INVALID_ITEM)
}

/// Partially update a gift. The body is decoded by the service after the
/// existence check, so an unknown id wins over a malformed body.
pub async fn update_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<GiftItem>, JsonApiError> {
    let svc = state.gifts().await?;
    finish("update", svc.update_raw(Some(&id), &body).await, INVALID_UPDATE)
}

/// `PUT /gifts/`: always a missing-id error.
pub async fn update_gift_without_id(State(state): State<AppState>) -> Result<Json<GiftItem>, JsonApiError> {
    let svc = state.gifts().await?;
    finish("update", svc.update(None, &Value::Null).await, INVALID_UPDATE)
}

/// Delete a gift; unknown ids succeed too.
pub async fn delete_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, JsonApiError> {
    let svc = state.gifts().await?;
    finish("delete", svc.delete(Some(&id)).await, INVALID_ITEM)
}

/// `DELETE /gifts/`: always a missing-id error.
pub async fn delete_gift_without_id(State(state): State<AppState>) -> Result<Json<DeleteConfirmation>, JsonApiError> {
    let svc = state.gifts().await?;
    finish("delete", svc.delete(None).await, INVALID_ITEM)
}
