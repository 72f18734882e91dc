use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::CoreError;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::observability::record_search;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SearchResponse {
    pub result: Value,
}

/// Gift-idea search passthrough. The upstream payload is wrapped in `result`.
pub async fn search_gifts(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<SearchResponse>, JsonApiError> {
    match state.search.search(&query).await {
        Ok(result) => {
            record_search("ok");
            info!(%query, "search ok");
            Ok(Json(SearchResponse { result }))
        }
        Err(CoreError::MissingApiKey) => {
            record_search("missing_key");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Missing API key", None))
        }
        Err(e) => {
            record_search("error");
            error!(%query, error = %e, "search failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Search failed",
                Some(Value::String(e.to_string())),
            ))
        }
    }
}
