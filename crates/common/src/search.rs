//! Outbound client for the gift-idea search API.
//!
//! Stateless passthrough: the query goes to `{base_url}/search` and the
//! upstream JSON comes back untouched.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::CoreError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    num_results: u32,
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    num_results: u32,
}

impl SearchClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        num_results: u32,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        // blank keys behave like missing ones
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Ok(Self { http, base_url, api_key, num_results })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a search and return the raw upstream payload.
    pub async fn search(&self, query: &str) -> Result<serde_json::Value, CoreError> {
        let key = self.api_key.as_deref().ok_or(CoreError::MissingApiKey)?;
        let url = format!("{}/search", self.base_url);
        debug!(%url, query, num_results = self.num_results, "search request");

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", key)
            .json(&SearchRequest { query, num_results: self.num_results })
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "search upstream rejected request");
            return Err(CoreError::Upstream { status: status.as_u16(), body });
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))
    }
}
