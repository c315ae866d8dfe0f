//! SpaceX API client.
//!
//! Fetches launch documents from the public SpaceX REST API
//! (`POST /launches/query`). Raw response bodies are cached in the
//! upstream namespace of the shared store, keyed by the filter that
//! produced them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::{LaunchSource, UpstreamFilter};
use crate::cache::{CacheNamespace, CacheStore};
use crate::error::{Result, ServiceError};
use crate::models::{Launch, LaunchPage};

/// Bytes of an error body kept in error messages
const ERROR_BODY_PREVIEW: usize = 500;

/// Message used when a failed response's body cannot be read
const UNREADABLE_ERROR_BODY: &str = "<unreadable response body>";

/// HTTP client for the launch provider.
#[derive(Debug, Clone)]
pub struct SpacexClient {
    client: reqwest::Client,
    base_url: String,
    cache: Arc<CacheStore>,
}

impl SpacexClient {
    /// Create a client against `base_url` (e.g. `https://api.spacexdata.com/v5`).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache: Arc<CacheStore>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("launch_cache/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// URL helper.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request body for `/launches/query`, translating the filter into the
    /// provider's MongoDB-style query language.
    pub fn query_body(filter: &UpstreamFilter) -> Value {
        let mut query = Map::new();
        if let Some(success) = filter.success {
            query.insert("success".to_string(), json!(success));
        }
        if let Some(upcoming) = filter.upcoming {
            query.insert("upcoming".to_string(), json!(upcoming));
        }

        let mut range = Map::new();
        if let Some(from) = filter.from {
            range.insert("$gte".to_string(), json!(from.to_rfc3339()));
        }
        if let Some(to) = filter.to {
            range.insert("$lte".to_string(), json!(to.to_rfc3339()));
        }
        if !range.is_empty() {
            query.insert("date_utc".to_string(), Value::Object(range));
        }

        json!({
            "query": query,
            "options": {
                "pagination": false,
                "sort": { "date_utc": "asc" }
            }
        })
    }

    /// Performs the HTTP round trip and returns the raw body.
    async fn fetch_raw(&self, filter: &UpstreamFilter) -> Result<String> {
        let url = self.url("/launches/query");
        debug!("Querying launch provider: {}", url);

        let resp = self
            .client
            .post(&url)
            .json(&Self::query_body(filter))
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("HTTP error for {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let preview: String = match resp.text().await {
                Ok(body) => body.chars().take(ERROR_BODY_PREVIEW).collect(),
                Err(e) => {
                    debug!("Failed reading error body from {}: {}", url, e);
                    UNREADABLE_ERROR_BODY.to_string()
                }
            };
            return Err(ServiceError::UpstreamStatus {
                status: status.as_u16(),
                message: preview,
            });
        }

        resp.text()
            .await
            .map_err(|e| ServiceError::Upstream(format!("failed reading body from {url}: {e}")))
    }
}

/// Decodes a provider response body.
fn decode_page(body: &str) -> Result<Vec<Launch>> {
    let page: LaunchPage = serde_json::from_str(body)?;
    Ok(page.docs)
}

#[async_trait]
impl LaunchSource for SpacexClient {
    async fn fetch_launches(&self, filter: &UpstreamFilter) -> Result<Vec<Launch>> {
        let key = CacheNamespace::Upstream.key(&filter.cache_key());

        if let Some(body) = self.cache.try_get(&key) {
            debug!(key = %key, "Serving launches from upstream cache");
            return decode_page(&body);
        }

        let body = self.fetch_raw(filter).await?;
        let launches = decode_page(&body)?;
        info!(
            key = %key,
            count = launches.len(),
            "Fetched launches from provider"
        );
        self.cache.set(key, body);
        Ok(launches)
    }
}
