//! API Handlers
//!
//! HTTP request handlers for each endpoint of the launch service.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ErrorResponse, HealthResponse, StatsResponse};
use crate::query::{LaunchQueryParameters, LaunchQueryService};
use crate::source::{LaunchSource, SpacexClient};

/// Response header reporting whether the body came from the cache
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

/// Application state shared across all handlers.
///
/// The cache store synchronizes internally, so it is shared as a plain
/// `Arc` with no outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Store shared by the upstream and response layers
    pub cache: Arc<CacheStore>,
    /// Cached lookup-or-compute over the launch source
    pub service: LaunchQueryService,
}

impl AppState {
    /// Creates a new AppState answering queries from `source`.
    pub fn new(cache: Arc<CacheStore>, source: Arc<dyn LaunchSource>) -> Self {
        let service = LaunchQueryService::new(cache.clone(), source);
        Self { cache, service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache store and a SpaceX client that shares it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(CacheStore::new(config.cache_ttl_seconds));
        let client = SpacexClient::new(
            config.spacex_base_url.clone(),
            config.upstream_timeout(),
            cache.clone(),
        )?;
        Ok(Self::new(cache, Arc::new(client)))
    }
}

/// Handler for GET /launches
///
/// Parses the query string permissively and returns the rendered result,
/// from the cache when possible.
pub async fn launches_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let params = LaunchQueryParameters::from_pairs(pairs);
    let payload = state.service.lookup_or_compute(&params).await?;

    let cache_status = if payload.cache_hit { "HIT" } else { "MISS" };
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (CACHE_STATUS_HEADER, cache_status),
        ],
        payload.body,
    )
        .into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.stats(),
        state.cache.ttl_seconds(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Fallback for unknown paths.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
