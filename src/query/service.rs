//! Launch Query Service
//!
//! Lookup-or-compute over the response cache: serves a rendered result
//! when one is cached, otherwise runs the engine and stores its output.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheNamespace, CacheStore};
use crate::error::Result;
use crate::query::{engine, LaunchQueryParameters};
use crate::source::LaunchSource;

/// A rendered response body and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPayload {
    pub body: String,
    pub cache_hit: bool,
}

/// Answers launch queries through the shared cache.
///
/// Concurrent misses on one key each compute and store independently; the
/// last write wins.
#[derive(Clone)]
pub struct LaunchQueryService {
    cache: Arc<CacheStore>,
    source: Arc<dyn LaunchSource>,
}

impl LaunchQueryService {
    pub fn new(cache: Arc<CacheStore>, source: Arc<dyn LaunchSource>) -> Self {
        Self { cache, source }
    }

    /// Returns the rendered result for `params`, computing it on a miss.
    ///
    /// Failures from the source are returned as-is and nothing is cached.
    pub async fn lookup_or_compute(&self, params: &LaunchQueryParameters) -> Result<CachedPayload> {
        let key = CacheNamespace::Response.key(&params.to_cache_key());

        if let Some(body) = self.cache.try_get(&key) {
            info!(key = %key, "Serving cached response");
            return Ok(CachedPayload {
                body,
                cache_hit: true,
            });
        }

        let result = engine::run_query(params, self.source.as_ref()).await?;
        let body = result.render()?;
        debug!(key = %key, count = result.count, "Storing rendered response");
        self.cache.set(key, body.clone());

        Ok(CachedPayload {
            body,
            cache_hit: false,
        })
    }

    /// The store backing this service.
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }
}
