//! Response DTOs for the launch API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::models::Launch;

/// Response body for GET /launches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchQueryResult {
    /// Number of launches returned
    pub count: usize,
    /// Matching launches, sorted and truncated
    pub launches: Vec<Launch>,
}

impl LaunchQueryResult {
    /// Creates a result from the selected launches
    pub fn new(launches: Vec<Launch>) -> Self {
        Self {
            count: launches.len(),
            launches,
        }
    }

    /// Renders the result as pretty-printed JSON.
    ///
    /// The output is what gets cached, so equal results always render to
    /// the same bytes.
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Number of writes
    pub writes: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured entry lifetime
    pub ttl_seconds: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats, ttl_seconds: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            writes: stats.writes,
            total_entries: stats.total_entries,
            ttl_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
