//! Launch Sources
//!
//! The data-source capability the query engine pulls candidate launches
//! from, plus its implementations.
//!
//! # Sources
//! - `SpacexClient`: the public SpaceX REST API, with upstream caching
//! - `StaticLaunchSource`: a fixed in-memory list

mod memory;
mod spacex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Launch;
use crate::query::params::{key_bool, key_time};

pub use memory::StaticLaunchSource;
pub use spacex::SpacexClient;

// == Upstream Filter ==
/// Broad filters a source may apply before returning candidates.
///
/// Sources are free to ignore any of these; the engine re-applies every
/// filter locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UpstreamFilter {
    pub success: Option<bool>,
    pub upcoming: Option<bool>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl UpstreamFilter {
    /// Canonical key for caching the provider's answer to this filter.
    pub fn cache_key(&self) -> String {
        format!(
            "success={}|upcoming={}|from={}|to={}",
            key_bool(self.success),
            key_bool(self.upcoming),
            key_time(self.from),
            key_time(self.to),
        )
    }

    /// Whether `launch` satisfies every filter that is set.
    pub fn matches(&self, launch: &Launch) -> bool {
        self.success.map_or(true, |want| launch.success == Some(want))
            && self.upcoming.map_or(true, |want| launch.upcoming == want)
            && self.from.map_or(true, |from| launch.date_utc >= from)
            && self.to.map_or(true, |to| launch.date_utc <= to)
    }
}

// == Launch Source Trait ==
/// Anything that can produce candidate launch records.
#[async_trait]
pub trait LaunchSource: Send + Sync {
    /// Fetch launches matching `filter`, in the source's natural order.
    ///
    /// Failures are returned unchanged to the caller; sources do not retry.
    async fn fetch_launches(&self, filter: &UpstreamFilter) -> Result<Vec<Launch>>;
}
