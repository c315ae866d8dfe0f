//! In-memory launch source.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{LaunchSource, UpstreamFilter};
use crate::error::Result;
use crate::models::Launch;

/// Serves a fixed list of launches, applying the upstream filter the way
/// the real provider would.
#[derive(Debug, Default)]
pub struct StaticLaunchSource {
    launches: Vec<Launch>,
    fetches: AtomicUsize,
}

impl StaticLaunchSource {
    pub fn new(launches: Vec<Launch>) -> Self {
        Self {
            launches,
            fetches: AtomicUsize::new(0),
        }
    }

    /// How many times `fetch_launches` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LaunchSource for StaticLaunchSource {
    async fn fetch_launches(&self, filter: &UpstreamFilter) -> Result<Vec<Launch>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .launches
            .iter()
            .filter(|launch| filter.matches(launch))
            .cloned()
            .collect())
    }
}
