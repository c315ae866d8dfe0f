//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, shared by the upstream
//! fetch layer and the rendered-response layer.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Cache Namespace ==
/// Disjoint key spaces inside one `CacheStore`.
///
/// Raw upstream bodies and rendered responses share the store, so every
/// key carries the prefix of the layer that wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Fully rendered `/launches` responses
    Response,
    /// Raw bodies returned by the launch data provider
    Upstream,
}

impl CacheNamespace {
    /// Key prefix for this namespace.
    pub fn prefix(self) -> &'static str {
        match self {
            CacheNamespace::Response => "resp:",
            CacheNamespace::Upstream => "upstream:",
        }
    }

    /// Builds the full store key for `key` in this namespace.
    pub fn key(self, key: &str) -> String {
        format!("{}{}", self.prefix(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_do_not_collide() {
        let raw = "success=true|upcoming=*";
        assert_ne!(
            CacheNamespace::Response.key(raw),
            CacheNamespace::Upstream.key(raw)
        );
    }

    #[test]
    fn test_namespace_key_format() {
        assert_eq!(CacheNamespace::Response.key("abc"), "resp:abc");
        assert_eq!(CacheNamespace::Upstream.key("abc"), "upstream:abc");
    }

    #[test]
    fn test_namespaced_entries_are_independent() {
        let store = CacheStore::new(60);
        store.set(CacheNamespace::Response.key("k"), "rendered");
        store.set(CacheNamespace::Upstream.key("k"), "raw");

        assert_eq!(
            store.try_get(&CacheNamespace::Response.key("k")).as_deref(),
            Some("rendered")
        );
        assert_eq!(
            store.try_get(&CacheNamespace::Upstream.key("k")).as_deref(),
            Some("raw")
        );
    }
}
