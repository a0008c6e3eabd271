//! Per-query result cache.
//!
//! Successful query-variant results are cached with a TTL so repeated
//! concepts (within one session or across batch calls) do not hammer the
//! search backend. Failures are never cached; a failed variant retries on
//! the next call. Purely an optimisation: discovery behaves identically
//! with the cache disabled, just slower.

use std::time::Duration;

use moka::future::Cache;

use crate::types::RawHit;

/// Maximum number of cached query result sets.
const MAX_CACHE_ENTRIES: u64 = 200;

/// Bounded TTL cache keyed by the trimmed, lowercased query string.
///
/// Owned by the finder rather than living in process-global state, so each
/// discovery component controls its own cache lifetime.
pub struct QueryCache {
    inner: Option<Cache<String, Vec<RawHit>>>,
}

impl QueryCache {
    /// Build a cache with the given TTL. A TTL of 0 disables caching.
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Look up cached hits for a query.
    pub async fn get(&self, query: &str) -> Option<Vec<RawHit>> {
        self.inner.as_ref()?.get(&Self::key(query)).await
    }

    /// Store the hits of a successful query.
    pub async fn insert(&self, query: &str, hits: Vec<RawHit>) {
        if let Some(cache) = &self.inner {
            cache.insert(Self::key(query), hits).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(url: &str) -> RawHit {
        RawHit {
            title: "t".into(),
            url: url.to_string(),
            snippet: String::new(),
        }
    }

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let cache = QueryCache::new(0);
        cache.insert("rust tutorial", vec![hit("https://a.com")]).await;
        assert!(cache.get("rust tutorial").await.is_none());
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let cache = QueryCache::new(60);
        cache.insert("rust tutorial", vec![hit("https://a.com")]).await;
        let cached = cache.get("rust tutorial").await.expect("cached");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].url, "https://a.com");
    }

    #[tokio::test]
    async fn key_is_case_and_whitespace_insensitive() {
        let cache = QueryCache::new(60);
        cache.insert("Rust Tutorial", vec![hit("https://a.com")]).await;
        assert!(cache.get("  rust tutorial ").await.is_some());
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = QueryCache::new(60);
        assert!(cache.get("never inserted").await.is_none());
    }
}
