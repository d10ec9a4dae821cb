//! Time-bounded store of completed searches.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::Config;
use crate::models::{Paper, SearchQuery};

/// Papers produced by one search, shared between the cache and its readers.
pub type PaperList = Arc<Vec<Paper>>;

/// Search results keyed by (topic, count).
///
/// Entries expire purely on elapsed time since insertion; there is no
/// explicit invalidation and no size bound, so a fresh result is never
/// evicted early. Concurrent misses on the same key share a single
/// initialization, so at most one pipeline run per key is in flight.
#[derive(Clone)]
pub struct SearchCache {
    inner: Cache<SearchQuery, PaperList>,
    ttl: Duration,
}

impl SearchCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder().time_to_live(ttl).build();
        Self { inner, ttl }
    }

    /// Create a cache from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_ttl)
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached result for `query`, if still fresh.
    pub async fn get(&self, query: &SearchQuery) -> Option<PaperList> {
        self.inner.get(query).await
    }

    /// Cached result for `query`, or the result of `init` if absent.
    ///
    /// Only successful results are stored; an error is handed to every
    /// caller waiting on the same key and nothing is cached.
    pub async fn get_or_try_insert<F, E>(&self, query: &SearchQuery, init: F) -> Result<PaperList, Arc<E>>
    where
        F: Future<Output = Result<PaperList, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with_by_ref(query, init).await
    }

    /// Number of live entries (approximate until pending maintenance runs).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl std::fmt::Debug for SearchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCache").field("ttl", &self.ttl).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(topic: &str) -> SearchQuery {
        SearchQuery::new(topic, 3).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = SearchCache::new(Duration::from_secs(60));
        assert!(cache.get(&query("x")).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_then_hit() {
        let cache = SearchCache::new(Duration::from_secs(60));
        let papers: PaperList = Arc::new(vec![Paper::new("p1")]);

        let first = cache
            .get_or_try_insert(&query("x"), async { Ok::<_, String>(papers.clone()) })
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        let second = cache
            .get_or_try_insert(&query("x"), async { Err::<PaperList, _>("must not run".to_string()) })
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = SearchCache::new(Duration::from_secs(60));

        let err = cache
            .get_or_try_insert(&query("x"), async { Err::<PaperList, _>("down".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err.as_str(), "down");
        assert!(cache.get(&query("x")).await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = SearchCache::new(Duration::from_millis(50));
        cache
            .get_or_try_insert(&query("x"), async { Ok::<_, String>(Arc::new(Vec::new())) })
            .await
            .unwrap();
        assert!(cache.get(&query("x")).await.is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(&query("x")).await.is_none());
    }

    #[tokio::test]
    async fn test_many_entries_stay_until_expiry() {
        let cache = SearchCache::new(Duration::from_secs(60));
        for i in 0..500 {
            cache
                .get_or_try_insert(&query(&format!("topic {i}")), async { Ok::<_, String>(Arc::new(Vec::new())) })
                .await
                .unwrap();
        }

        for i in 0..500 {
            assert!(cache.get(&query(&format!("topic {i}"))).await.is_some(), "topic {i} evicted");
        }
    }

    #[tokio::test]
    async fn test_keys_distinguish_count() {
        let cache = SearchCache::new(Duration::from_secs(60));
        cache
            .get_or_try_insert(&query("x"), async { Ok::<_, String>(Arc::new(Vec::new())) })
            .await
            .unwrap();
        let other = SearchQuery::new("x", 4).unwrap();
        assert!(cache.get(&other).await.is_none());
    }
}
