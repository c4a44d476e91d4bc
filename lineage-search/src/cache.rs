//! Opt-in in-memory cache of assembled timelines.
//!
//! Owned by a single [`TimelineSearch`](crate::orchestrator::search::TimelineSearch)
//! instance and keyed by the normalised query. Uses [`moka`] for
//! async-friendly caching with TTL and automatic eviction. Disabled unless
//! `cache_ttl_seconds > 0`.

use std::time::Duration;

use moka::future::Cache;

use crate::types::CanonicalPaper;

/// Maximum number of cached timelines.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Cache key: trimmed, lowercased query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a deterministic cache key from a query.
    pub fn new(query: &str) -> Self {
        Self(query.trim().to_lowercase())
    }
}

/// TTL-bounded timeline cache.
#[derive(Clone)]
pub struct TimelineCache {
    inner: Cache<CacheKey, Vec<CanonicalPaper>>,
}

impl TimelineCache {
    /// Build a cache, or `None` when `ttl_seconds` is 0.
    pub fn with_ttl(ttl_seconds: u64) -> Option<Self> {
        if ttl_seconds == 0 {
            return None;
        }
        let inner = Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Some(Self { inner })
    }

    /// Look up a cached timeline. Returns `None` on miss.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<CanonicalPaper>> {
        self.inner.get(key).await
    }

    /// Insert a timeline.
    pub async fn insert(&self, key: CacheKey, papers: Vec<CanonicalPaper>) {
        self.inner.insert(key, papers).await;
    }
}

impl std::fmt::Debug for TimelineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_paper(id: &str) -> CanonicalPaper {
        CanonicalPaper {
            id: id.to_string(),
            title: format!("Paper {id}"),
            year: 2020,
            authors: "A. Author".into(),
            description: "D".into(),
            document_url: None,
            citation_count: 1,
            score: 0.5,
        }
    }

    #[test]
    fn zero_ttl_disables_cache() {
        assert!(TimelineCache::with_ttl(0).is_none());
        assert!(TimelineCache::with_ttl(60).is_some());
    }

    #[test]
    fn cache_key_normalises_case_and_whitespace() {
        assert_eq!(CacheKey::new("  Quantum Computing "), CacheKey::new("quantum computing"));
        assert_ne!(CacheKey::new("quantum"), CacheKey::new("classical"));
    }

    #[tokio::test]
    async fn cache_miss_returns_none() {
        let cache = TimelineCache::with_ttl(600).expect("enabled");
        assert!(cache.get(&CacheKey::new("nothing here")).await.is_none());
    }

    #[tokio::test]
    async fn cache_insert_and_retrieve() {
        let cache = TimelineCache::with_ttl(600).expect("enabled");
        let key = CacheKey::new("crispr");
        cache.insert(key.clone(), vec![make_paper("p1")]).await;

        let cached = cache.get(&key).await.expect("should be cached");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "p1");
    }

    #[tokio::test]
    async fn overwrite_same_key_updates_value() {
        let cache = TimelineCache::with_ttl(600).expect("enabled");
        let key = CacheKey::new("crispr");
        cache.insert(key.clone(), vec![make_paper("old")]).await;
        cache.insert(key.clone(), vec![make_paper("new")]).await;

        let cached = cache.get(&key).await.expect("should be cached");
        assert_eq!(cached[0].id, "new");
    }

    #[tokio::test]
    async fn separate_instances_do_not_share_entries() {
        let a = TimelineCache::with_ttl(600).expect("enabled");
        let b = TimelineCache::with_ttl(600).expect("enabled");
        a.insert(CacheKey::new("shared"), vec![make_paper("p1")]).await;
        assert!(b.get(&CacheKey::new("shared")).await.is_none());
    }
}
