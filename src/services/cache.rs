// src/services/cache.rs
// DOCUMENTATION: Cache port and a simple in-memory implementation
// PURPOSE: Avoid redundant calls to the remote places provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Key/value cache consumed by the lookup service
/// DOCUMENTATION: Values are opaque strings (the service stores JSON).
/// `ttl = None` means the entry never expires. Implementations must be safe
/// for concurrent get/set from many tasks.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: String, value: String, ttl: Option<Duration>);
}

/// Cache entry with optional expiration
#[derive(Clone, Debug)]
struct CacheEntry {
    data: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(data: String, ttl: Option<Duration>) -> Self {
        Self {
            data,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| Instant::now() > expires_at)
            .unwrap_or(false)
    }
}

/// Simple in-memory cache with optional per-entry TTL
/// DOCUMENTATION: Thread-safe cache for provider responses
#[derive(Default)]
pub struct PlacesCache {
    store: RwLock<HashMap<String, CacheEntry>>,
    /// TTL applied by `set_default`; `None` keeps entries forever
    default_ttl: Option<Duration>,
}

impl PlacesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create cache whose `set_default` entries expire after `ttl`
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            default_ttl: Some(ttl),
            ..Self::default()
        }
    }

    /// Get cached value
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Cache HIT for key: {}", key);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Cache EXPIRED for key: {}", key);
                None
            }
            None => {
                log::debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    /// Set cached value with default TTL
    pub async fn set_default(&self, key: String, value: String) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Set cached value; `None` keeps it until cleared
    pub async fn set_with_ttl(&self, key: String, value: String, ttl: Option<Duration>) {
        let mut store = self.store.write().await;
        match ttl {
            Some(ttl) => log::debug!("Cache SET for key: {} (TTL: {}s)", key, ttl.as_secs()),
            None => log::debug!("Cache SET for key: {} (no expiry)", key),
        }
        store.insert(key, CacheEntry::new(value, ttl));
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }

    /// Clear all cache entries
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        let count = store.len();
        store.clear();
        log::info!("Cache cleared: {} entries removed", count);
    }
}

#[async_trait]
impl Cache for PlacesCache {
    async fn get(&self, key: &str) -> Option<String> {
        PlacesCache::get(self, key).await
    }

    async fn set(&self, key: String, value: String, ttl: Option<Duration>) {
        self.set_with_ttl(key, value, ttl).await;
    }
}

/// Cache statistics
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries. The task only holds a
/// weak reference and exits once the last `Arc` to the cache is dropped.
pub fn start_cleanup_task(cache: &Arc<PlacesCache>, interval: Duration) -> tokio::task::JoinHandle<()> {
    let cache: Weak<PlacesCache> = Arc::downgrade(cache);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);

        loop {
            interval.tick().await;
            match cache.upgrade() {
                Some(cache) => cache.cleanup().await,
                None => {
                    log::debug!("Cache dropped, stopping cleanup task");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = PlacesCache::new();

        cache
            .set_with_ttl("place_a".to_string(), "{}".to_string(), None)
            .await;

        assert_eq!(cache.get("place_a").await, Some("{}".to_string()));
        assert_eq!(cache.get("place_b").await, None);
    }

    #[tokio::test]
    async fn test_cache_expiration() {
        let cache = PlacesCache::new();

        cache
            .set_with_ttl(
                "short".to_string(),
                "value".to_string(),
                Some(Duration::from_millis(50)),
            )
            .await;
        cache
            .set_with_ttl("forever".to_string(), "value".to_string(), None)
            .await;

        assert!(cache.get("short").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(cache.get("short").await.is_none());
        assert!(cache.get("forever").await.is_some());
    }

    #[tokio::test]
    async fn test_cache_cleanup_and_stats() {
        let cache = PlacesCache::new();

        cache
            .set_with_ttl("key1".to_string(), "v".to_string(), Some(Duration::from_millis(10)))
            .await;
        cache
            .set_with_ttl("key2".to_string(), "v".to_string(), None)
            .await;

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            cache.stats().await,
            CacheStats {
                total_entries: 2,
                expired_entries: 1,
                active_entries: 1,
            }
        );

        cache.cleanup().await;
        assert_eq!(cache.stats().await.total_entries, 1);

        cache.clear().await;
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_cleanup_task_sweeps_expired_entries() {
        let cache = Arc::new(PlacesCache::new());
        cache
            .set_with_ttl("key".to_string(), "v".to_string(), Some(Duration::from_millis(10)))
            .await;

        let handle = start_cleanup_task(&cache, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_set_default_uses_default_ttl() {
        let expiring = PlacesCache::with_default_ttl(Duration::from_millis(20));
        let forever = PlacesCache::new();

        expiring.set_default("k".to_string(), "v".to_string()).await;
        forever.set_default("k".to_string(), "v".to_string()).await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(expiring.get("k").await.is_none());
        assert_eq!(forever.get("k").await, Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_when_cache_dropped() {
        let cache = Arc::new(PlacesCache::new());
        let handle = start_cleanup_task(&cache, Duration::from_millis(10));

        drop(cache);

        let finished = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_trait_object_delegates() {
        let cache: Arc<dyn Cache> = Arc::new(PlacesCache::new());

        cache.set("k".to_string(), "v".to_string(), None).await;

        assert_eq!(cache.get("k").await, Some("v".to_string()));
    }
}
