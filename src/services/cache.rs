// src/services/cache.rs
// DOCUMENTATION: In-memory cache of resolved photo URLs
// PURPOSE: Avoid repeat provider round trips for the same (name, city)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache entry with optional expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Option<Duration>) -> Self {
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

/// Photo URL cache
/// DOCUMENTATION: Created once per server and injected into the enricher.
/// Without a TTL entries live until the process exits. Concurrent misses
/// for the same key are not coalesced; both callers hit the provider and
/// the last write wins.
pub struct PhotoCache {
    store: Arc<RwLock<HashMap<String, CacheEntry<Vec<String>>>>>,
    default_ttl: Option<Duration>,
}

impl PhotoCache {
    /// Create a cache whose entries never expire
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: None,
        }
    }

    /// Create a cache with a default TTL
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: Some(Duration::from_secs(ttl_seconds)),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Generate cache key from the place name and city
    /// DOCUMENTATION: Exact "{name}_{city}" concatenation. Case and
    /// diacritics are kept as given, so "Hilton_Rome" and "hilton_rome"
    /// are different entries.
    pub fn generate_key(name: &str, city: &str) -> String {
        format!("{}_{}", name, city)
    }

    /// Get cached photo URLs
    pub async fn get(&self, key: &str) -> Option<Vec<String>> {
        let store = self.store.read().await;

        if let Some(entry) = store.get(key) {
            if !entry.is_expired() {
                log::debug!("Cache HIT for key: {}", key);
                return Some(entry.data.clone());
            } else {
                log::debug!("Cache EXPIRED for key: {}", key);
            }
        } else {
            log::debug!("Cache MISS for key: {}", key);
        }

        None
    }

    /// Store photo URLs with the default TTL
    pub async fn put(&self, key: String, value: Vec<String>) {
        let mut store = self.store.write().await;
        log::debug!("Cache SET for key: {} ({} photos)", key, value.len());
        store.insert(key, CacheEntry::new(value, self.default_ttl));
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
            cached_photos: store.values().map(|e| e.data.len()).sum(),
        }
    }

    /// Clear all cache entries
    pub async fn clear(&self) -> usize {
        let mut store = self.store.write().await;
        let count = store.len();
        store.clear();
        log::info!("Cache cleared: {} entries removed", count);
        count
    }
}

impl Default for PhotoCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
    pub cached_photos: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries; only useful with a TTL
pub fn start_cleanup_task(cache: Arc<PhotoCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}
