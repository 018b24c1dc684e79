//! Time-expiring key/value storage used for response, search and image caching.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::cache_key::CacheKey;

/// A cache with time-to-live semantics.
///
/// Implementations must never return a value whose age is at or beyond the TTL.
#[async_trait]
pub trait TtlStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &CacheKey) -> Option<V>;

    async fn put(&self, key: CacheKey, value: V);
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Process-local [`TtlStore`]. Entries are lost on restart.
#[derive(Debug)]
pub struct MemoryStore<V> {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, Entry<V>>>,
}

impl<V> MemoryStore<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of entries currently held, including ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<V> TtlStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &CacheKey) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: CacheKey, value: V) {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < ttl);
        entries.insert(
            key,
            Entry {
                value,
                stored_at: now,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn serves_entry_before_ttl() {
        let store = MemoryStore::new(Duration::from_secs(1800));
        store.put(CacheKey::niche("rust"), "cached".to_string()).await;

        tokio::time::advance(Duration::from_secs(1799)).await;
        assert_eq!(
            store.get(&CacheKey::niche("Rust")).await.as_deref(),
            Some("cached")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn misses_at_exactly_ttl() {
        let store = MemoryStore::new(Duration::from_secs(60));
        store.put(CacheKey::niche("rust"), 7_u32).await;

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(store.get(&CacheKey::niche("rust")).await, None);
        assert!(store.is_empty().await, "stale entry should be evicted on read");
    }

    #[tokio::test(start_paused = true)]
    async fn put_refreshes_timestamp() {
        let store = MemoryStore::new(Duration::from_secs(60));
        let key = CacheKey::search("rust news");
        store.put(key.clone(), 1_u32).await;
        tokio::time::advance(Duration::from_secs(50)).await;
        store.put(key.clone(), 2_u32).await;
        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(store.get(&key).await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn put_purges_expired_entries() {
        let store = MemoryStore::new(Duration::from_secs(10));
        store.put(CacheKey::niche("a"), 1_u32).await;
        tokio::time::advance(Duration::from_secs(11)).await;
        store.put(CacheKey::niche("b"), 2_u32).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_key_misses() {
        let store: MemoryStore<String> = MemoryStore::new(Duration::from_secs(60));
        assert!(store.get(&CacheKey::niche("nothing")).await.is_none());
    }
}
