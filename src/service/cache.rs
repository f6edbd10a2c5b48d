//! In-memory TTL memoization.
//!
//! Small read-through caches for responses that are expensive or chatty to
//! recompute but tolerate staleness: the public whitelist roster and the
//! per-UUID connection-gate verdicts. Entries expire after a fixed TTL and
//! are dropped lazily on access.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cached value with its expiry instant.
#[derive(Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A keyed TTL cache.
///
/// Cloning shares the underlying map, so a cache stored in `AppState` is
/// visible to every request handler.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<K, Entry<V>>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets a live entry, dropping it if it has expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry existed but expired; take the write lock to clean it up.
        self.entries.write().await.remove(key);
        None
    }

    pub async fn insert(&self, key: K, value: V) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(key, entry);
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn returns_inserted_value_before_expiry() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;

        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
    }

    #[tokio::test]
    async fn expires_after_ttl() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_millis(20));
        cache.insert("a".to_string(), 1).await;

        sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get(&"a".to_string()).await, None);
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        cache.invalidate(&"a".to_string()).await;

        assert_eq!(cache.get(&"a".to_string()).await, None);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        cache.insert("b".to_string(), 2).await;
        cache.clear().await;

        assert_eq!(cache.get(&"a".to_string()).await, None);
        assert_eq!(cache.get(&"b".to_string()).await, None);
    }
}
