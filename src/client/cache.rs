use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

/// How long fetched places count as fresh
pub const PLACES_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

struct StoredEntry<T> {
    value: T,
    expires_at: Instant,
}

/// In-memory query cache with a fixed staleness window.
///
/// There is no explicit invalidation: stale entries are dropped when read
/// and swept on every insert.
pub struct QueryCache<K, V> {
    entries: HashMap<K, StoredEntry<V>>,
    ttl: Duration,
}

impl<K: Hash + Eq + Debug, V: Clone> QueryCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Stores a value that stays fresh for the cache TTL and drops every
    /// entry that has already gone stale.
    pub fn put(&mut self, key: K, value: V) {
        let now = Instant::now();
        self.entries.retain(|_, entry| now < entry.expires_at);
        self.entries.insert(
            key,
            StoredEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Retrieves a value if it exists and has not gone stale.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                tracing::debug!("Key found and still fresh");
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!("Key found but stale");
                self.entries.remove(key);
                None
            }
            None => {
                tracing::debug!("Key not found");
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) {
        self.entries.remove(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
