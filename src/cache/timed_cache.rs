//! Time-based cache primitives with a fixed TTL (Time To Live).
//!
//! [`TimedCache`] is a keyed map of entries; [`TimedSlot`] holds a single value.
//! Both stamp values on write and treat anything at least `ttl` old as absent.
//! Time comes from `tokio::time::Instant` so a paused test runtime controls it.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// A cached value with the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// A thread-safe keyed cache with time-based expiration.
///
/// Expired entries are never returned; they linger in memory until
/// overwritten, removed, or swept by [`TimedCache::cleanup_expired`].
/// Cloning is cheap and clones share the same storage.
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    cache: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new TimedCache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Insert a value, replacing any previous entry and restarting its TTL.
    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, CacheEntry::new(value));
        }
    }

    /// Get a value if it exists and is younger than the TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        let cache = self.cache.read().ok()?;
        cache
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &K) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    /// Remove all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();

        match self.cache.write() {
            Ok(mut cache) => {
                let before = cache.len();
                cache.retain(|_, entry| entry.is_fresh(now, self.ttl));
                before - cache.len()
            }
            Err(_) => 0,
        }
    }

    /// Get the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the TTL duration for this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

/// A single time-stamped value with the same freshness rule as [`TimedCache`].
#[derive(Clone)]
pub struct TimedSlot<V: Clone> {
    slot: Arc<RwLock<Option<CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V: Clone> TimedSlot<V> {
    /// Create an empty slot with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Store a value, replacing whatever was there.
    pub fn store(&self, value: V) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(CacheEntry::new(value));
        }
    }

    /// Load the value if one is stored and still fresh.
    pub fn load(&self) -> Option<V> {
        let now = Instant::now();

        let slot = self.slot.read().ok()?;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Empty the slot.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Empty the slot if its value has expired. Returns true if something was dropped.
    pub fn cleanup_expired(&self) -> bool {
        let now = Instant::now();

        match self.slot.write() {
            Ok(mut slot) => {
                let expired = slot
                    .as_ref()
                    .is_some_and(|entry| !entry.is_fresh(now, self.ttl));
                if expired {
                    *slot = None;
                }
                expired
            }
            Err(_) => false,
        }
    }

    /// Whether a value (fresh or expired) is currently held.
    pub fn is_occupied(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl<V: Clone> std::fmt::Debug for TimedSlot<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedSlot")
            .field("ttl", &self.ttl)
            .field("occupied", &self.is_occupied())
            .finish()
    }
}
