//! DNS cache implementation.
//!
//! This module provides a bounded in-memory cache of resource-record sets keyed
//! by query name and type. A resolver consults it before going to the network
//! and fills it afterwards, including with empty sets for negative answers.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::CacheConfig;
use crate::record::{after, Key, Record};

/// Capacity used when a cache is configured with zero capacity.
pub const MIN_CACHE_CAPACITY: usize = 1000;

/// An entry in the DNS cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// When the whole set goes stale.
    expiry: DateTime<Utc>,

    /// The cached records; empty for a negative answer.
    records: Vec<Record>,
}

/// Cache for DNS record sets.
///
/// Safe to share between threads: lookups take a shared lock, inserts take
/// an exclusive one.
#[derive(Debug)]
pub struct Cache {
    capacity: usize,
    expire: bool,
    negative_ttl: Duration,
    max_ttl: Option<Duration>,
    entries: RwLock<HashMap<Key, CacheEntry>>,
}

impl Cache {
    /// Create a new DNS cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of keys; `0` selects [`MIN_CACHE_CAPACITY`].
    /// * `expire` - Whether `get` hides entries whose expiry has passed.
    /// * `negative_ttl` - How long an empty (negative) answer stays valid.
    /// * `max_ttl` - Optional ceiling applied to positive answers.
    ///
    /// # Returns
    /// A new, empty `Cache`.
    pub fn new(capacity: usize, expire: bool, negative_ttl: Duration, max_ttl: Option<Duration>) -> Self {
        let capacity = if capacity == 0 { MIN_CACHE_CAPACITY } else { capacity };
        Self {
            capacity,
            expire,
            negative_ttl,
            max_ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a cache from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.expire, config.negative_ttl, config.max_ttl)
    }

    /// Add zero or more records for a name and type.
    ///
    /// An empty `records` caches a negative answer: the key becomes present
    /// with no records until the negative TTL runs out. Any previous entry for
    /// the key is replaced.
    pub fn add(&self, key: Key, records: Vec<Record>) {
        let entry = CacheEntry {
            expiry: self.expiry_for(&records),
            records,
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity {
            evict(&mut entries, self.capacity, self.expire);
        }
        entries.insert(key, entry);
    }

    /// Get the cached records for a name and type.
    ///
    /// # Returns
    /// `None` if nothing is cached, or if expiry is enabled and the entry is
    /// stale. A live negative answer comes back as an empty vector. Record
    /// order is not meaningful.
    pub fn get(&self, key: &Key) -> Option<Vec<Record>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if !self.expire || entry.expiry > Utc::now() {
            return Some(entry.records.clone());
        }
        None
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is stored at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity after substituting the minimum.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn expiry_for(&self, records: &[Record]) -> DateTime<Utc> {
        let now = Utc::now();
        let Some(lowest) = records.iter().map(|rr| rr.expiry).min() else {
            return after(now, self.negative_ttl);
        };
        // Mixed TTLs in one answer are not allowed, but take the lowest if seen.
        match self.max_ttl {
            Some(max_ttl) => lowest.min(after(now, max_ttl)),
            None => lowest,
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(0, true, Duration::ZERO, None)
    }
}

/// Make room for one more entry. Stale entries go first when expiry is
/// enabled, then arbitrary ones until the map is below capacity.
fn evict(entries: &mut HashMap<Key, CacheEntry>, capacity: usize, expire: bool) {
    let before = entries.len();
    if before < capacity {
        return;
    }

    let mut expired = 0;
    if expire {
        let now = Utc::now();
        let stale: Vec<Key> = entries
            .iter()
            .filter(|(_, e)| e.expiry < now)
            .map(|(k, _)| k.clone())
            .take(before + 1 - capacity)
            .collect();
        for key in stale {
            entries.remove(&key);
            expired += 1;
        }
    }

    let excess = (entries.len() + 1).saturating_sub(capacity);
    let victims: Vec<Key> = entries.keys().take(excess).cloned().collect();
    for key in &victims {
        entries.remove(key);
    }

    debug!(
        "Cache eviction: {} expired, {} dropped, {} -> {} entries",
        expired,
        victims.len(),
        before,
        entries.len()
    );
}
