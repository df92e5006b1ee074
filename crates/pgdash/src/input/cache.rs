//! Time-to-live cache for fetched source bytes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A cached fetch result.
#[derive(Debug, Clone)]
struct CacheEntry {
    bytes: Arc<Vec<u8>>,
    fetched_at: Instant,
}

/// Caches raw source bytes by source key until they expire.
///
/// Expiry is the only invalidation. A zero TTL disables caching entirely.
#[derive(Debug)]
pub struct SourceCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SourceCache {
    /// Create a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        self.get_at(key, Instant::now())
    }

    /// Look up an entry as of `now`, evicting it if expired.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<Arc<Vec<u8>>> {
        if self.ttl.is_zero() {
            return None;
        }

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if now.saturating_duration_since(entry.fetched_at) < self.ttl => {
                Some(Arc::clone(&entry.bytes))
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store bytes fetched now.
    pub fn insert(&self, key: impl Into<String>, bytes: Vec<u8>) -> Arc<Vec<u8>> {
        self.insert_at(key, bytes, Instant::now())
    }

    /// Store bytes fetched at `fetched_at`, pruning entries expired by then.
    pub fn insert_at(
        &self,
        key: impl Into<String>,
        bytes: Vec<u8>,
        fetched_at: Instant,
    ) -> Arc<Vec<u8>> {
        let bytes = Arc::new(bytes);
        if self.ttl.is_zero() {
            return bytes;
        }

        let ttl = self.ttl;
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| fetched_at.saturating_duration_since(entry.fetched_at) < ttl);
        entries.insert(
            key.into(),
            CacheEntry {
                bytes: Arc::clone(&bytes),
                fetched_at,
            },
        );
        bytes
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(600))
    }
}
