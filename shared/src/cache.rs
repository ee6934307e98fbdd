//! In-memory TTL cache for normalized candle series.
//!
//! Entries expire lazily on read; there is no background sweep and no
//! capacity bound (in practice the key space is the small cross product of
//! currency pairs and timeframes). The clock is injectable so tests can
//! drive expiry deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::models::Candle;

/// Time source for cache expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// System monotonic clock, used outside of tests.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    data: Vec<Candle>,
    stored_at: Instant,
}

/// Key → candle-series store with a single TTL applied to every entry.
///
/// Interior mutability through a `Mutex` so the cache can be shared across
/// request handlers behind an `Arc`. Lock scope is a handful of map
/// operations and is never held across an await point.
pub struct CandleCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CandleCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the stored series if it is still fresh.
    ///
    /// A stale entry is removed on this read (lazy expiry) and reported as a
    /// miss. A genuine miss has no side effect.
    pub fn get(&self, key: &str) -> Option<Vec<Candle>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if self.clock.now().duration_since(entry.stored_at) <= self.ttl => {
                Some(entry.data.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Unconditionally overwrites any existing entry for `key`.
    pub fn set(&self, key: &str, data: Vec<Candle>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: self.clock.now(),
            },
        );
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of entries currently stored, including stale entries that have
    /// not yet been lazily expired by a read.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
