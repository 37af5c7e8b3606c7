//! TTL cache for embedding results.
//!
//! An explicit, injectable cache object rather than module-level global
//! state: the client owns one, tests construct their own with a manual
//! clock. Entries are evicted lazily on lookup; there is no background
//! sweep, and the cache grows until [`EmbeddingCache::clear`] is called.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::types::EmbeddingResult;

/// Millisecond clock abstraction so TTL behavior is testable.
pub trait Clock: Send + Sync {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for deterministic TTL tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: std::sync::atomic::AtomicU64,
}

#[cfg(any(test, feature = "mock"))]
impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: std::sync::atomic::AtomicU64::new(start_millis),
        }
    }

    /// Advances the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.millis.fetch_add(
            delta.as_millis() as u64,
            std::sync::atomic::Ordering::SeqCst,
        );
    }
}

#[cfg(any(test, feature = "mock"))]
impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(std::sync::atomic::Ordering::SeqCst)
    }
}

struct CacheSlot {
    result: EmbeddingResult,
    inserted_at_ms: u64,
    ttl_ms: u64,
}

/// Operational snapshot of the cache, for visibility only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Rough in-memory footprint of the stored embeddings.
    pub approx_size_bytes: usize,
    pub entry_count: usize,
    /// Insertion time of the oldest live entry, ms since epoch.
    pub oldest_entry_ms: Option<u64>,
    /// Insertion time of the newest live entry, ms since epoch.
    pub newest_entry_ms: Option<u64>,
}

/// Thread-safe TTL cache keyed by `model + ":" + normalized text`.
pub struct EmbeddingCache {
    entries: Mutex<HashMap<String, CacheSlot>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl EmbeddingCache {
    /// Creates a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache with an injected clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Cache key: model plus lowercase-trimmed text.
    pub fn key_for(model: &str, text: &str) -> String {
        format!("{}:{}", model, text.trim().to_lowercase())
    }

    /// Looks up a key, lazily evicting it when expired.
    pub fn get(&self, key: &str) -> Option<EmbeddingResult> {
        let now = self.clock.now_millis();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(slot) if now.saturating_sub(slot.inserted_at_ms) < slot.ttl_ms => {
                Some(slot.result.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a result under `key` with the cache's TTL.
    pub fn insert(&self, key: String, result: EmbeddingResult) {
        let slot = CacheSlot {
            result,
            inserted_at_ms: self.clock.now_millis(),
            ttl_ms: self.ttl.as_millis() as u64,
        };
        self.entries.lock().insert(key, slot);
    }

    /// Number of entries, including any not yet lazily evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Empties all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Snapshot of entry count, approximate size, and age bounds.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();

        let approx_size_bytes = entries
            .iter()
            .map(|(key, slot)| {
                key.len()
                    + slot.result.embedding.len() * std::mem::size_of::<f32>()
                    + slot.result.model.len()
            })
            .sum();

        CacheStats {
            approx_size_bytes,
            entry_count: entries.len(),
            oldest_entry_ms: entries.values().map(|s| s.inserted_at_ms).min(),
            newest_entry_ms: entries.values().map(|s| s.inserted_at_ms).max(),
        }
    }
}

impl std::fmt::Debug for EmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
