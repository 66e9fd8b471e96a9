//! TTL cache contract and the in-memory implementation.
//!
//! The cache backs the submission rate limiter: one entry per user, expiry
//! is the only teardown path. The contract is deliberately tiny (`get`,
//! `set`, `insert_if_vacant`) so a remote store can stand in for the
//! in-memory map without touching any caller.
//!
//! Time is read through the injected [`Clock`] so cooldown behavior is
//! testable with a fake clock instead of real sleeps.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::CacheResult;

// =============================================================================
// Clock
// =============================================================================

/// A monotonic time source.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The process clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// =============================================================================
// TtlCache Trait
// =============================================================================

/// A key-value store whose entries expire after a per-entry duration.
///
/// Values are creation timestamps; the store is used as a time-boxed
/// presence set ("has this key been inserted within its window?"), not as a
/// general cache.
#[async_trait]
pub trait TtlCache: Send + Sync {
    /// Returns the creation instant of a live (unexpired) entry, if any.
    async fn get(&self, key: &str) -> CacheResult<Option<Instant>>;

    /// Inserts or replaces an entry expiring after `ttl`.
    async fn set(&self, key: &str, ttl: Duration) -> CacheResult<()>;

    /// Inserts an entry only if no live entry exists for `key`.
    ///
    /// Returns `true` if the entry was inserted, `false` if a live entry
    /// was already present. The check and the insert are atomic with
    /// respect to concurrent calls for the same key.
    async fn insert_if_vacant(&self, key: &str, ttl: Duration) -> CacheResult<bool>;
}

// =============================================================================
// MemoryTtlCache
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Entry {
    created_at: Instant,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory [`TtlCache`] with lazy expiry.
///
/// Entries are evicted when a read or write observes them past their
/// deadline; there is no background sweeper. A single mutex guards the map,
/// which makes [`insert_if_vacant`](TtlCache::insert_if_vacant) atomic per
/// key as the rate limiter requires.
pub struct MemoryTtlCache {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryTtlCache {
    /// Creates a cache reading time from the process clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a cache reading time from the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the number of live entries, evicting expired ones.
    pub fn live_len(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.is_live(now));
        entries.len()
    }
}

impl Default for MemoryTtlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtlCache for MemoryTtlCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Instant>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.created_at)),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, ttl: Duration) -> CacheResult<()> {
        let now = self.clock.now();
        self.entries.lock().insert(
            key.to_owned(),
            Entry {
                created_at: now,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn insert_if_vacant(&self, key: &str, ttl: Duration) -> CacheResult<bool> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }
        entries.insert(
            key.to_owned(),
            Entry {
                created_at: now,
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeClock;

    const TTL: Duration = Duration::from_secs(60);

    fn cache_with_clock() -> (MemoryTtlCache, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::new());
        let cache = MemoryTtlCache::with_clock(clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let (cache, clock) = cache_with_clock();

        cache.set("k", TTL).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_some());

        clock.advance(TTL);
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entry_is_live_just_before_expiry() {
        let (cache, clock) = cache_with_clock();

        cache.set("k", TTL).await.unwrap();
        clock.advance(TTL - Duration::from_secs(1));

        assert!(cache.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn insert_if_vacant_refuses_live_entry() {
        let (cache, clock) = cache_with_clock();

        assert!(cache.insert_if_vacant("k", TTL).await.unwrap());
        assert!(!cache.insert_if_vacant("k", TTL).await.unwrap());

        clock.advance(TTL);
        assert!(cache.insert_if_vacant("k", TTL).await.unwrap());
    }

    #[tokio::test]
    async fn insert_if_vacant_keeps_original_creation_time() {
        let (cache, clock) = cache_with_clock();

        cache.insert_if_vacant("k", TTL).await.unwrap();
        let created = cache.get("k").await.unwrap().unwrap();

        clock.advance(Duration::from_secs(10));
        cache.insert_if_vacant("k", TTL).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().unwrap(), created);
    }

    #[tokio::test]
    async fn live_len_evicts_expired_entries() {
        let (cache, clock) = cache_with_clock();

        cache.set("a", TTL).await.unwrap();
        cache.set("b", TTL * 2).await.unwrap();
        assert_eq!(cache.live_len(), 2);

        clock.advance(TTL);
        assert_eq!(cache.live_len(), 1);
    }
}
