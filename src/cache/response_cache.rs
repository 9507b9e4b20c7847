//! Per-match payload cache with a fixed freshness window.
//!
//! Entries are capped by an LRU bound and expire lazily: staleness is only
//! checked when an entry is read, there is no background sweep.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::{MatchId, ResultPayload};

/// Payload stored together with the time it was computed
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub stored_at: Instant,
    pub value: ResultPayload,
}

impl CacheEntry {
    /// Fresh while strictly younger than `ttl` at `now`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// Shared response cache, one instance per process
pub struct ResponseCache {
    entries: Mutex<LruCache<MatchId, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Cached payload for `id` if still fresh at `now`
    pub async fn get(&self, id: MatchId, now: Instant) -> Option<ResultPayload> {
        let mut entries = self.entries.lock().await;

        let entry = match entries.get(&id) {
            Some(entry) => entry,
            None => {
                debug!(match_id = %id, "Cache miss");
                return None;
            }
        };

        if entry.is_fresh(now, self.ttl) {
            debug!(match_id = %id, "Cache hit");
            return Some(entry.value.clone());
        }

        debug!(
            match_id = %id,
            age = ?now.saturating_duration_since(entry.stored_at),
            "Dropping stale cache entry"
        );
        entries.pop(&id);
        None
    }

    /// Store `payload` for `id`, replacing whatever was there
    pub async fn put(&self, id: MatchId, payload: ResultPayload, now: Instant) {
        let entry = CacheEntry {
            stored_at: now,
            value: payload,
        };

        self.entries.lock().await.put(id, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
