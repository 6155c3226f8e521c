//! In-memory TTL cache with stale fallback.
//!
//! Entries are never evicted for being stale: an expired value stays around
//! as the fallback for a failed refresh until a successful refresh replaces
//! it. A failed refresh leaves both the value and its expiry untouched.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::Result;

/// How [`TtlCache::get_or_fetch`] produced its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh entry, no fetch.
    Hit,
    /// No entry; fetched and stored.
    Miss,
    /// Expired entry; fetched and replaced.
    Refreshed,
    /// Fetch failed; previous value returned as-is.
    Stale,
    /// Fetch failed and nothing to fall back on; default returned.
    Empty,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub value: V,
    pub expires_at: Instant,
}

/// Expiry used when `now + ttl` does not fit an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn expiry(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Request fingerprint for a standings aggregate.
pub fn standings_key(season: crate::Season) -> String {
    format!("standings_{}", season)
}

/// Request fingerprint for one leaders category.
pub fn leaders_key(season: crate::Season, category: crate::StatCategory, limit: usize) -> String {
    format!("leaders_{}_{}_{}", season, category, limit)
}

/// Keyed store of `(value, expiry)` pairs.
///
/// The map lock is only taken for short synchronous sections, never across
/// a fetch, so concurrent fetches for the same key can race; the last one to
/// complete wins.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        self.lock()
            .get(key)
            .filter(|e| e.is_fresh(now))
            .map(|e| e.value.clone())
    }

    /// Value for `key` regardless of expiry.
    pub fn get_stale(&self, key: &str) -> Option<V> {
        self.lock().get(key).map(|e| e.value.clone())
    }

    /// Full entry for `key` regardless of expiry.
    pub fn entry(&self, key: &str) -> Option<CacheEntry<V>> {
        self.lock().get(key).cloned()
    }

    /// Store `value` under `key`, expiring `ttl` from now.
    pub fn put(&self, key: &str, value: V, ttl: Duration) {
        let entry = CacheEntry {
            key: key.to_string(),
            value,
            expires_at: expiry(Instant::now(), ttl),
        };
        self.lock().insert(key.to_string(), entry);
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve a fresh entry, or call `fetch` once and cache its result.
    ///
    /// When `fetch` fails the previous value for `key` is returned even if
    /// expired; with no previous value the result is `V::default()`.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> (V, CacheStatus)
    where
        V: Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let had_entry = {
            let now = Instant::now();
            let entries = self.lock();
            match entries.get(key) {
                Some(entry) if entry.is_fresh(now) => {
                    debug!(key, "Cache hit");
                    return (entry.value.clone(), CacheStatus::Hit);
                }
                Some(_) => true,
                None => false,
            }
        };

        match fetch().await {
            Ok(value) => {
                self.put(key, value.clone(), ttl);
                let status = if had_entry {
                    CacheStatus::Refreshed
                } else {
                    CacheStatus::Miss
                };
                debug!(key, ?status, "Cache updated");
                (value, status)
            }
            Err(e) => match self.get_stale(key) {
                Some(stale) => {
                    warn!(key, error = %e, "Refresh failed, serving stale value");
                    (stale, CacheStatus::Stale)
                }
                None => {
                    warn!(key, error = %e, "Fetch failed and nothing cached");
                    (V::default(), CacheStatus::Empty)
                }
            },
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // Inserts are single calls, so a poisoned map is still consistent.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
