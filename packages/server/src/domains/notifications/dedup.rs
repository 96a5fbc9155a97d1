//! Duplicate-notification suppression.
//!
//! The same transition can be triggered twice in quick succession by an
//! overlapping manual action and scheduler sweep. This cache remembers the
//! last dispatch per `(match, event kind)` and suppresses repeats inside the
//! deduplication window. Entries self-expire; the cache is created at process
//! start and injected wherever dispatching happens - it is not a global.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::common::MatchId;
use crate::domains::matches::events::MatchEventKind;

pub type DedupKey = (MatchId, MatchEventKind);

/// Repeats inside this window are suppressed.
const DEDUPLICATION_WINDOW_MINUTES: i64 = 2;

/// Entries older than this are evicted opportunistically.
const CACHE_EXPIRY_MINUTES: i64 = 30;

pub struct DedupCache {
    dispatched: DashMap<DedupKey, DateTime<Utc>>,
    window: Duration,
    expiry: Duration,
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupCache {
    pub fn new() -> Self {
        Self::with_windows(
            Duration::minutes(DEDUPLICATION_WINDOW_MINUTES),
            Duration::minutes(CACHE_EXPIRY_MINUTES),
        )
    }

    /// Custom windows, mainly for tests.
    pub fn with_windows(window: Duration, expiry: Duration) -> Self {
        Self {
            dispatched: DashMap::new(),
            window,
            expiry,
        }
    }

    /// Would a dispatch for this key go through right now?
    pub fn should_dispatch(&self, key: &DedupKey) -> bool {
        self.should_dispatch_at(key, Utc::now())
    }

    /// Record a dispatch without checking. Prefer [`check_and_record`] on the
    /// dispatch path; this exists for callers that already decided.
    ///
    /// [`check_and_record`]: DedupCache::check_and_record
    pub fn record_dispatch(&self, key: DedupKey) {
        self.record_dispatch_at(key, Utc::now());
    }

    /// Atomic check-and-set: returns `true` and records the dispatch when the
    /// key is outside the deduplication window, `false` (no record) when a
    /// recent dispatch suppresses it. The record lands before any processing
    /// so a concurrent caller cannot slip through the race window.
    pub fn check_and_record(&self, key: DedupKey) -> bool {
        self.check_and_record_at(key, Utc::now())
    }

    fn should_dispatch_at(&self, key: &DedupKey, now: DateTime<Utc>) -> bool {
        match self.dispatched.get(key) {
            Some(last) => *last + self.window <= now,
            None => true,
        }
    }

    fn record_dispatch_at(&self, key: DedupKey, now: DateTime<Utc>) {
        self.dispatched.insert(key, now);
        self.evict_expired(now);
    }

    fn check_and_record_at(&self, key: DedupKey, now: DateTime<Utc>) -> bool {
        let admitted = match self.dispatched.entry(key) {
            Entry::Occupied(mut entry) => {
                if *entry.get() + self.window > now {
                    false
                } else {
                    entry.insert(now);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        };
        if admitted {
            self.evict_expired(now);
        }
        admitted
    }

    fn evict_expired(&self, now: DateTime<Utc>) {
        let cutoff = now - self.expiry;
        self.dispatched.retain(|_, last| *last >= cutoff);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.dispatched.len()
    }
}
