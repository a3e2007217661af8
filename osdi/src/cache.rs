// Keyed roster cache with a fixed time-to-live. A cached roster is served
// as-is until it expires; expired entries are simply gone, so stale data is
// never returned and the next caller triggers a fresh aggregation.
use crate::aggregate::Roster;
use crate::metrics_defs::{ROSTER_CACHE_HIT, ROSTER_CACHE_MISS};
use crate::counter;
use moka::sync::Cache;
use std::time::Duration;

const SIZE: u64 = 1024;

pub struct RosterCache {
    cache: Cache<String, Roster>,
}

impl RosterCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(SIZE)
            .time_to_live(ttl)
            .build();

        RosterCache { cache }
    }

    pub fn get(&self, key: &str) -> Option<Roster> {
        let cached = self.cache.get(key);
        let metric_def = if cached.is_some() {
            ROSTER_CACHE_HIT
        } else {
            ROSTER_CACHE_MISS
        };
        counter!(metric_def).increment(1);
        cached
    }

    /// Overwrite the slot for `key`. Concurrent refreshes may race here;
    /// last write wins.
    pub fn insert(&self, key: &str, roster: Roster) {
        self.cache.insert(key.to_string(), roster);
    }
}
