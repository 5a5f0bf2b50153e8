//! A single-slot, expiring cache for the series catalog. Webhook pushes tend to
//! arrive in bursts (one per episode in a batch download), and the catalog is by
//! far the largest thing fetched from Sonarr.

use crate::models::Series;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time for expiry checks. Injected into [SeriesCache] so
/// tests can advance time deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [Clock] backed by the system's monotonic clock.
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheSlot {
    stored_at: Instant,
    series: Arc<Vec<Series>>,
}

/// Whole-catalog cache with a fixed time-to-live.
///
/// Concurrent requests that both miss will both fetch upstream and race to
/// [SeriesCache::store]; the last write wins. In-flight fetches are not
/// de-duplicated.
pub struct SeriesCache {
    ttl: Duration,
    clock: Box<dyn Clock>,
    slot: Mutex<Option<CacheSlot>>,
}

impl SeriesCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Box<dyn Clock>) -> Self {
        SeriesCache {
            ttl,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// The cached catalog, if one is present and younger than the time-to-live.
    pub fn get(&self) -> Option<Arc<Vec<Series>>> {
        let slot = self.slot.lock().expect("series cache lock poisoned");
        match slot.as_ref() {
            Some(entry) if self.clock.now().duration_since(entry.stored_at) < self.ttl => {
                Some(Arc::clone(&entry.series))
            }
            _ => None,
        }
    }

    /// Replace the cached catalog, restarting the expiry timer. Returns the
    /// stored value so callers can use it without re-fetching from the cache.
    pub fn store(&self, series: Vec<Series>) -> Arc<Vec<Series>> {
        let series = Arc::new(series);
        let mut slot = self.slot.lock().expect("series cache lock poisoned");
        *slot = Some(CacheSlot {
            stored_at: self.clock.now(),
            series: Arc::clone(&series),
        });
        series
    }
}
