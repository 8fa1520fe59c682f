//! Single-slot result cache.
//!
//! Holds the record lists of the last successful run together with the
//! instant they were stored. Timestamps come from the tokio clock so that
//! paused-time tests can move past the expiry window.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::result::Snapshot;

/// One cached snapshot with a time-to-live.
#[derive(Debug, Clone)]
pub struct ResultCache {
    entry: Option<(Instant, Arc<Snapshot>)>,
    ttl: Duration,
}

impl ResultCache {
    /// Empty cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// The cached snapshot if it is younger than the TTL at `now`.
    #[must_use]
    pub fn get(&self, now: Instant) -> Option<Arc<Snapshot>> {
        let (stored_at, snapshot) = self.entry.as_ref()?;
        if now.saturating_duration_since(*stored_at) >= self.ttl {
            log::debug!("Cached results expired");
            return None;
        }
        Some(Arc::clone(snapshot))
    }

    /// Replace the cached snapshot.
    pub fn store(&mut self, now: Instant, snapshot: Arc<Snapshot>) {
        self.entry = Some((now, snapshot));
    }

    /// Drop the cached snapshot.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Time-to-live of cached entries.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ExtractionResult;

    fn snapshot() -> Arc<Snapshot> {
        Arc::new(Snapshot::from_result(ExtractionResult::success(vec![], vec![], vec![])))
    }

    #[test]
    fn entry_expires_at_ttl() {
        let mut cache = ResultCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        let snap = snapshot();
        cache.store(t0, Arc::clone(&snap));

        let hit = cache.get(t0 + Duration::from_secs(299)).expect("fresh");
        assert!(Arc::ptr_eq(&hit, &snap));
        assert!(cache.get(t0 + Duration::from_secs(300)).is_none());
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut cache = ResultCache::new(Duration::from_secs(300));
        let now = Instant::now();
        cache.store(now, snapshot());
        cache.clear();
        assert!(cache.get(now).is_none());
    }
}
