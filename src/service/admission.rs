//! Bounded concurrency for incoming events.
//!
//! Each message event is handled in its own task. When the configured number
//! of tasks is already running, new events are dropped instead of queued, so
//! a burst of messages cannot pile up unbounded work or stale replies.

use dioxus_logger::tracing;
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admits events up to a fixed limit and drops the rest.
///
/// Cloning shares the same limit and counters.
#[derive(Clone)]
pub struct AdmissionControl {
    /// `None` when the limit is 0 (unlimited).
    semaphore: Option<Arc<Semaphore>>,
    in_flight: Arc<AtomicUsize>,
    dropped: Arc<AtomicU64>,
}

/// Held for as long as an admitted event is being handled.
pub struct AdmissionPermit {
    _permit: Option<OwnedSemaphorePermit>,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AdmissionControl {
    /// Creates an admission gate allowing `limit` events at once, 0 for unlimited.
    pub fn new(limit: usize) -> Self {
        Self {
            semaphore: (limit > 0).then(|| Arc::new(Semaphore::new(limit))),
            in_flight: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Tries to admit one event without waiting.
    ///
    /// # Returns
    /// - `Some(AdmissionPermit)` - Event admitted; drop the permit when done
    /// - `None` - Limit reached, the event should be discarded
    pub fn try_admit(&self) -> Option<AdmissionPermit> {
        let permit = match &self.semaphore {
            Some(semaphore) => match semaphore.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    self.dropped.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!(
                        "Dropping event, {} already in flight ({} dropped so far)",
                        self.in_flight(),
                        self.dropped()
                    );
                    return None;
                }
            },
            None => None,
        };

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        Some(AdmissionPermit {
            _permit: permit,
            in_flight: self.in_flight.clone(),
        })
    }

    /// Number of events currently being handled.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Number of events dropped since start-up.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that events beyond the limit are dropped until a permit is released.
    ///
    /// Expected: second admission refused, third admitted after the first finishes
    #[test]
    fn drops_events_over_the_limit() {
        let admission = AdmissionControl::new(1);

        let first = admission.try_admit();
        assert!(first.is_some());
        assert!(admission.try_admit().is_none());
        assert_eq!(admission.in_flight(), 1);
        assert_eq!(admission.dropped(), 1);

        drop(first);
        assert_eq!(admission.in_flight(), 0);
        assert!(admission.try_admit().is_some());
        assert_eq!(admission.dropped(), 1);
    }

    /// Tests that a limit of zero never drops.
    ///
    /// Expected: every admission succeeds and is counted
    #[test]
    fn zero_limit_is_unlimited() {
        let admission = AdmissionControl::new(0);

        let permits: Vec<_> = (0..100).filter_map(|_| admission.try_admit()).collect();

        assert_eq!(permits.len(), 100);
        assert_eq!(admission.in_flight(), 100);
        assert_eq!(admission.dropped(), 0);
    }

    /// Tests that clones share counters.
    ///
    /// Expected: permit taken through a clone blocks the original
    #[test]
    fn clones_share_the_limit() {
        let admission = AdmissionControl::new(1);
        let clone = admission.clone();

        let _permit = clone.try_admit().unwrap();

        assert!(admission.try_admit().is_none());
        assert_eq!(clone.dropped(), 1);
    }
}
