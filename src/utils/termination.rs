use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Counts the work items of a parallel visit that have been enqueued but not
/// yet retired.
///
/// The counter starts at one, accounting for the seed item. Workers must
/// call [`on_enqueue`](TerminationDetector::on_enqueue) *before* publishing
/// an item, and [`on_retire`](TerminationDetector::on_retire) only after all
/// the children of an item have been published. Under these rules the
/// counter can reach zero only when no item is queued or in flight, and no
/// item will ever be queued again, so zero is a stable fixed point.
#[derive(Debug)]
pub struct TerminationDetector {
    outstanding: AtomicUsize,
    terminated: AtomicBool,
}

impl Default for TerminationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminationDetector {
    /// Creates a detector with one outstanding item.
    pub fn new() -> Self {
        Self {
            outstanding: AtomicUsize::new(1),
            terminated: AtomicBool::new(false),
        }
    }

    /// Accounts for an item about to be published.
    pub fn on_enqueue(&self) {
        let prev = self.outstanding.fetch_add(1, Ordering::AcqRel);
        assert!(
            prev > 0,
            "work item enqueued after the visit had terminated"
        );
    }

    /// Retires an item, returning `true` if this was the last outstanding
    /// one.
    ///
    /// Exactly one call per run returns `true`.
    ///
    /// # Panics
    ///
    /// Panics if there are no outstanding items.
    pub fn on_retire(&self) -> bool {
        let prev = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .unwrap_or_else(|_| panic!("retired more work items than were enqueued"));
        if prev == 1 {
            let already = self.terminated.swap(true, Ordering::AcqRel);
            debug_assert!(!already);
            true
        } else {
            false
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}
