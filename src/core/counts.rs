//! Worker population bookkeeping.
//!
//! `WorkerCounts` is the sole source of truth for sizing and draining
//! decisions. Every mutation runs under one mutex and broadcasts the
//! `changed` condition; transitions that leave one state and enter another
//! are single critical sections so observers never see a worker counted
//! twice or not at all.

use parking_lot::{Condvar, Mutex};

/// Point-in-time view of the worker population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerStats {
    /// Workers blocked on or actively attempting a dequeue.
    pub fetching: usize,
    /// Workers currently running a task.
    pub processing: usize,
    /// The commanded worker population.
    pub target: usize,
}

impl WorkerStats {
    /// Live workers in either state.
    #[must_use]
    pub fn total(&self) -> usize {
        self.fetching + self.processing
    }
}

#[derive(Default)]
struct Counts {
    fetching: usize,
    processing: usize,
    target: usize,
}

impl Counts {
    fn total(&self) -> usize {
        self.fetching + self.processing
    }
}

/// Shared counters for the worker population.
pub(crate) struct WorkerCounts {
    counts: Mutex<Counts>,
    changed: Condvar,
}

impl WorkerCounts {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(Counts::default()),
            changed: Condvar::new(),
        }
    }

    pub fn snapshot(&self) -> WorkerStats {
        let counts = self.counts.lock();
        WorkerStats {
            fetching: counts.fetching,
            processing: counts.processing,
            target: counts.target,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.lock().total()
    }

    /// Workers to add (positive) or shed (negative) to reach `target`.
    pub fn deficit_for(&self, target: usize) -> i64 {
        let counts = self.counts.lock();
        target as i64 - counts.total() as i64
    }

    /// A newly spawned worker starts counting as fetching.
    pub fn begin_fetching(&self) {
        let mut counts = self.counts.lock();
        counts.fetching += 1;
        self.changed.notify_all();
    }

    /// A worker dequeued a task and is about to run it.
    pub fn fetching_to_processing(&self) {
        let mut counts = self.counts.lock();
        counts.fetching -= 1;
        counts.processing += 1;
        self.changed.notify_all();
    }

    /// A worker finished its task and returns to the dequeue loop.
    pub fn processing_to_fetching(&self) {
        let mut counts = self.counts.lock();
        counts.processing -= 1;
        counts.fetching += 1;
        self.changed.notify_all();
    }

    /// A worker's task faulted; the worker leaves without touching the
    /// target.
    pub fn processing_to_exit_fault(&self) {
        let mut counts = self.counts.lock();
        counts.processing -= 1;
        self.changed.notify_all();
    }

    /// Command a new worker population. Callers serialize through the
    /// pool's resize lock.
    pub fn set_target(&self, target: usize) {
        let mut counts = self.counts.lock();
        counts.target = target;
        self.changed.notify_all();
    }

    /// Lower the target one step below the live population.
    ///
    /// Returns the population that was observed, or `None` once it is at
    /// or below `floor`. Observation and command share one critical
    /// section so a concurrent fault exit cannot leave the target below
    /// `floor`.
    pub fn step_target_down(&self, floor: usize) -> Option<usize> {
        let mut counts = self.counts.lock();
        let total = counts.total();
        if total <= floor {
            return None;
        }
        counts.target = total - 1;
        self.changed.notify_all();
        Some(total)
    }

    /// Exit decision fused with its decrement.
    ///
    /// A worker is surplus when the commanded population is below the live
    /// one. The check and the `fetching -= 1` must share one critical
    /// section: with separate acquisitions several workers could each
    /// conclude they are the single surplus and all leave.
    pub fn fetching_to_exit_if_surplus(&self) -> bool {
        let mut counts = self.counts.lock();
        if counts.target < counts.total() {
            counts.fetching -= 1;
            self.changed.notify_all();
            true
        } else {
            false
        }
    }

    /// Block until no workers remain in either state.
    pub fn wait_all_exited(&self) {
        let mut counts = self.counts.lock();
        while counts.total() > 0 {
            self.changed.wait(&mut counts);
        }
    }
}
