//! Pool control plane: queue, counters, conditions, and the worker
//! protocol.
//!
//! Lock order is fixed throughout: `resize_lock` → `gate` → queue →
//! counts. No lock is ever held across task invocation.

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::core::counts::{WorkerCounts, WorkerStats};
use crate::core::error::PoolError;
use crate::core::queue::TaskQueue;
use crate::core::worker::Worker;
use crate::sched::TaskContainer;
use crate::task::Runnable;

/// Shared pool state.
///
/// The facade and every live worker hold an `Arc` to the core; whichever
/// lives longest tears it down. The worker handles kept for joining are
/// plain thread handles, so the back-reference cannot keep the core alive.
pub(crate) struct PoolCore<C: TaskContainer> {
    queue: TaskQueue<C>,
    counts: WorkerCounts,
    /// Serializes sizing: `resize` try-locks, `terminate` blocks.
    resize_lock: Mutex<()>,
    /// The gate mutex pairs with the four conditions below. It guards no
    /// data of its own; it orders fetch decisions against sizing decisions.
    gate: Mutex<()>,
    /// Wakes one fetcher: a task arrived or the target dropped.
    wake: Condvar,
    /// A spawned worker has begun fetching.
    entered: Condvar,
    /// A surplus worker left as commanded.
    exited_on_request: Condvar,
    /// A worker left because its task faulted.
    exited_on_fault: Condvar,
    /// Handles of spawned workers, kept for joining only.
    workers: Mutex<Vec<Worker>>,
    worker_seq: AtomicUsize,
    config: PoolConfig,
}

impl<C: TaskContainer> PoolCore<C> {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            queue: TaskQueue::new(),
            counts: WorkerCounts::new(),
            resize_lock: Mutex::new(()),
            gate: Mutex::new(()),
            wake: Condvar::new(),
            entered: Condvar::new(),
            exited_on_request: Condvar::new(),
            exited_on_fault: Condvar::new(),
            workers: Mutex::new(Vec::new()),
            worker_seq: AtomicUsize::new(0),
            config,
        }
    }

    /// Name for the next worker thread.
    pub fn next_worker_name(&self) -> String {
        let seq = self.worker_seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{seq}", self.config.thread_name_prefix)
    }

    pub fn stack_size(&self) -> usize {
        self.config.thread_stack_size
    }

    /// Enqueue a task and wake one fetcher. Never blocks beyond the lock
    /// hand-off, never fails.
    pub fn schedule(&self, task: C::Task) {
        let _gate = self.gate.lock();
        self.queue.push(task);
        self.wake.notify_one();
    }

    /// Drive the worker population to `target`.
    ///
    /// Returns `false` without doing anything if another resize or
    /// terminate is in progress, or if a worker thread could not be
    /// spawned (growth already performed is kept).
    pub fn resize(self: &Arc<Self>, target: usize) -> bool {
        let Some(_resize) = self.resize_lock.try_lock() else {
            debug!(requested = target, "resize rejected, sizing already in progress");
            return false;
        };

        let mut gate = self.gate.lock();
        let deficit = self.counts.deficit_for(target);
        if deficit > 0 {
            debug!(requested = target, deficit, "growing worker population");
            self.counts.set_target(target);
            while self.counts.deficit_for(target) > 0 {
                match Worker::spawn(Arc::clone(self)) {
                    Ok(worker) => self.workers.lock().push(worker),
                    Err(err) => {
                        warn!(%err, "worker thread creation failed, growth stopped");
                        return false;
                    }
                }
                // Exactly one entry signal per spawn: the new worker needs
                // the gate to report its birth, so the signal cannot fire
                // before this wait releases it.
                self.entered.wait(&mut gate);
            }
        } else if deficit < 0 {
            debug!(requested = target, deficit, "shrinking worker population");
            // One worker per step: each exit is observed individually, so
            // a concurrent fault exit cannot make the shrink overshoot.
            while let Some(last_total) = self.counts.step_target_down(target) {
                self.wake.notify_one();
                while self.counts.total() >= last_total {
                    self.exited_on_request.wait(&mut gate);
                }
            }
            self.prune_exited();
        }
        true
    }

    /// Command every worker to exit. Returns immediately; workers may
    /// still be running. Compose with [`Self::wait_for_all_workers_exit`]
    /// for a barrier.
    pub fn terminate(&self) {
        let _resize = self.resize_lock.lock();
        let _gate = self.gate.lock();
        self.counts.set_target(0);
        self.wake.notify_all();
    }

    /// Block until the queue drains.
    ///
    /// Returns when no tasks are pending; tasks already handed to workers
    /// may still be executing. Fails with [`PoolError::NoWorker`] when
    /// tasks are pending and the live population reaches zero.
    pub fn wait_for_all_tasks_done(&self) -> Result<(), PoolError> {
        self.queue.wait_drained(|| {
            if self.counts.total() == 0 {
                Err(PoolError::NoWorker)
            } else {
                Ok(())
            }
        })
    }

    /// Block until every worker has exited, then reclaim their threads.
    pub fn wait_for_all_workers_exit(&self) {
        self.counts.wait_all_exited();
        let workers: Vec<Worker> = mem::take(&mut *self.workers.lock());
        for worker in workers {
            worker.join();
        }
    }

    pub fn stats(&self) -> WorkerStats {
        self.counts.snapshot()
    }

    pub fn pending_tasks_count(&self) -> usize {
        self.queue.len()
    }

    /// Drop every pending task. Kept off the public facade; the core needs
    /// it for teardown.
    pub fn clear_pending_tasks(&self) {
        self.queue.clear();
    }

    /// Drop handles of workers that have already terminated.
    fn prune_exited(&self) {
        self.workers.lock().retain(|worker| !worker.is_finished());
    }

    /// The worker protocol: fetch under the gate, process outside it.
    ///
    /// The exit decision belongs to the worker itself: it is taken under
    /// the gate together with the counts, which is what keeps a shrink
    /// from retiring more workers than commanded.
    pub fn run_worker(&self) {
        {
            let _gate = self.gate.lock();
            self.counts.begin_fetching();
            self.entered.notify_all();
        }

        let mut from_processing = false;
        loop {
            // fetching phase
            let task = {
                let mut gate = self.gate.lock();
                if from_processing {
                    self.counts.processing_to_fetching();
                }
                from_processing = true;

                loop {
                    if self.counts.fetching_to_exit_if_surplus() {
                        self.exited_on_request.notify_all();
                        drop(gate);
                        // A drain waiter parked on the queue must observe
                        // the population change.
                        self.queue.notify_changed();
                        debug!("worker exiting on request");
                        return;
                    }
                    if let Some(task) = self.queue.try_pop() {
                        self.counts.fetching_to_processing();
                        break task;
                    }
                    self.wake.wait(&mut gate);
                }
            };

            // processing phase, no locks held
            let guard = FaultGuard { core: self };
            task.run();
            guard.disarm();
        }
    }
}

impl<C: TaskContainer> Drop for PoolCore<C> {
    fn drop(&mut self) {
        // Last owner standing: every worker holds an Arc to the core, so
        // none can still exist here.
        self.clear_pending_tasks();
    }
}

/// Keeps the counters consistent when a task unwinds.
///
/// Armed for the duration of a task invocation; if the task faults the
/// guard retires the worker's count and signals the pool before the thread
/// terminates. The target is left unchanged: the pool does not replace
/// faulted workers.
struct FaultGuard<'a, C: TaskContainer> {
    core: &'a PoolCore<C>,
}

impl<C: TaskContainer> FaultGuard<'_, C> {
    fn disarm(self) {
        mem::forget(self);
    }
}

impl<C: TaskContainer> Drop for FaultGuard<'_, C> {
    fn drop(&mut self) {
        self.core.counts.processing_to_exit_fault();
        {
            let _gate = self.core.gate.lock();
            self.core.exited_on_fault.notify_all();
            // A shrink parked on request-exits must also observe this
            // departure, or it would wait for a worker that no longer
            // exists.
            self.core.exited_on_request.notify_all();
        }
        self.core.queue.notify_changed();
        // Handles of earlier fault exits are reclaimed here; this worker's
        // own thread is still unwinding, so its handle stays until the
        // next fault, shrink, or full exit wait.
        self.core.prune_exited();
        warn!("task fault absorbed, worker exiting");
    }
}
