//! Public pool facades.

use std::sync::Arc;

use tracing::info;

use crate::config::PoolConfig;
use crate::core::counts::WorkerStats;
use crate::core::error::PoolError;
use crate::core::pool_core::PoolCore;
use crate::sched::{FifoQueue, LifoStack, PriorityQueue, TaskContainer};

/// A pool dequeuing tasks first-in-first-out.
pub type FifoPool = Pool<FifoQueue>;

/// A pool dequeuing the most recently scheduled task first.
pub type LifoPool = Pool<LifoStack>;

/// A pool dequeuing tasks by priority, FIFO within equal priority.
pub type PriorityPool = Pool<PriorityQueue>;

/// A dynamically resizable worker pool for fire-and-forget tasks.
///
/// Producers hand nullary tasks to [`Pool::schedule`]; worker threads
/// dequeue and run them concurrently. The worker population is commanded
/// with [`Pool::resize`] while the pool is live. The dequeue order is the
/// container's: see [`FifoPool`], [`LifoPool`] and [`PriorityPool`].
///
/// Dropping the facade does not stop the workers; the pool state is shared
/// with them and lives as long as its longest holder. Call
/// [`Pool::terminate`] followed by [`Pool::wait_for_all_workers_exit`]
/// before letting the last handle go.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use workpool::{FifoPool, PoolConfig, Task};
///
/// let pool = FifoPool::new(PoolConfig::new().with_initial_workers(2)).unwrap();
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// pool.schedule(Task::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// pool.wait_for_all_tasks_done().unwrap();
/// pool.terminate();
/// pool.wait_for_all_workers_exit();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct Pool<C: TaskContainer> {
    core: Arc<PoolCore<C>>,
}

impl<C: TaskContainer> Pool<C> {
    /// Create a pool and spawn its initial workers.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] if the configuration fails validation,
    /// [`PoolError::ResourceExhausted`] if an initial worker thread could
    /// not be spawned (workers spawned up to that point keep running).
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;
        let initial = config.initial_workers;
        let pool = Self {
            core: Arc::new(PoolCore::new(config)),
        };
        if initial > 0 && !pool.core.resize(initial) {
            return Err(PoolError::ResourceExhausted);
        }
        info!(workers = initial, "pool initialized");
        Ok(pool)
    }

    /// Enqueue a task. Never blocks, never fails, applies no back-pressure.
    ///
    /// The task is guaranteed to run provided the pool keeps at least one
    /// worker and the process lives long enough.
    pub fn schedule(&self, task: C::Task) {
        self.core.schedule(task);
    }

    /// Drive the worker population to `worker_count`, spawning or retiring
    /// workers as needed, and block until the population matches.
    ///
    /// Returns `false` if another resize or terminate is in progress, or
    /// if a worker thread could not be created (partial growth is kept).
    /// Retired workers finish their current task first; pending tasks stay
    /// queued.
    #[must_use]
    pub fn resize(&self, worker_count: usize) -> bool {
        self.core.resize(worker_count)
    }

    /// Command every worker to exit and return immediately.
    ///
    /// Workers finish their current task before leaving; pending tasks
    /// remain queued. Compose with [`Pool::wait_for_all_workers_exit`] for
    /// a barrier.
    pub fn terminate(&self) {
        self.core.terminate();
    }

    /// Block until no tasks are pending.
    ///
    /// Tasks already handed to workers may still be executing when this
    /// returns; only the queue is observed.
    ///
    /// # Errors
    ///
    /// [`PoolError::NoWorker`] when tasks are pending and the worker
    /// population reaches zero.
    pub fn wait_for_all_tasks_done(&self) -> Result<(), PoolError> {
        self.core.wait_for_all_tasks_done()
    }

    /// Block until every worker has exited and reclaim their threads.
    pub fn wait_for_all_workers_exit(&self) {
        self.core.wait_for_all_workers_exit();
    }

    /// Live workers in either state.
    #[must_use]
    pub fn total_workers_count(&self) -> usize {
        self.core.stats().total()
    }

    /// Workers blocked on or attempting a dequeue.
    #[must_use]
    pub fn fetching_workers_count(&self) -> usize {
        self.core.stats().fetching
    }

    /// Workers currently running a task.
    #[must_use]
    pub fn processing_workers_count(&self) -> usize {
        self.core.stats().processing
    }

    /// Tasks waiting in the queue.
    #[must_use]
    pub fn pending_tasks_count(&self) -> usize {
        self.core.pending_tasks_count()
    }

    /// Atomic snapshot of the population counters.
    #[must_use]
    pub fn stats(&self) -> WorkerStats {
        self.core.stats()
    }
}

impl<C: TaskContainer> Default for Pool<C> {
    /// An empty pool with default configuration and zero workers.
    fn default() -> Self {
        Self {
            core: Arc::new(PoolCore::new(PoolConfig::default())),
        }
    }
}
