//! # workpool
//!
//! A dynamically resizable in-process worker pool for asynchronous
//! execution of fire-and-forget tasks.
//!
//! Producers hand nullary tasks to a pool; a population of OS worker
//! threads dequeues and runs them concurrently. The population is
//! commanded with [`Pool::resize`] while the pool is live: workers are
//! spawned or retired on the fly without losing queued work. Consumers
//! block on drain ([`Pool::wait_for_all_tasks_done`]) or exit
//! ([`Pool::wait_for_all_workers_exit`]) conditions.
//!
//! Dequeue order is pluggable through the [`sched::TaskContainer`] trait;
//! [`FifoPool`], [`LifoPool`] and [`PriorityPool`] are the stock flavors.
//!
//! ## Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use workpool::{FifoPool, PoolConfig, Task};
//!
//! let pool = FifoPool::new(PoolConfig::new().with_initial_workers(4)).unwrap();
//!
//! let done = Arc::new(AtomicUsize::new(0));
//! for _ in 0..16 {
//!     let done = Arc::clone(&done);
//!     pool.schedule(Task::new(move || {
//!         done.fetch_add(1, Ordering::SeqCst);
//!     }));
//! }
//!
//! pool.wait_for_all_tasks_done().unwrap();
//! pool.terminate();
//! pool.wait_for_all_workers_exit();
//! assert_eq!(done.load(Ordering::SeqCst), 16);
//! ```
//!
//! ## Guarantees
//!
//! - `schedule` never blocks and never fails; a scheduled task runs
//!   exactly once as long as the pool keeps at least one worker.
//! - `resize(n)` blocks until the population matches `n`; concurrent
//!   resizes do not interleave (the loser returns `false` immediately).
//! - Retiring workers finish their current task first; pending tasks
//!   survive a shrink and run after the next growth.
//! - A panicking task terminates only its own worker; the pool's
//!   bookkeeping stays consistent and every other operation keeps working.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod pool;
pub mod sched;
pub mod task;
pub mod util;

pub use crate::config::PoolConfig;
pub use crate::core::{PoolError, WorkerStats};
pub use crate::pool::{FifoPool, LifoPool, Pool, PriorityPool};
pub use crate::task::{PriorityTask, Runnable, Task};
