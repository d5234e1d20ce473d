//! Pool control plane: task queue, population counters, and the worker
//! protocol.

pub mod counts;
pub mod error;
pub(crate) mod pool_core;
pub(crate) mod queue;
pub(crate) mod worker;

pub use counts::WorkerStats;
pub use error::PoolError;
