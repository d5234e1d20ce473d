//! Worker agents: OS threads bound to a pool core.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::core::pool_core::PoolCore;
use crate::sched::TaskContainer;

/// One execution agent.
///
/// The spawned thread owns a strong reference to the pool core, so the
/// core outlives any running worker. This handle only joins; it cannot
/// keep the core alive.
pub(crate) struct Worker {
    handle: JoinHandle<()>,
}

impl Worker {
    /// Spawn an OS thread running the pool's worker protocol.
    pub fn spawn<C: TaskContainer>(core: Arc<PoolCore<C>>) -> io::Result<Self> {
        let name = core.next_worker_name();
        let handle = thread::Builder::new()
            .name(name.clone())
            .stack_size(core.stack_size())
            .spawn(move || {
                debug!(worker = %name, "worker thread started");
                core.run_worker();
                debug!(worker = %name, "worker thread exiting");
            })?;
        Ok(Self { handle })
    }

    /// True once the worker's thread has terminated.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Join the worker's thread.
    ///
    /// A worker that died of a task fault joins as an error; the fault has
    /// already been accounted for, so it is only logged.
    pub fn join(self) {
        if self.handle.join().is_err() {
            debug!("joined a worker that terminated on a task fault");
        }
    }
}
