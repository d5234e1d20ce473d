//! The pool-side task queue: a container behind the queue mutex.

use parking_lot::{Condvar, Mutex};

use crate::core::error::PoolError;
use crate::sched::TaskContainer;

/// A task container behind the pool's queue mutex with a change signal.
///
/// Every mutation signals `changed`; waiters recheck their predicates on
/// every wake-up. Ordering is delegated entirely to the container.
pub(crate) struct TaskQueue<C> {
    tasks: Mutex<C>,
    changed: Condvar,
}

impl<C: TaskContainer> TaskQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(C::default()),
            changed: Condvar::new(),
        }
    }

    pub fn push(&self, task: C::Task) {
        let mut tasks = self.tasks.lock();
        tasks.push(task);
        self.changed.notify_all();
    }

    pub fn try_pop(&self) -> Option<C::Task> {
        let mut tasks = self.tasks.lock();
        let task = tasks.pop();
        if task.is_some() {
            self.changed.notify_all();
        }
        task
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    pub fn clear(&self) {
        let mut tasks = self.tasks.lock();
        tasks.clear();
        self.changed.notify_all();
    }

    /// Wake queue waiters without mutating the container.
    ///
    /// Worker exit paths call this so a drain waiter can observe the
    /// population change behind its predicate. The lock round-trip is what
    /// makes the notification race-free against a waiter between its check
    /// and its wait.
    pub fn notify_changed(&self) {
        let _tasks = self.tasks.lock();
        self.changed.notify_all();
    }

    /// Block until the container drains.
    ///
    /// `abort` runs under the queue lock before each wait; an error stops
    /// the wait and surfaces to the caller.
    pub fn wait_drained<F>(&self, mut abort: F) -> Result<(), PoolError>
    where
        F: FnMut() -> Result<(), PoolError>,
    {
        let mut tasks = self.tasks.lock();
        while !tasks.is_empty() {
            abort()?;
            self.changed.wait(&mut tasks);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::FifoQueue;
    use crate::task::Task;

    #[test]
    fn test_push_pop_counts() {
        let queue = TaskQueue::<FifoQueue>::new();
        assert!(queue.is_empty());

        queue.push(Task::new(|| {}));
        queue.push(Task::new(|| {}));
        assert_eq!(queue.len(), 2);

        assert!(queue.try_pop().is_some());
        assert!(queue.try_pop().is_some());
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_clear_empties_container() {
        let queue = TaskQueue::<FifoQueue>::new();
        queue.push(Task::new(|| {}));
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wait_drained_aborts() {
        let queue = TaskQueue::<FifoQueue>::new();
        queue.push(Task::new(|| {}));

        let result = queue.wait_drained(|| Err(PoolError::NoWorker));
        assert!(matches!(result, Err(PoolError::NoWorker)));
    }

    #[test]
    fn test_wait_drained_returns_on_empty() {
        let queue = TaskQueue::<FifoQueue>::new();
        queue
            .wait_drained(|| panic!("abort must not run on an empty queue"))
            .unwrap();
    }
}
