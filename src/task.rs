//! Units of work accepted by a pool.
//!
//! The pool core only ever sees a [`Runnable`]; [`Task`] and
//! [`PriorityTask`] are the stock adapters around nullary closures.

use std::fmt;

/// A unit of work a pool can run.
///
/// Implementors are nullary and infallible: `run` consumes the unit and is
/// expected not to panic. A panicking unit terminates the worker that ran
/// it; the pool's bookkeeping stays consistent but the worker is not
/// replaced (see [`crate::Pool`]).
pub trait Runnable: Send + 'static {
    /// Consume the unit and execute it.
    fn run(self);
}

/// A fire-and-forget task wrapping a nullary closure.
///
/// ```
/// use workpool::Task;
///
/// let task = Task::new(|| println!("hello from a worker"));
/// # drop(task);
/// ```
pub struct Task {
    f: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Wrap a closure as a task.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl Runnable for Task {
    fn run(self) {
        (self.f)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Task")
    }
}

/// A task paired with a scheduling priority.
///
/// Higher priorities are dequeued first by
/// [`PriorityQueue`](crate::sched::PriorityQueue); ties dequeue in
/// insertion order.
pub struct PriorityTask {
    priority: i32,
    task: Task,
}

impl PriorityTask {
    /// Wrap a closure as a task with the given priority.
    pub fn new<F>(priority: i32, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            priority,
            task: Task::new(f),
        }
    }

    /// The scheduling priority of this task.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

impl Runnable for PriorityTask {
    fn run(self) {
        self.task.run();
    }
}

impl fmt::Debug for PriorityTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityTask")
            .field("priority", &self.priority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_task_runs_once() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let task = Task::new(move || flag.store(true, Ordering::SeqCst));
        task.run();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_priority_task_carries_priority() {
        let task = PriorityTask::new(7, || {});
        assert_eq!(task.priority(), 7);
        task.run();
    }
}
