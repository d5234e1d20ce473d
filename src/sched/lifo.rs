//! Last-in-first-out task container.

use super::TaskContainer;
use crate::task::Task;

/// Stack that dequeues the most recently submitted task first.
#[derive(Default)]
pub struct LifoStack {
    tasks: Vec<Task>,
}

impl TaskContainer for LifoStack {
    type Task = Task;

    fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    fn pop(&mut self) -> Option<Task> {
        self.tasks.pop()
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }

    fn clear(&mut self) {
        self.tasks.clear();
    }
}
