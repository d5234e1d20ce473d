//! First-in-first-out task container.

use std::collections::VecDeque;

use super::TaskContainer;
use crate::task::Task;

/// Queue that dequeues tasks in submission order.
#[derive(Default)]
pub struct FifoQueue {
    tasks: VecDeque<Task>,
}

impl TaskContainer for FifoQueue {
    type Task = Task;

    fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }

    fn clear(&mut self) {
        self.tasks.clear();
    }
}
