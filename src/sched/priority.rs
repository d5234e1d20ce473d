//! Priority-ordered task container.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::TaskContainer;
use crate::task::PriorityTask;

/// Wrapper to make tasks orderable by priority (highest first) and FIFO
/// within equal priority via an insertion sequence number.
struct Entry {
    task: PriorityTask,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.task.priority().cmp(&other.task.priority()) {
            // FIFO within the same priority: earlier insertion wins
            // (reversed for the max-heap)
            Ordering::Equal => other.seq.cmp(&self.seq),
            ord => ord,
        }
    }
}

/// Heap that dequeues the highest-priority task first.
///
/// Tasks of equal priority dequeue in submission order.
#[derive(Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl TaskContainer for PriorityQueue {
    type Task = PriorityTask;

    fn push(&mut self, task: PriorityTask) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { task, seq });
    }

    fn pop(&mut self) -> Option<PriorityTask> {
        self.heap.pop().map(|entry| entry.task)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}
