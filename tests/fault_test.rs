//! Task faults and the no-worker drain condition.
//!
//! Tasks are contractually infallible; these tests pin down what happens
//! when that contract is broken anyway: the faulting worker leaves, the
//! bookkeeping stays consistent, and the rest of the pool keeps serving.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use workpool::{FifoPool, PoolConfig, PoolError, Task};

fn wait_for_total(pool: &FifoPool, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while pool.total_workers_count() != expected {
        assert!(
            Instant::now() < deadline,
            "population never reached {expected}, stats: {:?}",
            pool.stats()
        );
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn task_fault_retires_only_its_worker() {
    let pool = FifoPool::new(PoolConfig::new().with_initial_workers(4)).unwrap();

    pool.schedule(Task::new(|| panic!("injected task fault")));
    wait_for_total(&pool, 3);

    let stats = pool.stats();
    assert_eq!(stats.total(), 3);
    // Faults never change the command; replenishment is the operator's call.
    assert_eq!(stats.target, 4);

    // The surviving workers keep serving.
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    pool.schedule(Task::new(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    }));
    pool.wait_for_all_tasks_done().unwrap();

    // And the pool can be resized back to strength.
    assert!(pool.resize(4));
    assert_eq!(pool.total_workers_count(), 4);

    pool.terminate();
    pool.wait_for_all_workers_exit();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn every_worker_can_fault_away() {
    let pool = FifoPool::new(PoolConfig::new().with_initial_workers(2)).unwrap();

    pool.schedule(Task::new(|| panic!("fault one")));
    pool.schedule(Task::new(|| panic!("fault two")));
    wait_for_total(&pool, 0);

    assert_eq!(pool.stats().target, 2);
    assert_eq!(pool.pending_tasks_count(), 0);

    // With no workers left a drain on new work must fail, not hang.
    pool.schedule(Task::new(|| {}));
    assert!(matches!(
        pool.wait_for_all_tasks_done(),
        Err(PoolError::NoWorker)
    ));

    // Recovery is an explicit resize.
    assert!(pool.resize(1));
    pool.wait_for_all_tasks_done().unwrap();
    pool.terminate();
    pool.wait_for_all_workers_exit();
}

#[test]
fn drain_without_workers_fails() {
    let pool = FifoPool::default();
    let counter = Arc::new(AtomicUsize::new(0));

    let probe = Arc::clone(&counter);
    pool.schedule(Task::new(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    }));

    assert_eq!(pool.pending_tasks_count(), 1);
    assert!(matches!(
        pool.wait_for_all_tasks_done(),
        Err(PoolError::NoWorker)
    ));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn drain_on_empty_pool_returns_immediately() {
    let pool = FifoPool::default();
    pool.wait_for_all_tasks_done().unwrap();
}
