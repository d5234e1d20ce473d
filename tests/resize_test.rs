//! Resize semantics: idempotence, equivalence, exclusivity, and
//! interaction with running tasks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

use workpool::{FifoPool, PoolConfig, Task};

#[test]
fn resize_is_idempotent() {
    let pool = FifoPool::new(PoolConfig::default()).unwrap();

    assert!(pool.resize(3));
    let first = pool.stats();
    assert!(pool.resize(3));
    let second = pool.stats();

    assert_eq!(first, second);
    assert_eq!(second.total(), 3);
    assert_eq!(second.target, 3);

    pool.terminate();
    pool.wait_for_all_workers_exit();
}

#[test]
fn resize_to_zero_matches_fresh_pool() {
    let recycled = FifoPool::new(PoolConfig::new().with_initial_workers(4)).unwrap();
    assert!(recycled.resize(0));
    assert_eq!(recycled.total_workers_count(), 0);
    assert!(recycled.resize(3));

    let fresh = FifoPool::default();
    assert!(fresh.resize(3));

    assert_eq!(recycled.stats(), fresh.stats());

    for pool in [recycled, fresh] {
        pool.terminate();
        pool.wait_for_all_workers_exit();
    }
}

#[test]
fn concurrent_resizes_are_mutually_exclusive() {
    let pool = Arc::new(FifoPool::new(PoolConfig::default()).unwrap());
    let barrier = Arc::new(Barrier::new(2));

    let mut callers = Vec::new();
    for target in [8usize, 2] {
        let pool = Arc::clone(&pool);
        let barrier = Arc::clone(&barrier);
        callers.push(thread::spawn(move || {
            barrier.wait();
            (target, pool.resize(target))
        }));
    }
    let results: Vec<(usize, bool)> = callers.into_iter().map(|c| c.join().unwrap()).collect();

    // While a resize is in flight any competitor fails fast; if the two
    // happened to run back to back both succeed and the later one decides
    // the final population.
    let winners: Vec<usize> = results
        .iter()
        .filter(|(_, accepted)| *accepted)
        .map(|(target, _)| *target)
        .collect();
    assert!(!winners.is_empty());
    assert!(winners.contains(&pool.total_workers_count()));

    pool.terminate();
    pool.wait_for_all_workers_exit();
}

#[test]
fn shrink_waits_for_running_tasks() {
    let pool = FifoPool::new(PoolConfig::new().with_initial_workers(3)).unwrap();
    let running = Arc::new(AtomicUsize::new(0));

    let (started_tx, started_rx) = mpsc::channel::<()>();
    let mut releases = Vec::new();
    for _ in 0..3 {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let running = Arc::clone(&running);
        let started = started_tx.clone();
        pool.schedule(Task::new(move || {
            running.fetch_add(1, Ordering::SeqCst);
            started.send(()).unwrap();
            release_rx.recv().unwrap();
            running.fetch_sub(1, Ordering::SeqCst);
        }));
        releases.push(release_tx);
    }
    for _ in 0..3 {
        started_rx.recv().unwrap();
    }
    assert_eq!(pool.processing_workers_count(), 3);

    // resize(0) must block until the workers finish what they started.
    let releaser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        for release in releases {
            release.send(()).unwrap();
        }
    });
    assert!(pool.resize(0));
    releaser.join().unwrap();

    assert_eq!(running.load(Ordering::SeqCst), 0);
    assert_eq!(pool.total_workers_count(), 0);
    assert_eq!(pool.pending_tasks_count(), 0);
}

#[test]
fn terminate_is_a_non_waiting_resize_to_zero() {
    let pool = FifoPool::new(PoolConfig::new().with_initial_workers(2)).unwrap();

    let (release_tx, release_rx) = mpsc::channel::<()>();
    let (started_tx, started_rx) = mpsc::channel::<()>();
    pool.schedule(Task::new(move || {
        started_tx.send(()).unwrap();
        release_rx.recv().unwrap();
    }));
    started_rx.recv().unwrap();

    // Returns immediately even though a task is still running.
    pool.terminate();
    assert_eq!(pool.stats().target, 0);

    release_tx.send(()).unwrap();
    pool.wait_for_all_workers_exit();
    assert_eq!(pool.total_workers_count(), 0);
}

#[test]
fn growth_restores_throughput_after_shrink() {
    let pool = FifoPool::new(PoolConfig::new().with_initial_workers(4)).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    assert!(pool.resize(0));
    for _ in 0..20 {
        let counter = Arc::clone(&counter);
        pool.schedule(Task::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    }
    assert_eq!(pool.pending_tasks_count(), 20);
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    assert!(pool.resize(2));
    pool.wait_for_all_tasks_done().unwrap();
    pool.terminate();
    pool.wait_for_all_workers_exit();
    assert_eq!(counter.load(Ordering::SeqCst), 20);
}
