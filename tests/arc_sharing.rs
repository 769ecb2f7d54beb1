//! Integration tests for thread-safe structural sharing.
//!
//! These tests verify that trees work correctly with the `arc` feature
//! enabled: snapshots are freely shared across threads, and the memoized
//! tail of a view is evaluated exactly once no matter how many threads
//! force it concurrently.
//!
//! Run with `cargo test --features arc`.

#![cfg(feature = "arc")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use fingertree::{FingerTree, IndexedSeq, Measured, Size};
use rstest::rstest;

static MEASURE_CALLS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Metered(i32);

impl Measured for Metered {
    type Measure = Size;

    fn measure(&self) -> Size {
        MEASURE_CALLS.fetch_add(1, Ordering::Relaxed);
        Size(1)
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[rstest]
fn test_trees_are_send_and_sync() {
    assert_send_sync::<FingerTree<Metered>>();
    assert_send_sync::<IndexedSeq<i32>>();
}

#[rstest]
fn test_cross_thread_snapshot_sharing() {
    let original: FingerTree<Metered> = (0..100).map(Metered).collect();

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let tree = original.clone();
            thread::spawn(move || {
                // Each thread derives its own version
                let extended = tree.push_back(Metered(1000 + index));
                assert_eq!(extended.back(), Some(&Metered(1000 + index)));
                assert_eq!(extended.measure(), Size(101));
                // The shared snapshot is untouched
                assert_eq!(tree.measure(), Size(100));
                extended
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    assert_eq!(original.measure(), Size(100));
}

#[rstest]
fn test_concurrent_forcing_evaluates_once() {
    // A tree whose left digit is down to one entry, so the view tail
    // carries a real deferred rotation.
    let tree: FingerTree<Metered> = (0..256).map(Metered).collect();
    let view = tree.view_left().expect("non-empty tree has a left view");

    let before = MEASURE_CALLS.load(Ordering::Relaxed);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let view = view.clone();
            thread::spawn(move || {
                let rest = view.rest();
                assert_eq!(rest.measure(), Size(255));
                assert_eq!(rest.front(), Some(&Metered(1)));
                rest
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    // Every forcer observes the same memoized remainder.
    for rest in &results {
        assert_eq!(rest, &results[0]);
    }

    // The rotation ran once: eight concurrent forcers cost no more
    // measure calls than a single one (the rebuilt spine touches at
    // most a handful of leaf measures).
    let forced_calls = MEASURE_CALLS.load(Ordering::Relaxed) - before;
    assert!(
        forced_calls <= 16,
        "eight concurrent forcers took {forced_calls} measure calls"
    );
}
