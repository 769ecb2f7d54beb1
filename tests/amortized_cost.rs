//! Cost accounting tests.
//!
//! The measurement function is the observable unit of work: every cache
//! build calls it, every cache hit does not. Counting its invocations
//! through an instrumented element bounds the real rebalancing work of
//! end operations and splits, independent of wall-clock noise.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use fingertree::{FingerTree, Measured, Size};

static MEASURE_CALLS: AtomicUsize = AtomicUsize::new(0);

// The counter is global; tests touching it must not interleave.
static COUNTER_GUARD: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Metered(i32);

impl Measured for Metered {
    type Measure = Size;

    fn measure(&self) -> Size {
        MEASURE_CALLS.fetch_add(1, Ordering::Relaxed);
        Size(1)
    }
}

fn counted<R>(work: impl FnOnce() -> R) -> (R, usize) {
    let before = MEASURE_CALLS.load(Ordering::Relaxed);
    let outcome = work();
    (outcome, MEASURE_CALLS.load(Ordering::Relaxed) - before)
}

#[test]
fn end_operations_cost_linear_measure_calls() {
    let _guard = COUNTER_GUARD.lock().unwrap();
    let count = 10_000;

    // Build by appends.
    let (tree, build_calls) = counted(|| {
        let mut tree = FingerTree::new();
        for value in 0..count {
            tree = tree.push_back(Metered(value));
        }
        tree
    });
    // Real cost is about 2n (one leaf read per push, three more per
    // overflow); 16n leaves headroom for representation tweaks while
    // still failing on any log-factor regression at this size.
    let n = usize::try_from(count).unwrap();
    assert!(
        build_calls <= 16 * n,
        "building {n} elements took {build_calls} measure calls"
    );

    // Drain from the front, forcing every deferred rotation.
    let (_, drain_calls) = counted(|| {
        let mut current = tree;
        while let Some((rest, _)) = current.pop_front() {
            current = rest;
        }
    });
    // Each forced rotation reads only the top-level digit leaves,
    // about seven calls per pop.
    assert!(
        drain_calls <= 16 * n,
        "draining {n} elements took {drain_calls} measure calls"
    );
}

#[test]
fn split_cost_does_not_scale_with_size() {
    let _guard = COUNTER_GUARD.lock().unwrap();

    let tree: FingerTree<Metered> = (0..4096).map(Metered).collect();

    // Element-level measure calls during a split happen only in the top
    // few levels; everything deeper reads branch caches.
    let (_, split_calls) = counted(|| tree.split3(|measure| measure.0 > 2048).unwrap());
    assert!(
        split_calls <= 1000,
        "one split took {split_calls} measure calls"
    );

    let (_, concat_calls) = counted(|| {
        let (left, right) = tree.split(|measure| measure.0 > 1024);
        left.concat(&right)
    });
    assert!(
        concat_calls <= 2000,
        "split plus concat took {concat_calls} measure calls"
    );
}

#[test]
fn unforced_views_skip_rotation_work() {
    let _guard = COUNTER_GUARD.lock().unwrap();

    let tree: FingerTree<Metered> = (0..1024).map(Metered).collect();

    // Reading heads without ever forcing a tail does no rebuild work.
    let (_, peek_calls) = counted(|| {
        let view = tree.view_left().unwrap();
        assert_eq!(view.element(), &Metered(0));
        let view = tree.view_right().unwrap();
        assert_eq!(view.element(), &Metered(1023));
    });
    assert!(
        peek_calls <= 8,
        "peeking both ends took {peek_calls} measure calls"
    );
}
