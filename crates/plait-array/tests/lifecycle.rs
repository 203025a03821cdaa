//! Integration test: element lifetimes across sharing, privatization,
//! and unwinding.
//!
//! Uses the instrumented `Probe` element from `plait-test-utils` to pin
//! down exactly when storage constructs and destroys its elements: the
//! storage must stay alive (no element drop) until the *last* handle
//! detaches, a deep copy must clone each element exactly once, and a
//! panic mid-construction or mid-copy must drop the constructed prefix
//! and leak nothing.

use std::panic::{catch_unwind, AssertUnwindSafe};

use plait_array::{ArrayStorage, SharedArray};
use plait_test_utils::{Probe, ProbeCounters};

#[test]
fn storage_lives_until_the_last_handle_detaches() {
    let counters = ProbeCounters::new();

    // Bind A to fresh storage and fill every slot through the handle.
    let mut a: SharedArray<Probe> = SharedArray::unbound();
    a.init(3);
    for i in 0..3 {
        a.set(i, counters.probe(i as i64));
    }
    assert_eq!(counters.created(), 3);
    assert_eq!(counters.live(), 3);

    // Copy to B: same storage, nothing cloned.
    let b = a.clone();
    assert!(b.same_storage(&a));
    assert_eq!(a.share_count(), 2);
    assert_eq!(counters.cloned(), 0);

    // First detach must not touch the elements.
    drop(a);
    assert_eq!(b.share_count(), 1);
    assert_eq!(counters.dropped(), 0, "storage must outlive handle A");
    assert_eq!(b.get(1).value(), 1);

    // Last detach destroys every element exactly once.
    drop(b);
    assert_eq!(counters.dropped(), 3);
    assert_eq!(counters.live(), 0);
}

#[test]
fn zero_length_array_constructs_and_destroys_nothing() {
    let counters = ProbeCounters::new();
    {
        let a: SharedArray<Probe> = SharedArray::from_fn(0, |_| counters.probe(0));
        assert!(a.is_empty());
        let _b = a.clone();
    }
    assert_eq!(counters.created(), 0);
    assert_eq!(counters.dropped(), 0);
}

#[test]
fn deep_copy_clones_each_element_exactly_once() {
    let counters = ProbeCounters::new();
    let a: SharedArray<Probe> = SharedArray::from_fn(4, |i| counters.probe(i as i64));
    let c = a.to_private();

    assert_eq!(counters.cloned(), 4);
    assert_eq!(counters.live(), 8);
    assert!(!c.same_storage(&a));

    drop(a);
    assert_eq!(counters.live(), 4, "the copy owns its own elements");
    drop(c);
    assert_eq!(counters.live(), 0);
}

#[test]
fn make_private_on_a_shared_handle_clones_once_per_element() {
    let counters = ProbeCounters::new();
    let mut a: SharedArray<Probe> = SharedArray::from_fn(3, |i| counters.probe(i as i64));
    let b = a.clone();

    a.make_private();
    assert_eq!(counters.cloned(), 3);
    assert!(!a.same_storage(&b));

    drop(a);
    drop(b);
    assert_eq!(counters.live(), 0);
}

#[test]
fn set_drops_the_replaced_element() {
    let counters = ProbeCounters::new();
    let a: SharedArray<Probe> = SharedArray::from_fn(2, |i| counters.probe(i as i64));
    assert_eq!(counters.dropped(), 0);

    a.set(0, counters.probe(10));
    assert_eq!(counters.dropped(), 1, "the old element must be destroyed");
    assert_eq!(counters.live(), 2);
    assert_eq!(a.get(0).value(), 10);
}

#[test]
fn panic_during_construction_drops_the_prefix_and_leaks_nothing() {
    let counters = ProbeCounters::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = ArrayStorage::from_fn(4, |i| {
            if i == 2 {
                panic!("constructor failure injected at slot 2");
            }
            counters.probe(i as i64)
        });
    }));
    assert!(result.is_err());
    assert_eq!(counters.created(), 2);
    assert_eq!(counters.dropped(), 2, "the constructed prefix must be dropped");
    assert_eq!(counters.live(), 0);
}

#[test]
fn panic_during_deep_copy_drops_the_copied_prefix_and_leaks_nothing() {
    let counters = ProbeCounters::new();
    let a: SharedArray<Probe> = SharedArray::from_fn(3, |i| {
        if i == 2 {
            counters.failing_probe(i as i64)
        } else {
            counters.probe(i as i64)
        }
    });

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = a.to_private();
    }));
    assert!(result.is_err());

    // Two elements were cloned before the failure; both must be gone.
    assert_eq!(counters.cloned(), 2);
    assert_eq!(counters.live(), 3, "only the originals survive");

    drop(a);
    assert_eq!(counters.live(), 0);
}
