//! Test utilities for the plait workspace.
//!
//! Provides [`Probe`], an instrumented element type that reports every
//! construction, clone, and drop to a shared [`ProbeCounters`]. The
//! lifecycle tests across the workspace use it to pin down exactly when
//! storage destroys its elements (e.g. "dropping the first of two
//! handles must not drop any element") and to check that unwinding
//! out of a panicking clone leaks nothing.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
}

/// Shared counter block for the [`Probe`]s minted from it.
///
/// Cheap to clone; all clones observe the same counts. Plain `Cell`
/// counters are enough; the whole workspace is single-threaded by
/// design.
#[derive(Clone, Default)]
pub struct ProbeCounters {
    inner: Rc<Counts>,
}

impl ProbeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a counted probe carrying `value`.
    pub fn probe(&self, value: i64) -> Probe {
        self.inner.created.set(self.inner.created.get() + 1);
        Probe {
            value,
            counts: Some(Rc::clone(&self.inner)),
            panic_on_clone: false,
        }
    }

    /// Mint a counted probe whose `clone` panics.
    ///
    /// For unwind tests: place one of these behind well-behaved
    /// elements and check that a failed deep copy drops the
    /// already-cloned prefix and leaks nothing.
    pub fn failing_probe(&self, value: i64) -> Probe {
        let mut p = self.probe(value);
        p.panic_on_clone = true;
        p
    }

    /// Probes constructed via [`probe`](ProbeCounters::probe)/
    /// [`failing_probe`](ProbeCounters::failing_probe).
    pub fn created(&self) -> usize {
        self.inner.created.get()
    }

    /// Successful probe clones.
    pub fn cloned(&self) -> usize {
        self.inner.cloned.get()
    }

    /// Probe drops.
    pub fn dropped(&self) -> usize {
        self.inner.dropped.get()
    }

    /// Probes currently alive: created + cloned - dropped.
    pub fn live(&self) -> usize {
        self.created() + self.cloned() - self.dropped()
    }
}

/// An element type that reports its lifetime events.
///
/// Counted probes come from [`ProbeCounters`]. `Probe::default()` is
/// *uncounted*: it exists so `Probe` satisfies `T: Default` bounds
/// (e.g. filling fresh storage) without polluting the counts that the
/// test actually asserts on.
pub struct Probe {
    value: i64,
    counts: Option<Rc<Counts>>,
    panic_on_clone: bool,
}

impl Probe {
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            value: 0,
            counts: None,
            panic_on_clone: false,
        }
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        assert!(!self.panic_on_clone, "probe configured to panic on clone");
        if let Some(counts) = &self.counts {
            counts.cloned.set(counts.cloned.get() + 1);
        }
        Self {
            value: self.value,
            counts: self.counts.clone(),
            panic_on_clone: false,
        }
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        if let Some(counts) = &self.counts {
            counts.dropped.set(counts.dropped.get() + 1);
        }
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Probe {}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_probe_lifecycle() {
        let counters = ProbeCounters::new();
        let p = counters.probe(7);
        assert_eq!(p.value(), 7);
        assert_eq!(counters.created(), 1);
        assert_eq!(counters.live(), 1);

        let q = p.clone();
        assert_eq!(q.value(), 7);
        assert_eq!(counters.cloned(), 1);
        assert_eq!(counters.live(), 2);

        drop(p);
        drop(q);
        assert_eq!(counters.dropped(), 2);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn default_probe_is_uncounted() {
        let counters = ProbeCounters::new();
        let p = Probe::default();
        drop(p);
        assert_eq!(counters.created(), 0);
        assert_eq!(counters.dropped(), 0);
    }

    #[test]
    #[should_panic(expected = "panic on clone")]
    fn failing_probe_panics_when_cloned() {
        let counters = ProbeCounters::new();
        let p = counters.failing_probe(1);
        let _ = p.clone();
    }

    #[test]
    fn failing_probe_still_counts_its_drop() {
        let counters = ProbeCounters::new();
        let p = counters.failing_probe(1);
        drop(p);
        assert_eq!(counters.live(), 0);
    }
}
