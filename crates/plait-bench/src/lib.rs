//! Benchmark support for the plait workspace.
//!
//! Shared fixtures for the criterion harnesses under `benches/`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use plait_array::SharedArray;

/// Element counts the harnesses sweep over.
pub const SIZES: &[usize] = &[16, 256, 4096];

/// A bound handle over `n` distinct `u64` elements.
pub fn filled_handle(n: usize) -> SharedArray<u64> {
    SharedArray::from_fn(n, |i| i as u64)
}
