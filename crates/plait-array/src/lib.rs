//! Structurally-shared fixed-size arrays.
//!
//! Two cooperating pieces, storage below, handle above:
//!
//! - [`ArrayStorage`] owns a contiguous buffer of exactly `n` elements:
//!   allocation, element lifetime, and deep copying.
//! - [`SharedArray`] is a pointer-sized handle that any number of
//!   call sites may hold onto the same storage. Copying a handle shares
//!   the storage in O(1); writes through one handle are visible through
//!   every alias. Callers that need a private copy request one
//!   explicitly; the handle never clones on write.
//!
//! The reference-count plumbing is delegated to `plait-core`'s
//! [`Shared`](plait_core::Shared) base mechanism. This crate is the one
//! place in the workspace that may contain `unsafe` code, bounded to
//! the private `raw` module; every block carries a `SAFETY:` comment.
//!
//! # Aliasing at a glance
//!
//! ```rust
//! use plait_array::SharedArray;
//!
//! let a = SharedArray::from_slice(&[1, 2, 3]);
//! let b = a.clone();            // shares, no element is copied
//! a.set(0, 99);
//! assert_eq!(b.get(0), 99);     // visible through the alias
//!
//! let c = a.to_private();       // explicit deep copy
//! a.set(0, 7);
//! assert_eq!(c.get(0), 99);     // the copy no longer aliases
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod handle;
mod raw;
pub mod storage;

pub use handle::SharedArray;
pub use storage::ArrayStorage;
