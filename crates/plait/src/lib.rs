//! Plait: reference-counted, structurally-shared arrays.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the plait sub-crates. For most users, adding `plait` as a
//! single dependency is sufficient.
//!
//! A [`SharedArray`](prelude::SharedArray) is a pointer-sized handle to
//! a fixed-size buffer that any number of handles may alias: copying a
//! handle shares the buffer in O(1), writes through one handle are
//! visible through every alias, and a caller that needs a private copy
//! asks for one explicitly. Hosts that manage many shared values (a
//! constraint solver's shared argument arrays, for instance) get
//! copy-by-reference semantics by default and pay for duplication only
//! on request.
//!
//! # Quick start
//!
//! ```rust
//! use plait::prelude::*;
//!
//! // Bind a handle to fresh storage and fill it.
//! let temps = SharedArray::from_fn(4, |i| (i * 10) as i32);
//!
//! // Copying the handle shares the storage; no elements move.
//! let alias = temps.clone();
//! assert!(alias.same_storage(&temps));
//! assert_eq!(temps.share_count(), 2);
//!
//! // Writes through one handle are visible through the other.
//! temps.set(0, -5);
//! assert_eq!(alias.get(0), -5);
//!
//! // Privatization is explicit: an independent deep copy on request.
//! let mine = temps.to_private();
//! temps.set(1, 999);
//! assert_eq!(mine.get(1), 10);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `plait-array` | `ArrayStorage`, `SharedArray` |
//! | [`shared`] | `plait-core` | `Shared` handle base, `SharedObject` trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Array storage and the shared-array handle (`plait-array`).
pub use plait_array as array;

/// The shared-object base mechanism (`plait-core`).
///
/// Hosts that define their own shareable storage types implement
/// [`shared::SharedObject`] and hold them behind [`shared::Shared`]
/// handles; `plait-array` is exactly such a client.
pub use plait_core as shared;

/// The types most users need.
pub mod prelude {
    pub use plait_array::{ArrayStorage, SharedArray};
    pub use plait_core::{Shared, SharedObject};
}
