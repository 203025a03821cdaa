//! Shared-object base mechanism for the plait shared-value crates.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! [`Shared`], a reference-counted handle to at most one object, and
//! [`SharedObject`], the deep-copy seam that lets a host privatize a
//! shared object on explicit request. Storage types (such as the array
//! storage in `plait-array`) attach to handles through this mechanism
//! and never manage reference counts themselves.
//!
//! Counts are plain, non-atomic `Rc` counts: sharing is a
//! single-threaded affair throughout the workspace, and the handle
//! types are deliberately `!Send`/`!Sync`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod shared;

pub use shared::{Shared, SharedObject};
