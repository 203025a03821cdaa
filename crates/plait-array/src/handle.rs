//! The shared-array handle.
//!
//! [`SharedArray`] is the top half of the shared-array pair: a
//! pointer-sized value wrapping a [`Shared`] reference to at most one
//! [`ArrayStorage`]. Copying a handle attaches to the *same* storage
//! and bumps its share count; element reads and writes forward to the
//! storage, so a write through one handle is immediately visible
//! through every alias. The handle never deep-copies on its own;
//! privatization is an explicit caller request.

use std::cell::{Ref, RefMut};
use std::fmt;

use plait_core::{Shared, SharedObject};

use crate::storage::ArrayStorage;

/// A lightweight, copyable handle to a shared fixed-size array.
///
/// A handle is either *unbound* (no storage attached; only
/// [`init`](SharedArray::init), assignment, state queries, and drop are
/// legal) or *bound* to exactly one storage, which other handles may be
/// bound to as well. Handles bind exactly once: construction with a
/// length binds immediately, and a default-constructed handle binds on
/// its single permitted `init` call.
///
/// Element access on an unbound handle, indexing out of range, and a
/// second `init` are programmer errors and fail fast with a panic.
///
/// Handles are `!Send` and `!Sync`: the share count is a plain
/// non-atomic count, which is an explicit design constraint of this
/// core, not an oversight.
pub struct SharedArray<T> {
    storage: Shared<ArrayStorage<T>>,
}

// Niche optimization keeps the unbound state free: a handle is one word.
static_assertions::assert_eq_size!(SharedArray<u32>, usize);

impl<T> SharedArray<T> {
    /// An unbound handle.
    pub const fn unbound() -> Self {
        Self {
            storage: Shared::unattached(),
        }
    }

    /// A handle bound to fresh storage of `n` default-constructed
    /// elements, share count 1.
    pub fn new(n: usize) -> Self
    where
        T: Default,
    {
        Self {
            storage: Shared::new(ArrayStorage::new(n)),
        }
    }

    /// A handle bound to fresh storage with slot `i` constructed from
    /// `construct(i)`.
    pub fn from_fn(n: usize, construct: impl FnMut(usize) -> T) -> Self {
        Self {
            storage: Shared::new(ArrayStorage::from_fn(n, construct)),
        }
    }

    /// A handle bound to fresh storage cloned element-wise from a slice.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self {
            storage: Shared::new(ArrayStorage::from_slice(values)),
        }
    }

    /// A handle bound to fresh storage filled from an iterator of known
    /// length.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields more or fewer items than its
    /// reported length.
    pub fn from_exact_iter(
        values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
    ) -> Self {
        Self {
            storage: Shared::new(ArrayStorage::from_exact_iter(values)),
        }
    }

    /// Bind an unbound handle to fresh storage of `n` default-constructed
    /// elements.
    ///
    /// Legal exactly once, and only on a handle constructed unbound.
    ///
    /// # Panics
    ///
    /// Panics if the handle is already bound.
    pub fn init(&mut self, n: usize)
    where
        T: Default,
    {
        assert!(!self.is_bound(), "init on an already-bound SharedArray");
        self.storage.attach(ArrayStorage::new(n));
    }

    /// Whether a storage is attached.
    pub fn is_bound(&self) -> bool {
        self.storage.is_attached()
    }

    /// Number of elements in the attached storage.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    pub fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Whether the attached storage holds zero elements.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `i` by value.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound or `i` is out of range.
    pub fn get(&self, i: usize) -> T
    where
        T: Clone,
    {
        self.storage.borrow()[i].clone()
    }

    /// Write `value` into slot `i`.
    ///
    /// The write is immediately visible through every handle sharing
    /// this storage. Structural sharing, not copy-on-write: nothing is
    /// cloned.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound, `i` is out of range, or a
    /// borrow from [`at`](SharedArray::at)/[`at_mut`](SharedArray::at_mut)
    /// is outstanding.
    pub fn set(&self, i: usize, value: T) {
        self.storage.borrow_mut()[i] = value;
    }

    /// Borrow the element at `i`.
    ///
    /// The returned guard keeps the storage read-locked; a `set` or
    /// `at_mut` through any alias while it lives fails fast.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound or `i` is out of range.
    pub fn at(&self, i: usize) -> Ref<'_, T> {
        Ref::map(self.storage.borrow(), |s| &s[i])
    }

    /// Mutably borrow the element at `i`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound, `i` is out of range, or any
    /// other borrow is outstanding.
    pub fn at_mut(&self, i: usize) -> RefMut<'_, T> {
        RefMut::map(self.storage.borrow_mut(), |s| &mut s[i])
    }

    /// Clone the elements out into a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.borrow().as_slice().to_vec()
    }

    /// Number of handles currently bound to this handle's storage.
    ///
    /// Returns 0 for an unbound handle.
    pub fn share_count(&self) -> usize {
        self.storage.share_count()
    }

    /// Whether two handles are bound to the same storage.
    pub fn same_storage(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
    }
}

impl<T: Clone> SharedArray<T> {
    /// Ensure this handle is the sole owner of its storage.
    ///
    /// Delegates to the base mechanism's detach-if-shared primitive:
    /// if other handles share the storage, this handle rebinds to a
    /// deep copy; otherwise nothing is copied. Only ever runs when the
    /// caller asks; a plain `set` never triggers it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    pub fn make_private(&mut self) {
        self.storage.make_private();
    }

    /// A new handle bound to an independent deep copy of this storage.
    ///
    /// The copy starts value-equal at every index and shares nothing:
    /// later writes through either handle never affect the other.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    pub fn to_private(&self) -> Self {
        Self {
            storage: Shared::new(self.storage.borrow().deep_copy()),
        }
    }
}

impl<T> Clone for SharedArray<T> {
    /// Share: bind to the same storage and bump its count. O(1), no
    /// element is copied. A clone of an unbound handle is unbound.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<T> Default for SharedArray<T> {
    /// Equivalent to [`SharedArray::unbound`].
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "SharedArray({:?})", self.storage.borrow())
        } else {
            f.write_str("SharedArray(unbound)")
        }
    }
}
