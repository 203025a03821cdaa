//! Reference-counted handles and the deep-copy seam.
//!
//! A [`Shared<O>`] is either unattached or attached to exactly one
//! object, which any number of other handles may be attached to as
//! well. Attaching shares the object (count goes up), dropping a handle
//! detaches it (count goes down), and the object is destroyed exactly
//! when the last handle detaches. Writes made through one handle are
//! visible through every alias; sharing is structural, not
//! copy-on-write.
//!
//! Privatization is explicit: [`Shared::make_private`] rebinds a handle
//! to a [`SharedObject::deep_copy`] of the object when, and only when,
//! other handles still share it. Nothing in this module ever copies an
//! object behind the caller's back.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Deep-copy seam for objects held behind [`Shared`] handles.
///
/// Any element-bearing storage type a host wants to privatize on demand
/// implements this. The base mechanism calls it from
/// [`Shared::make_private`]; implementors only provide it and never
/// decide when copying happens.
pub trait SharedObject {
    /// Produce an independent copy of this object.
    ///
    /// The copy must be value-equal to the original and share no state
    /// with it: later mutation of either side must not affect the
    /// other.
    fn deep_copy(&self) -> Self;
}

/// A reference-counted handle to at most one shared object.
///
/// Handles are small (pointer-sized) values. Cloning a handle attaches
/// it to the *same* object in O(1); no object state is copied. The
/// object is dropped deterministically when its last handle detaches.
///
/// Accessing the object on an unattached handle is a contract
/// violation, not a recoverable error: it fails fast with a panic.
/// Likewise, overlapping a mutable access with any other access trips
/// the dynamic borrow check. Both are programmer defects by contract.
pub struct Shared<O> {
    slot: Option<Rc<RefCell<O>>>,
}

impl<O> Shared<O> {
    /// Construct a handle with no object attached.
    ///
    /// The only legal operations on an unattached handle are
    /// [`attach`](Shared::attach), state queries, clone, and drop.
    pub const fn unattached() -> Self {
        Self { slot: None }
    }

    /// Construct a handle attached to a fresh object, share count 1.
    pub fn new(object: O) -> Self {
        Self {
            slot: Some(Rc::new(RefCell::new(object))),
        }
    }

    /// Whether an object is currently attached.
    pub fn is_attached(&self) -> bool {
        self.slot.is_some()
    }

    /// Attach a fresh object, detaching from any current one first.
    ///
    /// Restrictions such as "attach at most once" belong to the layers
    /// built on top of this mechanism, not here.
    pub fn attach(&mut self, object: O) {
        self.slot = Some(Rc::new(RefCell::new(object)));
    }

    /// Detach from the attached object, if any.
    ///
    /// If this handle was the last one attached, the object is dropped
    /// before this call returns.
    pub fn detach(&mut self) {
        self.slot = None;
    }

    /// Number of handles currently attached to this handle's object.
    ///
    /// Returns 0 for an unattached handle.
    pub fn share_count(&self) -> usize {
        self.slot.as_ref().map_or(0, Rc::strong_count)
    }

    /// Whether two handles are attached to the same object.
    ///
    /// Unattached handles alias nothing, so this is `false` whenever
    /// either side is unattached.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.slot, &other.slot) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Shared access to the attached object.
    ///
    /// # Panics
    ///
    /// Panics if no object is attached, or if a mutable access is
    /// outstanding.
    pub fn borrow(&self) -> Ref<'_, O> {
        self.object().borrow()
    }

    /// Mutable access to the attached object.
    ///
    /// The write is visible through every handle sharing the object.
    ///
    /// # Panics
    ///
    /// Panics if no object is attached, or if any other access is
    /// outstanding.
    pub fn borrow_mut(&self) -> RefMut<'_, O> {
        self.object().borrow_mut()
    }

    fn object(&self) -> &Rc<RefCell<O>> {
        self.slot
            .as_ref()
            .expect("operation on an unattached Shared handle")
    }
}

impl<O: SharedObject> Shared<O> {
    /// Detach-if-shared: ensure this handle is the sole owner.
    ///
    /// If other handles share the object, rebind this handle to a
    /// [`deep_copy`](SharedObject::deep_copy) of it (share count 1);
    /// the remaining handles keep the original. If this handle is
    /// already the sole owner, nothing is copied.
    ///
    /// # Panics
    ///
    /// Panics if no object is attached.
    pub fn make_private(&mut self) {
        if Rc::strong_count(self.object()) > 1 {
            let copy = self.borrow().deep_copy();
            self.slot = Some(Rc::new(RefCell::new(copy)));
        }
    }
}

impl<O> Clone for Shared<O> {
    /// Share: attach to the same object and bump its count.
    ///
    /// A clone of an unattached handle is unattached.
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<O> Default for Shared<O> {
    fn default() -> Self {
        Self::unattached()
    }
}

impl<O: fmt::Debug> fmt::Debug for Shared<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            None => f.write_str("Shared(unattached)"),
            Some(rc) => match rc.try_borrow() {
                Ok(object) => write!(f, "Shared({object:?})"),
                Err(_) => f.write_str("Shared(<mutably borrowed>)"),
            },
        }
    }
}
