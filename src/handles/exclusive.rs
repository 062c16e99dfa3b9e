use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ptr::{self, NonNull};

use crate::collections::contiguous::Array;
#[doc(inline)]
pub use crate::util::error::{NullHandle, SelfAssignment};
use crate::util::result::ResultExtension;

/// A nullable single-owner handle to a heap allocation.
///
/// An ExclusivePtr is either null or the sole owner of its allocation: there is
/// no `Clone`, so ownership only ever transfers by move, and the allocation is
/// freed exactly once, when the owning handle is overwritten, released or
/// dropped. Dereferencing a null handle is a logic error ([`NullHandle`]);
/// [`is_null`](ExclusivePtr::is_null) or the `try_` accessors check first.
///
/// `T` may be unsized, so a handle can own a slice (`ExclusivePtr<[T]>`, built
/// with [`from_box`](ExclusivePtr::from_box) or converted from an
/// [`Array<T>`]) or a trait object.
///
/// Comparisons are by address, never by value: two handles are equal only when
/// null together, and a handle equals a [`NonNull`] pointing at its
/// allocation. Null orders before every live handle.
pub struct ExclusivePtr<T: ?Sized> {
    pub(crate) ptr: Option<NonNull<T>>,
}

impl<T: ?Sized> ExclusivePtr<T> {
    /// Creates a null handle, owning nothing.
    pub const fn null() -> ExclusivePtr<T> {
        ExclusivePtr { ptr: None }
    }

    /// Takes ownership of the provided box.
    pub fn from_box(value: Box<T>) -> ExclusivePtr<T> {
        ExclusivePtr {
            ptr: Some(NonNull::from(Box::leak(value))),
        }
    }

    /// Returns the raw allocation address without affecting ownership, or
    /// [`None`] for a null handle.
    pub const fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Returns true if the handle owns nothing.
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns a reference to the owned value.
    ///
    /// # Panics
    /// Panics if the handle is null.
    pub fn value(&self) -> &T {
        self.try_value().throw()
    }

    /// Returns a reference to the owned value, or an [`Err`] if the handle is
    /// null.
    pub const fn try_value(&self) -> Result<&T, NullHandle> {
        match self.ptr {
            // SAFETY: The handle is the sole owner of the allocation, which
            // stays live until the handle is overwritten, released or dropped.
            Some(ptr) => Ok(unsafe { ptr.as_ref() }),
            None => Err(NullHandle),
        }
    }

    /// Returns a mutable reference to the owned value.
    ///
    /// # Panics
    /// Panics if the handle is null.
    pub fn value_mut(&mut self) -> &mut T {
        self.try_value_mut().throw()
    }

    /// Returns a mutable reference to the owned value, or an [`Err`] if the
    /// handle is null.
    pub const fn try_value_mut(&mut self) -> Result<&mut T, NullHandle> {
        match self.ptr {
            // SAFETY: The handle is the sole owner of the allocation, and the
            // reference borrows the handle, so no second access can be made
            // while it lives.
            Some(mut ptr) => Ok(unsafe { ptr.as_mut() }),
            None => Err(NullHandle),
        }
    }

    /// Frees the owned allocation, if any, leaving the handle null.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: The pointer was produced by Box::leak (via from_box or
            // adopt_raw's contract) and ownership was never given away.
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }

    /// Replaces the owned allocation with the provided box, freeing the old
    /// allocation first.
    pub fn set_box(&mut self, value: Box<T>) {
        self.release();
        self.ptr = Some(NonNull::from(Box::leak(value)));
    }

    /// Transfers ownership of the allocation out as a box, leaving the handle
    /// null. Returns [`None`] for a null handle.
    pub fn take_box(&mut self) -> Option<Box<T>> {
        // SAFETY: The pointer was produced by Box::leak and ownership was
        // never given away; the handle is nulled in the same step.
        self.ptr.take().map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }

    /// Leaks the owned allocation, returning its address and leaving the
    /// handle null. The caller becomes responsible for freeing it, usually by
    /// handing it back to [`adopt_raw`](ExclusivePtr::adopt_raw) or
    /// [`Box::from_raw`].
    pub fn into_raw(mut self) -> Option<NonNull<T>> {
        let ptr = self.ptr.take();
        mem::forget(self);
        ptr
    }

    /// Takes ownership of a raw allocation, freeing the currently owned one
    /// first.
    ///
    /// Adopting the allocation the handle already owns is rejected with
    /// [`SelfAssignment`] and leaves the handle unchanged: the hand-off would
    /// free the allocation before adopting it, and then free it a second time
    /// later.
    ///
    /// # Safety
    /// `raw` must point to a live allocation created by [`Box`] (such as one
    /// returned from [`into_raw`](ExclusivePtr::into_raw)), and no other owner
    /// may free it afterwards.
    pub unsafe fn adopt_raw(&mut self, raw: NonNull<T>) -> Result<(), SelfAssignment> {
        if self.ptr == Some(raw) {
            return Err(SelfAssignment);
        }
        self.release();
        self.ptr = Some(raw);
        Ok(())
    }

    fn address(&self) -> Option<usize> {
        self.ptr.map(|ptr| ptr.as_ptr().cast::<u8>() as usize)
    }
}

impl<T> ExclusivePtr<T> {
    /// Creates a handle owning a fresh allocation holding `value`.
    pub fn new(value: T) -> ExclusivePtr<T> {
        ExclusivePtr::from_box(Box::new(value))
    }

    /// Replaces the owned value with a fresh allocation holding `value`,
    /// freeing the old allocation first.
    pub fn set_value(&mut self, value: T) {
        self.set_box(Box::new(value));
    }
}

/// Converts the array into an owned slice handle of the same length.
impl<T> From<Array<T>> for ExclusivePtr<[T]> {
    fn from(value: Array<T>) -> Self {
        let (ptr, cap) = value.into_parts();
        let slice = ptr::slice_from_raw_parts_mut(ptr.as_ptr(), cap);
        // SAFETY: The array's buffer was allocated with the layout of [T; cap],
        // which is the layout Box<[T]> frees with, and into_parts transferred
        // ownership. Zero capacity hands over a dangling pointer, matching a
        // zero length boxed slice.
        ExclusivePtr::from_box(unsafe { Box::from_raw(slice) })
    }
}

// SAFETY: The handle is the sole owner of the allocation, so sending or
// sharing it moves or shares exactly the access T itself permits.
unsafe impl<T: ?Sized + Send> Send for ExclusivePtr<T> {}

// SAFETY: As above.
unsafe impl<T: ?Sized + Sync> Sync for ExclusivePtr<T> {}

impl<T: ?Sized> Default for ExclusivePtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> Drop for ExclusivePtr<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: ?Sized> PartialEq for ExclusivePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl<T: ?Sized> Eq for ExclusivePtr<T> {}

impl<T: ?Sized> PartialEq<NonNull<T>> for ExclusivePtr<T> {
    fn eq(&self, other: &NonNull<T>) -> bool {
        self.ptr == Some(*other)
    }
}

impl<T: ?Sized> PartialOrd for ExclusivePtr<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for ExclusivePtr<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // None orders first, placing null handles before every live handle.
        self.address().cmp(&other.address())
    }
}

impl<T: ?Sized> Debug for ExclusivePtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(ptr) => write!(f, "ExclusivePtr({ptr:p})"),
            None => write!(f, "ExclusivePtr(null)"),
        }
    }
}
