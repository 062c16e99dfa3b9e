use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use crate::handles::ExclusivePtr;
#[doc(inline)]
pub use crate::util::error::{NullHandle, SelfAssignment};
use crate::util::result::ResultExtension;

/// A nullable shared-ownership handle to a reference-counted heap allocation.
///
/// Each live allocation is a single shared block: the count and the value
/// side by side on the heap. The count always equals the number of handles
/// referencing the block, so cloning increments it, dropping (or overwriting,
/// or [`release`](CountedPtr::release)) decrements it, and the block is freed
/// exactly when the count goes from 1 to 0. A null handle references nothing
/// and reports a [`count`](CountedPtr::count) of 0.
///
/// The count is a plain [`Cell`], so a CountedPtr is neither [`Send`] nor
/// [`Sync`]; sharing never crosses threads.
///
/// Comparisons are by address: [`ptr_eq`](CountedPtr::ptr_eq) and the equality
/// operators report whether two handles share one block, never whether two
/// blocks hold equal values. Null orders before every live handle.
pub struct CountedPtr<T> {
    pub(crate) ptr: Option<NonNull<SharedBlock<T>>>,
}

pub(crate) struct SharedBlock<T> {
    pub count: Cell<usize>,
    pub value: T,
}

/// An opaque address of a live [`CountedPtr`] allocation, produced by
/// [`CountedPtr::as_raw`] and consumed by [`CountedPtr::adopt_raw`].
///
/// The token is a plain address: it holds no reference of its own and does not
/// keep the block alive.
pub struct RawShared<T>(pub(crate) NonNull<SharedBlock<T>>);

impl<T> Clone for RawShared<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawShared<T> {}

impl<T> CountedPtr<T> {
    /// Creates a null handle, referencing nothing.
    pub const fn null() -> CountedPtr<T> {
        CountedPtr { ptr: None }
    }

    /// Creates a fresh allocation holding `value`, referenced only by the
    /// returned handle.
    pub fn new(value: T) -> CountedPtr<T> {
        CountedPtr {
            ptr: Some(NonNull::from(Box::leak(Box::new(SharedBlock {
                count: Cell::new(1),
                value,
            })))),
        }
    }

    /// Returns the number of handles referencing the allocation, or 0 for a
    /// null handle.
    pub fn count(&self) -> usize {
        match self.block() {
            Some(block) => block.count.get(),
            None => 0,
        }
    }

    /// Returns true if the handle references nothing.
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns a reference to the shared value.
    ///
    /// # Panics
    /// Panics if the handle is null.
    pub fn value(&self) -> &T {
        self.try_value().throw()
    }

    /// Returns a reference to the shared value, or an [`Err`] if the handle is
    /// null.
    pub fn try_value(&self) -> Result<&T, NullHandle> {
        match self.block() {
            Some(block) => Ok(&block.value),
            None => Err(NullHandle),
        }
    }

    /// Returns a mutable reference to the value, but only when this handle is
    /// the sole owner. A shared or null handle returns [`None`], as writing
    /// through one handle would be visible through the others.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        let ptr = self.ptr.filter(|_| self.count() == 1)?;
        // SAFETY: The count is 1, so no other handle references the block, and
        // the reference borrows this handle mutably.
        Some(unsafe { &mut (*ptr.as_ptr()).value })
    }

    /// Drops this handle's reference, leaving it null. The block is freed if
    /// this was the last reference; other handles are unaffected otherwise.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: The handle held a counted reference, so the block is
            // live.
            let count = unsafe { ptr.as_ref() }.count.get();
            if count == 1 {
                // SAFETY: This was the last reference; nothing can observe the
                // block after this handle is nulled.
                drop(unsafe { Box::from_raw(ptr.as_ptr()) });
            } else {
                // SAFETY: As above, and further references remain.
                unsafe { ptr.as_ref() }.count.set(count - 1);
            }
        }
    }

    /// Points the handle at a fresh allocation holding `value` at a count of
    /// 1, releasing the previously referenced block first.
    pub fn set_value(&mut self, value: T) {
        *self = CountedPtr::new(value);
    }

    /// Returns an opaque token for the referenced block, or [`None`] for a
    /// null handle. The token carries no reference of its own.
    pub const fn as_raw(&self) -> Option<RawShared<T>> {
        match self.ptr {
            Some(ptr) => Some(RawShared(ptr)),
            None => None,
        }
    }

    /// Re-points the handle at the block behind `raw`, releasing its own
    /// reference and acquiring one on the adopted block.
    ///
    /// Adopting the block the handle already references is rejected with
    /// [`SelfAssignment`], count and address unchanged: when the handle holds
    /// the only reference, releasing before re-acquiring would free the block
    /// mid-hand-off.
    ///
    /// # Safety
    /// The block behind `raw` must still be live, with at least one handle
    /// referencing it.
    pub unsafe fn adopt_raw(&mut self, raw: RawShared<T>) -> Result<(), SelfAssignment> {
        if self.ptr == Some(raw.0) {
            return Err(SelfAssignment);
        }
        self.release();

        // SAFETY: The caller guarantees the block is live.
        let count = unsafe { raw.0.as_ref() }.count.get();
        // SAFETY: As above.
        unsafe { raw.0.as_ref() }.count.set(count + 1);
        self.ptr = Some(raw.0);
        Ok(())
    }

    /// Returns true if both handles reference the same allocation. Two null
    /// handles compare equal.
    pub fn ptr_eq(&self, other: &CountedPtr<T>) -> bool {
        self.ptr == other.ptr
    }

    fn block(&self) -> Option<&SharedBlock<T>> {
        // SAFETY: The handle holds a counted reference, so the block stays
        // live at least until the handle is overwritten, released or dropped.
        self.ptr.map(|ptr| unsafe { ptr.as_ref() })
    }

    fn address(&self) -> Option<usize> {
        self.ptr.map(|ptr| ptr.as_ptr() as usize)
    }
}

/// Transfers sole ownership into a counted handle at a count of 1. A null
/// exclusive handle yields a null counted handle.
impl<T> From<ExclusivePtr<T>> for CountedPtr<T> {
    fn from(mut value: ExclusivePtr<T>) -> Self {
        match value.take_box() {
            Some(boxed) => CountedPtr::new(*boxed),
            None => CountedPtr::null(),
        }
    }
}

impl<T> Clone for CountedPtr<T> {
    fn clone(&self) -> Self {
        if let Some(block) = self.block() {
            block.count.set(block.count.get() + 1);
        }
        CountedPtr { ptr: self.ptr }
    }
}

impl<T> Drop for CountedPtr<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> Default for CountedPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for CountedPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for CountedPtr<T> {}

impl<T> PartialOrd for CountedPtr<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CountedPtr<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // None orders first, placing null handles before every live handle.
        self.address().cmp(&other.address())
    }
}

impl<T> Debug for CountedPtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(ptr) => write!(f, "CountedPtr({ptr:p}, count: {})", self.count()),
            None => write!(f, "CountedPtr(null)"),
        }
    }
}
