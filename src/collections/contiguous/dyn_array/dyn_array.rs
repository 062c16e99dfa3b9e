use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice;

use crate::collections::contiguous::Array;
use crate::collections::contiguous::array::IntoIter;
#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// The capacity a DynArray grows to when it first leaves capacity 0.
const MIN_CAP: usize = 8;

/// A variable size contiguous collection, layering a logical length over an
/// [`Array`] of possibly-uninitialized slots. The length never exceeds the
/// capacity; elements at indices below the length are always initialized.
///
/// Growth is amortized: when a push finds the buffer full, the capacity becomes
/// `max(8, floor(cap * 3 / 2))`. [`reserve`](DynArray::reserve) and
/// [`compress`](DynArray::compress) adjust the capacity directly. Note the
/// asymmetry in how the two reallocation paths fail: growth during a push
/// propagates allocation failure, while `reserve` gives up silently and leaves the
/// DynArray unchanged.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynArray.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`, `O(1)`** |
/// | `compress` | `O(n)` |
/// | `contains` | `O(n)` |
///
/// \* When the DynArray is full, `push` reallocates and takes `O(n)`.
///
/// \** When the requested capacity isn't larger than the current one, `reserve`
/// returns immediately.
pub struct DynArray<T> {
    pub(crate) buf: Array<MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<T> DynArray<T> {
    /// Creates a new DynArray with length and capacity 0. Memory will be allocated
    /// once elements are added.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::DynArray;
    /// let arr: DynArray<u8> = DynArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 0);
    /// ```
    pub fn new() -> DynArray<T> {
        DynArray {
            buf: Array::new_uninit(0),
            len: 0,
        }
    }

    /// Creates a new DynArray with capacity exactly equal to the provided value,
    /// allowing that many values to be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> DynArray<T> {
        DynArray {
            buf: Array::new_uninit(cap),
            len: 0,
        }
    }

    /// Returns the number of initialized elements in the DynArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity. Unlike [`Vec`], the capacity is guaranteed to
    /// be exactly the value produced by the documented growth rule or requested via
    /// [`reserve`](DynArray::reserve)/[`compress`](DynArray::compress).
    pub const fn cap(&self) -> usize {
        self.buf.capacity()
    }

    /// Appends the provided value, growing the buffer if it is full.
    ///
    /// # Panics
    /// Panics if the memory layout of the grown buffer would have a size that
    /// exceeds [`isize::MAX`], or if the allocator fails to produce it.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::DynArray;
    /// let mut arr = DynArray::new();
    /// for i in 0..=5_u8 {
    ///     arr.push(i);
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the new element.
        unsafe { self.push_unchecked(value) }
    }

    /// Appends the provided value, assuming that there is already enough capacity.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the DynArray has spare capacity, using
    /// methods like [`reserve`](DynArray::reserve) or
    /// [`with_cap`](DynArray::with_cap) to arrange it. Calling this on a full
    /// DynArray is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees len < cap, so the write is within the
        // allocation.
        unsafe { self.buf.ptr.add(self.len).write(MaybeUninit::new(value)); }
        self.len += 1;
    }

    /// Removes the last element and returns it, if there is one.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::DynArray;
    /// let mut arr: DynArray<_> = (0..5).collect();
    /// assert_eq!(arr.pop(), Some(4));
    /// assert_eq!(arr.len(), 4);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;

            // SAFETY: len has just been decremented, so the slot is initialized and
            // within the allocation. The bitwise copy is paired with the length
            // decrement, so the heap copy is never touched again.
            let value = unsafe {
                self.buf.ptr.add(self.len).read().assume_init()
            };
            Some(value)
        }
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the DynArray is empty.
    pub fn front(&self) -> &T {
        self.try_front().throw()
    }

    /// Returns a reference to the first element, or an [`Err`] if the DynArray is
    /// empty.
    pub fn try_front(&self) -> Result<&T, IndexOutOfBounds> {
        self.try_get(0)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Panics
    /// Panics if the DynArray is empty.
    pub fn front_mut(&mut self) -> &mut T {
        self.try_front_mut().throw()
    }

    /// Returns a mutable reference to the first element, or an [`Err`] if the
    /// DynArray is empty.
    pub fn try_front_mut(&mut self) -> Result<&mut T, IndexOutOfBounds> {
        self.try_get_mut(0)
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the DynArray is empty.
    pub fn back(&self) -> &T {
        self.try_back().throw()
    }

    /// Returns a reference to the last element, or an [`Err`] if the DynArray is
    /// empty.
    pub fn try_back(&self) -> Result<&T, IndexOutOfBounds> {
        match self.len.checked_sub(1) {
            Some(last) => self.try_get(last),
            None => Err(IndexOutOfBounds { index: 0, len: 0 }),
        }
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Panics
    /// Panics if the DynArray is empty.
    pub fn back_mut(&mut self) -> &mut T {
        self.try_back_mut().throw()
    }

    /// Returns a mutable reference to the last element, or an [`Err`] if the
    /// DynArray is empty.
    pub fn try_back_mut(&mut self) -> Result<&mut T, IndexOutOfBounds> {
        match self.len.checked_sub(1) {
            Some(last) => self.try_get_mut(last),
            None => Err(IndexOutOfBounds { index: 0, len: 0 }),
        }
    }

    /// Returns a reference to the element at the provided `index`, panicking on a
    /// failure. Bounds are checked against the length, not the capacity.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the DynArray.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an
    /// [`Err`] on a failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized and in bounds.
        Ok(unsafe { self.buf.ptr.add(index).cast::<T>().as_ref() })
    }

    /// Returns a mutable reference to the element at the provided `index`,
    /// panicking on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the DynArray.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`,
    /// returning an [`Err`] on a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized and in bounds. The
        // mutable borrow of self covers the returned reference.
        Ok(unsafe { self.buf.ptr.add(index).cast::<T>().as_mut() })
    }

    /// Inserts the provided value at the given index, shifting all following
    /// elements one slot towards the back. `index` may equal the length, in which
    /// case this is equivalent to [`push`](DynArray::push).
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an [`Err`] rather
    /// than panicking when the index is past the end.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        if self.len == self.cap() {
            self.grow();
        }

        let mut prev = MaybeUninit::new(value);
        for i in index..=self.len {
            // SAFETY: Offsets up to and including len are within the allocation
            // after the capacity check above.
            prev = mem::replace(unsafe { self.buf.ptr.add(i).as_mut() }, prev);
        }

        self.len += 1;
        Ok(())
    }

    /// Removes the element at the provided index, shifting all following values to
    /// fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes the element at the provided index, returning an [`Err`] rather than
    /// panicking when the index is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        let mut next = MaybeUninit::uninit();
        // Iterate backwards to index.
        for i in (index..self.len).rev() {
            // SAFETY: All offsets < len are within the allocation.
            next = mem::replace(unsafe { self.buf.ptr.add(i).as_mut() }, next);
        }

        self.len -= 1;
        // SAFETY: next holds the value previously located at index, which was
        // checked to be < len and therefore initialized.
        Ok(unsafe { next.assume_init() })
    }

    /// Replaces the element at the provided index with `new_value`, returning the
    /// old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        mem::replace(self.get_mut(index), new_value)
    }

    /// Grows the capacity to at least `new_cap`, reallocating directly to the
    /// requested value. Does nothing when `new_cap` isn't larger than the current
    /// capacity, and also does nothing when the new buffer can't be allocated:
    /// reserving is best-effort, and the DynArray remains valid and unchanged on
    /// failure.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::DynArray;
    /// let mut arr: DynArray<_> = (0..3).collect();
    /// arr.reserve(20);
    /// assert_eq!(arr.cap(), 20);
    /// assert_eq!(arr.len(), 3);
    /// arr.reserve(10);
    /// assert_eq!(arr.cap(), 20, "Reserving below the capacity does nothing.");
    /// ```
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap <= self.cap() {
            return;
        }

        // A failed reallocation leaves the old buffer valid, so there is nothing to
        // do on failure either.
        let _ = self.buf.try_realloc(new_cap);
    }

    /// Shrinks the buffer so that the capacity is exactly the length.
    ///
    /// # Panics
    /// Panics if the allocator fails to produce the smaller buffer.
    pub fn compress(&mut self) {
        self.buf.realloc(self.len);
    }

    /// Drops every element and releases the buffer, resetting both length and
    /// capacity to 0.
    pub fn clear(&mut self) {
        self.drop_elements();
        self.len = 0;
        self.buf = Array::<T>::new_uninit(0);
    }

    /// Grows the buffer for the insertion of at least one additional element:
    /// capacity 0 becomes [`MIN_CAP`], anything else grows by half, rounded down.
    ///
    /// # Panics
    /// Panics if the memory layout of the grown buffer would have a size that
    /// exceeds [`isize::MAX`], or if the allocator fails to produce it.
    pub(crate) fn grow(&mut self) {
        let tripled = self.cap()
            .checked_mul(3)
            .ok_or(CapacityOverflow)
            .throw();
        let new_cap = cmp::max(MIN_CAP, tripled / 2);

        self.buf.realloc(new_cap);
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    fn drop_elements(&mut self) {
        for i in 0..self.len {
            // SAFETY: All slots below len are initialized and safe to drop.
            unsafe { self.buf.ptr.add(i).as_mut().assume_init_drop(); }
        }
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut arr = DynArray::with_cap(iter.size_hint().0);

        for item in iter {
            arr.push(item);
        }

        arr
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // Drop the initialized values in place; dropping self.buf afterwards only
        // releases the allocation, since MaybeUninit slots have no drop glue.
        self.drop_elements();
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The DynArray is valid as a slice for len values, which are all
        // initialized. The pointer is nonnull, properly aligned and the range
        // entirely contained within the allocation. The borrow checker prevents
        // mutation while the slice is live.
        unsafe {
            slice::from_raw_parts(self.buf.ptr.as_ptr().cast(), self.len)
        }
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The DynArray is valid as a slice for len values, which are all
        // initialized. The pointer is nonnull, properly aligned and the range
        // entirely contained within the allocation. The borrow checker prevents
        // other access while the slice is live.
        unsafe {
            slice::from_raw_parts_mut(self.buf.ptr.as_ptr().cast(), self.len)
        }
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for DynArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for DynArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

// SAFETY: DynArrays, when used safely, rely on unique pointers and are therefore
// safe for Send when T: Send.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: DynArray's safe API obeys all rules of the borrow checker, so no interior
// mutability occurs. This means that DynArray<T> can safely implement Sync when
// T: Sync.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_cap(self.cap());

        for value in self.iter() {
            // SAFETY: arr was created with capacity for every element of self.
            unsafe { arr.push_unchecked(value.clone()); }
        }

        arr
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let result = IntoIter {
            buf: self.buf.ptr.cast(),
            ptr: self.buf.ptr.cast(),
            len: self.len,
            cap: self.cap(),
            _phantom: PhantomData,
        };
        mem::forget(self);
        result
    }
}

impl<T> From<Array<T>> for DynArray<T> {
    fn from(value: Array<T>) -> Self {
        let len = value.capacity();
        DynArray {
            buf: value.forget_init(),
            len,
        }
    }
}

impl<T> From<DynArray<T>> for Array<T> {
    fn from(mut value: DynArray<T>) -> Self {
        // Release the uninitialized tail so that capacity equals length.
        value.compress();

        let len = value.len;
        let arr = value.buf.take();
        mem::forget(value);

        // SAFETY: Exactly len slots are initialized and the buffer now has capacity
        // len; the original DynArray has been dismantled without dropping.
        unsafe {
            let (ptr, _) = arr.into_parts();
            Array::from_parts(ptr.cast(), len)
        }
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DynArray {{ contents: ")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ", len: {}, cap: {} }}", self.len, self.cap())
    }
}

impl<T: Debug> Display for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
