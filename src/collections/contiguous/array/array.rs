use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

#[doc(inline)]
pub use crate::util::error::IndexOutOfBounds;
use crate::util::result::ResultExtension;

const MAX_SIZE: usize = isize::MAX as usize;

/// A heap buffer whose capacity is fixed at construction. Similar to a
/// [`Box<[T]>`](Box<T>), with every element initialized for the whole lifetime of the
/// buffer.
///
/// The capacity is decided once: the only ways to change it afterwards are
/// [`clear`](Array::clear), which releases the buffer entirely, and wholesale
/// replacement of the Array. Cloning always deep-copies every element into a fresh
/// buffer of the same capacity, so two Arrays never alias storage.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The capacity of the Array.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `capacity` | `O(1)` |
/// | `clear` | `O(n)` |
/// | `clone` | `O(n)` |
/// | `contains` | `O(n)` |
pub struct Array<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Array<T> {
    /// Returns the capacity of the Array.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let arr: Array<u8> = Array::new(3);
    /// assert_eq!(arr.capacity(), 3);
    /// ```
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns true if the Array has capacity 0 and therefore holds no elements.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// assert!(Array::<u8>::empty().is_empty());
    /// assert!(!Array::<u8>::new(1).is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.cap == 0
    }

    /// Creates a new Array with capacity 0. No memory is allocated.
    pub const fn empty() -> Array<T> {
        Array {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided capacity. All
    /// values are uninitialized.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn new_uninit(cap: usize) -> Array<MaybeUninit<T>> {
        let layout = Array::<MaybeUninit<T>>::make_layout(cap);
        let ptr = Array::<MaybeUninit<T>>::make_ptr(layout);

        Array {
            ptr,
            cap,
            _phantom: PhantomData,
        }
    }

    /// Creates an Array from any iterator which knows its exact length up front,
    /// with capacity equal to that length.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`], or if the iterator
    /// produces fewer items than its reported length.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let arr = Array::from_exact(1_u8..=3);
    /// assert_eq!(&*arr, &[1, 2, 3]);
    /// ```
    pub fn from_exact<I>(iter: I) -> Array<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let cap = iter.len();
        let arr = Self::new_uninit(cap);

        let mut written = 0;
        for item in iter.take(cap) {
            // SAFETY: cap * size_of::<T>() > isize::MAX is already guarded against
            // and written < cap, so the write is within the allocation.
            unsafe {
                arr.ptr.add(written).write(MaybeUninit::new(item));
            }
            written += 1;
        }

        // An Array<MaybeUninit<T>> doesn't drop its elements, so unwinding here only
        // releases the buffer and leaks the written values rather than freeing
        // uninitialized ones.
        assert!(written == cap, "ExactSizeIterator produced fewer items than its length");

        // SAFETY: Exactly cap values have been written.
        unsafe { arr.assume_init() }
    }

    /// Returns a reference to the element at the provided `index`, panicking on a
    /// failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Array.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an
    /// [`Err`] on a failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < cap, so the offset is within the allocation and the value
        // is initialized.
        Ok(unsafe { self.ptr.add(index).as_ref() })
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking
    /// on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Array.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning
    /// an [`Err`] on a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < cap, so the offset is within the allocation and the value
        // is initialized. The mutable borrow of self covers the returned reference.
        Ok(unsafe { self.ptr.add(index).as_mut() })
    }

    /// Drops every element, releases the buffer and resets the capacity to 0, as if
    /// the Array had been freshly created with [`Array::empty`].
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let mut arr = Array::from_exact(0..4);
    /// arr.clear();
    /// assert_eq!(arr.capacity(), 0);
    /// assert!(arr.is_empty());
    /// ```
    pub fn clear(&mut self) {
        *self = Array::empty();
    }

    /// Moves the contents out of self, leaving it empty. The returned Array keeps
    /// the original buffer address; self ends up with capacity 0.
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let mut arr = Array::from_exact(0..4);
    /// let moved = arr.take();
    /// assert_eq!(arr.capacity(), 0);
    /// assert_eq!(moved.capacity(), 4);
    /// ```
    pub fn take(&mut self) -> Array<T> {
        mem::replace(self, Array::empty())
    }

    /// Decomposes an `Array<T>` into its raw components, a [`NonNull<T>`] pointer to
    /// the contained data and a [`usize`] capacity.
    ///
    /// # Safety
    /// After calling this function, the caller is responsible for the allocated
    /// data. The parts can be used to reconstruct an Array with
    /// [`Array::from_parts`], allowing it to be used again and dropped normally.
    pub const fn into_parts(self) -> (NonNull<T>, usize) {
        let ret = (self.ptr, self.cap);
        mem::forget(self);
        ret
    }

    /// Creates an `Array<T>` from its raw components, a [`NonNull<T>`] pointer to the
    /// contained data and a [`usize`] capacity.
    ///
    /// # Safety
    /// Nothing is checked during construction. For the produced value to be valid:
    /// - `ptr` needs to be a currently and correctly allocated pointer within the
    ///   global allocator (or dangling if `cap` is 0).
    /// - `ptr` needs to refer to `cap` properly initialized values of `T`.
    /// - `cap` needs to be less than or equal to [`isize::MAX`] / `size_of::<T>()`.
    pub const unsafe fn from_parts(ptr: NonNull<T>, cap: usize) -> Array<T> {
        Array {
            ptr,
            cap,
            _phantom: PhantomData,
        }
    }

    /// Interprets self as an `Array<MaybeUninit<T>>`, forgetting that its elements
    /// are initialized. Acts as the counterpart to [`Array::assume_init`] and allows
    /// [`Array::realloc`] to be called on a previously initialized Array.
    pub fn forget_init(self) -> Array<MaybeUninit<T>> {
        let (ptr, cap) = self.into_parts();
        // SAFETY: T and MaybeUninit<T> have the same layout, and the allocation
        // remains valid for cap elements.
        unsafe { Array::from_parts(ptr.cast(), cap) }
    }

    fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.cap {
            Ok(())
        } else {
            Err(IndexOutOfBounds {
                index,
                len: self.cap,
            })
        }
    }
}

impl<T> Array<T> {
    /// A helper function to create a [`Layout`] for use during allocation, containing
    /// `cap` number of elements of type `T`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).expect("Capacity overflow!")
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns
    /// a dangling pointer for a zero-sized layout.
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls
    /// [`alloc::handle_alloc_error`] as recommended, to avoid new allocations rather
    /// than panicking.
    pub(crate) fn make_ptr(layout: Layout) -> NonNull<T> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }

}

impl<T: Default> Array<T> {
    /// Creates a new `Array<T>` with the provided capacity, filling it with the
    /// default value of `T`. A capacity of 0 is legal and allocation-free.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let arr: Array<u32> = Array::new(3);
    /// assert_eq!(&*arr, &[0, 0, 0]);
    /// ```
    pub fn new(cap: usize) -> Array<T> {
        let arr = Self::new_uninit(cap);

        for i in 0..cap {
            // SAFETY: cap * size_of::<T>() > isize::MAX is already guarded against
            // and all written offsets are within the allocation.
            unsafe {
                arr.ptr.add(i).write(MaybeUninit::new(T::default()))
            }
        }

        // SAFETY: All values are initialized with the default value for T.
        unsafe { arr.assume_init() }
    }
}

impl<T: Copy> Array<T> {
    /// Creates a new `Array<T>` with `cap` copies of `item`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use heaped::collections::contiguous::Array;
    /// let arr = Array::repeat_item(5, 3);
    /// assert_eq!(&*arr, &[5, 5, 5]);
    /// ```
    pub fn repeat_item(item: T, cap: usize) -> Array<T> {
        let arr = Self::new_uninit(cap);

        for i in 0..cap {
            // SAFETY: cap * size_of::<T>() > isize::MAX is already guarded against
            // and all written offsets are within the allocation.
            unsafe {
                arr.ptr.add(i).write(MaybeUninit::new(item))
            }
        }

        // SAFETY: All values are initialized with a copy of item.
        unsafe { arr.assume_init() }
    }
}

impl<T> Array<MaybeUninit<T>> {
    /// Assume that all values of an `Array<MaybeUninit<T>>` are initialized.
    ///
    /// # Safety
    /// It is up to the caller to guarantee that the Array is properly initialized.
    /// Failing to do so is undefined behavior.
    pub unsafe fn assume_init(self) -> Array<T> {
        let (ptr, cap) = self.into_parts();
        // SAFETY: MaybeUninit<T> and T have the same layout, and the caller
        // guarantees that all cap values are initialized.
        unsafe { Array::from_parts(ptr.cast(), cap) }
    }

    /// Reallocate the Array to have capacity equal to `new_cap`, with new locations
    /// uninitialized. Several checks are performed first to ensure that an
    /// allocation is actually required.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that
    /// exceeds [`isize::MAX`].
    pub fn realloc(&mut self, new_cap: usize) {
        let new_ptr = match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => {
                // Zero-sized types never allocate; only the recorded capacity
                // changes, against the existing dangling pointer.
                self.ptr
            },
            (old, new) if old == new => {
                // The capacities are equal, there is no need to reallocate.
                return;
            },
            (0, _) => {
                // The Array previously had capacity 0, so a fresh allocation is
                // needed.
                let layout = Array::<MaybeUninit<T>>::make_layout(new_cap);

                // SAFETY: The layout has non-zero size because both 0 capacity and
                // zero-sized types are guarded against.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::alloc(layout).cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(
                    || alloc::handle_alloc_error(layout)
                )
            },
            (_, 0) => {
                // The old allocation is released below; the new capacity only needs
                // a dangling pointer.
                let layout = Array::<MaybeUninit<T>>::make_layout(self.cap);
                // SAFETY: ptr was allocated in the global allocator with this exact
                // layout, which has non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout); }

                NonNull::dangling()
            },
            (_, _) => {
                // Otherwise, use realloc to handle moving or in-place size changing.
                let layout = Array::<MaybeUninit<T>>::make_layout(self.cap);

                let new_size = match new_cap.checked_mul(size_of::<T>()) {
                    Some(size) if size <= MAX_SIZE => size,
                    _ => panic!("Capacity overflow!"),
                };

                // SAFETY: The same layout and allocator are used as for the original
                // allocation, and the new layout size is > 0 and <= isize::MAX.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        layout,
                        new_size
                    ).cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(
                    || alloc::handle_alloc_error(layout)
                )
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Best-effort counterpart to [`Array::realloc`]: attempts the same
    /// reallocation, but returns `false` and leaves the Array untouched when the new
    /// buffer can't be allocated (or the requested layout would overflow), instead
    /// of aborting through [`alloc::handle_alloc_error`].
    pub fn try_realloc(&mut self, new_cap: usize) -> bool {
        let new_ptr = match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => self.ptr,
            (old, new) if old == new => return true,
            (0, _) => {
                let layout = match Layout::array::<MaybeUninit<T>>(new_cap) {
                    Ok(layout) => layout,
                    Err(_) => return false,
                };

                // SAFETY: The layout has non-zero size because both 0 capacity and
                // zero-sized types are guarded against.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::alloc(layout).cast()
                };

                match NonNull::new(raw_ptr) {
                    Some(ptr) => ptr,
                    None => return false,
                }
            },
            (_, 0) => {
                let layout = Array::<MaybeUninit<T>>::make_layout(self.cap);
                // SAFETY: ptr was allocated in the global allocator with this exact
                // layout, which has non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout); }

                NonNull::dangling()
            },
            (_, _) => {
                let layout = Array::<MaybeUninit<T>>::make_layout(self.cap);

                // The multiply itself can overflow for huge requests, which is a
                // refusal here, not a panic.
                let new_size = match new_cap.checked_mul(size_of::<T>()) {
                    Some(size) if size <= MAX_SIZE => size,
                    _ => return false,
                };

                // SAFETY: The same layout and allocator are used as for the original
                // allocation, and the new layout size is > 0 and <= isize::MAX.
                // On failure, realloc returns null and leaves the old block valid.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        layout,
                        new_size
                    ).cast()
                };

                match NonNull::new(raw_ptr) {
                    Some(ptr) => ptr,
                    None => return false,
                }
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
        true
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        let layout = Array::<T>::make_layout(self.cap);

        for i in 0..self.cap {
            // SAFETY: The pointer is nonnull, properly aligned, initialized and
            // ready to drop, and every offset < cap is within the allocation.
            unsafe {
                ptr::drop_in_place(self.ptr.add(i).as_ptr());
            }
        }

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is
            // the same as when allocated. Zero-sized layouts aren't allocated and
            // are guarded against deallocation.
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), layout)
            }
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The held data uses Layout::array(cap) and is therefore valid and
        // properly aligned for (cap * size_of::<T>()) bytes. Data is properly
        // initialized and has a length no greater than isize::MAX. Array's safe API
        // doesn't provide access to raw pointers, so the borrow checker prevents
        // mutation for the lifetime of the slice.
        unsafe {
            slice::from_raw_parts(self.ptr.as_ptr(), self.cap)
        }
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The held data uses Layout::array(cap) and is therefore valid and
        // properly aligned for (cap * size_of::<T>()) bytes. Data is properly
        // initialized and has a length no greater than isize::MAX. Array's safe API
        // doesn't provide access to raw pointers, so the borrow checker prevents
        // aliased access for the lifetime of the slice.
        unsafe {
            slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap)
        }
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Array<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Array<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: Arrays, when used safely, rely on unique pointers and are therefore safe
// for Send when T: Send.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: Array's safe API obeys all rules of the borrow checker, so no interior
// mutability occurs. This means that Array<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        Array::from_exact(self.iter().cloned())
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: Debug> Debug for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Array {{ contents: ")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ", cap: {} }}", self.cap)
    }
}

impl<T: Debug> Display for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
