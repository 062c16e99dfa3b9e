use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::Array;
#[allow(unused)]
use crate::collections::contiguous::DynArray;

impl<T> IntoIterator for Array<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, cap) = self.into_parts();
        IntoIter {
            buf: ptr,
            ptr,
            len: cap,
            cap,
            _phantom: PhantomData,
        }
    }
}

/// An owned iterator over an [`Array`] or [`DynArray`]. See [`Array::into_iter`] and
/// [`DynArray::into_iter`].
///
/// Remaining elements are dropped with the iterator, and the buffer is released with
/// its original layout even when only part of it was initialized.
pub struct IntoIter<T> {
    pub(crate) buf: NonNull<T>,
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in 0..self.len {
            // SAFETY: The pointer is nonnull, properly aligned and valid for both
            // reads and writes; all remaining offsets hold initialized values.
            unsafe { ptr::drop_in_place(self.ptr.add(i).as_ptr()) }
        }

        let layout = Array::<T>::make_layout(self.cap);
        if layout.size() != 0 {
            // SAFETY: buf is the start of the original allocation, made in the
            // global allocator with this exact layout.
            unsafe { std::alloc::dealloc(self.buf.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len > 0 {
            // SAFETY: The pointer is always valid for reads. It is advanced
            // immediately afterwards so that the value is effectively moved off of
            // the heap.
            let value = unsafe { self.ptr.read() };
            // SAFETY: An offset of one won't overflow isize::MAX and stays within
            // (or one past) the allocation while len > 0.
            self.ptr = unsafe { self.ptr.add(1) };
            self.len -= 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len > 0 {
            self.len -= 1;
            // SAFETY: The offset won't overflow isize::MAX and is within range
            // because it is the newly decremented len. The resulting pointer is
            // properly aligned, valid for reads and points to an initialized T.
            let value = unsafe { self.ptr.add(self.len).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.len
    }
}

// The iter and iter_mut definitions are provided by Deref<Target = [T]>.
