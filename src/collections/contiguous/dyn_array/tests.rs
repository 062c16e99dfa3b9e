#![cfg(test)]

use std::iter;

use super::*;
use crate::collections::contiguous::Array;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_growth_sequence() {
    let mut arr = DynArray::new();
    let mut caps = DynArray::new();

    for i in 0..30_usize {
        assert_eq!(arr.len(), i, "Length should track the number of pushes.");
        if caps.last() != Some(&arr.cap()) {
            caps.push(arr.cap());
        }
        arr.push(i);
    }

    assert_eq!(
        &*caps,
        &[0, 8, 12, 18, 27, 40],
        "Capacity should follow the 3/2 growth rule with a minimum of 8."
    );
    assert!(arr.iter().copied().eq(0..30));
}

#[test]
fn test_reserve() {
    let mut arr: DynArray<u8> = (0..3).collect();
    arr.reserve(20);
    assert_eq!(arr.cap(), 20, "Reserve should reallocate to exactly the request.");
    assert_eq!(arr.len(), 3, "Reserve should leave the length unchanged.");
    assert_eq!(&*arr, &[0, 1, 2]);

    let ptr = arr.buf.ptr;
    arr.reserve(20);
    arr.reserve(5);
    assert_eq!(arr.cap(), 20, "Reserving at or below the capacity is a no-op.");
    assert_eq!(arr.buf.ptr, ptr, "A no-op reserve shouldn't touch the buffer.");

    // An impossible layout takes the best-effort path: no panic, no change.
    arr.reserve(isize::MAX as usize + 1);
    assert_eq!(arr.cap(), 20);
    assert_eq!(arr.len(), 3);

    // A request whose byte size overflows usize outright is refused the same
    // way, even in debug builds.
    let mut wide: DynArray<u32> = (0..3).collect();
    wide.reserve(usize::MAX / 4 + 2);
    assert_eq!(wide.cap(), 8, "An overflowing reserve should change nothing.");
    assert_eq!(wide.len(), 3, "An overflowing reserve should change nothing.");
    assert_eq!(&*wide, &[0, 1, 2]);
}

#[test]
fn test_compress() {
    let mut arr: DynArray<_> = (0..10).collect();
    arr.push(10);
    assert!(arr.cap() > arr.len());

    arr.compress();
    assert_eq!(arr.cap(), arr.len(), "Compress should shrink capacity to length.");
    assert!(arr.iter().copied().eq(0..11), "Compress should preserve contents.");
}

#[test]
fn test_push_pop() {
    let mut arr = DynArray::new();
    for i in 0..5 {
        arr.push(i);
    }
    for i in (0..5).rev() {
        assert_eq!(arr.pop(), Some(i));
    }
    assert_eq!(arr.pop(), None, "Popping an empty DynArray should yield None.");
}

#[test]
fn test_front_back() {
    let mut arr: DynArray<_> = (0..4).collect();
    assert_eq!(arr.front(), &0);
    assert_eq!(arr.back(), &3);

    *arr.front_mut() = 10;
    *arr.back_mut() = 13;
    assert_eq!(&*arr, &[10, 1, 2, 13]);

    let empty: DynArray<u8> = DynArray::new();
    assert_eq!(empty.try_front(), Err(IndexOutOfBounds { index: 0, len: 0 }));
    assert_eq!(empty.try_back(), Err(IndexOutOfBounds { index: 0, len: 0 }));
    assert_panics!({ DynArray::<u8>::new().front(); });
    assert_panics!({ DynArray::<u8>::new().back(); });
}

#[test]
fn test_insert_remove() {
    let mut arr: DynArray<_> = (0..3).collect();
    arr.insert(1, 100);
    arr.insert(1, 200);
    arr.insert(5, 300);
    assert_eq!(&*arr, &[0, 200, 100, 1, 2, 300]);

    assert_eq!(arr.remove(1), 200);
    assert_eq!(arr.remove(4), 300);
    assert_eq!(&*arr, &[0, 100, 1, 2]);

    assert_eq!(
        arr.try_insert(6, 0),
        Err(IndexOutOfBounds { index: 6, len: 4 }),
        "Insertion past one-past-the-end should be rejected."
    );
    assert_eq!(arr.try_remove(4), Err(IndexOutOfBounds { index: 4, len: 4 }));

    assert_eq!(arr.replace(0, 7), 0);
    assert_eq!(arr[0], 7);
}

#[test]
fn test_bounds_checked_against_len() {
    let mut arr: DynArray<u8> = DynArray::with_cap(10);
    arr.push(1);

    assert_eq!(arr.try_get(0), Ok(&1));
    assert_eq!(
        arr.try_get(1),
        Err(IndexOutOfBounds { index: 1, len: 1 }),
        "Slots between the length and capacity should be inaccessible."
    );
}

#[test]
fn test_clone_is_deep() {
    let mut a: DynArray<_> = (0..4).collect();
    let b = a.clone();

    assert_eq!(a, b);
    assert_ne!(a.buf.ptr, b.buf.ptr, "Clone should use distinct storage.");
    assert_eq!(b.cap(), a.cap(), "Clone should preserve the capacity.");

    a[0] = 99;
    assert_eq!(b[0], 0, "Mutating the original should not affect the clone.");
}

#[test]
fn test_drop_and_clear() {
    let counter = CountedDrop::new();
    let mut arr: DynArray<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    arr.clear();
    assert_eq!(counter.get(), 10, "Clear should drop every element.");
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.cap(), 0, "Clear should release the buffer.");

    let arr: DynArray<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    drop(arr);
    assert_eq!(counter.get(), 15, "Drop should drop every remaining element.");
}

#[test]
fn test_array_conversions() {
    let arr: DynArray<_> = (0..6).collect();
    let fixed = Array::from(arr);
    assert_eq!(fixed.capacity(), 6, "Conversion should shed the spare capacity.");
    assert_eq!(&*fixed, &[0, 1, 2, 3, 4, 5]);

    let back = DynArray::from(fixed);
    assert_eq!(back.len(), 6);
    assert_eq!(back.cap(), 6);

    let mut iter = back.into_iter();
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.len(), 4);
}
