#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_new() {
    for cap in [0, 1, 4, 100] {
        let arr: Array<u32> = Array::new(cap);
        assert_eq!(arr.capacity(), cap, "Capacity should match construction.");
        assert_eq!(
            arr.is_empty(),
            cap == 0,
            "Array should be empty exactly when built with capacity 0."
        );
        assert!(
            arr.iter().all(|v| *v == 0),
            "All elements should be default initialized."
        );
    }
}

#[test]
fn test_zst_support() {
    let arr = Array::<ZeroSizedType>::new(5);
    assert_eq!(
        *arr.get(0),
        ZeroSizedType,
        "Indexing with no offset should work."
    );
    assert_eq!(
        *arr.get(4),
        ZeroSizedType,
        "Indexing with an in-bounds offset should work."
    );
    assert_eq!(
        arr.iter().count(),
        5,
        "Should iterate over the right number of ZST instances."
    );
}

#[test]
fn test_bounds_checking() {
    let mut arr = Array::from_exact(0..4);

    assert_eq!(arr.try_get(3), Ok(&3));
    assert_eq!(
        arr.try_get(4),
        Err(IndexOutOfBounds { index: 4, len: 4 }),
        "Access at capacity should be out of bounds."
    );
    assert_eq!(
        arr.try_get_mut(100),
        Err(IndexOutOfBounds { index: 100, len: 4 })
    );
    assert_panics!({ Array::from_exact(0..4).get(4); });

    *arr.get_mut(1) = 10;
    assert_eq!(&*arr, &[0, 10, 2, 3]);
}

#[test]
fn test_clone_is_deep() {
    let mut a: Array<i32> = Array::from_exact(0..4);
    let b = a.clone();

    assert_eq!(a, b, "Clone should be element-wise equal.");
    assert_ne!(a.ptr, b.ptr, "Clone should use distinct storage.");

    *a.get_mut(0) = 99;
    assert_eq!(*b.get(0), 0, "Mutating the original should not affect the clone.");
}

#[test]
fn test_take_and_clear() {
    let mut arr = Array::from_exact(0..4);
    let old_ptr = arr.ptr;

    let moved = arr.take();
    assert_eq!(arr.capacity(), 0, "Source should be empty after a move.");
    assert!(arr.is_empty());
    assert_eq!(
        moved.ptr, old_ptr,
        "Destination should hold the original storage address."
    );
    assert_eq!(&*moved, &[0, 1, 2, 3]);

    let counter = CountedDrop::new();
    let mut arr = Array::from_exact(iter::repeat_with(|| counter.clone()).take(6));
    arr.clear();
    assert_eq!(counter.get(), 6, "Clear should drop every element.");
    assert_eq!(arr.capacity(), 0, "Clear should reset the capacity.");
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let arr = Array::from_exact(iter::repeat_with(|| counter.clone()).take(10));

    drop(arr);

    assert_eq!(counter.get(), 10, "10 elements should have been dropped.");
}

#[test]
fn test_equality() {
    let arr = Array::from_exact(0_usize..5);

    assert_eq!(
        arr,
        Array::from_exact([0, 1, 2, 3, 4]),
        "Different construction methods should produce equal results."
    );
    assert_ne!(Array::from_exact([0, 1, 2, 5, 4]), Array::from_exact(0..5));
    assert_eq!(&*arr, &[0, 1, 2, 3, 4], "Deref equality should be upheld.");

    assert_eq!(Array::repeat_item(7_u8, 3), Array::from_exact([7, 7, 7]));
}

#[test]
fn test_iterators() {
    let mut arr = Array::from_exact(0_usize..5);
    let collected = Array::from_exact(arr.iter().cloned());
    assert_eq!(arr, collected, "Collected iter should be equal.");

    for i in arr.iter_mut() {
        *i *= 2;
    }
    assert_eq!(
        *arr,
        [0_usize, 2, 4, 6, 8],
        "Array mutated by iterator should equal this slice."
    );

    let mut iter = arr.into_iter();
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);

    let counter = CountedDrop::new();
    let arr = Array::from_exact(iter::repeat_with(|| counter.clone()).take(10));

    let mut iter = arr.into_iter();
    let front = iter.next();
    drop(iter);
    drop(front);
    assert_eq!(
        counter.get(),
        10,
        "Dropping a partially consumed owned iterator should still drop all elements."
    );
}
