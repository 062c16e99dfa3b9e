#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use crate::collections::contiguous::Array;
use crate::handles::{CountedPtr, ExclusivePtr};
use crate::util::alloc::CountedDrop;
use crate::util::error::{NullHandle, SelfAssignment};
use crate::util::panic::assert_panics;

#[test]
fn test_exclusive_ownership() {
    let mut ptr = ExclusivePtr::new(5);

    assert!(!ptr.is_null(), "Fresh handles should own their allocation.");
    assert_eq!(ptr.try_value(), Ok(&5), "The owned value should read back.");

    *ptr.value_mut() = 6;
    assert_eq!(*ptr.value(), 6, "Mutations should write through the handle.");

    ptr.release();
    assert!(ptr.is_null(), "Releasing should null the handle.");
    assert_eq!(
        ptr.try_value(),
        Err(NullHandle),
        "Dereferencing a null handle should be a logic error."
    );
    assert_panics!({ ExclusivePtr::<u32>::null().value(); }, "Null derefs should panic.");
}

#[test]
fn test_exclusive_set_and_take() {
    let mut ptr: ExclusivePtr<u32> = ExclusivePtr::null();
    assert_eq!(ptr.take_box(), None, "Taking from a null handle should return None.");

    ptr.set_value(1);
    ptr.set_value(2);
    assert_eq!(*ptr.value(), 2, "Overwrites should free the old value and store the new.");

    let boxed = ptr.take_box();
    assert_eq!(boxed.as_deref(), Some(&2), "take_box should transfer the value out.");
    assert!(ptr.is_null(), "take_box should null the handle.");
}

#[test]
fn test_exclusive_slices() {
    let array: Array<u32> = Array::from_exact(0..4);
    let mut ptr: ExclusivePtr<[u32]> = array.into();

    assert_eq!(ptr.value(), &[0, 1, 2, 3], "The slice handle should cover the array.");
    ptr.value_mut()[0] = 100;
    assert_eq!(ptr.value()[0], 100, "Slice mutations should write through.");

    let empty: ExclusivePtr<[u32]> = Array::empty().into();
    assert_eq!(empty.value(), &[], "An empty array should convert to an empty slice.");
}

#[test]
fn test_exclusive_adopt_raw() {
    let mut ptr = ExclusivePtr::new(1);
    let raw = ptr.get().expect("The handle was just filled.");

    // SAFETY: raw points at the allocation ptr owns; on the Err path ownership
    // is unchanged.
    let result = unsafe { ptr.adopt_raw(raw) };
    assert_eq!(
        result,
        Err(SelfAssignment),
        "Adopting the owned allocation should be rejected."
    );
    assert_eq!(ptr.get(), Some(raw), "A rejected adoption should change nothing.");
    assert_eq!(*ptr.value(), 1, "A rejected adoption should change nothing.");

    let other = ExclusivePtr::new(2)
        .into_raw()
        .expect("The handle was just filled.");
    // SAFETY: other was leaked by into_raw and has no other owner.
    unsafe { ptr.adopt_raw(other) }.expect("Adopting a foreign allocation should succeed.");
    assert_eq!(*ptr.value(), 2, "The adopted value should read back.");
}

#[test]
fn test_exclusive_address_comparison() {
    let a = ExclusivePtr::new(1);
    let b = ExclusivePtr::new(1);
    let null: ExclusivePtr<u32> = ExclusivePtr::null();

    assert_ne!(a, b, "Distinct allocations should be unequal even with equal values.");
    assert_eq!(null, ExclusivePtr::null(), "Null handles should compare equal.");
    assert!(null < a, "Null handles should order before live handles.");

    let addr = a.get().expect("The handle was just filled.");
    assert_eq!(a, addr, "A handle should equal the address it owns.");
}

#[test]
fn test_exclusive_drop() {
    let counter = Rc::new(Cell::new(0));

    let ptr = ExclusivePtr::new(CountedDrop(counter.clone()));
    drop(ptr);
    assert_eq!(counter.get(), 1, "Dropping the handle should drop the value.");

    let mut ptr = ExclusivePtr::new(CountedDrop(counter.clone()));
    ptr.set_value(CountedDrop(counter.clone()));
    assert_eq!(counter.get(), 2, "Overwriting should drop the old value.");

    ptr.release();
    assert_eq!(counter.get(), 3, "Releasing should drop the value.");
    ptr.release();
    assert_eq!(counter.get(), 3, "Releasing a null handle should do nothing.");
}

#[test]
fn test_counted_count() {
    let ptr = CountedPtr::new(5);
    assert_eq!(ptr.count(), 1, "A fresh block should have a single reference.");

    let copies: Vec<CountedPtr<u32>> = (0..3).map(|_| ptr.clone()).collect();
    assert_eq!(ptr.count(), 4, "Each clone should increment the count.");
    assert!(
        copies.iter().all(|c| c.ptr_eq(&ptr)),
        "Clones should reference the same block."
    );

    drop(copies);
    assert_eq!(ptr.count(), 1, "Each dropped clone should decrement the count.");

    assert_eq!(
        CountedPtr::<u32>::null().count(),
        0,
        "Null handles should report a count of 0."
    );
    assert!(
        CountedPtr::<u32>::null().clone().is_null(),
        "Cloning a null handle should stay null."
    );
}

#[test]
fn test_counted_value_access() {
    let mut ptr = CountedPtr::new(5);
    assert_eq!(ptr.try_value(), Ok(&5), "The shared value should read back.");

    *ptr.value_mut().expect("A sole owner should get mutable access.") = 6;
    assert_eq!(*ptr.value(), 6, "Sole-owner mutations should write through.");

    let copy = ptr.clone();
    assert_eq!(
        ptr.value_mut(),
        None,
        "A shared handle should never hand out mutable access."
    );
    assert_eq!(*copy.value(), 6, "All handles should observe the same value.");

    assert_eq!(
        CountedPtr::<u32>::null().try_value(),
        Err(NullHandle),
        "Dereferencing a null handle should be a logic error."
    );
    assert_panics!({ CountedPtr::<u32>::null().value(); }, "Null derefs should panic.");
}

#[test]
fn test_counted_release_frees_last() {
    let counter = Rc::new(Cell::new(0));

    let mut a = CountedPtr::new(CountedDrop(counter.clone()));
    let mut b = a.clone();

    a.release();
    assert_eq!(counter.get(), 0, "Releasing a shared reference should free nothing.");
    assert!(a.is_null(), "Releasing should null the handle.");
    assert_eq!(b.count(), 1, "Releasing should decrement the count.");

    b.release();
    assert_eq!(counter.get(), 1, "Releasing the last reference should free the block.");

    let c = CountedPtr::new(CountedDrop(counter.clone()));
    let mut d = c.clone();
    d.set_value(CountedDrop(counter.clone()));
    assert_eq!(counter.get(), 1, "Overwriting a shared handle should free nothing.");
    assert_eq!(c.count(), 1, "Overwriting a clone should release its reference.");
    assert_eq!(d.count(), 1, "An overwrite should start a fresh block at a count of 1.");

    drop(c);
    drop(d);
    assert_eq!(counter.get(), 3, "Dropping the last references should free both blocks.");
}

#[test]
fn test_counted_adopt_raw() {
    let mut a = CountedPtr::new(1);
    let b = CountedPtr::new(2);

    let own = a.as_raw().expect("The handle was just filled.");
    // SAFETY: a still references its own block; on the Err path nothing
    // changes.
    let result = unsafe { a.adopt_raw(own) };
    assert_eq!(
        result,
        Err(SelfAssignment),
        "Adopting the referenced block should be rejected."
    );
    assert_eq!(a.count(), 1, "A rejected adoption should change nothing.");
    assert_eq!(*a.value(), 1, "A rejected adoption should change nothing.");

    let raw = b.as_raw().expect("The handle was just filled.");
    // SAFETY: b keeps the block live across the call.
    unsafe { a.adopt_raw(raw) }.expect("Adopting a foreign block should succeed.");
    assert!(a.ptr_eq(&b), "The adopting handle should join the block.");
    assert_eq!(b.count(), 2, "Adoption should acquire a reference.");

    assert!(
        CountedPtr::<u32>::null().as_raw().is_none(),
        "Null handles should produce no token."
    );
}

#[test]
fn test_counted_from_exclusive() {
    let counter = Rc::new(Cell::new(0));

    let exclusive = ExclusivePtr::new(CountedDrop(counter.clone()));
    let counted: CountedPtr<CountedDrop> = exclusive.into();
    assert_eq!(counted.count(), 1, "Transferred ownership should start at a count of 1.");
    assert_eq!(counter.get(), 0, "The transfer should free nothing.");

    drop(counted);
    assert_eq!(counter.get(), 1, "The counted handle should free the value.");

    let null: CountedPtr<u32> = ExclusivePtr::null().into();
    assert!(null.is_null(), "A null exclusive handle should convert to null.");
}

#[test]
fn test_counted_address_comparison() {
    let a = CountedPtr::new(1);
    let b = CountedPtr::new(1);
    let null: CountedPtr<u32> = CountedPtr::null();

    assert_ne!(a, b, "Distinct blocks should be unequal even with equal values.");
    assert_eq!(a, a.clone(), "Clones should compare equal.");
    assert_eq!(null, CountedPtr::null(), "Null handles should compare equal.");
    assert!(null < a, "Null handles should order before live handles.");
}
