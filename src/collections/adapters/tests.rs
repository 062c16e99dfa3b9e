#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use crate::collections::adapters::{Queue, Stack};
use crate::util::alloc::CountedDrop;
use crate::util::error::EmptyCollection;
use crate::util::panic::assert_panics;

#[test]
fn test_queue_fifo() {
    let mut queue: Queue<u32> = Queue::new();
    assert!(queue.is_empty(), "New queues should be empty.");

    for i in 0..10 {
        queue.enqueue(i);
    }
    assert_eq!(queue.len(), 10, "Length should track enqueues.");

    for i in 0..10 {
        assert_eq!(queue.dequeue(), i, "Dequeues should yield insertion order.");
    }
    assert!(queue.is_empty(), "Dequeueing everything should empty the queue.");
}

#[test]
fn test_queue_empty_access() {
    let mut queue: Queue<u32> = Queue::new();

    assert_eq!(
        queue.try_dequeue(),
        Err(EmptyCollection),
        "Empty dequeues should be a logic error."
    );
    assert_eq!(
        queue.try_front(),
        Err(EmptyCollection),
        "Empty front accesses should be a logic error."
    );
    assert_panics!({ Queue::<u32>::new().dequeue(); }, "Empty dequeues should panic.");
    assert_panics!({ Queue::<u32>::new().front(); }, "Empty front accesses should panic.");

    queue.enqueue(1);
    assert_eq!(queue.try_front(), Ok(&1), "Front should return the next element out.");
    *queue.front_mut() = 2;
    assert_eq!(queue.dequeue(), 2, "Front mutations should be visible to dequeue.");
}

#[test]
fn test_queue_append() {
    let mut queue: Queue<u32> = (1..=3).collect();
    let other: Queue<u32> = (4..=6).collect();

    queue.append(other);
    assert!(
        queue.iter().copied().eq(1..=6),
        "Append should move the other queue to the back in order."
    );
}

#[test]
fn test_queue_enqueue_all() {
    let mut queue: Queue<String> = ["a".to_string()].into_iter().collect();
    let other: Queue<String> = ["b".to_string(), "c".to_string()].into_iter().collect();

    queue.enqueue_all(&other);
    assert!(
        queue.iter().map(String::as_str).eq(["a", "b", "c"]),
        "enqueue_all should copy the other queue in order."
    );
    assert_eq!(other.len(), 2, "enqueue_all should leave the source untouched.");
}

#[test]
fn test_queue_clone_and_equality() {
    let queue: Queue<u32> = (1..=4).collect();
    let mut copy = queue.clone();

    assert_eq!(queue, copy, "Copies should compare equal.");

    copy.dequeue();
    assert_ne!(queue, copy, "Mutating the copy should never affect the original.");
    assert_eq!(queue.len(), 4, "Mutating the copy should never affect the original.");
}

#[test]
fn test_queue_drop() {
    let counter = Rc::new(Cell::new(0));

    let mut queue: Queue<CountedDrop> = Queue::new();
    for _ in 0..4 {
        queue.enqueue(CountedDrop(counter.clone()));
    }

    drop(queue.dequeue());
    assert_eq!(counter.get(), 1, "Dequeued values should drop with their binding.");

    queue.clear();
    assert_eq!(counter.get(), 4, "Clearing should drop every remaining element.");
}

#[test]
fn test_stack_lifo() {
    let mut stack: Stack<u32> = Stack::new();
    assert!(stack.is_empty(), "New stacks should be empty.");

    for i in 0..10 {
        stack.push(i);
    }
    assert_eq!(stack.len(), 10, "Length should track pushes.");

    for i in (0..10).rev() {
        assert_eq!(stack.pop(), i, "Pops should yield reverse insertion order.");
    }
    assert!(stack.is_empty(), "Popping everything should empty the stack.");
}

#[test]
fn test_stack_empty_access() {
    let mut stack: Stack<u32> = Stack::new();

    assert_eq!(
        stack.try_pop(),
        Err(EmptyCollection),
        "Empty pops should be a logic error."
    );
    assert_eq!(
        stack.try_top(),
        Err(EmptyCollection),
        "Empty top accesses should be a logic error."
    );
    assert_panics!({ Stack::<u32>::new().pop(); }, "Empty pops should panic.");
    assert_panics!({ Stack::<u32>::new().top(); }, "Empty top accesses should panic.");

    stack.push(1);
    assert_eq!(stack.try_top(), Ok(&1), "Top should return the next element out.");
    *stack.top_mut() = 2;
    assert_eq!(stack.pop(), 2, "Top mutations should be visible to pop.");
}

#[test]
fn test_stack_iteration() {
    let stack: Stack<u32> = (0..5).collect();

    assert!(
        stack.iter().copied().eq((0..5).rev()),
        "Iteration should run from the top downwards."
    );
    assert_eq!(stack.iter().len(), 5, "Iter should know its exact length.");
    assert!(
        stack.into_iter().eq((0..5).rev()),
        "The owning iterator should yield pop order."
    );
}

#[test]
fn test_stack_clone_preserves_order() {
    let stack: Stack<u32> = (0..100).collect();
    let mut copy = stack.clone();

    assert_eq!(stack, copy, "Copies should compare equal.");
    for i in (0..100).rev() {
        assert_eq!(copy.pop(), i, "Copies should pop in the same order as the original.");
    }
    assert_eq!(stack.len(), 100, "Draining the copy should never affect the original.");
}

#[test]
fn test_stack_drop() {
    let counter = Rc::new(Cell::new(0));

    let mut stack: Stack<CountedDrop> = Stack::new();
    for _ in 0..4 {
        stack.push(CountedDrop(counter.clone()));
    }

    drop(stack.pop());
    assert_eq!(counter.get(), 1, "Popped values should drop with their binding.");

    drop(stack);
    assert_eq!(counter.get(), 4, "Dropping the stack should drop every element.");
}

// The chain drop and clone are iterative, so a deep stack must not overflow
// the call stack on its way out.
#[test]
fn test_stack_deep_chain() {
    let stack: Stack<u64> = (0..100_000).collect();
    let copy = stack.clone();

    assert_eq!(copy.len(), 100_000);
    drop(stack);
    drop(copy);
}
