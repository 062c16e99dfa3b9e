use std::fmt::{self, Debug, Display, Formatter};

use crate::collections::linked::LinkedList;
use crate::collections::linked::list::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use crate::util::error::EmptyCollection;
use crate::util::result::ResultExtension;

/// A first-in-first-out adapter over a [`LinkedList`]: elements join at the
/// back and leave at the front, so N enqueues followed by N dequeues yield
/// insertion order.
///
/// Unlike the positional collections, reading or removing from an empty Queue
/// is a logic error ([`EmptyCollection`]) rather than a bad index: the adapter
/// has no indices to be out of bounds of.
///
/// Whole queues combine the same two ways the underlying list does:
/// [`append`](Queue::append) splices another queue in by move in `O(1)`, and
/// [`enqueue_all`](Queue::enqueue_all) deep-copies one, leaving it untouched.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Queue<T> {
    pub(crate) list: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates a new Queue with no elements.
    pub const fn new() -> Queue<T> {
        Queue {
            list: LinkedList::new(),
        }
    }

    /// Returns the number of elements in the Queue.
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the Queue contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Adds the provided element to the back of the Queue.
    pub fn enqueue(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Removes and returns the element at the front of the Queue.
    ///
    /// # Panics
    /// Panics if the Queue is empty.
    pub fn dequeue(&mut self) -> T {
        self.try_dequeue().throw()
    }

    /// Removes and returns the element at the front of the Queue, or an [`Err`]
    /// if the Queue is empty.
    pub fn try_dequeue(&mut self) -> Result<T, EmptyCollection> {
        self.list.pop_front().ok_or(EmptyCollection)
    }

    /// Returns a reference to the element at the front of the Queue.
    ///
    /// # Panics
    /// Panics if the Queue is empty.
    pub fn front(&self) -> &T {
        self.try_front().throw()
    }

    /// Returns a reference to the element at the front of the Queue, or an
    /// [`Err`] if the Queue is empty.
    pub fn try_front(&self) -> Result<&T, EmptyCollection> {
        self.list.try_front().map_err(|_| EmptyCollection)
    }

    /// Returns a mutable reference to the element at the front of the Queue.
    ///
    /// # Panics
    /// Panics if the Queue is empty.
    pub fn front_mut(&mut self) -> &mut T {
        self.try_front_mut().throw()
    }

    /// Returns a mutable reference to the element at the front of the Queue, or
    /// an [`Err`] if the Queue is empty.
    pub fn try_front_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        self.list.try_front_mut().map_err(|_| EmptyCollection)
    }

    /// Moves every element of `other` to the back of self in `O(1)`, leaving
    /// `other` empty.
    pub fn append(&mut self, other: Queue<T>) {
        self.list.append(other.list);
    }

    /// Drops every element, leaving the Queue empty.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Returns a borrowing iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Returns a mutably borrowing iterator from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.list.iter_mut()
    }
}

impl<T: Clone> Queue<T> {
    /// Deep-copies every element of `other` to the back of self, in order,
    /// leaving `other` untouched.
    pub fn enqueue_all(&mut self, other: &Queue<T>) {
        self.list.extend_back(&other.list);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<T: Debug> Debug for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Queue {{ contents: ")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ", len: {} }}", self.len())
    }
}

impl<T: Debug> Display for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "front -> ")?;
        for value in self.iter() {
            write!(f, "({value:?}) -> ")?;
        }
        write!(f, "back")
    }
}
