use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use derive_more::IsVariant;

use super::{DNode, Iter, IterMut, Length, NodePtr, ONE};
#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOrCapOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A doubly-linked list of heap-allocated cells, with links in both directions.
///
/// Every mutation preserves the linkage invariant: the head has no predecessor, the
/// tail has no successor, neighboring cells always reference each other mutually,
/// and walking from either end visits exactly `len` cells. Single elements can be
/// inserted and removed at any position; whole lists can be spliced in by move in
/// `O(1)` ([`append`](LinkedList::append), [`prepend`](LinkedList::prepend),
/// [`splice`](LinkedList::splice)) or copied in cell by cell
/// ([`extend_back`](LinkedList::extend_back),
/// [`extend_front`](LinkedList::extend_front)).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the LinkedList.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second LinkedList.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `append/prepend` | `O(1)` |
/// | `splice` | `O(min(i, n-i))` |
/// | `extend_back/front` | `O(m)` |
/// | `contains` | `O(n)` |
///
/// As a general note, modern computer architecture isn't kind to linked lists: all
/// `O(i)` or `O(n)` operations consist primarily of cache misses, so
/// [`DynArray`](crate::collections::contiguous::DynArray) should be preferred unless
/// the `O(1)` end operations and splices are the workload.
#[derive(PartialEq, Eq, Hash)]
pub struct LinkedList<T> {
    pub(crate) state: ListState<T>,
    pub(crate) _phantom: PhantomData<T>,
}

#[derive(Default, PartialEq, Eq, Hash, IsVariant)]
pub(crate) enum ListState<T> {
    #[default]
    Empty,
    Full(ListContents<T>),
}

use ListState::*;

pub(crate) struct ListContents<T> {
    pub len: Length,
    pub head: NodePtr<T>,
    pub tail: NodePtr<T>,
}

impl<T> LinkedList<T> {
    /// Creates a new LinkedList with no elements.
    pub const fn new() -> LinkedList<T> {
        LinkedList {
            state: Empty,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the LinkedList.
    pub const fn len(&self) -> usize {
        self.state.len()
    }

    /// Returns true if the LinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the LinkedList is empty.
    pub fn front(&self) -> &T {
        self.try_front().throw()
    }

    /// Returns a reference to the first element, or an [`Err`] if the LinkedList is
    /// empty.
    pub const fn try_front(&self) -> Result<&T, IndexOutOfBounds> {
        match &self.state {
            Empty => Err(IndexOutOfBounds { index: 0, len: 0 }),
            Full(ListContents { head, .. }) => Ok(head.value()),
        }
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Panics
    /// Panics if the LinkedList is empty.
    pub fn front_mut(&mut self) -> &mut T {
        self.try_front_mut().throw()
    }

    /// Returns a mutable reference to the first element, or an [`Err`] if the
    /// LinkedList is empty.
    pub const fn try_front_mut(&mut self) -> Result<&mut T, IndexOutOfBounds> {
        match self.state {
            Empty => Err(IndexOutOfBounds { index: 0, len: 0 }),
            Full(ListContents { mut head, .. }) => Ok(head.value_mut()),
        }
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the LinkedList is empty.
    pub fn back(&self) -> &T {
        self.try_back().throw()
    }

    /// Returns a reference to the last element, or an [`Err`] if the LinkedList is
    /// empty.
    pub const fn try_back(&self) -> Result<&T, IndexOutOfBounds> {
        match &self.state {
            Empty => Err(IndexOutOfBounds { index: 0, len: 0 }),
            Full(ListContents { tail, .. }) => Ok(tail.value()),
        }
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Panics
    /// Panics if the LinkedList is empty.
    pub fn back_mut(&mut self) -> &mut T {
        self.try_back_mut().throw()
    }

    /// Returns a mutable reference to the last element, or an [`Err`] if the
    /// LinkedList is empty.
    pub const fn try_back_mut(&mut self) -> Result<&mut T, IndexOutOfBounds> {
        match self.state {
            Empty => Err(IndexOutOfBounds { index: 0, len: 0 }),
            Full(ListContents { mut tail, .. }) => Ok(tail.value_mut()),
        }
    }

    /// Adds the provided element to the front of the LinkedList.
    pub fn push_front(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = ListState::single(value),
            Full(contents) => contents.push_front(value),
        }
    }

    /// Adds the provided element to the back of the LinkedList.
    pub fn push_back(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = ListState::single(value),
            Full(contents) => contents.push_back(value),
        }
    }

    /// Removes the first element from the list and returns it, if the list isn't
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, head, .. }) => {
                let node = head.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so the
                        // first cell is followed by at least one more.
                        let new_head = unsafe { node.next.unwrap_unchecked() };
                        *head = new_head;
                        *new_head.prev_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Removes the last element from the list and returns it, if the list isn't
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, tail, .. }) => {
                let node = tail.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so the
                        // last cell is preceded by at least one more.
                        let new_tail = unsafe { node.prev.unwrap_unchecked() };
                        *tail = new_tail;
                        *new_tail.next_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Returns a reference to the element at the provided `index`, panicking on a
    /// failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an
    /// [`Err`] on a failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value())
    }

    /// Returns a mutable reference to the element at the provided `index`,
    /// panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`,
    /// returning an [`Err`] on a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value_mut())
    }

    /// Inserts the provided value at the given index, linking a fresh cell between
    /// its neighbors. `index` may range up to and including the length:
    /// `insert(0, ..)` is equivalent to [`push_front`](LinkedList::push_front) and
    /// `insert(len, ..)` to [`push_back`](LinkedList::push_back).
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an [`Err`] rather
    /// than panicking when the index is past the end.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrCapOverflow> {
        let len = self.len();
        if index > len {
            return Err(IndexOutOfBounds { index, len }.into());
        }

        if index == 0 {
            self.push_front(value);
        } else if index == len {
            self.push_back(value);
        } else {
            // 0 < index < len, so the list is non-empty and the new cell has
            // neighbors on both sides.
            let Full(contents) = &mut self.state else {
                return Err(IndexOutOfBounds { index, len }.into());
            };

            // Seek before the length changes, as seek walks from the closer end.
            let prev_node = contents.seek(index - 1);
            contents.len = contents.len.checked_add(1).ok_or(CapacityOverflow)?;

            let node = NodePtr::from_node(DNode {
                value,
                prev: Some(prev_node),
                next: *prev_node.next(),
            });

            // SAFETY: This branch never inserts at the back, so the cell before the
            // insertion point has a successor.
            unsafe { *prev_node.next().unwrap_unchecked().prev_mut() = Some(node); }
            *prev_node.next_mut() = Some(node);
        }
        Ok(())
    }

    /// Removes and returns the element at the provided index, re-linking its
    /// neighbors directly to each other.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at the provided index, returning an [`Err`]
    /// rather than panicking when the index is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        let contents = self.checked_contents_for_index_mut(index)?;
        match index {
            0 => {
                // SAFETY: contents is already checked to be valid for the provided
                // index, so the list is non-empty.
                Ok(unsafe { self.pop_front().unwrap_unchecked() })
            },
            val if val == contents.last_index() => {
                // SAFETY: contents is already checked to be valid for the provided
                // index, so the list is non-empty.
                Ok(unsafe { self.pop_back().unwrap_unchecked() })
            },
            val => {
                let node = contents.seek(val).take_node();

                // SAFETY: For this branch both prev and next are present; the head
                // and tail cases are handled by the pop front/back branches.
                unsafe {
                    *node.prev.unwrap_unchecked().next_mut() = node.next;
                    *node.next.unwrap_unchecked().prev_mut() = node.prev;
                }
                // SAFETY: A length of 1 would have matched one of the previous
                // branches.
                contents.len = unsafe { contents.len.checked_sub(1).unwrap_unchecked() };

                Ok(node.value)
            },
        }
    }

    /// Replaces the element at the provided index with `new_value`, returning the
    /// old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    /// Replaces the element at the provided index, returning an [`Err`] rather than
    /// panicking when the index is out of bounds.
    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(
            self.checked_seek(index)?.value_mut(),
            new_value,
        ))
    }

    /// Moves every element of `other` to the back of self in `O(1)`, splicing the
    /// chains together without copying any cells. `other` is left empty.
    ///
    /// # Panics
    /// Panics if the combined length overflows [`usize`].
    pub fn append(&mut self, other: LinkedList<T>) {
        let other_contents = match other.into_state() {
            Empty => return,
            Full(contents) => contents,
        };

        match &mut self.state {
            Empty => self.state = Full(other_contents),
            Full(contents) => {
                contents.len = contents.len
                    .checked_add(other_contents.len.get())
                    .ok_or(CapacityOverflow).throw();

                *contents.tail.next_mut() = Some(other_contents.head);
                *other_contents.head.prev_mut() = Some(contents.tail);
                contents.tail = other_contents.tail;
            },
        }
    }

    /// Moves every element of `other` to the front of self in `O(1)`, preserving
    /// the order of both chains. `other` is left empty.
    ///
    /// # Panics
    /// Panics if the combined length overflows [`usize`].
    pub fn prepend(&mut self, other: LinkedList<T>) {
        let other_contents = match other.into_state() {
            Empty => return,
            Full(contents) => contents,
        };

        match &mut self.state {
            Empty => self.state = Full(other_contents),
            Full(contents) => {
                contents.len = contents.len
                    .checked_add(other_contents.len.get())
                    .ok_or(CapacityOverflow).throw();

                *contents.head.prev_mut() = Some(other_contents.tail);
                *other_contents.tail.next_mut() = Some(contents.head);
                contents.head = other_contents.head;
            },
        }
    }

    /// Moves every element of `other` into self at the given index, splicing the
    /// chain in without copying any cells. `index` may range up to and including
    /// the length: `splice(0, ..)` is equivalent to
    /// [`prepend`](LinkedList::prepend) and `splice(len, ..)` to
    /// [`append`](LinkedList::append).
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length.
    pub fn splice(&mut self, index: usize, other: LinkedList<T>) {
        self.try_splice(index, other).throw()
    }

    /// Moves every element of `other` into self at the given index, returning an
    /// [`Err`] rather than panicking when the index is past the end.
    pub fn try_splice(
        &mut self,
        index: usize,
        other: LinkedList<T>,
    ) -> Result<(), IndexOrCapOverflow> {
        let len = self.len();
        if index > len {
            return Err(IndexOutOfBounds { index, len }.into());
        }

        if index == 0 {
            self.prepend(other);
        } else if index == len {
            self.append(other);
        } else {
            let other_contents = match other.into_state() {
                Empty => return Ok(()),
                Full(contents) => contents,
            };

            // 0 < index < len, so self is non-empty and the splice point has cells
            // on both sides.
            let Full(contents) = &mut self.state else {
                return Err(IndexOutOfBounds { index, len }.into());
            };

            // Seek before the length changes, as seek walks from the closer end.
            let before = contents.seek(index - 1);
            contents.len = contents.len
                .checked_add(other_contents.len.get())
                .ok_or(CapacityOverflow)?;
            // SAFETY: This branch never splices at the back, so the cell before the
            // splice point has a successor.
            let after = unsafe { before.next().unwrap_unchecked() };

            *before.next_mut() = Some(other_contents.head);
            *other_contents.head.prev_mut() = Some(before);
            *other_contents.tail.next_mut() = Some(after);
            *after.prev_mut() = Some(other_contents.tail);
        }
        Ok(())
    }

    /// Drops every element and frees every cell, leaving the LinkedList empty.
    pub fn clear(&mut self) {
        *self = LinkedList::new();
    }

    /// Returns a borrowing iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns a mutably borrowing iterator from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }
}

impl<T: Clone> LinkedList<T> {
    /// Deep-copies every element of `other` to the back of self, in order. `other`
    /// is untouched; no cells are shared afterwards.
    pub fn extend_back(&mut self, other: &LinkedList<T>) {
        for value in other.iter() {
            self.push_back(value.clone());
        }
    }

    /// Deep-copies every element of `other` to the front of self, preserving the
    /// order of both chains. `other` is untouched; no cells are shared afterwards.
    pub fn extend_front(&mut self, other: &LinkedList<T>) {
        for value in other.iter().rev() {
            self.push_front(value.clone());
        }
    }
}

impl<T: Eq> LinkedList<T> {
    /// Returns the index of the first element equal to `item`, if there is one.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        for (index, element) in self.iter().enumerate() {
            if element == item { return Some(index); }
        }
        None
    }

    /// Returns true if any element of the list is equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|i| i == item)
    }
}

impl<T> LinkedList<T> {
    /// Takes the state out of self without running its destructor, leaving self
    /// empty. The caller becomes responsible for the cells of a Full state.
    pub(crate) fn into_state(mut self) -> ListState<T> {
        mem::take(&mut self.state)
    }

    pub(crate) fn checked_seek(&self, index: usize) -> Result<NodePtr<T>, IndexOutOfBounds> {
        Ok(self.checked_contents_for_index(index)?.seek(index))
    }

    pub(crate) const fn checked_contents_for_index(
        &self,
        index: usize,
    ) -> Result<&ListContents<T>, IndexOutOfBounds> {
        match &self.state {
            Empty => Err(IndexOutOfBounds { index, len: 0 }),
            Full(contents) => {
                let len = contents.len.get();
                if index < len {
                    Ok(contents)
                } else {
                    Err(IndexOutOfBounds { index, len })
                }
            },
        }
    }

    pub(crate) const fn checked_contents_for_index_mut(
        &mut self,
        index: usize,
    ) -> Result<&mut ListContents<T>, IndexOutOfBounds> {
        match &mut self.state {
            Empty => Err(IndexOutOfBounds { index, len: 0 }),
            Full(contents) => {
                let len = contents.len.get();
                if index < len {
                    Ok(contents)
                } else {
                    Err(IndexOutOfBounds { index, len })
                }
            },
        }
    }

    /// Walks the chain in both directions, asserting the full linkage invariant:
    /// mutual prev/next references, correct endpoints and a cell count that matches
    /// the recorded length.
    #[cfg(test)]
    pub(crate) fn assert_linkage(&self) {
        match &self.state {
            Empty => {},
            Full(ListContents { len, head, tail }) => {
                assert!(head.prev().is_none(), "Head must have no predecessor.");
                assert!(tail.next().is_none(), "Tail must have no successor.");

                let mut count = 1;
                let mut curr = *head;
                while let Some(next) = curr.next() {
                    assert!(
                        next.prev().expect("Interior cell must have a predecessor.") == curr,
                        "Neighboring cells must reference each other mutually."
                    );
                    curr = *next;
                    count += 1;
                }
                assert!(*tail == curr, "Forward walk must end at the tail.");
                assert_eq!(count, len.get(), "Walk must visit exactly len cells.");
            },
        }
    }
}

impl<T> ListContents<T> {
    /// Returns the cell at `index`, walking from whichever end is closer.
    pub fn seek(&self, index: usize) -> NodePtr<T> {
        if index < self.len.get() / 2 {
            Self::seek_fwd(index, self.head)
        } else {
            Self::seek_bwd(self.last_index() - index, self.tail)
        }
    }

    fn seek_fwd(count: usize, mut node: NodePtr<T>) -> NodePtr<T> {
        for _ in 0..count {
            node = node.next().expect("Links should span the recorded length.");
        }
        node
    }

    fn seek_bwd(count: usize, mut node: NodePtr<T>) -> NodePtr<T> {
        for _ in 0..count {
            node = node.prev().expect("Links should span the recorded length.");
        }
        node
    }

    pub fn push_front(&mut self, value: T) {
        self.len = self.len.checked_add(1).ok_or(CapacityOverflow).throw();

        let node = NodePtr::from_node(DNode {
            value,
            prev: None,
            next: Some(self.head),
        });

        *self.head.prev_mut() = Some(node);
        self.head = node;
    }

    pub fn push_back(&mut self, value: T) {
        self.len = self.len.checked_add(1).ok_or(CapacityOverflow).throw();

        let node = NodePtr::from_node(DNode {
            value,
            prev: Some(self.tail),
            next: None,
        });

        *self.tail.next_mut() = Some(node);
        self.tail = node;
    }

    pub fn wrap_one(value: T) -> ListContents<T> {
        let node = NodePtr::from_node(DNode {
            value,
            prev: None,
            next: None,
        });

        ListContents {
            len: ONE,
            head: node,
            tail: node,
        }
    }

    pub const fn last_index(&self) -> usize {
        self.len.get() - 1
    }
}

impl<T> ListState<T> {
    pub fn single(value: T) -> ListState<T> {
        Full(ListContents::wrap_one(value))
    }

    pub const fn len(&self) -> usize {
        match self {
            Empty => 0,
            Full(ListContents { len, .. }) => len.get(),
        }
    }
}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        for item in iter.into_iter() {
            list.push_back(item);
        }
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        match &self.state {
            Empty => {},
            Full(ListContents { head, .. }) => {
                let mut curr = Some(*head);
                while let Some(ptr) = curr {
                    curr = *ptr.next();
                    // SAFETY: Each cell is visited exactly once, and the links are
                    // never read again after the walk has moved past them.
                    unsafe { ptr.drop_node(); }
                }
            },
        }
    }
}

impl<T: PartialEq> PartialEq for ListContents<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len { return false; }
        let mut node_a = self.head;
        let mut node_b = other.head;

        loop {
            if node_a.value() != node_b.value() {
                break false;
            }
            match (node_a.next(), node_b.next()) {
                (Some(next_a), Some(next_b)) => {
                    node_a = *next_a;
                    node_b = *next_b;
                },
                // Both sides have the same length, so if they aren't both Some,
                // they are both None.
                _ => break true,
            }
        }
    }
}

impl<T: Eq> Eq for ListContents<T> {}

impl<T: Hash> Hash for ListContents<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        let mut node = self.head;

        loop {
            node.value().hash(state);
            match node.next() {
                Some(next) => node = *next,
                None => break,
            }
        }

        // Terminate the variable length hashing sequence.
        0xFF.hash(state);
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LinkedList {{ contents: ")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ", len: {} }}", self.len())
    }
}

impl<T: Debug> Display for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ") -> (")?;
            }
            write!(f, "{value:?}")?;
        }
        write!(f, ")")
    }
}
