use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use super::chain::{self, Node};
#[doc(inline)]
pub use crate::util::error::EmptyCollection;
use crate::util::result::ResultExtension;

/// A last-in-first-out adapter over a singly-linked chain: elements join and
/// leave at the top, so N pushes followed by N pops yield reverse insertion
/// order.
///
/// The chain owns its cells from the top downwards through [`Box`], with drops
/// and clones performed iteratively to keep long chains off the call stack.
/// Reading or removing from an empty Stack is a logic error
/// ([`EmptyCollection`]) rather than a bad index.
///
/// Iteration runs from the top of the Stack downwards, matching pop order.
pub struct Stack<T> {
    pub(crate) top: Option<Box<Node<T>>>,
    pub(crate) len: usize,
}

impl<T> Stack<T> {
    /// Creates a new Stack with no elements.
    pub const fn new() -> Stack<T> {
        Stack { top: None, len: 0 }
    }

    /// Returns the number of elements in the Stack.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Stack contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds the provided element to the top of the Stack.
    pub fn push(&mut self, value: T) {
        self.top = Some(Box::new(Node {
            value,
            next: self.top.take(),
        }));
        self.len += 1;
    }

    /// Removes and returns the element at the top of the Stack.
    ///
    /// # Panics
    /// Panics if the Stack is empty.
    pub fn pop(&mut self) -> T {
        self.try_pop().throw()
    }

    /// Removes and returns the element at the top of the Stack, or an [`Err`]
    /// if the Stack is empty.
    pub fn try_pop(&mut self) -> Result<T, EmptyCollection> {
        let node = self.top.take().ok_or(EmptyCollection)?;
        self.top = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    /// Returns a reference to the element at the top of the Stack.
    ///
    /// # Panics
    /// Panics if the Stack is empty.
    pub fn top(&self) -> &T {
        self.try_top().throw()
    }

    /// Returns a reference to the element at the top of the Stack, or an
    /// [`Err`] if the Stack is empty.
    pub fn try_top(&self) -> Result<&T, EmptyCollection> {
        match &self.top {
            Some(node) => Ok(&node.value),
            None => Err(EmptyCollection),
        }
    }

    /// Returns a mutable reference to the element at the top of the Stack.
    ///
    /// # Panics
    /// Panics if the Stack is empty.
    pub fn top_mut(&mut self) -> &mut T {
        self.try_top_mut().throw()
    }

    /// Returns a mutable reference to the element at the top of the Stack, or
    /// an [`Err`] if the Stack is empty.
    pub fn try_top_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        match &mut self.top {
            Some(node) => Ok(&mut node.value),
            None => Err(EmptyCollection),
        }
    }

    /// Drops every element, leaving the Stack empty.
    pub fn clear(&mut self) {
        chain::drop_iterative(self.top.take());
        self.len = 0;
    }

    /// Returns a borrowing iterator from the top of the Stack downwards.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.top.as_deref(),
            remaining: self.len,
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        chain::drop_iterative(self.top.take());
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Stack {
            top: chain::clone_iterative(&self.top),
            len: self.len,
        }
    }
}

/// Pushes each element in iteration order, so the last element of the iterator
/// ends up on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        for item in iter.into_iter() {
            stack.push(item);
        }
        stack
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: Hash> Hash for Stack<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Stack {{ contents: ")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ", len: {} }}", self.len)
    }
}

impl<T: Debug> Display for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "top -> ")?;
        for value in self.iter() {
            write!(f, "({value:?}) -> ")?;
        }
        write!(f, "base")
    }
}

/// A borrowing iterator over a [`Stack`], from the top downwards.
pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over a [`Stack`], from the top downwards.
pub struct IntoIter<T> {
    stack: Stack<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.try_pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len, Some(self.stack.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}
