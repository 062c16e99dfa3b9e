use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{LinkedList, ListContents, ListState, NodePtr};

/// A borrowing iterator over a [`LinkedList`], yielding `&T` from both ends.
pub struct Iter<'a, T> {
    pub(crate) front: Option<NodePtr<T>>,
    pub(crate) back: Option<NodePtr<T>>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

/// A mutably borrowing iterator over a [`LinkedList`], yielding `&mut T` from both
/// ends.
pub struct IterMut<'a, T> {
    pub(crate) front: Option<NodePtr<T>>,
    pub(crate) back: Option<NodePtr<T>>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

/// An owning iterator over a [`LinkedList`], unboxing each cell as it is consumed.
pub struct IntoIter<T> {
    pub(crate) front: Option<NodePtr<T>>,
    pub(crate) back: Option<NodePtr<T>>,
    pub(crate) remaining: usize,
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        match &self.state {
            ListState::Empty => Iter {
                front: None,
                back: None,
                remaining: 0,
                _phantom: PhantomData,
            },
            ListState::Full(ListContents { len, head, tail }) => Iter {
                front: Some(*head),
                back: Some(*tail),
                remaining: len.get(),
                _phantom: PhantomData,
            },
        }
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        match &self.state {
            ListState::Empty => IterMut {
                front: None,
                back: None,
                remaining: 0,
                _phantom: PhantomData,
            },
            ListState::Full(ListContents { len, head, tail }) => IterMut {
                front: Some(*head),
                back: Some(*tail),
                remaining: len.get(),
                _phantom: PhantomData,
            },
        }
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self.into_state() {
            ListState::Empty => IntoIter {
                front: None,
                back: None,
                remaining: 0,
            },
            ListState::Full(ListContents { len, head, tail }) => IntoIter {
                front: Some(head),
                back: Some(tail),
                remaining: len.get(),
            },
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = *node.next();
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = *node.prev();
        Some(node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let mut node = self.front?;
        self.remaining -= 1;
        self.front = *node.next();
        Some(node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let mut node = self.back?;
        self.remaining -= 1;
        self.back = *node.prev();
        Some(node.value_mut())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?.take_node();
        self.remaining -= 1;
        self.front = node.next;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?.take_node();
        self.remaining -= 1;
        self.back = node.prev;
        Some(node.value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Unboxes any cells the iterator never reached.
        for _ in self {}
    }
}
