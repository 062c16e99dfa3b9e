use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NodePtr<T>>;

// NOTE: Nodes are allocated through Box<T> rather than raw alloc calls, because
// dereferencing a Box allows the value to be moved back off of the heap when a node
// is unlinked.

/// A doubly-linked storage cell. A DNode has no ownership semantics of its own: the
/// containing list allocates and frees each cell, and the linkage invariant (mutual
/// prev/next references, terminated at head and tail) is maintained by every list
/// mutation.
pub(crate) struct DNode<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}

/// A copyable non-owning pointer to a [`DNode`].
#[derive(Debug)]
pub(crate) struct NodePtr<T>(pub NonNull<DNode<T>>);

impl<T> NodePtr<T> {
    pub const fn value<'a>(&self) -> &'a T {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &self.0.as_ref().value }
    }

    pub const fn value_mut<'a>(&mut self) -> &'a mut T {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &mut self.0.as_mut().value }
    }

    pub fn prev<'a>(&self) -> &'a Link<T> {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &(*self.0.as_ptr()).prev }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn prev_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &mut (*self.0.as_ptr()).prev }
    }

    pub fn next<'a>(&self) -> &'a Link<T> {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &(*self.0.as_ptr()).next }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn next_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: The cell is alive for as long as it is reachable from its list.
        unsafe { &mut (*self.0.as_ptr()).next }
    }

    pub fn from_node(node: DNode<T>) -> NodePtr<T> {
        NodePtr(NonNull::from(Box::leak(Box::new(node))))
    }

    /// Unboxes the cell, returning it by value. The pointer (and every copy of it)
    /// is dangling afterwards.
    pub fn take_node(self) -> DNode<T> {
        // SAFETY: The pointer was produced by from_node and is only taken once, when
        // the cell is unlinked from its list.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    /// Frees the cell in place, dropping its value.
    ///
    /// # Safety
    /// The pointer must have been produced by [`NodePtr::from_node`] and must not be
    /// used (nor freed) again afterwards.
    pub unsafe fn drop_node(self) {
        // SAFETY: Upheld by the caller.
        drop(unsafe { Box::from_raw(self.0.as_ptr()) });
    }
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
