/// A singly-linked storage cell, owning its successor through a [`Box`].
///
/// Because ownership runs strictly head to tail, no raw pointers are needed;
/// the borrow checker verifies the chain. Containers holding a chain must drop
/// and clone it iteratively, as the derived forms recurse once per cell and
/// overflow the thread's stack on long chains.
pub(crate) struct Node<T> {
    pub value: T,
    pub next: Option<Box<Node<T>>>,
}

/// Drops every cell of the chain starting at `head` without recursing.
pub(crate) fn drop_iterative<T>(head: Option<Box<Node<T>>>) {
    let mut curr = head;
    while let Some(mut node) = curr {
        curr = node.next.take();
    }
}

/// Deep-copies the chain starting at `head`, preserving cell order.
pub(crate) fn clone_iterative<T: Clone>(head: &Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
    let mut source = head.as_deref()?;
    let mut new_head = Box::new(Node {
        value: source.value.clone(),
        next: None,
    });

    let mut tail = &mut new_head;
    while let Some(next) = source.next.as_deref() {
        tail.next = Some(Box::new(Node {
            value: next.value.clone(),
            next: None,
        }));
        tail = tail.next.as_mut().expect("The cell was just attached.");
        source = next;
    }

    Some(new_head)
}
