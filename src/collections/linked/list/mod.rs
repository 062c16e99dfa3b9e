//! A module containing [`LinkedList`] and associated types, including the
//! [`Iter`], [`IterMut`] and [`IntoIter`] iterators.
//!
//! [`LinkedList`] is also re-exported under the parent module.

mod iter;
mod length;
mod linked_list;
mod node;

pub use iter::*;
pub use linked_list::*;

pub(crate) use length::*;
pub(crate) use node::*;
