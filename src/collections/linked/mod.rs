//! Linked collection types, currently just the doubly-linked [`LinkedList`].
//!
//! The FIFO/LIFO adapters over linked storage live in
//! [`adapters`](crate::collections::adapters).

pub mod list;

#[doc(inline)]
pub use list::LinkedList;
