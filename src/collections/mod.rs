//! The container half of the crate: contiguous buffers, a doubly-linked list and the
//! FIFO/LIFO adapters built over the linked structures.
//!
//! # Ownership
//! Each container owns its storage outright: buffers and nodes are allocated when
//! elements enter and freed when they leave or the container is dropped. Cloning any
//! container is a deep copy; moving one transfers the storage and leaves nothing
//! behind. Shared ownership lives in [`handles`](crate::handles), not here.
//!
//! # Method
//! Contiguous types implement [`Deref<Target = [T]>`](std::ops::Deref) (and
//! `DerefMut`), which provides slicing, borrowed iteration and the usual slice
//! methods without repetitive code.

pub mod adapters;
pub mod contiguous;
pub mod linked;
