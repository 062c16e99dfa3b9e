//! Heap-owned generic containers and ownership-tracking handles.
//!
//! # Purpose
//! This crate is a small, self-contained data-structure library: a fixed-capacity
//! [`Array`](collections::contiguous::Array), a growable
//! [`DynArray`](collections::contiguous::DynArray), a doubly-linked
//! [`LinkedList`](collections::linked::LinkedList) with the
//! [`Queue`](collections::adapters::Queue) and [`Stack`](collections::adapters::Stack)
//! adapters over it, plus two heap handles that make the ownership model of each
//! container explicit: the move-only [`ExclusivePtr`](handles::ExclusivePtr) and the
//! reference-counted [`CountedPtr`](handles::CountedPtr).
//!
//! Every value in this crate is owned by exactly one container or exclusive handle at
//! a time, or shared between counted handles under a manual (non-atomic) count. There
//! is no third model and no shared mutable aliasing of container internals.
//!
//! # Error Handling
//! Fallible operations come in pairs: a short panicking form for the common case
//! (`get`, `dequeue`, `value`) and a `try_`-prefixed form returning a strongly typed
//! [`Result`]. The error types are small structs and enums implementing
//! [`Error`](std::error::Error) with static dispatch throughout; nothing in this
//! crate boxes an error.
//!
//! One asymmetry is intentional and documented where it occurs: growth on
//! [`push`](collections::contiguous::DynArray::push) propagates allocation failure,
//! while [`reserve`](collections::contiguous::DynArray::reserve) is best-effort and
//! silently leaves the container unchanged if the larger buffer can't be had.
//!
//! # Dependencies
//! The containers are written directly against the global allocator: no [`Vec`], no
//! [`std::collections::LinkedList`], no [`Rc`](std::rc::Rc) behind the scenes. The
//! only third-party dependency is a set of derive macros for the composite error
//! enums.
//!
//! # Concurrency
//! None. These are single-threaded value types; [`CountedPtr`](handles::CountedPtr)
//! keeps its count in a plain [`Cell`](std::cell::Cell) and is deliberately neither
//! [`Send`] nor [`Sync`].

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
pub mod handles;

pub(crate) mod util;
