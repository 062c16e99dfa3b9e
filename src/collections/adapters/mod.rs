//! Ordering adapters over the linked collections: the FIFO [`Queue`] and the
//! LIFO [`Stack`].
//!
//! Both adapters restrict access to the ends of their chain and report access
//! to an empty container as a logic error
//! ([`EmptyCollection`](crate::util::error::EmptyCollection)) rather than an
//! out of bounds index.

pub mod queue;
pub mod stack;

pub(crate) mod chain;

mod tests;

#[doc(inline)]
pub use queue::Queue;
#[doc(inline)]
pub use stack::Stack;
