//! A module containing [`Array`] and associated types.
//!
//! The only other included type is [`IntoIter`] for owned iteration over an Array.
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`] are used for borrowed iteration.
//!
//! [`Array`] is also re-exported under the parent module.

mod array;
mod iter;
mod tests;

pub use array::*;
pub use iter::*;
