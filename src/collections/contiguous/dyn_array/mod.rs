//! A module containing [`DynArray`], the growable counterpart to
//! [`Array`](super::Array).
//!
//! Owned iteration reuses [`IntoIter`](super::array::IntoIter) from the array
//! module; borrowed iteration comes from [`std::slice`] via `Deref`.
//!
//! [`DynArray`] is also re-exported under the parent module.

mod dyn_array;
mod tests;

pub use dyn_array::*;
