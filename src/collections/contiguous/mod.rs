//! Contiguous collection types: [`Array`] for a buffer whose capacity is fixed at
//! construction and [`DynArray`] for one that grows as elements are appended.
#![warn(missing_docs)]

pub mod array;
pub mod dyn_array;

#[doc(inline)]
pub use array::Array;
#[doc(inline)]
pub use dyn_array::DynArray;
