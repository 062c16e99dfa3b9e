use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// A bounds-checked access used an index at or past the end of the collection.
#[derive(Debug, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A requested memory layout exceeded `isize::MAX` bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// An operation that consumes or inspects an element was invoked on an empty
/// collection. Unlike [`IndexOutOfBounds`] this is a logic error: no index was
/// involved, the structure itself was in the wrong state.
#[derive(Debug, PartialEq, Eq)]
pub struct EmptyCollection;

impl Display for EmptyCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Operation requires a non-empty collection!")
    }
}

impl Error for EmptyCollection {}

/// A handle that doesn't currently own an allocation was dereferenced.
#[derive(Debug, PartialEq, Eq)]
pub struct NullHandle;

impl Display for NullHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Handle does not own an allocation!")
    }
}

impl Error for NullHandle {}

/// A handle was asked to adopt the allocation it already owns. Carrying out the
/// transfer would release the allocation before re-acquiring it, leaving the
/// handle holding freed memory, so the request is rejected instead.
#[derive(Debug, PartialEq, Eq)]
pub struct SelfAssignment;

impl Display for SelfAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Handle cannot adopt the allocation it already owns!")
    }
}

impl Error for SelfAssignment {}

/// Combined error for insertions, which bounds-check the index and then grow the
/// length counter.
#[derive(Debug, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum IndexOrCapOverflow {
    IndexOutOfBounds(IndexOutOfBounds),
    CapacityOverflow(CapacityOverflow),
}
