use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;

/// A ZST for exercising the no-allocation paths of the containers in tests.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// A test type which increments a shared tally every time an instance is dropped,
/// making frees (and double frees, and missing frees) observable from tests.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(0)))
    }
}

impl Default for CountedDrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for CountedDrop {
    type Target = Rc<Cell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
