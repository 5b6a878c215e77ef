//! A `Vec`-backed reference model of `DynamicArray`.
//!
//! The model restates each contract directly (bounds, empty pops, the
//! doubling and quarter-full shrink rules) so property tests can run the
//! same [`Op`] sequence against both and compare every [`Outcome`].

use dynarr::{Allocator, ArrayError, DynamicArray, Element};

/// One public operation with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Op<T> {
    Push(T),
    Insert(usize, T),
    Prepend(T),
    Pop,
    Delete(usize),
    Remove(T),
    Find(T),
    At(usize),
}

/// What an operation returned.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Unit(Result<(), ArrayError>),
    Value(Result<T, ArrayError>),
    Count(usize),
    Position(Option<usize>),
}

/// Reference model: a `Vec` for the elements and a simulated capacity.
#[derive(Clone, Debug)]
pub struct ReferenceModel<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Element> ReferenceModel<T> {
    pub const MIN_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: Self::MIN_CAPACITY,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn apply(&mut self, op: &Op<T>) -> Outcome<T> {
        match *op {
            Op::Push(item) => {
                self.grow_if_full();
                self.items.push(item);
                Outcome::Unit(Ok(()))
            }
            Op::Insert(index, item) => Outcome::Unit(self.insert(index, item)),
            Op::Prepend(item) => Outcome::Unit(self.insert(0, item)),
            Op::Pop => match self.items.pop() {
                Some(value) => {
                    let size = self.items.len();
                    if size <= self.capacity / 4 && self.capacity > Self::MIN_CAPACITY {
                        self.capacity /= 2;
                    }
                    Outcome::Value(Ok(value))
                }
                None => Outcome::Value(Err(ArrayError::EmptyContainer)),
            },
            Op::Delete(index) => Outcome::Value(
                self.check(index)
                    .map(|()| self.items.remove(index)),
            ),
            Op::Remove(item) => {
                let before = self.items.len();
                self.items.retain(|&value| value != item);
                Outcome::Count(before - self.items.len())
            }
            Op::Find(item) => {
                Outcome::Position(self.items.iter().position(|&value| value == item))
            }
            Op::At(index) => Outcome::Value(self.check(index).map(|()| self.items[index])),
        }
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), ArrayError> {
        self.check(index)?;
        self.grow_if_full();
        self.items.insert(index, item);
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), ArrayError> {
        let size = self.items.len();
        if index >= size {
            return Err(ArrayError::IndexOutOfBounds { index, size });
        }
        Ok(())
    }

    fn grow_if_full(&mut self) {
        if self.items.len() == self.capacity {
            self.capacity *= 2;
        }
    }
}

impl<T: Element> Default for ReferenceModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `op` against a real array.
pub fn apply_to_array<T: Element, A: Allocator>(
    array: &mut DynamicArray<T, A>,
    op: &Op<T>,
) -> Outcome<T> {
    match *op {
        Op::Push(item) => Outcome::Unit(array.push(item)),
        Op::Insert(index, item) => Outcome::Unit(array.insert(index, item)),
        Op::Prepend(item) => Outcome::Unit(array.prepend(item)),
        Op::Pop => Outcome::Value(array.pop()),
        Op::Delete(index) => Outcome::Value(array.delete(index)),
        Op::Remove(item) => Outcome::Count(array.remove(item)),
        Op::Find(item) => Outcome::Position(array.find(item)),
        Op::At(index) => Outcome::Value(array.at(index)),
    }
}
