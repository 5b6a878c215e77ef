//! The growable array.
//!
//! [`DynamicArray`] layers the positional contracts and the resize policy
//! over a [`RawStore`]. Growth is triggered only by `push` and `insert` on a
//! full store; shrinking is triggered only by `pop`. Both funnel through a
//! single private `resize` routine.

use std::alloc::Layout;
use std::fmt;

use log::{debug, warn};

use crate::allocator::{Allocator, Global};
use crate::config::ArrayConfig;
use crate::element::Element;
use crate::error::ArrayError;
use crate::policy;
use crate::raw::RawStore;
use crate::Result;

/// A growable, contiguous sequence of numeric elements.
///
/// Capacity is always a power of two and at least
/// [`ArrayConfig::MIN_CAPACITY`]. The backing store is owned exclusively by
/// the array and released exactly once when the array is dropped.
///
/// The array performs no internal synchronisation. It is `Send` and `Sync`
/// whenever its allocator is, so callers that share it across threads wrap
/// it in a lock.
pub struct DynamicArray<T: Element, A: Allocator = Global> {
    store: RawStore<T, A>,
}

impl<T: Element> DynamicArray<T, Global> {
    /// Create an empty array with capacity 16 on the global allocator.
    ///
    /// # Errors
    ///
    /// [`ArrayError::AllocationFailed`] if the store cannot be allocated.
    pub fn new() -> Result<Self> {
        Self::new_in(Global)
    }

    /// Create an empty array with room for at least `capacity` elements.
    ///
    /// The actual capacity is the next power of two, floored at 16.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Create an array holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        Self::from_slice_in(values, Global)
    }
}

impl<T: Element, A: Allocator> DynamicArray<T, A> {
    /// Create an empty array with capacity 16 on the given allocator.
    pub fn new_in(alloc: A) -> Result<Self> {
        Self::with_config(&ArrayConfig::default(), alloc)
    }

    /// Create an empty array with room for at least `capacity` elements on
    /// the given allocator.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        Self::with_config(&ArrayConfig::new(capacity), alloc)
    }

    /// Create an empty array from a config.
    ///
    /// # Errors
    ///
    /// [`ArrayError::AllocationFailed`] if the resolved capacity overflows
    /// or the allocator refuses the block.
    pub fn with_config(config: &ArrayConfig, alloc: A) -> Result<Self> {
        let capacity = config
            .resolved_capacity()
            .ok_or(ArrayError::AllocationFailed {
                capacity: config.initial_capacity,
            })?;
        let store = RawStore::with_capacity_in(capacity, alloc)?;
        Ok(Self { store })
    }

    /// Create an array holding a copy of `values` on the given allocator.
    pub fn from_slice_in(values: &[T], alloc: A) -> Result<Self> {
        let mut array = Self::with_capacity_in(values.len(), alloc)?;
        array.store.extend_within_capacity(values);
        Ok(array)
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Number of elements the store holds before it must grow.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Bytes held by the backing store, live and spare slots alike.
    pub fn memory_bytes(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }

    /// The allocator backing this array.
    pub fn allocator(&self) -> &A {
        self.store.allocator()
    }

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::IndexOutOfBounds`] if `index >= size`.
    pub fn at(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.store.as_slice()[index])
    }

    /// Append `item` after the last element, doubling the capacity first if
    /// the store is full.
    ///
    /// # Errors
    ///
    /// [`ArrayError::AllocationFailed`] if growth fails. The array is then
    /// exactly as it was before the call.
    pub fn push(&mut self, item: T) -> Result<()> {
        self.reserve_one()?;
        self.store.push_within_capacity(item);
        Ok(())
    }

    /// Insert `item` at `index`, shifting later elements one slot right.
    ///
    /// `index` must name an existing element: inserting at `size` (the
    /// append position) is rejected, and so is any insert into an empty
    /// array. Use [`push`](Self::push) to append.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::IndexOutOfBounds`] if `index >= size`.
    /// - [`ArrayError::AllocationFailed`] if growth fails.
    ///
    /// Either way the array is unchanged.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.check_index(index)?;
        self.reserve_one()?;
        self.store.insert_within_capacity(index, item);
        Ok(())
    }

    /// Insert `item` at the front. Same contract as `insert(0, item)`, so
    /// it fails on an empty array.
    pub fn prepend(&mut self, item: T) -> Result<()> {
        self.insert(0, item)
    }

    /// Remove and return the last element.
    ///
    /// Afterwards, if at most a quarter of a store larger than 16 is in use,
    /// the store is halved. A failed shrink is logged and does not affect
    /// the returned value.
    ///
    /// # Errors
    ///
    /// [`ArrayError::EmptyContainer`] if the array is empty.
    pub fn pop(&mut self) -> Result<T> {
        let value = self.store.pop().ok_or(ArrayError::EmptyContainer)?;
        self.shrink_after_pop();
        Ok(value)
    }

    /// Remove and return the element at `index`, shifting later elements one
    /// slot left. Never shrinks the store.
    ///
    /// # Errors
    ///
    /// [`ArrayError::IndexOutOfBounds`] if `index >= size`.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.store.remove(index))
    }

    /// Delete every element equal to `item`, keeping the survivors in order.
    /// Returns how many elements were removed. Never shrinks the store.
    pub fn remove(&mut self, item: T) -> usize {
        let mut removed = 0;
        let mut index = 0;
        while index < self.store.len() {
            if self.store.as_slice()[index] == item {
                // Re-check the same index: the successor shifted into it.
                self.store.remove(index);
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Index of the first element equal to `item`, or `None`.
    pub fn find(&self, item: T) -> Option<usize> {
        self.store.as_slice().iter().position(|&value| value == item)
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    /// Iterate over the live elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.as_slice().iter()
    }

    /// Copy the array into a new backing store of the same capacity.
    ///
    /// # Errors
    ///
    /// [`ArrayError::AllocationFailed`] if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self>
    where
        A: Clone,
    {
        Ok(Self {
            store: self.store.try_clone()?,
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let size = self.store.len();
        if index >= size {
            return Err(ArrayError::IndexOutOfBounds { index, size });
        }
        Ok(())
    }

    /// Make room for one more element, doubling a full store.
    fn reserve_one(&mut self) -> Result<()> {
        let capacity = self.capacity();
        if !policy::needs_growth(self.size(), capacity) {
            return Ok(());
        }
        let new_capacity = policy::grown_capacity(capacity).ok_or(ArrayError::AllocationFailed {
            capacity: usize::MAX,
        })?;
        self.resize(new_capacity)
    }

    fn shrink_after_pop(&mut self) {
        let Some(target) = policy::shrink_target(self.size(), self.capacity()) else {
            return;
        };
        if let Err(err) = self.resize(target) {
            warn!(
                "shrink to {target} elements failed ({err}); keeping capacity {}",
                self.capacity()
            );
        }
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        let old_capacity = self.capacity();
        if new_capacity == old_capacity {
            return Ok(());
        }
        self.store.reallocate(new_capacity)?;
        debug!(
            "resized store from {old_capacity} to {new_capacity} elements (size {})",
            self.size()
        );
        Ok(())
    }
}

impl<T: Element, A: Allocator + Clone> Clone for DynamicArray<T, A> {
    /// Deep copy. Allocation failure is reported through
    /// [`std::alloc::handle_alloc_error`], as the standard collections do;
    /// use [`try_clone`](DynamicArray::try_clone) to handle it instead.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(_) => {
                let layout =
                    Layout::array::<T>(self.capacity()).unwrap_or_else(|_| Layout::new::<T>());
                std::alloc::handle_alloc_error(layout)
            }
        }
    }
}

impl<T: Element, A: Allocator> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element, A: Allocator, B: Allocator> PartialEq<DynamicArray<T, B>> for DynamicArray<T, A> {
    /// Equal when the live sequences are equal; capacity is ignored.
    fn eq(&self, other: &DynamicArray<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element + Eq, A: Allocator> Eq for DynamicArray<T, A> {}

impl<T: Element, A: Allocator> AsRef<[T]> for DynamicArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T: Element, A: Allocator> IntoIterator for &'a DynamicArray<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: i32) -> DynamicArray<i32> {
        let mut arr = DynamicArray::new().unwrap();
        for i in 0..n {
            arr.push(i).unwrap();
        }
        arr
    }

    #[test]
    fn new_array_is_empty_with_floor_capacity() {
        let arr: DynamicArray<i32> = DynamicArray::new().unwrap();
        assert_eq!(arr.size(), 0);
        assert_eq!(arr.capacity(), 16);
        assert!(arr.is_empty());
    }

    #[test]
    fn walkthrough_scenario() {
        let mut arr: DynamicArray<i32> = DynamicArray::new().unwrap();
        arr.push(10).unwrap();
        arr.push(20).unwrap();
        assert_eq!(arr.size(), 2);
        assert_eq!(arr.capacity(), 16);
        assert_eq!(arr.at(0), Ok(10));
        assert_eq!(arr.pop(), Ok(20));
        assert!(!arr.is_empty());
        arr.insert(0, 5).unwrap();
        assert_eq!(arr.at(0), Ok(5));
        arr.delete(0).unwrap();
        assert_eq!(arr.at(0), Ok(10));
        assert_eq!(arr.find(10), Some(0));
        arr.remove(10);
        assert!(arr.is_empty());
    }

    #[test]
    fn seventeenth_push_doubles_capacity() {
        let mut arr = filled(16);
        assert_eq!(arr.capacity(), 16);
        arr.push(16).unwrap();
        assert_eq!(arr.capacity(), 32);
        assert_eq!(arr.size(), 17);
        assert_eq!(arr.as_slice(), (0..17).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn popping_to_a_quarter_halves_capacity() {
        let mut arr = filled(17);
        assert_eq!(arr.capacity(), 32);
        while arr.size() > 9 {
            arr.pop().unwrap();
            assert_eq!(arr.capacity(), 32);
        }
        assert_eq!(arr.pop(), Ok(8));
        assert_eq!(arr.size(), 8);
        assert_eq!(arr.capacity(), 16);
        while !arr.is_empty() {
            arr.pop().unwrap();
            assert_eq!(arr.capacity(), 16);
        }
    }

    #[test]
    fn pop_on_empty_is_empty_container() {
        let mut arr: DynamicArray<u8> = DynamicArray::new().unwrap();
        assert_eq!(arr.pop(), Err(ArrayError::EmptyContainer));
        assert_eq!(arr.capacity(), 16);
    }

    #[test]
    fn index_equal_to_size_is_out_of_bounds() {
        for n in [0, 1, 5] {
            let mut arr = filled(n);
            let size = n as usize;
            let expected = Err(ArrayError::IndexOutOfBounds { index: size, size });
            assert_eq!(arr.at(size), expected.clone().map(|()| 0));
            assert_eq!(arr.insert(size, 99), expected.clone());
            assert_eq!(arr.delete(size), expected.map(|()| 0));
            assert_eq!(arr.size(), size);
        }
    }

    #[test]
    fn prepend_on_empty_fails() {
        let mut arr: DynamicArray<i64> = DynamicArray::new().unwrap();
        assert_eq!(
            arr.prepend(1),
            Err(ArrayError::IndexOutOfBounds { index: 0, size: 0 })
        );
        assert!(arr.is_empty());
    }

    #[test]
    fn prepend_puts_item_first() {
        let mut arr = filled(3);
        arr.prepend(-1).unwrap();
        assert_eq!(arr.as_slice(), &[-1, 0, 1, 2]);
    }

    #[test]
    fn insert_into_full_store_grows() {
        let mut arr = filled(16);
        arr.insert(8, 100).unwrap();
        assert_eq!(arr.capacity(), 32);
        assert_eq!(arr.at(8), Ok(100));
        assert_eq!(arr.at(9), Ok(8));
        assert_eq!(arr.size(), 17);
    }

    #[test]
    fn delete_never_shrinks() {
        let mut arr = filled(64);
        assert_eq!(arr.capacity(), 64);
        while !arr.is_empty() {
            arr.delete(0).unwrap();
        }
        assert_eq!(arr.capacity(), 64);
    }

    #[test]
    fn delete_returns_removed_element() {
        let mut arr = filled(4);
        assert_eq!(arr.delete(1), Ok(1));
        assert_eq!(arr.as_slice(), &[0, 2, 3]);
    }

    #[test]
    fn remove_drops_adjacent_matches() {
        let mut arr = DynamicArray::from_slice(&[7, 7, 1, 7, 2, 7, 7]).unwrap();
        assert_eq!(arr.remove(7), 5);
        assert_eq!(arr.as_slice(), &[1, 2]);
        assert_eq!(arr.remove(9), 0);
        assert_eq!(arr.as_slice(), &[1, 2]);
    }

    #[test]
    fn remove_never_shrinks() {
        let mut arr = DynamicArray::from_slice(&[3u16; 40]).unwrap();
        assert_eq!(arr.capacity(), 64);
        assert_eq!(arr.remove(3), 40);
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), 64);
    }

    #[test]
    fn find_returns_first_match() {
        let arr = DynamicArray::from_slice(&[4, 5, 4, 6]).unwrap();
        assert_eq!(arr.find(4), Some(0));
        assert_eq!(arr.find(6), Some(3));
        assert_eq!(arr.find(9), None);
    }

    #[test]
    fn find_ignores_stale_slots_past_size() {
        let mut arr = filled(3);
        arr.pop().unwrap();
        assert_eq!(arr.find(2), None);
    }

    #[test]
    fn float_nan_never_matches() {
        let mut arr = DynamicArray::from_slice(&[1.0f32, f32::NAN, 2.0]).unwrap();
        assert_eq!(arr.find(f32::NAN), None);
        assert_eq!(arr.remove(f32::NAN), 0);
        assert_eq!(arr.size(), 3);
    }

    #[test]
    fn with_capacity_rounds_to_power_of_two() {
        let arr: DynamicArray<u32> = DynamicArray::with_capacity(100).unwrap();
        assert_eq!(arr.capacity(), 128);
        let arr: DynamicArray<u32> = DynamicArray::with_capacity(3).unwrap();
        assert_eq!(arr.capacity(), 16);
    }

    #[test]
    fn with_capacity_overflow_is_allocation_failure() {
        let result: Result<DynamicArray<u32>> = DynamicArray::with_capacity(usize::MAX);
        assert_eq!(
            result.err(),
            Some(ArrayError::AllocationFailed { capacity: usize::MAX })
        );
    }

    #[test]
    fn large_initial_capacity_shrinks_toward_floor() {
        let mut arr: DynamicArray<i32> = DynamicArray::with_capacity(64).unwrap();
        arr.push(1).unwrap();
        arr.push(2).unwrap();
        arr.pop().unwrap();
        assert_eq!(arr.capacity(), 32);
        arr.pop().unwrap();
        assert_eq!(arr.capacity(), 16);
    }

    #[test]
    fn from_slice_copies_values() {
        let arr = DynamicArray::from_slice(&[1u8, 2, 3]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
        assert_eq!(arr.capacity(), 16);
        let big: Vec<u8> = (0..20).collect();
        let arr = DynamicArray::from_slice(&big).unwrap();
        assert_eq!(arr.capacity(), 32);
        assert_eq!(arr.as_slice(), big.as_slice());
    }

    #[test]
    fn clone_is_independent() {
        let original = filled(5);
        let mut copy = original.clone();
        copy.push(5).unwrap();
        copy.delete(0).unwrap();
        assert_eq!(original.as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(copy.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn equality_ignores_capacity() {
        let small = DynamicArray::from_slice(&[1, 2]).unwrap();
        let mut large: DynamicArray<i32> = DynamicArray::with_capacity(256).unwrap();
        large.push(1).unwrap();
        large.push(2).unwrap();
        assert_eq!(small, large);
        large.push(3).unwrap();
        assert_ne!(small, large);
    }

    #[test]
    fn debug_lists_live_elements() {
        let arr = DynamicArray::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(format!("{arr:?}"), "[1, 2, 3]");
    }

    #[test]
    fn iteration_covers_live_elements_only() {
        let mut arr = filled(4);
        arr.pop().unwrap();
        let sum: i32 = (&arr).into_iter().sum();
        assert_eq!(sum, 3);
        assert_eq!(arr.iter().count(), 3);
    }

    #[test]
    fn memory_bytes_tracks_capacity() {
        let arr: DynamicArray<f64> = DynamicArray::new().unwrap();
        assert_eq!(arr.memory_bytes(), 16 * 8);
    }

    #[test]
    fn array_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DynamicArray<f32>>();
    }
}
