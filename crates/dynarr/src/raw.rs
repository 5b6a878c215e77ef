//! Low-level primitives for the backing store.
//!
//! [`RawStore`] owns exactly one allocator block and tracks how many leading
//! slots hold live elements. It knows nothing about growth thresholds or
//! bounds contracts; [`DynamicArray`](crate::DynamicArray) makes those
//! decisions and calls in here. Every `unsafe` operation in the crate's
//! container path lives in this module, each with a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::mem;
use std::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::element::Element;
use crate::error::ArrayError;

/// An owned block of `capacity` slots whose first `len` slots are live.
///
/// Slots in `[len, capacity)` are uninitialised and never read.
pub(crate) struct RawStore<T: Element, A: Allocator> {
    ptr: NonNull<T>,
    capacity: usize,
    len: usize,
    alloc: A,
}

// SAFETY: the store exclusively owns its block and `T` is a plain numeric
// value, so moving the store to another thread moves sole ownership.
unsafe impl<T: Element, A: Allocator + Send> Send for RawStore<T, A> {}
// SAFETY: shared access only ever reads live slots; all mutation needs
// `&mut self`.
unsafe impl<T: Element, A: Allocator + Sync> Sync for RawStore<T, A> {}

impl<T: Element, A: Allocator> RawStore<T, A> {
    /// Allocate an empty store with room for `capacity` elements.
    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, ArrayError> {
        let ptr = Self::allocate_block(&alloc, capacity)?;
        Ok(Self {
            ptr,
            capacity,
            len: 0,
            alloc,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The live elements.
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid for `capacity >= len` slots and the first
        // `len` are initialised.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The live elements, mutably.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Append `value` into spare capacity.
    ///
    /// # Panics
    ///
    /// Panics if the store is full. Callers grow first.
    pub(crate) fn push_within_capacity(&mut self, value: T) {
        assert!(self.len < self.capacity, "push into a full store");
        // SAFETY: len < capacity, so the slot lies inside the block.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Append every element of `values` into spare capacity.
    ///
    /// # Panics
    ///
    /// Panics if the values do not fit.
    pub(crate) fn extend_within_capacity(&mut self, values: &[T]) {
        assert!(
            values.len() <= self.capacity - self.len,
            "extend past store capacity"
        );
        // SAFETY: the destination range `[len, len + values.len())` lies
        // inside the block, and a borrowed slice cannot overlap memory we
        // exclusively own.
        unsafe {
            ptr::copy_nonoverlapping(
                values.as_ptr(),
                self.ptr.as_ptr().add(self.len),
                values.len(),
            )
        };
        self.len += values.len();
    }

    /// Insert `value` at `index`, shifting `[index, len)` right by one.
    ///
    /// # Panics
    ///
    /// Panics if the store is full or `index > len`.
    pub(crate) fn insert_within_capacity(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "insert index past store length");
        self.push_within_capacity(value);
        let slice = self.as_mut_slice();
        let last = slice.len() - 1;
        slice.copy_within(index..last, index + 1);
        slice[index] = value;
    }

    /// Remove and return the element at `index`, shifting `(index, len)`
    /// left by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let slice = self.as_mut_slice();
        let value = slice[index];
        slice.copy_within(index + 1.., index);
        self.len -= 1;
        value
    }

    /// Remove and return the last element.
    pub(crate) fn pop(&mut self) -> Option<T> {
        let value = *self.as_slice().last()?;
        self.len -= 1;
        Some(value)
    }

    /// Move the live elements into a fresh block of `new_capacity` slots
    /// and release the old block.
    ///
    /// A request for the current capacity is a no-op. If the new block
    /// cannot be allocated the store is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity < len`.
    pub(crate) fn reallocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity == self.capacity {
            return Ok(());
        }
        assert!(new_capacity >= self.len, "reallocate below store length");

        let new_ptr = Self::allocate_block(&self.alloc, new_capacity)?;
        // SAFETY: both blocks hold at least `len` slots, the first `len` of
        // the old block are initialised, and the new block is a distinct
        // live allocation.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len) };

        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_capacity = mem::replace(&mut self.capacity, new_capacity);
        // SAFETY: the old block came from `allocate_block(old_capacity)` and
        // nothing refers to it any more.
        unsafe { Self::release_block(&self.alloc, old_ptr, old_capacity) };
        Ok(())
    }

    /// Copy the store into a fresh block of the same capacity.
    pub(crate) fn try_clone(&self) -> Result<Self, ArrayError>
    where
        A: Clone,
    {
        let mut copy = Self::with_capacity_in(self.capacity, self.alloc.clone())?;
        copy.extend_within_capacity(self.as_slice());
        Ok(copy)
    }

    fn layout(capacity: usize) -> Option<Layout> {
        Layout::array::<T>(capacity).ok()
    }

    fn allocate_block(alloc: &A, capacity: usize) -> Result<NonNull<T>, ArrayError> {
        let err = ArrayError::AllocationFailed { capacity };
        let layout = Self::layout(capacity).ok_or_else(|| err.clone())?;
        alloc
            .allocate(layout)
            .map(NonNull::cast::<T>)
            .ok_or(err)
    }

    /// # Safety
    ///
    /// `ptr` must have come from `allocate_block(alloc, capacity)` and must
    /// not be used afterwards.
    unsafe fn release_block(alloc: &A, ptr: NonNull<T>, capacity: usize) {
        // The layout was computed successfully when the block was allocated.
        if let Some(layout) = Self::layout(capacity) {
            // SAFETY: forwarded caller contract.
            unsafe { alloc.release(ptr.cast::<u8>(), layout) };
        }
    }
}

impl<T: Element, A: Allocator> Drop for RawStore<T, A> {
    fn drop(&mut self) {
        // SAFETY: `self.ptr` is the store's current block, allocated with
        // `self.capacity`, and the store is going away.
        unsafe { Self::release_block(&self.alloc, self.ptr, self.capacity) };
    }
}
