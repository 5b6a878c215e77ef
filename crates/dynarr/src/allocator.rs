//! The memory allocator consumed by the backing store.
//!
//! An [`Allocator`] hands out raw blocks and takes them back. It is the only
//! external collaborator of a [`DynamicArray`](crate::DynamicArray): the
//! store asks for one block per capacity and releases each block exactly
//! once. [`Global`] forwards to the process-wide allocator.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

/// A source of raw memory blocks.
///
/// Allocation failure is reported as `None`, never by panicking or
/// aborting, so callers can keep their previous state intact.
///
/// # Safety
///
/// A block returned by [`allocate`](Self::allocate) must be valid for reads
/// and writes of `layout.size()` bytes, aligned to `layout.align()`, and must
/// not overlap any other live block. It must stay valid until it is passed
/// to [`release`](Self::release). Blocks need not be zeroed.
pub unsafe trait Allocator {
    /// Allocate a block fitting `layout`, or `None` if memory cannot be
    /// obtained.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Return a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator with
    /// the same `layout`, and must not have been released already.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global allocator registered with the standard library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

// SAFETY: blocks come straight from `std::alloc::alloc`, which upholds the
// trait contract for non-zero-sized layouts. Zero-sized requests are refused.
unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr came from `allocate` with this layout.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

// SAFETY: forwards both operations to the referenced allocator.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).release(ptr, layout) }
    }
}
