//! Instrumented allocators.
//!
//! - [`CountingAllocator`] — forwards to [`Global`] and counts every
//!   allocation and release, so tests can assert that blocks are paired.
//! - [`FailingAllocator`] — a counting allocator that refuses requests on
//!   demand, for exercising allocation-failure paths.
//!
//! Both use `Cell` counters and are meant to be shared by reference
//! (`DynamicArray::new_in(&alloc)`), which keeps them inspectable while an
//! array is alive.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use dynarr::{Allocator, Global};

/// Snapshot of an allocator's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocCounts {
    /// Successful allocations.
    pub allocations: usize,
    /// Releases.
    pub releases: usize,
    /// Requests that were refused.
    pub refusals: usize,
    /// Bytes currently allocated and not yet released.
    pub live_bytes: usize,
}

impl AllocCounts {
    /// Blocks allocated and not yet released.
    pub fn live_blocks(&self) -> usize {
        self.allocations - self.releases
    }
}

/// Forwards to the global allocator and counts traffic.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    allocations: Cell<usize>,
    releases: Cell<usize>,
    refusals: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter values.
    pub fn counts(&self) -> AllocCounts {
        AllocCounts {
            allocations: self.allocations.get(),
            releases: self.releases.get(),
            refusals: self.refusals.get(),
            live_bytes: self.live_bytes.get(),
        }
    }

    fn record_refusal(&self) {
        self.refusals.set(self.refusals.get() + 1);
    }
}

// SAFETY: every block comes from `Global`, which upholds the contract.
unsafe impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        match Global.allocate(layout) {
            Some(ptr) => {
                self.allocations.set(self.allocations.get() + 1);
                self.live_bytes.set(self.live_bytes.get() + layout.size());
                Some(ptr)
            }
            None => {
                self.record_refusal();
                None
            }
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.releases.set(self.releases.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        // SAFETY: forwarded caller contract; the block came from `Global`.
        unsafe { Global.release(ptr, layout) }
    }
}

/// A counting allocator that refuses allocations on demand.
///
/// Starts out allowing everything. [`refuse_after`](Self::refuse_after)
/// sets a budget of further successful allocations; once it is spent every
/// request is refused until [`allow_all`](Self::allow_all).
#[derive(Debug, Default)]
pub struct FailingAllocator {
    counter: CountingAllocator,
    /// Remaining successful allocations; `None` means unlimited.
    budget: Cell<Option<usize>>,
}

impl FailingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `n` more allocations, then refuse every request.
    pub fn refuse_after(&self, n: usize) {
        self.budget.set(Some(n));
    }

    /// Refuse every request from now on.
    pub fn refuse_all(&self) {
        self.refuse_after(0);
    }

    /// Lift any refusal budget.
    pub fn allow_all(&self) {
        self.budget.set(None);
    }

    /// Current counter values.
    pub fn counts(&self) -> AllocCounts {
        self.counter.counts()
    }
}

// SAFETY: successful allocations are delegated to `CountingAllocator`.
unsafe impl Allocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        match self.budget.get() {
            Some(0) => {
                self.counter.record_refusal();
                None
            }
            Some(n) => {
                self.budget.set(Some(n - 1));
                self.counter.allocate(layout)
            }
            None => self.counter.allocate(layout),
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { self.counter.release(ptr, layout) }
    }
}
