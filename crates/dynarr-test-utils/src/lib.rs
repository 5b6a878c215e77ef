//! Test utilities for dynarr development.
//!
//! Provides instrumented [`Allocator`](dynarr::Allocator) implementations
//! ([`CountingAllocator`], [`FailingAllocator`]) and a `Vec`-backed
//! [`ReferenceModel`] that mirrors every `DynamicArray` contract, including
//! the expected capacity after each operation.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod allocators;
pub mod model;

pub use allocators::{AllocCounts, CountingAllocator, FailingAllocator};
pub use model::{apply_to_array, Op, Outcome, ReferenceModel};
