//! Growable contiguous arrays of fixed-width numeric elements.
//!
//! [`DynamicArray`] owns a single backing store whose capacity is always a
//! power of two and never below [`ArrayConfig::MIN_CAPACITY`]. The store
//! doubles when a `push` or `insert` finds it full and halves when a `pop`
//! leaves it at most a quarter occupied.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T, A>          (bounds checks, resize decisions, logging)
//! ├── policy                  (growth / shrink threshold arithmetic)
//! └── RawStore<T, A>          (owned block: size + capacity, copy-on-resize)
//!     └── A: Allocator        (allocate / release; Global by default)
//! ```
//!
//! # Error model
//!
//! Every fallible operation returns [`ArrayError`]. Bounds violations and
//! empty pops leave the array untouched. A failed growth leaves the array
//! exactly as it was; a failed shrink is logged and ignored.
//!
//! ```
//! use dynarr::DynamicArray;
//!
//! let mut arr: DynamicArray<i32> = DynamicArray::new().unwrap();
//! arr.push(10).unwrap();
//! arr.push(20).unwrap();
//! assert_eq!(arr.size(), 2);
//! assert_eq!(arr.capacity(), 16);
//! assert_eq!(arr.pop().unwrap(), 20);
//! assert_eq!(arr.find(10), Some(0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod allocator;
pub mod array;
pub mod config;
pub mod element;
pub mod error;
pub mod policy;
mod raw;

// Public re-exports for the primary API surface.
pub use allocator::{Allocator, Global};
pub use array::DynamicArray;
pub use config::ArrayConfig;
pub use element::Element;
pub use error::ArrayError;

/// Result alias used by every fallible [`DynamicArray`] operation.
pub type Result<T> = std::result::Result<T, ArrayError>;
