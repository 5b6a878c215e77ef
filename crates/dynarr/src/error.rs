//! Array error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index was not below the current size.
    ///
    /// Raised by `at`, `insert`, `prepend` and `delete`. The array is
    /// unchanged.
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// The array size at the time of the call.
        size: usize,
    },
    /// `pop` was called on an empty array. The array is unchanged.
    EmptyContainer,
    /// A backing store for `capacity` elements could not be obtained,
    /// either because the allocator refused or because the byte size
    /// overflowed. Growth failures leave the array as it was.
    AllocationFailed {
        /// Number of elements the failed store would have held.
        capacity: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "index {index} out of bounds for size {size}")
            }
            Self::EmptyContainer => write!(f, "array is empty"),
            Self::AllocationFailed { capacity } => {
                write!(f, "allocation failed for capacity of {capacity} elements")
            }
        }
    }
}

impl Error for ArrayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_index_and_size() {
        let err = ArrayError::IndexOutOfBounds { index: 3, size: 2 };
        assert_eq!(err.to_string(), "index 3 out of bounds for size 2");
    }

    #[test]
    fn display_allocation_failure() {
        let err = ArrayError::AllocationFailed { capacity: 32 };
        assert_eq!(
            err.to_string(),
            "allocation failed for capacity of 32 elements"
        );
    }
}
