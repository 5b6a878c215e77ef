//! Array configuration parameters.

/// Configuration for constructing a [`DynamicArray`](crate::DynamicArray).
///
/// Only the starting capacity is configurable. The growth factor and the
/// shrink threshold are fixed (see [`policy`](crate::policy)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Requested initial capacity in elements.
    ///
    /// Default: 16. Rounded up to the next power of two and floored at
    /// [`MIN_CAPACITY`](Self::MIN_CAPACITY), so any value is accepted.
    pub initial_capacity: usize,
}

impl ArrayConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

    /// Capacity floor. No array is ever smaller than this.
    pub const MIN_CAPACITY: usize = 16;

    /// Create a config requesting the given initial capacity.
    pub fn new(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// The capacity an array built from this config starts with.
    ///
    /// The smallest power of two that is at least `initial_capacity` and at
    /// least [`MIN_CAPACITY`](Self::MIN_CAPACITY). Returns `None` when that
    /// power of two does not fit in `usize`.
    pub fn resolved_capacity(&self) -> Option<usize> {
        self.initial_capacity
            .max(Self::MIN_CAPACITY)
            .checked_next_power_of_two()
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
