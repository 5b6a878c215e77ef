//! Growth and shrink thresholds.
//!
//! Pure capacity arithmetic, kept apart from the store so the thresholds can
//! be tested without allocating. All functions assume `capacity` is a power
//! of two no smaller than [`ArrayConfig::MIN_CAPACITY`].

use crate::config::ArrayConfig;

/// Factor applied to the capacity when a full array grows.
pub const GROWTH_FACTOR: usize = 2;

/// A pop shrinks the store once `size <= capacity / SHRINK_THRESHOLD_DIVISOR`.
pub const SHRINK_THRESHOLD_DIVISOR: usize = 4;

/// Divisor applied to the capacity when the store shrinks.
pub const SHRINK_FACTOR: usize = 2;

/// Whether an array must grow before it can take one more element.
pub fn needs_growth(size: usize, capacity: usize) -> bool {
    size >= capacity
}

/// Capacity a full store grows to, or `None` if doubling overflows `usize`.
pub fn grown_capacity(capacity: usize) -> Option<usize> {
    capacity.checked_mul(GROWTH_FACTOR)
}

/// Capacity to shrink to after a pop left `size` elements, if any.
///
/// Shrinks only when `size <= capacity / 4` and `capacity` is above the
/// floor. The target never drops below [`ArrayConfig::MIN_CAPACITY`].
pub fn shrink_target(size: usize, capacity: usize) -> Option<usize> {
    if capacity <= ArrayConfig::MIN_CAPACITY {
        return None;
    }
    if size > capacity / SHRINK_THRESHOLD_DIVISOR {
        return None;
    }
    Some((capacity / SHRINK_FACTOR).max(ArrayConfig::MIN_CAPACITY))
}
