//! The element trait for storable numeric types.

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric type that a [`DynamicArray`](crate::DynamicArray)
/// can store.
///
/// Implemented for every primitive integer and float. Elements are moved
/// with plain memory copies, are never zero-sized and carry no drop glue.
/// Equality is the type's `PartialEq`, so a float `NaN` never matches.
///
/// This trait is sealed.
pub trait Element: Copy + PartialEq + Debug + sealed::Sealed + 'static {}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Element for $ty {}
        )*
    };
}

impl_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_element<T: Element>() {
        assert_ne!(std::mem::size_of::<T>(), 0);
        assert!(!std::mem::needs_drop::<T>());
    }

    #[test]
    fn all_primitives_are_sized_and_trivially_dropped() {
        assert_element::<i8>();
        assert_element::<i32>();
        assert_element::<u64>();
        assert_element::<u128>();
        assert_element::<usize>();
        assert_element::<f32>();
        assert_element::<f64>();
    }
}
