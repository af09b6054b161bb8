//! Implementation of the multiplication hashing method from [Knuth, TAOCP vol. 3, 6.4]:
//! `index = floor(capacity * frac(code * A))` with `A` the fractional part of the golden
//! ratio.
//!
//! Unlike division, the spread does not depend on the choice of capacity.

use slotviz_core::IndexStrategy;
use std::num::NonZeroUsize;

/// Fractional part of the golden ratio, `(sqrt(5) - 1) / 2`, at the precision the visualizer
/// has always used.
pub const GOLDEN_RATIO_FRACTION: f64 = 0.6180339887;

/// Multiplication (golden ratio) method.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Multiplication;

impl IndexStrategy for Multiplication {
    #[inline]
    fn compute(&self, code: u32, capacity: NonZeroUsize) -> usize {
        let fraction = (f64::from(code) * GOLDEN_RATIO_FRACTION).fract();
        let index = (capacity.get() as f64 * fraction).floor() as usize;
        // Rounding in the product may reach `capacity` for very large tables.
        index.min(capacity.get() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplication_reference_values() {
        let capacity = NonZeroUsize::new(10).unwrap();
        assert_eq!(Multiplication.compute(0, capacity), 0);
        assert_eq!(Multiplication.compute(1, capacity), 6);
        assert_eq!(Multiplication.compute(97, capacity), 9);
        assert_eq!(Multiplication.compute(93_029_210, capacity), 7);
        assert_eq!(Multiplication.compute(1_396_355_227, capacity), 5);
    }

    #[test]
    fn test_multiplication_stays_in_range_for_huge_tables() {
        let capacity = NonZeroUsize::new(usize::MAX).unwrap();
        for code in [0, 1, 97, 0x7FFF_FFFF, 0x8000_0000, u32::MAX] {
            assert!(Multiplication.compute(code, capacity) < capacity.get());
        }
    }
}
