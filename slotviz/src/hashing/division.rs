//! Implementation of the division hashing method: `index = code mod capacity`.
//!
//! The simplest scheme from [Knuth, TAOCP vol. 3, 6.4]. Its spread depends entirely on the
//! capacity - capacities sharing factors with the alphabet tend to cluster.

use slotviz_core::IndexStrategy;
use std::num::NonZeroUsize;

/// Division (modulo) method.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Division;

impl IndexStrategy for Division {
    #[inline]
    fn compute(&self, code: u32, capacity: NonZeroUsize) -> usize {
        code as usize % capacity.get()
    }
}
