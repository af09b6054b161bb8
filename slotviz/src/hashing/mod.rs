//! Turning string keys into slot indices.
//!
//! A key is first folded into a 32-bit code by [`string_code`], then an [`IndexStrategy`]
//! (one of the [`HashMethod`] variants) spreads the code across the table.
pub mod common;
pub use common::*;
mod division;
pub use division::*;
mod multiplication;
pub use multiplication::*;
mod method;
pub use method::*;

use slotviz_core::{IndexStrategy, SlotVizError, SlotVizResult};
use std::num::NonZeroUsize;

/// Compute the slot index of `key` in a table with `capacity` slots.
///
/// # Errors
///
/// - [`SlotVizError::InvalidCapacity`] if `capacity` is zero.
pub fn index_for<S: IndexStrategy>(key: &str, capacity: usize, method: &S) -> SlotVizResult<usize> {
    let capacity = NonZeroUsize::new(capacity).ok_or(SlotVizError::InvalidCapacity)?;
    Ok(locate(key, capacity, method))
}

/// Infallible core of [`index_for`] for callers that already hold a non-zero capacity.
pub(crate) fn locate<S: IndexStrategy>(key: &str, capacity: NonZeroUsize, method: &S) -> usize {
    let code = string_code(key);
    let index = method.compute(code, capacity);
    tracing::trace!(key, code, index, %capacity, "computed slot index");
    index
}
