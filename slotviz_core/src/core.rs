//! Core trait and type declarations for the whole project.
use std::num::NonZeroUsize;

/// Strategy mapping a numeric key code onto a slot index.
///
/// Differs from [`std::hash::Hasher`] in the way that it never sees the key itself: the key is
/// folded into a code once and every strategy only decides how that code is spread across the
/// table. This keeps strategies interchangeable at runtime without re-hashing the key.
pub trait IndexStrategy {
    /// Map `code` onto an index.
    ///
    /// # Guarantees
    ///
    /// - The result is always in `[0, capacity)`.
    fn compute(&self, code: u32, capacity: NonZeroUsize) -> usize;
}

impl<S: IndexStrategy + ?Sized> IndexStrategy for &S {
    fn compute(&self, code: u32, capacity: NonZeroUsize) -> usize {
        (**self).compute(code, capacity)
    }
}
