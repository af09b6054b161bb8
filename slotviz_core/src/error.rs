//! Error definitions.
use thiserror::Error;

/// Project-wise error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotVizError {
    /// A table (or an index computation) was configured with zero slots.
    #[error("Table capacity must be greater than 0.")]
    InvalidCapacity,

    /// A slot was addressed outside of `[0, capacity)`.
    #[error("Slot index {index} is out of range for a table of capacity {capacity}.")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// A hash method selector did not name any known method.
    #[error("Unknown hash method {0:?}, expected \"division\" or \"multiplication\".")]
    UnknownHashMethod(String),
}

/// Shorthand for results carrying [`SlotVizError`].
pub type SlotVizResult<T> = Result<T, SlotVizError>;
