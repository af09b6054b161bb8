//! Core trait and error declarations shared by the `slotviz` workspace.
pub mod core;
pub use crate::core::*;
pub mod error;
pub use error::*;
