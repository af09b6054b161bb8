//! Simulation engine of an interactive hash-table visualizer.
//!
//! Keys are mapped to slots by a selectable [`hashing::HashMethod`], stored in a fixed-size
//! [`slots::SlotStore`] that overwrites on collision, and every operation is animated in timed
//! phases by the [`sequencer::Sequencer`].
pub mod config;
pub mod hashing;
pub mod sequencer;
pub mod slots;

pub use config::*;
pub use slotviz_core::{IndexStrategy, SlotVizError, SlotVizResult};
