//! Sequencing of the timed visual phases of table operations.
//!
//! An operation moves through `Idle -> Highlighting -> Settling -> Idle` (searches skip
//! `Settling`). Inserts and deletes touch the table at the commit instant between
//! `Highlighting` and `Settling`. [`Sequencer`] is the state machine itself; [`Timeline`] and
//! [`Animator`] decide when its deferred steps fire.
mod machine;
pub use machine::*;
mod state;
pub use state::*;
mod timeline;
pub use timeline::*;
#[cfg(feature = "tokio")]
mod animator;
#[cfg(feature = "tokio")]
pub use animator::*;
