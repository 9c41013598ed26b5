//! # Dialogue State
//!
//! The running state of a dialogue game: who is playing and in which roles,
//! whose turn it is, what the commitment stores hold, and which moves have been
//! made so far. This crate holds data only and contains no protocol logic.
//!
//! Requirement evaluation reads dialogues through the [`DialogueView`] trait so
//! that hosts with their own runtime can plug in without copying state.

pub mod dialogue;
pub mod players;
pub mod stores;

pub use dialogue::*;
pub use players::*;
pub use stores::*;
