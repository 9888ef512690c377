//! Skill system: the prerequisite graph, effect aggregation and purchases.
//!
//! Skill levels are owned by the player's progress snapshot. Everything in
//! here reads a snapshot and returns new values; nothing mutates in place.

pub mod catalog;
pub mod effects;
pub mod graph;
pub mod purchase;
pub mod types;

pub use effects::*;
pub use graph::*;
pub use purchase::*;
pub use types::*;
