//! Shared helpers used by the roll tables.

pub mod weighted;

pub use weighted::*;
