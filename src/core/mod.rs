//! Balance constants and the host-owned player snapshot.

pub mod constants;
pub mod progress;

pub use constants::*;
pub use progress::*;
