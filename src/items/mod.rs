//! Item system: roll tables, the three weighted draws, and stat composition.

pub mod catalog;
pub mod composer;
pub mod generation;
pub mod imbuement;
pub mod prefix;
pub mod rarity;
pub mod tables;
pub mod types;

pub use composer::*;
pub use generation::*;
pub use imbuement::*;
pub use prefix::*;
pub use rarity::*;
pub use tables::*;
pub use types::*;
