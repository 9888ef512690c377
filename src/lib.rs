//! Windfall - progression economy for an incremental game.
//!
//! Two pipelines share one data contract, the [`EffectBundle`]:
//!
//! - skills: the prerequisite graph, effect aggregation and purchase validation
//! - items: rarity, prefix and imbuement draws feeding the stat composer
//!
//! Everything here is a synchronous function over a snapshot. The host owns
//! persistence and rendering; [`ProgressStore`] is the swap-on-write
//! holder for hosts that share state across threads.

pub mod core;
pub mod error;
pub mod items;
pub mod simulator;
pub mod skills;
pub mod utils;

pub use crate::core::{PlayerProgress, ProgressStore};
pub use error::{LootError, PurchaseRejection, SkillGraphError, TablesError};
pub use items::{roll_item, GeneratedItem, LootRequest, LootTables};
pub use skills::{aggregate_effects, validate_purchase, EffectBundle, SkillGraph, SkillLevels};
