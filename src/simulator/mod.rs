//! Balance simulator for Monte Carlo analysis.
//!
//! Run thousands of simulated level climbs to analyze:
//! - Observed rarity distribution against the configured table
//! - How quickly skill purchases shift drop rates
//! - Prefix, imbuement and drop-count rates
//!
//! The simulator drives the same purchase validator and loot pipeline the
//! host uses, so results match real gameplay behavior.

mod config;
mod loot_sim;
mod progression_sim;
mod report;
mod runner;

pub use config::SimConfig;
pub use loot_sim::LootStats;
pub use progression_sim::{buy_skills_greedy, RunStats};
pub use report::SimReport;
pub use runner::run_simulation;
