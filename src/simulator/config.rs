//! Simulation configuration.

use std::path::PathBuf;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Player level each run climbs to, starting from 1
    pub max_level: u32,

    /// Drop events rolled at every level
    pub drops_per_level: u32,

    /// Whether to spend skill points (off = baseline drop rates)
    pub buy_skills: bool,

    /// RON loot tables to use instead of the built-in ones
    pub tables_path: Option<PathBuf>,

    /// Log verbosity (below 2 = final report only, 2 or more = also log every run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_level: 30,
            drops_per_level: 10,
            buy_skills: true,
            tables_path: None,
            verbosity: 0,
        }
    }
}

impl SimConfig {
    /// Quick config for a smoke check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            max_level: 15,
            ..Default::default()
        }
    }

    /// Many drops per level for tight rarity estimates
    pub fn loot_analysis() -> Self {
        Self {
            drops_per_level: 50,
            ..Default::default()
        }
    }
}
