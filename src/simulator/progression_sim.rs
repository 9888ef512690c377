//! Level and skill-purchase simulation for a single run.

use super::config::SimConfig;
use super::loot_sim::{roll_drop_event, LootStats};
use crate::core::progress::PlayerProgress;
use crate::error::LootError;
use crate::items::LootTables;
use crate::skills::{EffectBundle, SkillGraph};
use rand::Rng;

/// Everything recorded for one simulated run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub final_level: u32,
    pub skill_levels_bought: u32,
    pub skill_points_spent: u64,
    pub unspent_points: u64,
    /// Player level at which anomalies started dropping
    pub anomaly_unlock_level: Option<u32>,
    pub final_effects: EffectBundle,
    pub loot_stats: LootStats,
}

/// Spend points one level per skill per pass, in prerequisite order, until
/// nothing else is affordable. Returns the number of levels bought.
pub fn buy_skills_greedy(progress: &mut PlayerProgress, graph: &SkillGraph) -> u32 {
    let order = graph.topological_order();
    let mut bought = 0;
    loop {
        let mut bought_this_pass = false;
        for skill in &order {
            if let Ok((next, _grant)) = progress.purchase_skill(graph, skill.id) {
                *progress = next;
                bought += 1;
                bought_this_pass = true;
            }
        }
        if !bought_this_pass {
            return bought;
        }
    }
}

/// Climb from level 1 to `config.max_level`, buying skills and rolling loot
/// at every level.
pub fn simulate_single_run<R: Rng>(
    config: &SimConfig,
    graph: &SkillGraph,
    tables: &LootTables,
    rng: &mut R,
) -> Result<RunStats, LootError> {
    let mut progress = PlayerProgress::new();
    let mut stats = RunStats::default();

    while progress.player_level < config.max_level {
        progress = progress.level_up();
        if config.buy_skills {
            stats.skill_levels_bought += buy_skills_greedy(&mut progress, graph);
        }

        let effects = progress.effects(graph);
        if effects.anomaly_drops && stats.anomaly_unlock_level.is_none() {
            stats.anomaly_unlock_level = Some(progress.player_level);
        }
        for _ in 0..config.drops_per_level {
            roll_drop_event(tables, &effects, progress.player_level, &mut stats.loot_stats, rng)?;
        }
    }

    stats.final_level = progress.player_level;
    stats.skill_points_spent = graph.points_spent(&progress.skills);
    stats.unspent_points = progress.skill_points;
    stats.final_effects = progress.effects(graph);
    Ok(stats)
}
