//! Simulation report generation.

use super::progression_sim::RunStats;
use crate::items::{ItemCategory, Rarity, RarityTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub max_level: u32,

    // Progression
    pub avg_skill_levels_bought: f64,
    pub avg_skill_points_spent: f64,
    pub avg_unspent_points: f64,
    pub avg_final_rarity_bonus: f64,
    pub avg_final_double_chance: f64,
    /// Fraction of runs that unlocked anomaly drops
    pub anomaly_unlock_rate: f64,
    pub avg_anomaly_unlock_level: Option<f64>,

    // Loot
    pub total_drops: u64,
    pub avg_drops_per_run: f64,
    pub avg_drops_per_event: f64,
    /// Share of drops per rarity, Common first
    pub rarity_distribution: Vec<f64>,
    /// Base table weights, Common first, for comparison
    pub configured_rarity: Vec<f64>,
    pub category_distribution: Vec<f64>,
    pub prefix_rate: f64,
    pub avg_imbuements_per_item: f64,
    pub imbuement_frequency: BTreeMap<String, f64>,
    pub avg_weapon_damage: f64,
    pub avg_armor_defense: f64,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: &[RunStats], max_level: u32, base_rarity: &RarityTable) -> Self {
        let num_runs = runs.len() as u32;
        let per_run = |sum: f64| if runs.is_empty() { 0.0 } else { sum / runs.len() as f64 };

        let avg_skill_levels_bought = per_run(runs.iter().map(|r| r.skill_levels_bought as f64).sum());
        let avg_skill_points_spent = per_run(runs.iter().map(|r| r.skill_points_spent as f64).sum());
        let avg_unspent_points = per_run(runs.iter().map(|r| r.unspent_points as f64).sum());
        let avg_final_rarity_bonus = per_run(runs.iter().map(|r| r.final_effects.rarity_bonus).sum());
        let avg_final_double_chance = per_run(runs.iter().map(|r| r.final_effects.double_chance).sum());

        let unlock_levels: Vec<u32> = runs.iter().filter_map(|r| r.anomaly_unlock_level).collect();
        let anomaly_unlock_rate = per_run(unlock_levels.len() as f64);
        let avg_anomaly_unlock_level = if unlock_levels.is_empty() {
            None
        } else {
            Some(unlock_levels.iter().map(|l| *l as f64).sum::<f64>() / unlock_levels.len() as f64)
        };

        // Loot totals across all runs
        let total_drops: u64 = runs.iter().map(|r| r.loot_stats.total_drops).sum();
        let total_events: u64 = runs.iter().map(|r| r.loot_stats.drop_events).sum();
        let share = |count: u64| {
            if total_drops == 0 {
                0.0
            } else {
                count as f64 / total_drops as f64
            }
        };

        let rarity_distribution = Rarity::ALL
            .iter()
            .map(|rarity| share(runs.iter().map(|r| r.loot_stats.count(*rarity)).sum()))
            .collect();
        let configured_rarity = Rarity::ALL.iter().map(|r| base_rarity.weight(*r)).collect();
        let category_distribution = ItemCategory::ALL
            .iter()
            .map(|c| share(runs.iter().map(|r| r.loot_stats.category_count(*c)).sum()))
            .collect();

        let prefix_rate = share(runs.iter().map(|r| r.loot_stats.prefixed_drops).sum());
        let avg_imbuements_per_item = share(runs.iter().map(|r| r.loot_stats.total_imbuements).sum());

        let mut imbuement_frequency = BTreeMap::new();
        for run in runs {
            for (id, count) in &run.loot_stats.imbuement_counts {
                *imbuement_frequency.entry(id.clone()).or_insert(0.0) += *count as f64;
            }
        }
        for value in imbuement_frequency.values_mut() {
            *value = share(*value as u64);
        }

        let weapons: u64 = runs.iter().map(|r| r.loot_stats.category_count(ItemCategory::Weapon)).sum();
        let armors: u64 = runs.iter().map(|r| r.loot_stats.category_count(ItemCategory::Armor)).sum();
        let damage: u64 = runs.iter().map(|r| r.loot_stats.weapon_damage_sum).sum();
        let defense: u64 = runs.iter().map(|r| r.loot_stats.armor_defense_sum).sum();

        Self {
            num_runs,
            max_level,
            avg_skill_levels_bought,
            avg_skill_points_spent,
            avg_unspent_points,
            avg_final_rarity_bonus,
            avg_final_double_chance,
            anomaly_unlock_rate,
            avg_anomaly_unlock_level,
            total_drops,
            avg_drops_per_run: per_run(total_drops as f64),
            avg_drops_per_event: if total_events == 0 {
                0.0
            } else {
                total_drops as f64 / total_events as f64
            },
            rarity_distribution,
            configured_rarity,
            category_distribution,
            prefix_rate,
            avg_imbuements_per_item,
            imbuement_frequency,
            avg_weapon_damage: if weapons == 0 { 0.0 } else { damage as f64 / weapons as f64 },
            avg_armor_defense: if armors == 0 { 0.0 } else { defense as f64 / armors as f64 },
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, levels 1 to {}\n\n",
            self.num_runs, self.max_level
        ));

        report.push_str("── SKILLS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Levels Bought:   {:.1}\n",
            self.avg_skill_levels_bought
        ));
        report.push_str(&format!(
            "  Avg Points Spent:    {:.1} ({:.1} unspent)\n",
            self.avg_skill_points_spent, self.avg_unspent_points
        ));
        report.push_str(&format!(
            "  Avg Rarity Bonus:    {:.3}\n",
            self.avg_final_rarity_bonus
        ));
        report.push_str(&format!(
            "  Avg Double Chance:   {:.3}\n",
            self.avg_final_double_chance
        ));
        match self.avg_anomaly_unlock_level {
            Some(level) => report.push_str(&format!(
                "  Anomalies Unlocked:  {:.1}% of runs, avg level {:.1}\n\n",
                self.anomaly_unlock_rate * 100.0,
                level
            )),
            None => report.push_str("  Anomalies Unlocked:  never\n\n"),
        }

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Total Drops:         {} ({:.1} per run)\n",
            self.total_drops, self.avg_drops_per_run
        ));
        report.push_str(&format!(
            "  Drops per Event:     {:.3}\n",
            self.avg_drops_per_event
        ));
        report.push_str(&format!(
            "  Prefix Rate:         {:.1}%\n",
            self.prefix_rate * 100.0
        ));
        report.push_str(&format!(
            "  Imbuements / Item:   {:.2}\n",
            self.avg_imbuements_per_item
        ));
        report.push_str(&format!(
            "  Avg Weapon Damage:   {:.1}\n",
            self.avg_weapon_damage
        ));
        report.push_str(&format!(
            "  Avg Armor Defense:   {:.1}\n\n",
            self.avg_armor_defense
        ));

        report.push_str("── RARITY ───────────────────────────────────────────────────────\n");
        report.push_str("  Tier         Observed   Table\n");
        for (i, rarity) in Rarity::ALL.iter().enumerate() {
            let observed = self.rarity_distribution.get(i).copied().unwrap_or(0.0) * 100.0;
            let configured = self.configured_rarity.get(i).copied().unwrap_or(0.0) * 100.0;
            let bar: String = "█".repeat((observed / 5.0) as usize);
            report.push_str(&format!(
                "  {:<10} {:>7.2}%  {:>6.2}% {}\n",
                rarity.name(),
                observed,
                configured,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── CATEGORIES ───────────────────────────────────────────────────\n");
        for (i, category) in ItemCategory::ALL.iter().enumerate() {
            let pct = self.category_distribution.get(i).copied().unwrap_or(0.0) * 100.0;
            report.push_str(&format!("  {:<10} {:>6.1}%\n", category.name(), pct));
        }
        report.push('\n');

        if !self.imbuement_frequency.is_empty() {
            report.push_str("── IMBUEMENTS (per item) ────────────────────────────────────────\n");
            for (id, freq) in &self.imbuement_frequency {
                report.push_str(&format!("  {:<14} {:.4}\n", id, freq));
            }
            report.push('\n');
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
