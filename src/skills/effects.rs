//! The effect bundle and the aggregator that folds purchased skills into it.

use super::graph::SkillGraph;
use super::types::{Capability, Coefficient, SkillLevels};
use serde::{Deserialize, Serialize};

/// Flattened sum of every owned skill's effects.
///
/// Numeric fields default to `0.0`, capabilities to `false`. Built fresh from
/// [`SkillLevels`] on every request; a purchase invalidates any previous bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBundle {
    pub rarity_bonus: f64,
    pub double_chance: f64,
    pub multi_spawn_chance: f64,
    pub pp_multiplier: f64,
    pub energy_efficiency: f64,
    pub energy_capacity: f64,
    pub energy_regen: f64,
    pub damage_bonus: f64,
    pub defense_bonus: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub cooldown_reduction: f64,
    pub xp_multiplier: f64,
    pub material_yield: f64,
    pub prefix_chance: f64,
    pub imbuement_power: f64,
    pub offline_efficiency: f64,
    pub print_speed: f64,
    pub colleague_affinity: f64,
    pub auto_collect: bool,
    pub auto_salvage: bool,
    pub anomaly_drops: bool,
    pub overtime_mode: bool,
}

impl EffectBundle {
    fn slot_mut(&mut self, coefficient: Coefficient) -> &mut f64 {
        match coefficient {
            Coefficient::RarityBonus => &mut self.rarity_bonus,
            Coefficient::DoubleChance => &mut self.double_chance,
            Coefficient::MultiSpawnChance => &mut self.multi_spawn_chance,
            Coefficient::PpMultiplier => &mut self.pp_multiplier,
            Coefficient::EnergyEfficiency => &mut self.energy_efficiency,
            Coefficient::EnergyCapacity => &mut self.energy_capacity,
            Coefficient::EnergyRegen => &mut self.energy_regen,
            Coefficient::DamageBonus => &mut self.damage_bonus,
            Coefficient::DefenseBonus => &mut self.defense_bonus,
            Coefficient::CritChance => &mut self.crit_chance,
            Coefficient::CritMultiplier => &mut self.crit_multiplier,
            Coefficient::CooldownReduction => &mut self.cooldown_reduction,
            Coefficient::XpMultiplier => &mut self.xp_multiplier,
            Coefficient::MaterialYield => &mut self.material_yield,
            Coefficient::PrefixChance => &mut self.prefix_chance,
            Coefficient::ImbuementPower => &mut self.imbuement_power,
            Coefficient::OfflineEfficiency => &mut self.offline_efficiency,
            Coefficient::PrintSpeed => &mut self.print_speed,
            Coefficient::ColleagueAffinity => &mut self.colleague_affinity,
        }
    }

    fn flag_mut(&mut self, capability: Capability) -> &mut bool {
        match capability {
            Capability::AutoCollect => &mut self.auto_collect,
            Capability::AutoSalvage => &mut self.auto_salvage,
            Capability::AnomalyDrops => &mut self.anomaly_drops,
            Capability::OvertimeMode => &mut self.overtime_mode,
        }
    }

    pub fn add(&mut self, coefficient: Coefficient, amount: f64) {
        *self.slot_mut(coefficient) += amount;
    }

    pub fn grant(&mut self, capability: Capability) {
        *self.flag_mut(capability) = true;
    }

    pub fn get(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::RarityBonus => self.rarity_bonus,
            Coefficient::DoubleChance => self.double_chance,
            Coefficient::MultiSpawnChance => self.multi_spawn_chance,
            Coefficient::PpMultiplier => self.pp_multiplier,
            Coefficient::EnergyEfficiency => self.energy_efficiency,
            Coefficient::EnergyCapacity => self.energy_capacity,
            Coefficient::EnergyRegen => self.energy_regen,
            Coefficient::DamageBonus => self.damage_bonus,
            Coefficient::DefenseBonus => self.defense_bonus,
            Coefficient::CritChance => self.crit_chance,
            Coefficient::CritMultiplier => self.crit_multiplier,
            Coefficient::CooldownReduction => self.cooldown_reduction,
            Coefficient::XpMultiplier => self.xp_multiplier,
            Coefficient::MaterialYield => self.material_yield,
            Coefficient::PrefixChance => self.prefix_chance,
            Coefficient::ImbuementPower => self.imbuement_power,
            Coefficient::OfflineEfficiency => self.offline_efficiency,
            Coefficient::PrintSpeed => self.print_speed,
            Coefficient::ColleagueAffinity => self.colleague_affinity,
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::AutoCollect => self.auto_collect,
            Capability::AutoSalvage => self.auto_salvage,
            Capability::AnomalyDrops => self.anomaly_drops,
            Capability::OvertimeMode => self.overtime_mode,
        }
    }

    /// Fold another bundle in: numbers add, capabilities OR.
    pub fn merge(&mut self, other: &EffectBundle) {
        // Destructured without `..` so a new field cannot be forgotten here.
        let EffectBundle {
            rarity_bonus,
            double_chance,
            multi_spawn_chance,
            pp_multiplier,
            energy_efficiency,
            energy_capacity,
            energy_regen,
            damage_bonus,
            defense_bonus,
            crit_chance,
            crit_multiplier,
            cooldown_reduction,
            xp_multiplier,
            material_yield,
            prefix_chance,
            imbuement_power,
            offline_efficiency,
            print_speed,
            colleague_affinity,
            auto_collect,
            auto_salvage,
            anomaly_drops,
            overtime_mode,
        } = other;

        self.rarity_bonus += rarity_bonus;
        self.double_chance += double_chance;
        self.multi_spawn_chance += multi_spawn_chance;
        self.pp_multiplier += pp_multiplier;
        self.energy_efficiency += energy_efficiency;
        self.energy_capacity += energy_capacity;
        self.energy_regen += energy_regen;
        self.damage_bonus += damage_bonus;
        self.defense_bonus += defense_bonus;
        self.crit_chance += crit_chance;
        self.crit_multiplier += crit_multiplier;
        self.cooldown_reduction += cooldown_reduction;
        self.xp_multiplier += xp_multiplier;
        self.material_yield += material_yield;
        self.prefix_chance += prefix_chance;
        self.imbuement_power += imbuement_power;
        self.offline_efficiency += offline_efficiency;
        self.print_speed += print_speed;
        self.colleague_affinity += colleague_affinity;
        self.auto_collect |= auto_collect;
        self.auto_salvage |= auto_salvage;
        self.anomaly_drops |= anomaly_drops;
        self.overtime_mode |= overtime_mode;
    }

    /// Numeric fields in declaration order, for reports and property checks.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 19] {
        [
            ("rarity_bonus", self.rarity_bonus),
            ("double_chance", self.double_chance),
            ("multi_spawn_chance", self.multi_spawn_chance),
            ("pp_multiplier", self.pp_multiplier),
            ("energy_efficiency", self.energy_efficiency),
            ("energy_capacity", self.energy_capacity),
            ("energy_regen", self.energy_regen),
            ("damage_bonus", self.damage_bonus),
            ("defense_bonus", self.defense_bonus),
            ("crit_chance", self.crit_chance),
            ("crit_multiplier", self.crit_multiplier),
            ("cooldown_reduction", self.cooldown_reduction),
            ("xp_multiplier", self.xp_multiplier),
            ("material_yield", self.material_yield),
            ("prefix_chance", self.prefix_chance),
            ("imbuement_power", self.imbuement_power),
            ("offline_efficiency", self.offline_efficiency),
            ("print_speed", self.print_speed),
            ("colleague_affinity", self.colleague_affinity),
        ]
    }
}

/// Fold purchased skill levels into one effect bundle.
///
/// Skills are visited in graph order so the float sums come out identical on
/// every call. Ids the graph does not know are ignored, and levels above a
/// skill's max are treated as max.
pub fn aggregate_effects(graph: &SkillGraph, levels: &SkillLevels) -> EffectBundle {
    for (id, level) in levels.iter() {
        match graph.get(id) {
            None => log::warn!("Ignoring unknown skill '{}' at level {}", id, level),
            Some(skill) if level > skill.max_level => log::warn!(
                "Skill '{}' at level {} exceeds max {}, clamping",
                id,
                level,
                skill.max_level
            ),
            Some(_) => {}
        }
    }

    let mut bundle = EffectBundle::default();
    for skill in graph.skills() {
        let level = levels.level(skill.id);
        if level == 0 {
            continue;
        }
        bundle.merge(&skill.per_level_effect(level));
    }
    bundle
}
