//! Skill definitions: trees, cost curves, per-level effects, purchased levels.

use super::effects::EffectBundle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill identifier. Skills are static data, so ids are static strings.
pub type SkillId = &'static str;

/// The tree a skill is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTree {
    Fortune,
    Productivity,
    Combat,
    Research,
}

impl SkillTree {
    pub const ALL: [SkillTree; 4] = [
        SkillTree::Fortune,
        SkillTree::Productivity,
        SkillTree::Combat,
        SkillTree::Research,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillTree::Fortune => "Fortune",
            SkillTree::Productivity => "Productivity",
            SkillTree::Combat => "Combat",
            SkillTree::Research => "Research",
        }
    }
}

/// Numeric coefficients of the effect bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coefficient {
    RarityBonus,
    DoubleChance,
    MultiSpawnChance,
    PpMultiplier,
    EnergyEfficiency,
    EnergyCapacity,
    EnergyRegen,
    DamageBonus,
    DefenseBonus,
    CritChance,
    CritMultiplier,
    CooldownReduction,
    XpMultiplier,
    MaterialYield,
    PrefixChance,
    ImbuementPower,
    OfflineEfficiency,
    PrintSpeed,
    ColleagueAffinity,
}

/// Boolean capabilities of the effect bundle. Once granted they stay granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    AutoCollect,
    AutoSalvage,
    AnomalyDrops,
    OvertimeMode,
}

/// Skill point cost of buying a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostCurve {
    /// Same cost for every level.
    Flat(u64),
    /// `base + step * (level - 1)`
    Linear { base: u64, step: u64 },
    /// `round(base * growth^(level - 1))`
    Geometric { base: u64, growth: f64 },
    /// Explicit cost per level; levels past the table reuse the last entry.
    Table(&'static [u64]),
}

impl CostCurve {
    /// Cost of buying `level` (1-based). Level 0 is free.
    pub fn cost(&self, level: u32) -> u64 {
        if level == 0 {
            return 0;
        }
        let steps = level - 1;
        match *self {
            CostCurve::Flat(cost) => cost,
            CostCurve::Linear { base, step } => base.saturating_add(step.saturating_mul(steps as u64)),
            CostCurve::Geometric { base, growth } => {
                (base as f64 * growth.powi(steps as i32)).round() as u64
            }
            CostCurve::Table(costs) => {
                let idx = (steps as usize).min(costs.len().saturating_sub(1));
                costs.get(idx).copied().unwrap_or(0)
            }
        }
    }
}

/// What one skill contributes at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    /// `amount * level` added to the coefficient.
    PerLevel(Coefficient, f64),
    /// Value looked up per level (index 0 = level 1); past the table the last value holds.
    Stepped(Coefficient, &'static [f64]),
    /// Capability granted at level 1 and above.
    Unlock(Capability),
}

impl SkillEffect {
    fn apply(&self, level: u32, bundle: &mut EffectBundle) {
        if level == 0 {
            return;
        }
        match *self {
            SkillEffect::PerLevel(coefficient, amount) => {
                bundle.add(coefficient, amount * level as f64);
            }
            SkillEffect::Stepped(coefficient, values) => {
                let idx = (level as usize - 1).min(values.len().saturating_sub(1));
                if let Some(value) = values.get(idx) {
                    bundle.add(coefficient, *value);
                }
            }
            SkillEffect::Unlock(capability) => bundle.grant(capability),
        }
    }
}

/// A purchasable skill.
#[derive(Debug, Clone)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub tree: SkillTree,
    pub tier: u8,
    pub max_level: u32,
    pub min_player_level: u32,
    /// Skills that must be at level 1 or higher before this one can be bought.
    pub prerequisites: &'static [SkillId],
    pub cost: CostCurve,
    pub effects: &'static [SkillEffect],
}

impl Skill {
    /// Points needed to buy `level`.
    pub fn per_level_cost(&self, level: u32) -> u64 {
        self.cost.cost(level)
    }

    /// Full effect of owning this skill at `level` (not the increment over `level - 1`).
    pub fn per_level_effect(&self, level: u32) -> EffectBundle {
        let mut bundle = EffectBundle::default();
        let level = level.min(self.max_level);
        for effect in self.effects {
            effect.apply(level, &mut bundle);
        }
        bundle
    }

    /// Points needed to go from level 0 to `level`.
    pub fn total_cost_to(&self, level: u32) -> u64 {
        (1..=level.min(self.max_level))
            .map(|l| self.per_level_cost(l))
            .sum()
    }
}

/// Purchased skill levels, owned by the player's save state.
///
/// Absent skills are level 0. Updates return a new value instead of
/// mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillLevels(BTreeMap<String, u32>);

impl SkillLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a skill (0 if never bought).
    pub fn level(&self, skill_id: &str) -> u32 {
        self.0.get(skill_id).copied().unwrap_or(0)
    }

    /// A copy of these levels with one skill set to `level`.
    pub fn with_level(&self, skill_id: &str, level: u32) -> Self {
        let mut levels = self.0.clone();
        if level == 0 {
            levels.remove(skill_id);
        } else {
            levels.insert(skill_id.to_string(), level);
        }
        Self(levels)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, level)| (id.as_str(), *level))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SkillLevels {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, level)| (id.into(), level)).collect())
    }
}
