use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Rarity {
    /// Common to Mythic.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    /// Multiplier applied to scaled damage and defense.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
            Rarity::Mythic => 4.0,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Anomaly,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Anomaly];

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Anomaly => "Anomaly",
        }
    }
}

/// Where a piece of armor is worn. Weapons and anomalies have no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Head,
    Body,
    Hands,
    Feet,
}

/// Final numeric stats of an item. Also used for a base template's raw stats.
///
/// Fields missing from a data file default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub damage: u32,
    pub defense: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub cooldown_reduction: f64,
    pub lifesteal: f64,
    pub dot_damage: f64,
    pub stun_chance: f64,
    pub explosive_chance: f64,
    pub explosive_damage: f64,
    pub resource_regen: f64,
    pub loot_rarity_bonus: f64,
    pub all_stats_bonus: f64,
    pub damage_absorption: f64,
}

/// Relative (`*_pct`) and flat bonuses a prefix grants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixBonuses {
    pub damage_pct: f64,
    pub defense_pct: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub cooldown_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefix {
    pub id: String,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub bonuses: PrefixBonuses,
}

/// What an imbuement does. Each variant feeds exactly one stat field,
/// except `Explosive` which sets both proc chance and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImbuementEffect {
    Lifesteal(f64),
    DamageOverTime(f64),
    StunChance(f64),
    Explosive { chance: f64, magnitude: f64 },
    ResourceRegen(f64),
    LootRarity(f64),
    AllStats(f64),
    DamageAbsorption(f64),
}

impl ImbuementEffect {
    /// Add this effect to the matching stat field.
    pub fn apply(&self, stats: &mut ItemStats) {
        match *self {
            ImbuementEffect::Lifesteal(v) => stats.lifesteal += v,
            ImbuementEffect::DamageOverTime(v) => stats.dot_damage += v,
            ImbuementEffect::StunChance(v) => stats.stun_chance += v,
            ImbuementEffect::Explosive { chance, magnitude } => {
                stats.explosive_chance += chance;
                stats.explosive_damage += magnitude;
            }
            ImbuementEffect::ResourceRegen(v) => stats.resource_regen += v,
            ImbuementEffect::LootRarity(v) => stats.loot_rarity_bonus += v,
            ImbuementEffect::AllStats(v) => stats.all_stats_bonus += v,
            ImbuementEffect::DamageAbsorption(v) => stats.damage_absorption += v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imbuement {
    pub id: String,
    pub name: String,
    pub effect: ImbuementEffect,
    /// Flavor grouping shown next to the imbuement; it does not gate the draw.
    pub rarity_class: Rarity,
}

/// Immutable template every generated item starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseItem {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub slot: Option<ArmorSlot>,
    #[serde(default)]
    pub stats: ItemStats,
    #[serde(default)]
    pub flavor: String,
}

/// A rolled item. Never changes after it is created; the `equipped` flag
/// lives in the owner's inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub unique_id: Uuid,
    pub base_item_id: String,
    pub category: ItemCategory,
    pub slot: Option<ArmorSlot>,
    pub rarity: Rarity,
    pub prefix: Option<Prefix>,
    pub imbuements: Vec<Imbuement>,
    pub stats: ItemStats,
    pub display_name: String,
    pub item_level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_stat_multiplier_strictly_increasing() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0].stat_multiplier() < pair[1].stat_multiplier());
        }
        assert_eq!(Rarity::Common.stat_multiplier(), 1.0);
        assert_eq!(Rarity::Mythic.stat_multiplier(), 4.0);
    }

    #[test]
    fn test_rarity_index_matches_position() {
        for (i, rarity) in Rarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), i);
        }
    }

    #[test]
    fn test_explosive_sets_two_fields() {
        let mut stats = ItemStats::default();
        ImbuementEffect::Explosive {
            chance: 0.1,
            magnitude: 0.5,
        }
        .apply(&mut stats);
        assert_eq!(stats.explosive_chance, 0.1);
        assert_eq!(stats.explosive_damage, 0.5);
    }

    #[test]
    fn test_distinct_effects_stack_in_own_fields() {
        let mut stats = ItemStats::default();
        ImbuementEffect::Lifesteal(0.05).apply(&mut stats);
        ImbuementEffect::Lifesteal(0.03).apply(&mut stats);
        ImbuementEffect::StunChance(0.1).apply(&mut stats);
        assert!((stats.lifesteal - 0.08).abs() < 1e-12);
        assert_eq!(stats.stun_chance, 0.1);
        assert_eq!(stats.dot_damage, 0.0);
    }

    #[test]
    fn test_item_stats_missing_fields_default_to_zero() {
        let stats: ItemStats = serde_json::from_str(r#"{"damage": 8}"#).unwrap();
        assert_eq!(stats.damage, 8);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.crit_multiplier, 0.0);
    }
}
