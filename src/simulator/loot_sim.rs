//! Loot drop simulation using the real roll pipeline.

use crate::error::LootError;
use crate::items::{
    roll_drop_count, roll_item, GeneratedItem, ItemCategory, LootRequest, LootTables, Rarity,
};
use crate::skills::EffectBundle;
use rand::Rng;
use std::collections::BTreeMap;

/// Statistics about loot drops.
#[derive(Debug, Clone, Default)]
pub struct LootStats {
    pub drop_events: u64,
    pub total_drops: u64,
    pub rarity_counts: [u64; 6],
    pub category_counts: [u64; 3],
    pub prefixed_drops: u64,
    pub total_imbuements: u64,
    pub imbuement_counts: BTreeMap<String, u64>,
    pub weapon_damage_sum: u64,
    pub armor_defense_sum: u64,
}

impl LootStats {
    pub fn record_drop(&mut self, item: &GeneratedItem) {
        self.total_drops += 1;
        self.rarity_counts[item.rarity.index()] += 1;
        let category = match item.category {
            ItemCategory::Weapon => 0,
            ItemCategory::Armor => 1,
            ItemCategory::Anomaly => 2,
        };
        self.category_counts[category] += 1;
        if item.prefix.is_some() {
            self.prefixed_drops += 1;
        }
        self.total_imbuements += item.imbuements.len() as u64;
        for imbuement in &item.imbuements {
            *self.imbuement_counts.entry(imbuement.id.clone()).or_insert(0) += 1;
        }
        match item.category {
            ItemCategory::Weapon => self.weapon_damage_sum += item.stats.damage as u64,
            ItemCategory::Armor => self.armor_defense_sum += item.stats.defense as u64,
            ItemCategory::Anomaly => {}
        }
    }

    pub fn record_event(&mut self) {
        self.drop_events += 1;
    }

    pub fn count(&self, rarity: Rarity) -> u64 {
        self.rarity_counts[rarity.index()]
    }

    pub fn category_count(&self, category: ItemCategory) -> u64 {
        match category {
            ItemCategory::Weapon => self.category_counts[0],
            ItemCategory::Armor => self.category_counts[1],
            ItemCategory::Anomaly => self.category_counts[2],
        }
    }

    pub fn drops_per_event(&self) -> f64 {
        if self.drop_events == 0 {
            0.0
        } else {
            self.total_drops as f64 / self.drop_events as f64
        }
    }

    pub fn avg_weapon_damage(&self) -> f64 {
        ratio(self.weapon_damage_sum, self.category_count(ItemCategory::Weapon))
    }

    pub fn avg_armor_defense(&self) -> f64 {
        ratio(self.armor_defense_sum, self.category_count(ItemCategory::Armor))
    }
}

fn ratio(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Roll one drop event: a drop count from the bundle, then that many items.
pub fn roll_drop_event<R: Rng>(
    tables: &LootTables,
    effects: &EffectBundle,
    player_level: u32,
    stats: &mut LootStats,
    rng: &mut R,
) -> Result<(), LootError> {
    stats.record_event();
    let request = LootRequest::new(player_level).with_effects(effects);
    for _ in 0..roll_drop_count(effects, rng) {
        let item = roll_item(tables, &request, rng)?;
        stats.record_drop(&item);
    }
    Ok(())
}
